//! Курсорная пагинация: инвариант полного обхода, невалидные курсоры,
//! границы keyspace.

use std::path::Path;
use std::sync::Arc;

use kvscope::page::page_store;
use kvscope::store::{KeyIter, MemStore, Store};
use kvscope::{BrowseError, Registry};

fn fixture_store() -> MemStore {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for i in 0..60 {
        pairs.push((format!("logs:{:04}", i), format!("l{}", i)));
    }
    for i in 0..10 {
        pairs.push((format!("order:{:04}", i), format!("o{}", i)));
    }
    for i in 0..30 {
        pairs.push((format!("user:{:04}", i), format!("u{}", i)));
    }
    MemStore::from_pairs(pairs)
}

/// Полный обход: пустой курсор, дальше по nextCursor до hasMore=false.
/// Группировка по бакетам не сохраняет межбакетный порядок внутри страницы,
/// поэтому собираем всё и сверяем отсортированный список.
fn full_sweep(store: &dyn Store, limit: usize) -> Vec<String> {
    let mut seen = Vec::new();
    let mut cursor = String::new();
    loop {
        let page = page_store(store, &cursor, limit);
        assert!(page.is_ok(), "unexpected page error: {}", page.error);
        assert!(page.count <= limit.max(1));
        let mut page_total = 0usize;
        for keys in page.buckets.values() {
            page_total += keys.len();
            seen.extend(keys.iter().cloned());
        }
        assert_eq!(page_total, page.count);
        if !page.has_more {
            assert!(page.next_cursor.is_empty());
            break;
        }
        assert!(!page.next_cursor.is_empty());
        cursor = page.next_cursor;
    }
    seen
}

#[test]
fn sweep_visits_every_key_exactly_once_for_any_limit() {
    let store = fixture_store();
    let mut expected: Vec<String> = Vec::new();
    for i in 0..60 {
        expected.push(format!("logs:{:04}", i));
    }
    for i in 0..10 {
        expected.push(format!("order:{:04}", i));
    }
    for i in 0..30 {
        expected.push(format!("user:{:04}", i));
    }

    for limit in [1usize, 3, 7, 33, 100, 1000] {
        let mut seen = full_sweep(&store, limit);
        seen.sort();
        let mut want = expected.clone();
        want.sort();
        assert_eq!(seen, want, "limit={}", limit);
    }
}

#[test]
fn pages_follow_native_order_across_cursor_boundaries() {
    let store = fixture_store();
    // limit=10: первая страница — ровно logs:0000..0009, вторая начинается
    // строго после последнего отданного ключа.
    let first = page_store(&store, "", 10);
    assert_eq!(first.count, 10);
    assert!(first.has_more);
    assert_eq!(first.buckets["logs"].len(), 10);
    assert_eq!(first.buckets["logs"][9], "logs:0009");

    let second = page_store(&store, &first.next_cursor, 10);
    assert_eq!(second.buckets["logs"][0], "logs:0010");
}

#[test]
fn invalid_cursor_is_reported_with_no_keys() {
    let store = fixture_store();
    let page = page_store(&store, "not-base64", 5);
    assert_eq!(page.error, "InvalidCursor");
    assert_eq!(page.count, 0);
    assert!(page.buckets.is_empty());
    assert!(!page.has_more);
}

#[test]
fn unknown_connection_page() {
    let registry = Registry::new();
    let page = registry.page_keys("ghost", "", 5);
    assert_eq!(page.error, "NotFound");
    assert_eq!(page.count, 0);
}

#[test]
fn zero_limit_is_clamped_to_one() {
    let store = fixture_store();
    let page = page_store(&store, "", 0);
    assert!(page.is_ok());
    assert_eq!(page.count, 1);
    assert!(page.has_more);
}

#[test]
fn exact_boundary_has_no_phantom_page() {
    let store = MemStore::from_pairs([("a:1", "1"), ("a:2", "2"), ("a:3", "3")]);
    let page = page_store(&store, "", 3);
    assert_eq!(page.count, 3);
    assert!(!page.has_more);
    assert!(page.next_cursor.is_empty());
}

#[test]
fn empty_store_yields_empty_terminal_page() {
    let store = MemStore::new();
    let page = page_store(&store, "", 5);
    assert!(page.is_ok());
    assert_eq!(page.count, 0);
    assert!(!page.has_more);
    assert!(page.buckets.is_empty());
}

#[test]
fn binary_keys_survive_the_cursor_roundtrip() {
    // Ключи, уходящие в hex-ветку display-кодека: курсор носит СЫРОЙ ключ,
    // поэтому обход не зависит от display-формы.
    let store = MemStore::from_pairs([
        (vec![0x00u8, 0x01], b"a".to_vec()),
        (vec![0x00u8, 0xff], b"b".to_vec()),
        (vec![0xffu8, 0x00], b"c".to_vec()),
    ]);
    let seen = full_sweep(&store, 1);
    assert_eq!(seen.len(), 3);
    assert!(seen.contains(&"0x0001".to_string()));
    assert!(seen.contains(&"0x00ff".to_string()));
    assert!(seen.contains(&"0xff00".to_string()));
}

/// Итератор, который падает на probe-шаге.
struct FaultyStore;

impl Store for FaultyStore {
    fn keys_after(&self, _after: Option<&[u8]>) -> KeyIter<'_> {
        Box::new((0..3).map(|i| {
            if i < 2 {
                Ok(format!("k:{}", i).into_bytes())
            } else {
                Err(BrowseError::IteratorFailure("boom".to_string()))
            }
        }))
    }

    fn get(&self, _key: &[u8]) -> Result<Option<Vec<u8>>, BrowseError> {
        Ok(None)
    }
}

#[test]
fn iterator_fault_fails_the_page() {
    // Сбой на третьем ключе: и при limit=2 (probe), и при limit=5 (consume)
    // страница закрывается ошибкой без ключей.
    for limit in [2usize, 5] {
        let page = page_store(&FaultyStore, "", limit);
        assert_eq!(page.error, "IteratorFailure", "limit={}", limit);
        assert_eq!(page.count, 0);
        assert!(page.buckets.is_empty());
    }
}

#[test]
fn page_through_registry_with_mem_store() {
    let registry = Registry::new();
    registry
        .add_store("fix", Path::new("/mem/fix"), Arc::new(fixture_store()))
        .expect("add mem store");
    let page = registry.page_keys("fix", "", 25);
    assert!(page.is_ok());
    assert_eq!(page.count, 25);
    assert!(page.has_more);
    registry.close_all();
}
