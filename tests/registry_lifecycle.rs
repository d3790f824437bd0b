//! Жизненный цикл реестра подключений поверх настоящих sled-store'ов.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use kvscope::{BrowseConfig, Registry};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let base = std::env::temp_dir();
    base.join(format!("kvscope-reg-{prefix}-{pid}-{t}-{id}"))
}

/// Создать sled-store с парой ключей и закрыть его.
fn seed_store(root: &PathBuf, keys: &[&str]) {
    fs::create_dir_all(root).expect("create root");
    let db = sled::open(root).expect("seed sled");
    for k in keys {
        db.insert(k.as_bytes(), b"v".as_ref()).expect("insert");
    }
    db.flush().expect("flush");
}

#[test]
fn add_list_and_browse() {
    let root = unique_root("add");
    seed_store(&root, &["user:1", "user:2", "logs:1"]);

    let registry = Registry::new();
    registry.add("main", &root).expect("add");

    assert_eq!(registry.names(), vec!["main".to_string()]);
    assert_eq!(registry.paths()["main"], root);

    let buckets = registry.scan_keys_with("main", &BrowseConfig::default());
    assert_eq!(buckets["user"].len(), 2);
    assert_eq!(buckets["logs"].len(), 1);

    registry.close_all();
    assert!(registry.is_empty());
}

#[test]
fn duplicate_add_is_rejected() {
    let root = unique_root("dup");
    seed_store(&root, &["a:1"]);

    let registry = Registry::new();
    registry.add("x", &root).expect("first add");
    let err = registry.add("x", &root).unwrap_err();
    assert_eq!(err.code(), "AlreadyExists");
    registry.close_all();
}

#[test]
fn open_failure_on_missing_path() {
    let registry = Registry::new();
    let err = registry
        .add("nope", &unique_root("missing"))
        .unwrap_err();
    assert_eq!(err.code(), "OpenFailure");
}

#[test]
fn second_open_of_held_store_is_locked() {
    let root = unique_root("lock");
    seed_store(&root, &["a:1"]);

    let registry = Registry::new();
    registry.add("holder", &root).expect("first open");

    // Тот же путь под другим именем: sled-блокировка ещё занята.
    let err = registry.add("second", &root).unwrap_err();
    assert_eq!(err.code(), "Locked");

    registry.close_all();
}

#[test]
fn paths_snapshot_is_isolated() {
    let root_a = unique_root("snap-a");
    let root_b = unique_root("snap-b");
    seed_store(&root_a, &["a:1"]);
    seed_store(&root_b, &["b:1"]);

    let registry = Registry::new();
    registry.add("conn", &root_a).expect("add");

    let snapshot = registry.paths();
    registry
        .update("conn", "", root_b.to_str().unwrap())
        .expect("repoint");

    // Снапшот не видит последующих мутаций.
    assert_eq!(snapshot["conn"], root_a);
    assert_eq!(registry.paths()["conn"], root_b);

    registry.close_all();
}

#[test]
fn rename_reuses_the_live_handle() {
    let root = unique_root("rename");
    seed_store(&root, &["k:1"]);

    let registry = Registry::new();
    registry.add("old", &root).expect("add");
    let before = registry.get("old").expect("get old");

    registry.update("old", "new", "").expect("rename");

    assert_eq!(registry.names(), vec!["new".to_string()]);
    assert!(registry.get("old").is_err());
    let after = registry.get("new").expect("get new");
    // Путь не менялся: тот же store, без reopen.
    assert!(Arc::ptr_eq(&before.store, &after.store));

    registry.close_all();
}

#[test]
fn repoint_opens_before_touching_the_old_entry() {
    let root_a = unique_root("repoint-a");
    let root_b = unique_root("repoint-b");
    seed_store(&root_a, &["a:111"]);
    seed_store(&root_b, &["b:222"]);

    let registry = Registry::new();
    registry.add("conn", &root_a).expect("add");

    // Неоткрываемый путь: старое подключение остаётся нетронутым.
    let bad = unique_root("repoint-bad");
    let err = registry
        .update("conn", "", bad.to_str().unwrap())
        .unwrap_err();
    assert_eq!(err.code(), "OpenFailure");
    let buckets = registry.scan_keys_with("conn", &BrowseConfig::default());
    assert!(buckets.contains_key("a"), "old connection must survive");

    // Успешный repoint: старый хэндл заменён, браузим новый store.
    registry
        .update("conn", "", root_b.to_str().unwrap())
        .expect("repoint");
    let buckets = registry.scan_keys_with("conn", &BrowseConfig::default());
    assert!(buckets.contains_key("b"));
    assert!(!buckets.contains_key("a"));

    // Старый store освобождён: путь снова можно открыть.
    registry.add("again", &root_a).expect("old handle released");

    registry.close_all();
}

#[test]
fn update_unknown_and_taken_names() {
    let root_a = unique_root("upd-a");
    let root_b = unique_root("upd-b");
    seed_store(&root_a, &["a:1"]);
    seed_store(&root_b, &["b:1"]);

    let registry = Registry::new();
    registry.add("a", &root_a).expect("add a");
    registry.add("b", &root_b).expect("add b");

    let err = registry.update("ghost", "x", "").unwrap_err();
    assert_eq!(err.code(), "NotFound");

    let err = registry.update("a", "b", "").unwrap_err();
    assert_eq!(err.code(), "AlreadyExists");

    // Самопереименование в то же имя — no-op без ошибки.
    registry.update("a", "a", "").expect("same-name update");

    registry.close_all();
}

#[test]
fn close_all_is_idempotent() {
    let root = unique_root("close");
    seed_store(&root, &["k:1"]);

    let registry = Registry::new();
    registry.add("conn", &root).expect("add");
    registry.close_all();
    registry.close_all();
    assert!(registry.is_empty());

    // После закрытия путь свободен.
    registry.add("conn", &root).expect("reopen after close");
    registry.close_all();
}

#[test]
fn concurrent_readers_never_observe_half_states() {
    let root = unique_root("conc");
    seed_store(&root, &["k:1", "k:2"]);

    let registry = Registry::new();
    registry.add("conn-0", &root).expect("add");

    std::thread::scope(|s| {
        // Читатели: имена и get должны быть всегда консистентны.
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..200 {
                    for name in registry.names() {
                        if let Ok(conn) = registry.get(&name) {
                            assert_eq!(conn.name, name);
                        }
                    }
                }
            });
        }
        // Писатель: цепочка переименований conn-0 -> conn-1 -> ... -> conn-10.
        s.spawn(|| {
            for i in 0..10 {
                let old = format!("conn-{}", i);
                let new = format!("conn-{}", i + 1);
                registry.update(&old, &new, "").expect("rename chain");
            }
        });
    });

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.names(), vec!["conn-10".to_string()]);
    registry.close_all();
}
