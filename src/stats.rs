//! Сводка по store: количество ключей (с капом), первый/последний ключ.
//!
//! Best-effort summary pass: сбой итератора завершает проход, частичные
//! цифры остаются валидными, сам сбой — в iter_error.

use serde::{Deserialize, Serialize};

use crate::consts::STATS_MAX_KEYS;
use crate::error::BrowseError;
use crate::keys::encode_display_key;
use crate::metrics::record_iterator_fault;
use crate::registry::Registry;
use crate::store::Store;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    /// Ключей насчитано (не больше STATS_MAX_KEYS).
    pub total_keys: usize,
    pub first_key: String,
    pub last_key: String,
    /// true — проход упёрся в cap, реальное количество больше.
    pub truncated: bool,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub iter_error: String,
}

/// Один форвард-проход по ключам с капом STATS_MAX_KEYS.
pub fn store_stats(store: &dyn Store) -> StoreStats {
    let mut stats = StoreStats::default();

    for item in store.keys_after(None) {
        let raw = match item {
            Ok(raw) => raw,
            Err(e) => {
                record_iterator_fault();
                stats.iter_error = e.to_string();
                break;
            }
        };
        if stats.total_keys == 0 {
            stats.first_key = encode_display_key(&raw);
        }
        stats.last_key = encode_display_key(&raw);
        stats.total_keys += 1;

        if stats.total_keys >= STATS_MAX_KEYS {
            stats.truncated = true;
            break;
        }
    }

    stats
}

impl Registry {
    /// Сводка по имени подключения.
    pub fn stats(&self, name: &str) -> Result<StoreStats, BrowseError> {
        let conn = self.get(name)?;
        Ok(store_stats(conn.store.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{KeyIter, MemStore};

    #[test]
    fn counts_and_endpoints() {
        let store = MemStore::from_pairs([("a:1", "1"), ("b:2", "2"), ("c:3", "3")]);
        let stats = store_stats(&store);
        assert_eq!(stats.total_keys, 3);
        assert_eq!(stats.first_key, "a:1");
        assert_eq!(stats.last_key, "c:3");
        assert!(!stats.truncated);
        assert!(stats.iter_error.is_empty());
    }

    #[test]
    fn empty_store() {
        let stats = store_stats(&MemStore::new());
        assert_eq!(stats.total_keys, 0);
        assert!(stats.first_key.is_empty());
        assert!(stats.last_key.is_empty());
    }

    struct Faulty;

    impl Store for Faulty {
        fn keys_after(&self, _after: Option<&[u8]>) -> KeyIter<'_> {
            Box::new(
                [
                    Ok(b"k:1".to_vec()),
                    Err(BrowseError::IteratorFailure("boom".to_string())),
                ]
                .into_iter(),
            )
        }

        fn get(&self, _key: &[u8]) -> Result<Option<Vec<u8>>, BrowseError> {
            Ok(None)
        }
    }

    #[test]
    fn fault_keeps_partial_counts() {
        let stats = store_stats(&Faulty);
        assert_eq!(stats.total_keys, 1);
        assert_eq!(stats.first_key, "k:1");
        assert_eq!(stats.iter_error, "store iterator fault: boom");
    }
}
