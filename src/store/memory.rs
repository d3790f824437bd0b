//! In-memory бэкенд: иммутабельный снапшот поверх BTreeMap.
//!
//! Для тестов и встраивания; порядок ключей совпадает со sled
//! (лексикографический по байтам).

use std::collections::BTreeMap;
use std::ops::Bound;

use crate::error::BrowseError;
use crate::store::{KeyIter, Store};

#[derive(Debug, Default, Clone)]
pub struct MemStore {
    map: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Собрать снапшот из пар (key, value).
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<Vec<u8>>,
        V: Into<Vec<u8>>,
        I: IntoIterator<Item = (K, V)>,
    {
        let map = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Store for MemStore {
    fn keys_after(&self, after: Option<&[u8]>) -> KeyIter<'_> {
        match after {
            None => Box::new(self.map.keys().map(|k| Ok(k.clone()))),
            Some(k) => {
                let range = (Bound::Excluded(k.to_vec()), Bound::Unbounded);
                Box::new(self.map.range(range).map(|(k, _)| Ok(k.clone())))
            }
        }
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, BrowseError> {
        Ok(self.map.get(key).cloned())
    }
}
