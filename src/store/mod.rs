//! store — seam между движком браузинга и конкретным KV-бэкендом.
//!
//! Движок потребляет store строго read-only: упорядоченный обход ключей
//! и точечный get. Бэкенды:
//! - SledStore: продакшен (sled, один keyspace, lexicographic byte order).
//! - MemStore: иммутабельный BTreeMap-снапшот для тестов и встраивания.
//!
//! Итератор моделируется как Iterator<Item = Result<..>>: Err — это Error()
//! коллаборатора, Drop — его Close.

mod memory;
mod sled_store;

pub use memory::MemStore;
pub use sled_store::SledStore;

use crate::error::BrowseError;

pub type KeyIter<'a> = Box<dyn Iterator<Item = Result<Vec<u8>, BrowseError>> + Send + 'a>;

/// Открытый read-only store. Обход безопасен для конкурентных читателей.
pub trait Store: Send + Sync {
    /// Ключи в нативном (лексикографическом) порядке.
    /// `after=None` — с первого ключа; `after=Some(k)` — строго после k.
    fn keys_after(&self, after: Option<&[u8]>) -> KeyIter<'_>;

    /// Точечное чтение значения. Ok(None) — ключа нет.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, BrowseError>;
}
