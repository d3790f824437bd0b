//! Sled-бэкенд: один keyspace (default tree), порядок — байтовый лексикографический.
//!
//! sled не имеет настоящего read-only режима открытия, поэтому:
//! - open_ro() отказывается открывать путь, где store ещё не существует
//!   (sled молча создал бы новый — для браузера это недопустимо);
//! - движок не зовёт ни одной мутирующей операции.
//!
//! Контендинг по файловой блокировке (store открыт другим процессом)
//! маппится в BrowseError::Locked.

use std::ops::Bound;
use std::path::{Path, PathBuf};

use crate::error::BrowseError;
use crate::store::{KeyIter, Store};

pub struct SledStore {
    db: sled::Db,
    path: PathBuf,
}

impl SledStore {
    /// Открыть существующий store. Не создаёт новый по несуществующему пути.
    pub fn open_ro(path: &Path) -> Result<Self, BrowseError> {
        if !path.is_dir() {
            return Err(BrowseError::OpenFailure {
                path: path.to_path_buf(),
                reason: "no store at this path".to_string(),
            });
        }
        let db = sled::Config::new()
            .path(path)
            .open()
            .map_err(|e| map_open_error(path, e))?;
        Ok(Self {
            db,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for SledStore {
    fn keys_after(&self, after: Option<&[u8]>) -> KeyIter<'_> {
        let iter = match after {
            None => self.db.iter(),
            Some(k) => self
                .db
                .range::<&[u8], _>((Bound::Excluded(k), Bound::Unbounded)),
        };
        Box::new(iter.keys().map(|res| {
            res.map(|ivec| ivec.to_vec())
                .map_err(|e| BrowseError::IteratorFailure(e.to_string()))
        }))
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, BrowseError> {
        self.db
            .get(key)
            .map(|opt| opt.map(|ivec| ivec.to_vec()))
            .map_err(|e| BrowseError::ReadFailure {
                key: String::from_utf8_lossy(key).into_owned(),
                reason: e.to_string(),
            })
    }
}

/// Развести lock-contention и остальные ошибки открытия.
fn map_open_error(path: &Path, e: sled::Error) -> BrowseError {
    if let sled::Error::Io(ref io) = e {
        let msg = io.to_string();
        if io.kind() == std::io::ErrorKind::WouldBlock || msg.contains("could not acquire lock") {
            return BrowseError::Locked {
                path: path.to_path_buf(),
            };
        }
    }
    BrowseError::OpenFailure {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}
