//! Типизированные ошибки браузера.
//!
//! Каждый вариант имеет стабильный короткий код (`code()`), который попадает
//! в поле `error` у Page и в метрики. Человекочитаемый текст — через Display.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowseError {
    /// Неизвестное имя подключения.
    #[error("connection '{0}' not found")]
    NotFound(String),

    /// Имя уже занято (add или rename на существующее).
    #[error("connection '{0}' already exists")]
    AlreadyExists(String),

    /// Store держит эксклюзивную блокировку другой процесс.
    /// Surfaced verbatim: оператор закрывает конфликтующий процесс и повторяет.
    #[error("store at {} is locked by another process; close the other process and retry", path.display())]
    Locked { path: PathBuf },

    /// Любая другая ошибка открытия store.
    #[error("failed to open store at {}: {reason}", path.display())]
    OpenFailure { path: PathBuf, reason: String },

    /// Невалидный токен пагинации.
    #[error("invalid page cursor: {0}")]
    InvalidCursor(String),

    /// Сбой итератора во время обхода ключей.
    #[error("store iterator fault: {0}")]
    IteratorFailure(String),

    /// Сбой точечного чтения значения.
    #[error("failed to read key '{key}': {reason}")]
    ReadFailure { key: String, reason: String },
}

impl BrowseError {
    /// Стабильный код варианта — контракт для Page.error и метрик.
    pub fn code(&self) -> &'static str {
        match self {
            BrowseError::NotFound(_) => "NotFound",
            BrowseError::AlreadyExists(_) => "AlreadyExists",
            BrowseError::Locked { .. } => "Locked",
            BrowseError::OpenFailure { .. } => "OpenFailure",
            BrowseError::InvalidCursor(_) => "InvalidCursor",
            BrowseError::IteratorFailure(_) => "IteratorFailure",
            BrowseError::ReadFailure { .. } => "ReadFailure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(BrowseError::NotFound("x".into()).code(), "NotFound");
        assert_eq!(BrowseError::AlreadyExists("x".into()).code(), "AlreadyExists");
        assert_eq!(
            BrowseError::Locked {
                path: PathBuf::from("/tmp/db")
            }
            .code(),
            "Locked"
        );
        assert_eq!(
            BrowseError::InvalidCursor("bad".into()).code(),
            "InvalidCursor"
        );
    }
}
