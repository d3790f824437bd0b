//! Версионированный токен пагинации.
//!
//! Токен — base64(STANDARD) поверх [version u8][raw-key bytes]. Явная пара
//! encode/decode вместо голой строки: формат может эволюционировать, не ломая
//! уже выданные токены. Любая ошибка разбора — InvalidCursor.

use base64::Engine;

use crate::consts::CURSOR_VERSION;
use crate::error::BrowseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorToken {
    raw: Vec<u8>,
}

impl CursorToken {
    /// Токен, указывающий на последний отданный сырой ключ.
    pub fn new<K: Into<Vec<u8>>>(raw: K) -> Self {
        Self { raw: raw.into() }
    }

    /// Сырой ключ, после которого продолжается обход.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.raw
    }

    pub fn encode(&self) -> String {
        let mut payload = Vec::with_capacity(1 + self.raw.len());
        payload.push(CURSOR_VERSION);
        payload.extend_from_slice(&self.raw);
        base64::engine::general_purpose::STANDARD.encode(payload)
    }

    pub fn decode(token: &str) -> Result<Self, BrowseError> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(token.trim())
            .map_err(|e| BrowseError::InvalidCursor(format!("base64: {}", e)))?;
        match bytes.split_first() {
            Some((&CURSOR_VERSION, raw)) => Ok(Self { raw: raw.to_vec() }),
            Some((ver, _)) => Err(BrowseError::InvalidCursor(format!(
                "unsupported cursor version {}",
                ver
            ))),
            None => Err(BrowseError::InvalidCursor("empty token".to_string())),
        }
    }
}
