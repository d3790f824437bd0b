//! Инспекция значений: классификация и мульти-форматный рендеринг с
//! жёсткими потолками на размер каждого производного поля.
//!
//! Классификация (порядок веток наблюдаем, менять нельзя):
//! 1. валидный UTF-8 и валидный JSON -> json;
//! 2. валидный UTF-8 и printable ratio > порога -> string;
//! 3. иначе -> binary.
//!
//! Рендеринг никогда не тянет в текстовые поля больше, чем их капы,
//! независимо от исходного размера значения: выше MAX_VALUE_DISPLAY в
//! обработку идёт только preview-префикс; hex/base64 имеют собственные
//! независимые пороги; binary отдаёт только сводку размера.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_BASE64_DISPLAY, MAX_HEX_DISPLAY, MAX_PREVIEW, MAX_VALUE_DISPLAY};
use crate::error::BrowseError;
use crate::keys::decode_display_key;
use crate::metrics::{record_value_read_failure, record_value_rendered};
use crate::registry::Registry;
use crate::util::{encode_hex, format_bytes, is_mostly_printable, truncate_with_notice};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Json,
    String,
    Binary,
    Error,
}

/// Представление значения для оператора. Все текстовые поля ограничены
/// своими капами вне зависимости от size.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueView {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: ValueKind,
    pub value: String,
    pub value_hex: String,
    pub value_base64: String,
    /// Исходный размер значения в байтах (до любых усечений).
    pub size: usize,
    pub is_truncated: bool,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub truncated_msg: String,
}

impl ValueView {
    /// Error-классифицированное представление: точечный сбой чтения не
    /// роняет вызов, а отдаётся как view.
    pub fn error(key: &str, message: String) -> Self {
        Self {
            key: key.to_string(),
            kind: ValueKind::Error,
            value: message,
            value_hex: String::new(),
            value_base64: String::new(),
            size: 0,
            is_truncated: false,
            truncated_msg: String::new(),
        }
    }
}

/// Классификация сырого значения. Тотальная, Error не возвращает.
pub fn classify(raw: &[u8]) -> ValueKind {
    if let Ok(text) = std::str::from_utf8(raw) {
        if serde_json::from_slice::<serde_json::Value>(raw).is_ok() {
            return ValueKind::Json;
        }
        if is_mostly_printable(text) {
            return ValueKind::String;
        }
    }
    ValueKind::Binary
}

/// Отрендерить значение под display-ключом.
pub fn render(display_key: &str, raw: &[u8]) -> ValueView {
    let original_size = raw.len();
    let kind = classify(raw);

    let mut is_truncated = false;
    let mut truncated_msg = String::new();

    // Сверх жёсткого максимума в обработку идёт только preview-префикс.
    let shown: &[u8] = if original_size > MAX_VALUE_DISPLAY {
        is_truncated = true;
        truncated_msg = format!(
            "value size ({}) exceeds the display limit ({}); showing a preview only, use export to fetch the full value",
            format_bytes(original_size),
            format_bytes(MAX_VALUE_DISPLAY)
        );
        &raw[..MAX_PREVIEW]
    } else {
        raw
    };

    let value = match kind {
        ValueKind::Json => {
            // Pretty-print 2-м отступом; после pre-truncation JSON мог
            // перестать парситься — тогда отдаём усечённый сырой текст.
            match serde_json::from_slice::<serde_json::Value>(shown) {
                Ok(parsed) => {
                    let pretty =
                        serde_json::to_string_pretty(&parsed).unwrap_or_default();
                    let (text, notice) =
                        truncate_with_notice(pretty, MAX_PREVIEW, original_size);
                    if !notice.is_empty() {
                        is_truncated = true;
                        truncated_msg = notice;
                    }
                    text
                }
                Err(_) => String::from_utf8_lossy(shown).into_owned(),
            }
        }
        ValueKind::String => {
            let (text, notice) = truncate_with_notice(
                String::from_utf8_lossy(shown).into_owned(),
                MAX_PREVIEW,
                original_size,
            );
            if !notice.is_empty() {
                is_truncated = true;
                truncated_msg = notice;
            }
            text
        }
        // Сырые байты в value не попадают никогда — только сводка.
        ValueKind::Binary => format!("[binary data, {}]", format_bytes(original_size)),
        ValueKind::Error => unreachable!("classify never yields Error"),
    };

    let value_hex = if original_size <= MAX_HEX_DISPLAY {
        encode_hex(shown)
    } else {
        format!(
            "[too large for hex display, {}; use export to fetch the full value]",
            format_bytes(original_size)
        )
    };

    let value_base64 = if original_size <= MAX_BASE64_DISPLAY {
        base64::engine::general_purpose::STANDARD.encode(shown)
    } else {
        format!(
            "[too large for base64 display, {}; use export to fetch the full value]",
            format_bytes(original_size)
        )
    };

    record_value_rendered(is_truncated);
    ValueView {
        key: display_key.to_string(),
        kind,
        value,
        value_hex,
        value_base64,
        size: original_size,
        is_truncated,
        truncated_msg,
    }
}

impl Registry {
    /// Значение под display-ключом. Любой сбой (нет подключения, нет ключа,
    /// ошибка чтения) — error-view, не жёсткая ошибка.
    pub fn value_view(&self, name: &str, display_key: &str) -> ValueView {
        let conn = match self.get(name) {
            Ok(conn) => conn,
            Err(e) => {
                record_value_read_failure();
                return ValueView::error(display_key, e.to_string());
            }
        };
        let raw_key = decode_display_key(display_key);
        match conn.store.get(&raw_key) {
            Ok(Some(value)) => render(display_key, &value),
            Ok(None) => {
                record_value_read_failure();
                ValueView::error(display_key, format!("key '{}' not found", display_key))
            }
            Err(e) => {
                record_value_read_failure();
                ValueView::error(display_key, format!("error reading value: {}", e))
            }
        }
    }

    /// Экспортный путь: сырые байты значения как есть. Файловый вывод —
    /// забота вызывающего, движок файловую систему не трогает.
    pub fn fetch_raw(&self, name: &str, display_key: &str) -> Result<Vec<u8>, BrowseError> {
        let conn = self.get(name)?;
        let raw_key = decode_display_key(display_key);
        match conn.store.get(&raw_key)? {
            Some(value) => Ok(value),
            None => Err(BrowseError::ReadFailure {
                key: display_key.to_string(),
                reason: "key not found".to_string(),
            }),
        }
    }
}
