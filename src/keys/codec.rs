//! Кодек display-ключей: сырые байты <-> строка для оператора.
//!
//! Encode: валидный UTF-8 с printable ratio > порога — отдаём как есть;
//! иначе "0x" + hex. Decode тотален и никогда не падает.
//!
//! Известное ограничение: литеральный ключ, который сам начинается с "0x" и
//! при этом hex-декодируется, не round-trip'ится (decode уйдёт в hex-ветку).
//! Это унаследованная неоднозначность формата; устранять её — значит
//! переинтерпретировать существующие on-disk ключи.

use crate::consts::HEX_KEY_PREFIX;
use crate::util::{decode_hex, encode_hex, is_mostly_printable};

/// Строковая форма сырого ключа.
pub fn encode_display_key(raw: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(raw) {
        if is_mostly_printable(text) {
            return text.to_string();
        }
    }
    format!("{}{}", HEX_KEY_PREFIX, encode_hex(raw))
}

/// Обратное преобразование display-ключа в сырые байты.
/// "0x"-префикс — попытка hex-декода; при неудаче строка берётся литерально.
pub fn decode_display_key(display: &str) -> Vec<u8> {
    if let Some(hex) = display.strip_prefix(HEX_KEY_PREFIX) {
        if let Some(raw) = decode_hex(hex) {
            return raw;
        }
    }
    display.as_bytes().to_vec()
}
