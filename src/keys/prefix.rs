//! Префиксная метка display-ключа.
//!
//! Тотальная чистая функция; порядок веток фиксирован — он наблюдаем
//! в группировке листингов, менять нельзя.

use crate::consts::{HEX_BUCKET_LEN, HEX_KEY_PREFIX, MISC_BUCKET, TEXT_BUCKET_LEN};

/// Метка бакета для display-ключа.
/// 1. ':' на позиции > 0 — всё до первого ':'.
/// 2. "0x"-ключ длиннее 6 символов — первые 6.
/// 3. Длиннее 4 символов — первые 4.
/// 4. Иначе "misc".
pub fn bucket_label(display: &str) -> String {
    if let Some(idx) = display.find(':') {
        if idx > 0 {
            return display[..idx].to_string();
        }
    }
    let chars = display.chars().count();
    if display.starts_with(HEX_KEY_PREFIX) && chars > HEX_BUCKET_LEN {
        return display.chars().take(HEX_BUCKET_LEN).collect();
    }
    if chars > TEXT_BUCKET_LEN {
        return display.chars().take(TEXT_BUCKET_LEN).collect();
    }
    MISC_BUCKET.to_string()
}
