//! util — общие утилиты (вынесено из разных модулей).
//!
//! Содержит:
//! - printable_ratio() / is_mostly_printable(): доля printable-символов в строке.
//! - format_bytes(): человекочитаемый размер.
//! - truncate_with_notice(): усечение текста по границе символа + notice.
//! - encode_hex() / decode_hex(): hex-кодек без внешних зависимостей.

use crate::consts::PRINTABLE_RATIO;

/// Доля printable-символов (0x20..=0x7E, '\n', '\t') среди всех символов строки.
/// Пустая строка даёт 0.0.
pub fn printable_ratio(s: &str) -> f64 {
    let mut total = 0usize;
    let mut printable = 0usize;
    for c in s.chars() {
        total += 1;
        if (' '..='~').contains(&c) || c == '\n' || c == '\t' {
            printable += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        printable as f64 / total as f64
    }
}

/// Строка "в основном printable": ratio строго больше порога.
#[inline]
pub fn is_mostly_printable(s: &str) -> bool {
    printable_ratio(s) > PRINTABLE_RATIO
}

/// Человекочитаемый размер: "123 B", "1.5 KB", "2.0 MB", ...
pub fn format_bytes(bytes: usize) -> String {
    const UNIT: usize = 1024;
    if bytes < UNIT {
        return format!("{} B", bytes);
    }
    let mut div = UNIT;
    let mut exp = 0usize;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    let units = ['K', 'M', 'G', 'T', 'P', 'E'];
    format!("{:.1} {}B", bytes as f64 / div as f64, units[exp])
}

/// Усечь текст до cap байт (не разрывая UTF-8 символ) и вернуть notice.
/// Если текст помещается — notice пустой.
pub fn truncate_with_notice(text: String, cap: usize, original_size: usize) -> (String, String) {
    if text.len() <= cap {
        return (text, String::new());
    }
    let mut end = cap;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    let notice = format!(
        "\n\n... (truncated: showing {} of {}; use export to fetch the full value)",
        format_bytes(end),
        format_bytes(original_size)
    );
    (text[..end].to_string(), notice)
}

/// Lowercase hex без префикса.
pub fn encode_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

/// Разобрать hex-строку (чётная длина, [0-9a-fA-F]). None при любом нарушении.
pub fn decode_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    let b = s.as_bytes();
    let mut out = Vec::with_capacity(s.len() / 2);
    let mut i = 0;
    while i < b.len() {
        let hi = (b[i] as char).to_digit(16)?;
        let lo = (b[i + 1] as char).to_digit(16)?;
        out.push(((hi << 4) | lo) as u8);
        i += 2;
    }
    Some(out)
}
