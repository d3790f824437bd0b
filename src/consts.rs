//! Общие константы браузера (scan caps, display keys, value rendering).

// -------- Scan caps --------
// Defaults match the documented tunables; env overrides in config.rs.
pub const DEFAULT_MAX_KEYS_TOTAL: usize = 5000;
pub const DEFAULT_MAX_KEYS_PER_PREFIX: usize = 500;

pub const ENV_MAX_KEYS_TOTAL: &str = "KVSCOPE_MAX_KEYS_TOTAL";
pub const ENV_MAX_KEYS_PER_PREFIX: &str = "KVSCOPE_MAX_KEYS_PER_PREFIX";

// -------- Display keys --------
// Ключ показывается как текст, если он валидный UTF-8 и доля printable-символов
// (0x20..=0x7E, '\n', '\t') строго больше порога. Иначе — "0x" + hex.
pub const HEX_KEY_PREFIX: &str = "0x";
pub const PRINTABLE_RATIO: f64 = 0.95;

// -------- Prefix buckets --------
// Эвристические длины меток; порядок веток фиксирован (см. keys/prefix.rs).
pub const HEX_BUCKET_LEN: usize = 6;
pub const TEXT_BUCKET_LEN: usize = 4;
pub const MISC_BUCKET: &str = "misc";

// -------- Value rendering --------
// Жёсткий максимум на размер, который вообще участвует в рендеринге;
// больше — режем до preview-префикса.
pub const MAX_VALUE_DISPLAY: usize = 1024 * 1024;
pub const MAX_PREVIEW: usize = 100 * 1024;
// Независимые пороги для hex/base64 представлений.
pub const MAX_HEX_DISPLAY: usize = 50 * 1024;
pub const MAX_BASE64_DISPLAY: usize = 50 * 1024;

// -------- Pagination --------
pub const CURSOR_VERSION: u8 = 1;

// -------- Stats --------
// Summary pass не обходит больше этого числа ключей за вызов.
pub const STATS_MAX_KEYS: usize = 100_000;
