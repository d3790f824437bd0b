// Базовые модули
pub mod consts;
pub mod config;
pub mod error;
pub mod metrics;

// Store seam (трейт + бэкенды: sled / in-memory)
pub mod store;

// Ключи: display-кодек и префиксные бакеты
pub mod keys;

// Браузинг: курсор, реестр подключений, скан, пагинация, значения, статистика
pub mod cursor;
pub mod registry;
pub mod scan;
pub mod page;
pub mod value;
pub mod stats;

// Утилиты (printable ratio, format_bytes, hex, truncation)
pub mod util;

// Удобные реэкспорты
pub use config::BrowseConfig;
pub use cursor::CursorToken;
pub use error::BrowseError;
pub use page::Page;
pub use registry::{Connection, Registry};
pub use stats::StoreStats;
pub use store::{MemStore, SledStore, Store};
pub use value::{ValueKind, ValueView};
