//! Курсорная пагинация: возобновляемый форвард-обход keyspace страницами
//! фиксированного размера.
//!
//! Page — закрытый read-only снапшот; после конструирования не мутируется.
//! Ошибки складываются в поле error стабильным кодом (`BrowseError::code()`),
//! "" — успех. Инвариант: обход с пустого курсора по nextCursor до
//! hasMore=false отдаёт каждый ключ store ровно один раз, в нативном порядке
//! (store открыт read-only, писателей нет).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cursor::CursorToken;
use crate::error::BrowseError;
use crate::keys::{bucket_label, encode_display_key};
use crate::metrics::{record_invalid_cursor, record_iterator_fault, record_page_served};
use crate::registry::Registry;
use crate::store::Store;

/// Одна страница обхода keyspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Метка бакета -> display-ключи в порядке обхода.
    pub buckets: BTreeMap<String, Vec<String>>,
    /// Сколько ключей реально отдано (может быть меньше limit в конце).
    pub count: usize,
    /// Есть ли ключи за пределами этой страницы.
    pub has_more: bool,
    /// Токен продолжения; "" на последней странице.
    pub next_cursor: String,
    /// "" — успех, иначе стабильный код ошибки.
    pub error: String,
}

impl Page {
    fn empty() -> Self {
        Self {
            buckets: BTreeMap::new(),
            count: 0,
            has_more: false,
            next_cursor: String::new(),
            error: String::new(),
        }
    }

    fn failed(err: &BrowseError) -> Self {
        Self {
            error: err.code().to_string(),
            ..Self::empty()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_empty()
    }
}

/// Одна страница обхода store. Пустой cursor — начало keyspace; limit
/// поднимается до 1.
pub fn page_store(store: &dyn Store, cursor: &str, limit: usize) -> Page {
    let limit = limit.max(1);

    let after = if cursor.is_empty() {
        None
    } else {
        match CursorToken::decode(cursor) {
            Ok(token) => Some(token.into_raw()),
            Err(e) => {
                record_invalid_cursor();
                return Page::failed(&e);
            }
        }
    };

    let mut iter = store.keys_after(after.as_deref());

    let mut buckets: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut count = 0usize;
    let mut last_raw: Option<Vec<u8>> = None;

    while count < limit {
        match iter.next() {
            Some(Ok(raw)) => {
                let display = encode_display_key(&raw);
                buckets.entry(bucket_label(&display)).or_default().push(display);
                last_raw = Some(raw);
                count += 1;
            }
            Some(Err(e)) => {
                record_iterator_fault();
                return Page::failed(&e);
            }
            None => break,
        }
    }

    // Проба "есть ли ещё": ровно один шаг за пределы страницы.
    let (has_more, next_cursor) = match iter.next() {
        Some(Ok(_)) => {
            let last = last_raw.expect("probe after at least one consumed key");
            (true, CursorToken::new(last).encode())
        }
        Some(Err(e)) => {
            record_iterator_fault();
            return Page::failed(&e);
        }
        None => (false, String::new()),
    };

    record_page_served(count as u64);
    Page {
        buckets,
        count,
        has_more,
        next_cursor,
        error: String::new(),
    }
}

impl Registry {
    /// Страница обхода по имени подключения.
    pub fn page_keys(&self, name: &str, cursor: &str, limit: usize) -> Page {
        match self.get(name) {
            Ok(conn) => page_store(conn.store.as_ref(), cursor, limit),
            Err(e) => Page::failed(&e),
        }
    }
}
