//! Lightweight global metrics for the browsing engine.
//!
//! Потокобезопасные атомарные счётчики для подсистем:
//! - Registry (open/close/open failures)
//! - Bounded scanner
//! - Cursor pager
//! - Value inspector

use std::sync::atomic::{AtomicU64, Ordering};

// ----- Registry -----
static CONNECTIONS_OPENED: AtomicU64 = AtomicU64::new(0);
static CONNECTIONS_CLOSED: AtomicU64 = AtomicU64::new(0);
static OPEN_FAILURES: AtomicU64 = AtomicU64::new(0);
static OPEN_LOCKED: AtomicU64 = AtomicU64::new(0);

// ----- Bounded scanner -----
static SCANS_TOTAL: AtomicU64 = AtomicU64::new(0);
static SCAN_KEYS_PROCESSED: AtomicU64 = AtomicU64::new(0);
static SCAN_KEYS_STORED: AtomicU64 = AtomicU64::new(0);
static SCAN_KEYS_DROPPED: AtomicU64 = AtomicU64::new(0);
static SCAN_GLOBAL_TRUNCATIONS: AtomicU64 = AtomicU64::new(0);
static ITERATOR_FAULTS: AtomicU64 = AtomicU64::new(0);

// ----- Cursor pager -----
static PAGES_SERVED: AtomicU64 = AtomicU64::new(0);
static PAGE_KEYS_RETURNED: AtomicU64 = AtomicU64::new(0);
static INVALID_CURSORS: AtomicU64 = AtomicU64::new(0);

// ----- Value inspector -----
static VALUES_RENDERED: AtomicU64 = AtomicU64::new(0);
static VALUES_TRUNCATED: AtomicU64 = AtomicU64::new(0);
static VALUE_READ_FAILURES: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    // Registry
    pub connections_opened: u64,
    pub connections_closed: u64,
    pub open_failures: u64,
    pub open_locked: u64,

    // Scanner
    pub scans_total: u64,
    pub scan_keys_processed: u64,
    pub scan_keys_stored: u64,
    pub scan_keys_dropped: u64,
    pub scan_global_truncations: u64,
    pub iterator_faults: u64,

    // Pager
    pub pages_served: u64,
    pub page_keys_returned: u64,
    pub invalid_cursors: u64,

    // Values
    pub values_rendered: u64,
    pub values_truncated: u64,
    pub value_read_failures: u64,
}

impl MetricsSnapshot {
    pub fn avg_keys_per_page(&self) -> f64 {
        if self.pages_served == 0 {
            0.0
        } else {
            self.page_keys_returned as f64 / self.pages_served as f64
        }
    }

    pub fn scan_drop_ratio(&self) -> f64 {
        if self.scan_keys_processed == 0 {
            0.0
        } else {
            self.scan_keys_dropped as f64 / self.scan_keys_processed as f64
        }
    }
}

// ----- Recorders (Registry) -----
pub fn record_connection_opened() {
    CONNECTIONS_OPENED.fetch_add(1, Ordering::Relaxed);
}
pub fn record_connections_closed(n: u64) {
    CONNECTIONS_CLOSED.fetch_add(n, Ordering::Relaxed);
}
pub fn record_open_failure() {
    OPEN_FAILURES.fetch_add(1, Ordering::Relaxed);
}
pub fn record_open_locked() {
    OPEN_LOCKED.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (Scanner) -----
pub fn record_scan(processed: u64, stored: u64, dropped: u64) {
    SCANS_TOTAL.fetch_add(1, Ordering::Relaxed);
    SCAN_KEYS_PROCESSED.fetch_add(processed, Ordering::Relaxed);
    SCAN_KEYS_STORED.fetch_add(stored, Ordering::Relaxed);
    SCAN_KEYS_DROPPED.fetch_add(dropped, Ordering::Relaxed);
}
pub fn record_scan_global_truncation() {
    SCAN_GLOBAL_TRUNCATIONS.fetch_add(1, Ordering::Relaxed);
}
pub fn record_iterator_fault() {
    ITERATOR_FAULTS.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (Pager) -----
pub fn record_page_served(keys: u64) {
    PAGES_SERVED.fetch_add(1, Ordering::Relaxed);
    PAGE_KEYS_RETURNED.fetch_add(keys, Ordering::Relaxed);
}
pub fn record_invalid_cursor() {
    INVALID_CURSORS.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (Values) -----
pub fn record_value_rendered(truncated: bool) {
    VALUES_RENDERED.fetch_add(1, Ordering::Relaxed);
    if truncated {
        VALUES_TRUNCATED.fetch_add(1, Ordering::Relaxed);
    }
}
pub fn record_value_read_failure() {
    VALUE_READ_FAILURES.fetch_add(1, Ordering::Relaxed);
}

/// Снять консистентный (по Relaxed-чтению) снапшот всех счётчиков.
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        connections_opened: CONNECTIONS_OPENED.load(Ordering::Relaxed),
        connections_closed: CONNECTIONS_CLOSED.load(Ordering::Relaxed),
        open_failures: OPEN_FAILURES.load(Ordering::Relaxed),
        open_locked: OPEN_LOCKED.load(Ordering::Relaxed),

        scans_total: SCANS_TOTAL.load(Ordering::Relaxed),
        scan_keys_processed: SCAN_KEYS_PROCESSED.load(Ordering::Relaxed),
        scan_keys_stored: SCAN_KEYS_STORED.load(Ordering::Relaxed),
        scan_keys_dropped: SCAN_KEYS_DROPPED.load(Ordering::Relaxed),
        scan_global_truncations: SCAN_GLOBAL_TRUNCATIONS.load(Ordering::Relaxed),
        iterator_faults: ITERATOR_FAULTS.load(Ordering::Relaxed),

        pages_served: PAGES_SERVED.load(Ordering::Relaxed),
        page_keys_returned: PAGE_KEYS_RETURNED.load(Ordering::Relaxed),
        invalid_cursors: INVALID_CURSORS.load(Ordering::Relaxed),

        values_rendered: VALUES_RENDERED.load(Ordering::Relaxed),
        values_truncated: VALUES_TRUNCATED.load(Ordering::Relaxed),
        value_read_failures: VALUE_READ_FAILURES.load(Ordering::Relaxed),
    }
}
