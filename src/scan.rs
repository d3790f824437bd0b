//! Ограниченный полный скан: одна проходка по store с группировкой
//! display-ключей по префиксным бакетам.
//!
//! Семантика кап:
//! - глобальный cap проверяется ПЕРЕД инспекцией очередного ключа: как только
//!   инспектировано max_keys_total ключей, обход останавливается, остальные
//!   ключи не читаются вовсе;
//! - переполненный бакет не растёт: ключ учитывается как dropped, но в счёт
//!   глобального капа всё равно идёт.
//!
//! Best-effort контракт: сбой итератора обрывает скан и даёт ПУСТУЮ мапу,
//! сам сбой уходит в лог и метрики, не в результат. Неизвестное подключение —
//! то же самое (эта операция кормит UI-листинг, а не бизнес-логику).

use std::collections::BTreeMap;

use log::{info, warn};

use crate::config::BrowseConfig;
use crate::keys::{bucket_label, encode_display_key};
use crate::metrics::{record_iterator_fault, record_scan, record_scan_global_truncation};
use crate::registry::Registry;
use crate::store::Store;

/// Полный скан store с капами. Ключ возврата — метка бакета,
/// значение — display-ключи в порядке обхода.
pub fn scan_store(store: &dyn Store, cfg: &BrowseConfig) -> BTreeMap<String, Vec<String>> {
    let cfg = cfg.clone().normalized();

    let mut buckets: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut processed = 0usize;
    let mut stored = 0usize;
    let mut dropped_per_bucket: BTreeMap<String, usize> = BTreeMap::new();
    let mut truncated_total = false;

    for item in store.keys_after(None) {
        let raw = match item {
            Ok(raw) => raw,
            Err(e) => {
                record_iterator_fault();
                warn!("scan aborted: {}", e);
                return BTreeMap::new();
            }
        };

        if processed >= cfg.max_keys_total {
            truncated_total = true;
            break;
        }
        processed += 1;

        let display = encode_display_key(&raw);
        let label = bucket_label(&display);
        let list = buckets.entry(label.clone()).or_default();
        if list.len() >= cfg.max_keys_per_prefix {
            *dropped_per_bucket.entry(label).or_insert(0) += 1;
            continue;
        }
        list.push(display);
        stored += 1;
    }

    let dropped: usize = dropped_per_bucket.values().sum();
    record_scan(processed as u64, stored as u64, dropped as u64);
    info!(
        "scan: stored {} key(s) in {} bucket(s), processed {}",
        stored,
        buckets.len(),
        processed
    );
    if truncated_total {
        record_scan_global_truncation();
        warn!(
            "scan hit the {} global key cap; listing is truncated",
            cfg.max_keys_total
        );
    }
    if !dropped_per_bucket.is_empty() {
        warn!(
            "{} bucket(s) exceeded the per-bucket cap ({}); {} key(s) dropped",
            dropped_per_bucket.len(),
            cfg.max_keys_per_prefix,
            dropped
        );
    }

    buckets
}

impl Registry {
    /// Скан по имени подключения; капы читаются из ENV на каждый вызов.
    pub fn scan_keys(&self, name: &str) -> BTreeMap<String, Vec<String>> {
        self.scan_keys_with(name, &BrowseConfig::from_env())
    }

    /// Скан по имени подключения с явными капами.
    pub fn scan_keys_with(
        &self,
        name: &str,
        cfg: &BrowseConfig,
    ) -> BTreeMap<String, Vec<String>> {
        match self.get(name) {
            Ok(conn) => scan_store(conn.store.as_ref(), cfg),
            Err(e) => {
                warn!("scan skipped: {}", e);
                BTreeMap::new()
            }
        }
    }
}
