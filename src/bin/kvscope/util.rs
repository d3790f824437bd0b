use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use kvscope::Registry;

/// Имя, под которым CLI регистрирует единственное подключение.
pub const CONN: &str = "default";

/// Открыть store по пути в свежем реестре.
pub fn open_registry(path: &Path) -> Result<Registry> {
    let registry = Registry::new();
    registry.add(CONN, path)?;
    Ok(registry)
}

/// Плоская печать бакетов: метка, количество, ключи с отступом.
pub fn print_buckets(buckets: &BTreeMap<String, Vec<String>>) {
    for (label, keys) in buckets {
        println!("{} ({}):", label, keys.len());
        for key in keys {
            println!("  {}", key);
        }
    }
}
