use std::path::PathBuf;

use anyhow::{anyhow, Result};

use super::util::{open_registry, CONN};

/// Полный обход keyspace страницами: каждый ключ ровно один раз, внутри
/// страницы — группировка по бакету. По одному ключу на строку (--json: JSONL).
pub fn exec(path: PathBuf, limit: usize, json: bool) -> Result<()> {
    let registry = open_registry(&path)?;

    let mut cursor = String::new();
    let mut total = 0usize;
    loop {
        let page = registry.page_keys(CONN, &cursor, limit);
        if !page.is_ok() {
            registry.close_all();
            return Err(anyhow!("sweep failed: {}", page.error));
        }
        for keys in page.buckets.values() {
            for key in keys {
                if json {
                    println!("{}", serde_json::to_string(key)?);
                } else {
                    println!("{}", key);
                }
                total += 1;
            }
        }
        if !page.has_more {
            break;
        }
        cursor = page.next_cursor;
    }

    if !json {
        println!("{} key(s) total", total);
    }
    registry.close_all();
    Ok(())
}
