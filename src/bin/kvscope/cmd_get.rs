use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use kvscope::ValueKind;

use super::util::{open_registry, CONN};

pub fn exec(path: PathBuf, key: String, out: Option<PathBuf>, json: bool) -> Result<()> {
    let registry = open_registry(&path)?;

    // Экспорт: движок отдаёт сырые байты, файл пишет CLI.
    if let Some(out_path) = out {
        let value = registry.fetch_raw(CONN, &key)?;
        registry.close_all();
        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut f = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&out_path)?;
        f.write_all(&value)?;
        f.sync_all()?;
        println!("'{}': {} B -> wrote to {}", key, value.len(), out_path.display());
        return Ok(());
    }

    let view = registry.value_view(CONN, &key);
    registry.close_all();

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    match view.kind {
        ValueKind::Error => println!("ERROR '{}': {}", view.key, view.value),
        _ => {
            println!("'{}' ({} B):", view.key, view.size);
            println!("{}", view.value);
            if view.is_truncated {
                println!("{}", view.truncated_msg);
            }
        }
    }
    Ok(())
}
