use std::path::PathBuf;

use anyhow::Result;

use super::util::{open_registry, CONN};

pub fn exec(path: PathBuf, json: bool) -> Result<()> {
    let registry = open_registry(&path)?;
    let stats = registry.stats(CONN)?;
    registry.close_all();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!(
        "keys:  {}{}",
        stats.total_keys,
        if stats.truncated { "+ (capped)" } else { "" }
    );
    println!("first: {}", stats.first_key);
    println!("last:  {}", stats.last_key);
    if !stats.iter_error.is_empty() {
        println!("iterator error: {}", stats.iter_error);
    }
    Ok(())
}
