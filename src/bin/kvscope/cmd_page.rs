use std::path::PathBuf;

use anyhow::{anyhow, Result};

use super::util::{open_registry, print_buckets, CONN};

pub fn exec(path: PathBuf, cursor: String, limit: usize, json: bool) -> Result<()> {
    let registry = open_registry(&path)?;
    let page = registry.page_keys(CONN, &cursor, limit);
    registry.close_all();

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if !page.is_ok() {
        return Err(anyhow!("page failed: {}", page.error));
    }
    print_buckets(&page.buckets);
    println!("count: {}", page.count);
    if page.has_more {
        println!("next:  {}", page.next_cursor);
    } else {
        println!("end of keyspace");
    }
    Ok(())
}
