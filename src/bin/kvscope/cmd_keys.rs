use std::path::PathBuf;

use anyhow::Result;
use kvscope::BrowseConfig;

use super::util::{open_registry, print_buckets, CONN};

pub fn exec(
    path: PathBuf,
    max_total: Option<usize>,
    max_per_prefix: Option<usize>,
    json: bool,
) -> Result<()> {
    let registry = open_registry(&path)?;

    // Флаги перекрывают ENV.
    let mut cfg = BrowseConfig::from_env();
    if let Some(n) = max_total {
        cfg = cfg.with_max_keys_total(n);
    }
    if let Some(n) = max_per_prefix {
        cfg = cfg.with_max_keys_per_prefix(n);
    }

    let buckets = registry.scan_keys_with(CONN, &cfg);

    if json {
        println!("{}", serde_json::to_string_pretty(&buckets)?);
    } else {
        let total: usize = buckets.values().map(|v| v.len()).sum();
        print_buckets(&buckets);
        println!("{} key(s) in {} bucket(s)", total, buckets.len());
    }

    registry.close_all();
    Ok(())
}
