use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Read-only браузер keyspace для embedded KV store (sled)
#[derive(Parser, Debug)]
#[command(name = "kvscope", version, about = "kvscope: read-only key-space browser")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Bounded scan: keys grouped by prefix bucket (caps from env or flags)
    Keys {
        #[arg(long)]
        path: PathBuf,
        /// Override KVSCOPE_MAX_KEYS_TOTAL
        #[arg(long)]
        max_total: Option<usize>,
        /// Override KVSCOPE_MAX_KEYS_PER_PREFIX
        #[arg(long)]
        max_per_prefix: Option<usize>,
        /// JSON output (single object)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// One page of the keyspace starting at --cursor
    Page {
        #[arg(long)]
        path: PathBuf,
        /// Resumption token from a previous page ("" = start)
        #[arg(long, default_value = "")]
        cursor: String,
        #[arg(long, default_value_t = 500)]
        limit: usize,
        /// JSON output (single object)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Full cursor-driven sweep: every key, page by page
    Sweep {
        #[arg(long)]
        path: PathBuf,
        /// Page size used for the sweep
        #[arg(long, default_value_t = 500)]
        limit: usize,
        /// JSON output (JSONL, one key per line)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Inspect the value under a display key
    Get {
        #[arg(long)]
        path: PathBuf,
        /// Display key (verbatim text or "0x"-hex)
        #[arg(long)]
        key: String,
        /// Export raw value bytes to a file instead of rendering
        #[arg(long)]
        out: Option<PathBuf>,
        /// JSON output (single object)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Key-count / first / last summary
    Stat {
        #[arg(long)]
        path: PathBuf,
        /// JSON output (single object)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}
