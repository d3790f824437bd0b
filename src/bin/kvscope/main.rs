use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};

mod cli;
mod util;
mod cmd_keys;
mod cmd_page;
mod cmd_sweep;
mod cmd_get;
mod cmd_stat;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе дефолт — info.
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    match cli.cmd {
        cli::Cmd::Keys { path, max_total, max_per_prefix, json } =>
            cmd_keys::exec(path, max_total, max_per_prefix, json),

        cli::Cmd::Page { path, cursor, limit, json } =>
            cmd_page::exec(path, cursor, limit, json),

        cli::Cmd::Sweep { path, limit, json } =>
            cmd_sweep::exec(path, limit, json),

        cli::Cmd::Get { path, key, out, json } =>
            cmd_get::exec(path, key, out, json),

        cli::Cmd::Stat { path, json } =>
            cmd_stat::exec(path, json),
    }
}
