use anyhow::{anyhow, Result};
use clap::Parser;
use tiny_http::{Header, Response, Server};

use kvscope::metrics;

#[derive(Parser, Debug)]
#[command(
    name = "kvscope_metrics",
    version,
    about = "kvscope metrics exporter (Prometheus)"
)]
struct Opt {
    #[arg(long, default_value = "0.0.0.0:9899")]
    addr: String,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let opt = Opt::parse();

    let server = Server::http(&opt.addr)
        .map_err(|e| anyhow!("bind http at {}: {}", opt.addr, e))?;
    println!("kvscope_metrics listening on {}", opt.addr);

    loop {
        let rq = match server.recv() {
            Ok(rq) => rq,
            Err(e) => {
                eprintln!("http recv error: {}", e);
                continue;
            }
        };

        let url = rq.url().to_string();
        let method = rq.method().as_str().to_string();

        if method == "GET" && (url == "/" || url == "/health" || url == "/ready") {
            let resp = Response::from_string("OK\n").with_status_code(200);
            let _ = rq.respond(resp);
            continue;
        }

        if method == "GET" && url == "/metrics" {
            let body = build_metrics();
            let mut resp = Response::from_string(body);
            if let Ok(ct) = Header::from_bytes(b"Content-Type", b"text/plain; version=0.0.4") {
                resp.add_header(ct);
            }
            let _ = rq.respond(resp);
            continue;
        }

        let resp = Response::from_string("not found\n").with_status_code(404);
        let _ = rq.respond(resp);
    }
}

fn build_metrics() -> String {
    let m = metrics::snapshot();
    let mut out = String::new();

    let ver = env!("CARGO_PKG_VERSION");
    out.push_str("# HELP kvscope_build_info Build info.\n");
    out.push_str("# TYPE kvscope_build_info gauge\n");
    out.push_str(&format!("kvscope_build_info{{version=\"{}\"}} 1\n", ver));

    // --- Registry ---
    out.push_str("# HELP kvscope_connections_opened Store connections opened.\n");
    out.push_str("# TYPE kvscope_connections_opened counter\n");
    out.push_str(&format!("kvscope_connections_opened {}\n", m.connections_opened));

    out.push_str("# HELP kvscope_connections_closed Store connections closed.\n");
    out.push_str("# TYPE kvscope_connections_closed counter\n");
    out.push_str(&format!("kvscope_connections_closed {}\n", m.connections_closed));

    out.push_str("# HELP kvscope_open_failures Store open failures (non-lock).\n");
    out.push_str("# TYPE kvscope_open_failures counter\n");
    out.push_str(&format!("kvscope_open_failures {}\n", m.open_failures));

    out.push_str("# HELP kvscope_open_locked Store opens refused by a foreign lock.\n");
    out.push_str("# TYPE kvscope_open_locked counter\n");
    out.push_str(&format!("kvscope_open_locked {}\n", m.open_locked));

    // --- Scanner ---
    out.push_str("# HELP kvscope_scans_total Bounded scans executed.\n");
    out.push_str("# TYPE kvscope_scans_total counter\n");
    out.push_str(&format!("kvscope_scans_total {}\n", m.scans_total));

    out.push_str("# HELP kvscope_scan_keys_processed Keys inspected by scans.\n");
    out.push_str("# TYPE kvscope_scan_keys_processed counter\n");
    out.push_str(&format!("kvscope_scan_keys_processed {}\n", m.scan_keys_processed));

    out.push_str("# HELP kvscope_scan_keys_stored Keys stored into buckets by scans.\n");
    out.push_str("# TYPE kvscope_scan_keys_stored counter\n");
    out.push_str(&format!("kvscope_scan_keys_stored {}\n", m.scan_keys_stored));

    out.push_str("# HELP kvscope_scan_keys_dropped Keys dropped by per-bucket caps.\n");
    out.push_str("# TYPE kvscope_scan_keys_dropped counter\n");
    out.push_str(&format!("kvscope_scan_keys_dropped {}\n", m.scan_keys_dropped));

    out.push_str("# HELP kvscope_scan_drop_ratio Dropped/processed ratio (percent).\n");
    out.push_str("# TYPE kvscope_scan_drop_ratio gauge\n");
    out.push_str(&format!("kvscope_scan_drop_ratio {:.2}\n", m.scan_drop_ratio() * 100.0));

    out.push_str("# HELP kvscope_scan_global_truncations Scans stopped by the global key cap.\n");
    out.push_str("# TYPE kvscope_scan_global_truncations counter\n");
    out.push_str(&format!("kvscope_scan_global_truncations {}\n", m.scan_global_truncations));

    out.push_str("# HELP kvscope_iterator_faults Store iterator faults.\n");
    out.push_str("# TYPE kvscope_iterator_faults counter\n");
    out.push_str(&format!("kvscope_iterator_faults {}\n", m.iterator_faults));

    // --- Pager ---
    out.push_str("# HELP kvscope_pages_served Key pages served.\n");
    out.push_str("# TYPE kvscope_pages_served counter\n");
    out.push_str(&format!("kvscope_pages_served {}\n", m.pages_served));

    out.push_str("# HELP kvscope_page_keys_returned Keys returned across all pages.\n");
    out.push_str("# TYPE kvscope_page_keys_returned counter\n");
    out.push_str(&format!("kvscope_page_keys_returned {}\n", m.page_keys_returned));

    out.push_str("# HELP kvscope_page_keys_avg Average keys per page.\n");
    out.push_str("# TYPE kvscope_page_keys_avg gauge\n");
    out.push_str(&format!("kvscope_page_keys_avg {:.2}\n", m.avg_keys_per_page()));

    out.push_str("# HELP kvscope_invalid_cursors Rejected pagination tokens.\n");
    out.push_str("# TYPE kvscope_invalid_cursors counter\n");
    out.push_str(&format!("kvscope_invalid_cursors {}\n", m.invalid_cursors));

    // --- Values ---
    out.push_str("# HELP kvscope_values_rendered Value views rendered.\n");
    out.push_str("# TYPE kvscope_values_rendered counter\n");
    out.push_str(&format!("kvscope_values_rendered {}\n", m.values_rendered));

    out.push_str("# HELP kvscope_values_truncated Value views truncated by size caps.\n");
    out.push_str("# TYPE kvscope_values_truncated counter\n");
    out.push_str(&format!("kvscope_values_truncated {}\n", m.values_truncated));

    out.push_str("# HELP kvscope_value_read_failures Point reads that failed during inspection.\n");
    out.push_str("# TYPE kvscope_value_read_failures counter\n");
    out.push_str(&format!("kvscope_value_read_failures {}\n", m.value_read_failures));

    out
}
