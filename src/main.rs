use std::net::IpAddr;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use tokio::net::lookup_host;
use tokio_util::sync::CancellationToken;

use portscan_rs::error::ScanError;
use portscan_rs::{dispatch, output, ports, report};

/// portscan-rs — concurrent TCP connect port scanner (use only on authorized targets).
#[derive(Debug, Clone, Parser)]
#[command(
    name = "portscan-rs",
    version,
    about = "Concurrent TCP connect port scanner (use only on authorized targets).",
    long_about = None
)]
struct Cli {
    /// Target hostname or IP.
    #[arg(short, long)]
    target: String,

    /// Ports to scan (e.g. '22,80,443' or '1-1024' or a combination).
    /// Defaults to a list of commonly exposed service ports.
    #[arg(short, long)]
    ports: Option<String>,

    /// Connection timeout in seconds.
    #[arg(short = 'T', long, default_value_t = 0.5)]
    timeout: f64,

    /// Max concurrent connect attempts.
    #[arg(short, long, default_value_t = 50)]
    workers: usize,

    /// Output prefix (writes <prefix>.json and <prefix>.csv).
    #[arg(short, long)]
    out: Option<String>,

    /// Skip the disclaimer message.
    #[arg(long = "no-disclaimer", default_value_t = false)]
    no_disclaimer: bool,
}

const DISCLAIMER: &str = "\
DISCLAIMER — READ THIS
This tool is for educational use only. Do not run it against systems you don't own or don't have written permission to test.
I know you're tempted — 'just one quick scan' is how trouble starts. If you use it without authorization, it's on you, not me.";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if !cli.no_disclaimer {
        println!("{}\n", DISCLAIMER.red().bold());
    }

    let ip = match resolve(&cli.target).await {
        Some(ip) => ip,
        None => {
            eprintln!("[!] Unable to resolve host: {}", cli.target);
            return ExitCode::FAILURE;
        }
    };

    let port_set = ports::parse_port_spec(cli.ports.as_deref());
    if port_set.is_empty() {
        eprintln!("[!] No valid ports specified.");
        return ExitCode::FAILURE;
    }

    if !(cli.timeout > 0.0 && cli.timeout.is_finite()) {
        eprintln!("[!] Timeout must be a positive number of seconds.");
        return ExitCode::FAILURE;
    }
    let timeout = Duration::from_secs_f64(cli.timeout);

    println!(
        "[i] Scanning {} ({}) — {} ports — timeout {}s — workers {}",
        cli.target,
        ip,
        port_set.len(),
        cli.timeout,
        cli.workers
    );

    // Ctrl-C cancels the scan.
    let cancel = CancellationToken::new();
    let cancel_ctrlc = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        cancel_ctrlc.cancel();
    });

    let results = match dispatch::dispatch(ip, &port_set, timeout, cli.workers, cancel, |r| {
        if r.open {
            println!("[+] Port {} -> OPEN", r.port);
        }
    })
    .await
    {
        Ok(results) => results,
        Err(ScanError::Interrupted) => {
            println!("\n[!] Interrupted by user. Shutting down...");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("[!] {e}");
            return ExitCode::FAILURE;
        }
    };

    let scan_report = report::aggregate(results);

    if let Some(prefix) = cli.out.as_deref() {
        match output::write_reports(prefix, &scan_report) {
            Ok((json_path, csv_path)) => println!(
                "[i] Results saved: {}, {}",
                json_path.display(),
                csv_path.display()
            ),
            Err(e) => {
                eprintln!("[!] Failed to write reports: {e:#}");
                return ExitCode::FAILURE;
            }
        }
    }

    let open_ports = scan_report.open_ports();
    if open_ports.is_empty() {
        println!("[i] Scan finished. Open ports: none found.");
    } else {
        println!("[i] Scan finished. Open ports: {open_ports:?}");
    }

    ExitCode::SUCCESS
}

/// Resolve a hostname or IP literal to the first address the system resolver
/// returns. `None` if resolution fails or yields nothing.
async fn resolve(target: &str) -> Option<IpAddr> {
    match lookup_host((target, 0u16)).await {
        Ok(mut addrs) => addrs.next().map(|a| a.ip()),
        Err(_) => None,
    }
}
