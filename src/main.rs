use anyhow::Result;
use clap::Parser;
use portscan::cli::Cli;
use portscan::config::AppSettings;
use portscan::output;
use portscan::scanner::run_scan;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let settings = match &cli.config {
        Some(path) => AppSettings::load_from(path)?,
        None => AppSettings::load()?,
    };

    let config = cli.scan_config(&settings);
    let report = run_scan(&config).await;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::write_report(&mut out, &report, cli.output_format(), !cli.no_color)?;
    out.flush()?;

    Ok(())
}
