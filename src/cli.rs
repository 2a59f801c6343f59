//! Command-line interface definitions for portscan.
//!
//! Uses `clap` derive macros for declarative argument parsing. Flags left
//! unset fall back to the persistent [`AppSettings`].

use crate::config::AppSettings;
use crate::scanner::{RetryPolicy, ScanConfig};
use crate::types::PortSelection;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// A concurrent TCP connect port scanner with banner grabbing.
#[derive(Parser, Debug)]
#[command(name = "portscan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A concurrent TCP connect port scanner", long_about = None)]
pub struct Cli {
    /// Comma-separated list of IP addresses or hostnames [default: scanme.nmap.org]
    #[arg(long, value_name = "LIST")]
    pub targets: Option<String>,

    /// Starting port
    #[arg(long, default_value = "1")]
    pub start_port: u16,

    /// Ending port
    #[arg(long, default_value = "1024")]
    pub end_port: u16,

    /// Comma-separated list of specific ports (overrides the start-end range)
    #[arg(short, long, value_name = "LIST")]
    pub ports: Option<String>,

    /// Number of concurrent workers [default: 100]
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Connection timeout in seconds [default: 5]
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Dial attempts per port before giving up [default: 3]
    #[arg(long)]
    pub retries: Option<u32>,

    /// Backoff unit between attempts in milliseconds, doubled each retry [default: 1000]
    #[arg(long, value_name = "MS")]
    pub backoff_ms: Option<u64>,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Sort results by target and port
    #[arg(long)]
    pub sort: bool,

    /// Do not print per-port progress lines
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to a settings file
    #[arg(long, value_name = "PATH", env = "PORTSCAN_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
}

impl Cli {
    /// Requested output format.
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Plain
        }
    }

    /// Default tracing filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "portscan=debug"
        } else {
            "warn"
        }
    }

    /// Build the scan configuration, filling unset flags from `settings`.
    pub fn scan_config(&self, settings: &AppSettings) -> ScanConfig {
        let targets = self.targets.as_deref().unwrap_or(settings.targets.as_str());
        let retry = RetryPolicy::new(
            self.retries.unwrap_or(settings.retries),
            Duration::from_millis(self.backoff_ms.unwrap_or(settings.backoff_ms)),
        );

        let mut config = ScanConfig::new(targets)
            .with_ports(PortSelection::new(
                self.start_port,
                self.end_port,
                self.ports.as_deref(),
            ))
            .with_workers(self.workers.unwrap_or(settings.workers))
            .with_timeout(Duration::from_secs(
                self.timeout.unwrap_or(settings.timeout_secs),
            ))
            .with_retry(retry);

        if self.sort || settings.sort_results {
            config = config.with_sorted_results();
        }
        if !self.quiet {
            config = config.with_progress();
        }
        config
    }
}
