//! # portscan - A Concurrent TCP Connect Port Scanner
//!
//! portscan probes every port of every target with a plain TCP connect,
//! grabs whatever greeting an open port sends, and reports the open ports as
//! JSON or as human-readable lines.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portscan::scanner::{run_scan, ScanConfig};
//! use portscan::types::PortSelection;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScanConfig::new("127.0.0.1")
//!         .with_ports(PortSelection::new(1, 1024, None))
//!         .with_workers(200);
//!
//!     let report = run_scan(&config).await;
//!     for result in &report.results {
//!         println!("{}:{} is open", result.target, result.port);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Targets, port selections, and the task enumerator
//! - [`banner`] - Single-read banner grabbing
//! - [`scanner`] - Connection attempts, the worker pool, and the coordinator
//! - [`config`] - Persistent settings
//! - [`output`] - JSON and plain text renderers
//! - [`error`] - Error types

pub mod banner;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ConfigError, ScanError};
pub use scanner::{run_scan, ScanConfig, ScanReport, ScanResult};
pub use types::{PortSelection, ScanTask};
