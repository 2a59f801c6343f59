//! Scanner module - the scan coordinator and its building blocks.
//!
//! A scan crosses every target with every port, feeds the resulting tasks
//! through a bounded queue to a fixed pool of workers, and collects the open
//! ports they report. Failures never surface here: a port that never
//! accepted a connection is simply absent from the report.

pub mod attempt;
pub mod dialer;
pub mod pool;

#[cfg(test)]
pub(crate) mod testing;

use crate::banner::BANNER_TIMEOUT;
use crate::types::{parse_targets, total_tasks, PortSelection, ScanTask, TaskEnumerator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

pub use attempt::{ConnectionAttempt, RetryPolicy};
pub use dialer::{Dialer, TcpDialer};
pub use pool::{WorkerPool, TASK_QUEUE_CAPACITY};

/// An open port found by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub target: String,
    pub port: u16,
    /// Greeting sent by the service, if it sent one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
}

impl ScanResult {
    pub fn new(target: impl Into<String>, port: u16) -> Self {
        Self {
            target: target.into(),
            port,
            banner: None,
        }
    }

    /// Set the banner; an empty banner is recorded as none.
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        let banner = banner.into();
        self.banner = (!banner.is_empty()).then_some(banner);
        self
    }
}

/// Everything a renderer needs once a scan has finished.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Open ports, in arrival order unless sorting was requested.
    pub results: Vec<ScanResult>,
    /// Number of (target, port) tasks that were probed.
    pub total_tasks: usize,
    /// Wall-clock time from start until the last worker finished.
    pub elapsed: Duration,
}

impl ScanReport {
    pub fn open_ports(&self) -> usize {
        self.results.len()
    }
}

/// Immutable configuration for one scan run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Host names or IP literals, already trimmed.
    pub targets: Vec<String>,
    /// Ports to probe on every target.
    pub ports: PortSelection,
    /// Number of concurrent workers.
    pub workers: usize,
    /// Per-dial connect timeout.
    pub timeout: Duration,
    /// Attempts and backoff per task.
    pub retry: RetryPolicy,
    /// Read deadline for banner grabbing.
    pub banner_timeout: Duration,
    /// Sort results by (target, port) instead of arrival order.
    pub sort_results: bool,
    /// Print a line per task as workers pick it up.
    pub progress: bool,
}

impl ScanConfig {
    /// Default number of workers.
    pub const DEFAULT_WORKERS: usize = 100;
    /// Default connect timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Create a configuration from a comma-separated target list.
    pub fn new(targets: &str) -> Self {
        Self {
            targets: parse_targets(targets),
            ports: PortSelection::default(),
            workers: Self::DEFAULT_WORKERS,
            timeout: Self::DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            banner_timeout: BANNER_TIMEOUT,
            sort_results: false,
            progress: false,
        }
    }

    /// Set the ports to scan.
    pub fn with_ports(mut self, ports: PortSelection) -> Self {
        self.ports = ports;
        self
    }

    /// Set the worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the connect timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the banner read deadline.
    pub fn with_banner_timeout(mut self, timeout: Duration) -> Self {
        self.banner_timeout = timeout;
        self
    }

    /// Sort results by (target, port).
    pub fn with_sorted_results(mut self) -> Self {
        self.sort_results = true;
        self
    }

    /// Print per-task progress lines.
    pub fn with_progress(mut self) -> Self {
        self.progress = true;
        self
    }
}

/// Execute a complete TCP connect scan.
pub async fn run_scan(config: &ScanConfig) -> ScanReport {
    run_scan_with(config, TcpDialer).await
}

/// Execute a scan using a custom dialer.
pub async fn run_scan_with<D: Dialer>(config: &ScanConfig, dialer: D) -> ScanReport {
    let targets = config.targets.clone();
    let ports = config.ports.resolve();
    let total = total_tasks(&targets, &ports);

    tracing::info!(
        targets = targets.len(),
        ports = ports.len(),
        tasks = total,
        workers = config.workers,
        "starting scan"
    );

    let (task_tx, task_rx) = mpsc::channel(TASK_QUEUE_CAPACITY);
    // Room for one result per task, so workers never wait on the collector.
    let (result_tx, mut result_rx) = mpsc::channel(total.max(1));

    let attempt = Arc::new(ConnectionAttempt::new(
        Arc::new(dialer),
        config.timeout,
        config.banner_timeout,
        config.retry,
    ));
    let progress_total = config.progress.then_some(ports.len());

    let start = Instant::now();
    let pool = WorkerPool::spawn(config.workers, attempt, task_rx, result_tx, progress_total);
    let feeder = tokio::spawn(feed(TaskEnumerator::new(targets, ports), task_tx));

    pool.join().await;
    let elapsed = start.elapsed();
    if let Err(e) = feeder.await {
        tracing::warn!(error = %e, "task feeder terminated abnormally");
    }

    result_rx.close();
    let mut results = Vec::new();
    while let Some(result) = result_rx.recv().await {
        results.push(result);
    }

    if config.sort_results {
        results.sort_by(|a, b| (&a.target, a.port).cmp(&(&b.target, b.port)));
    }

    tracing::info!(open = results.len(), ?elapsed, "scan complete");

    ScanReport {
        results,
        total_tasks: total,
        elapsed,
    }
}

/// Push every task into the queue, then close it by dropping the sender.
async fn feed(tasks: TaskEnumerator, queue: mpsc::Sender<ScanTask>) {
    for task in tasks {
        if queue.send(task).await.is_err() {
            tracing::warn!("task queue closed before enumeration finished");
            return;
        }
    }
}
