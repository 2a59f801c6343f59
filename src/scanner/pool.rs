//! Fixed-size worker pool draining a shared task queue.
//!
//! Every worker takes the next available task, probes it to completion
//! (retries included), and only then asks for another. Workers exit once the
//! queue is closed and empty.

use super::attempt::ConnectionAttempt;
use super::dialer::Dialer;
use super::ScanResult;
use crate::output;
use crate::types::ScanTask;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

/// Capacity of the task queue; the feeder blocks when it is full.
pub const TASK_QUEUE_CAPACITY: usize = 1000;

/// Receiving end of the task queue, shared by all workers.
type TaskQueue = Arc<Mutex<mpsc::Receiver<ScanTask>>>;

/// A running set of scan workers.
pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `workers` executors (at least one).
    ///
    /// When `progress_total` is set each worker prints a progress line per
    /// task, using it as the denominator.
    pub fn spawn<D: Dialer>(
        workers: usize,
        attempt: Arc<ConnectionAttempt<D>>,
        tasks: mpsc::Receiver<ScanTask>,
        results: mpsc::Sender<ScanResult>,
        progress_total: Option<usize>,
    ) -> Self {
        let queue: TaskQueue = Arc::new(Mutex::new(tasks));

        let handles = (0..workers.max(1))
            .map(|id| {
                tokio::spawn(worker(
                    id,
                    Arc::clone(&queue),
                    Arc::clone(&attempt),
                    results.clone(),
                    progress_total,
                ))
            })
            .collect();

        Self { handles }
    }

    /// Number of workers in the pool.
    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Wait until every worker has finished.
    pub async fn join(self) {
        for handle in self.handles {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "scan worker terminated abnormally");
            }
        }
    }
}

async fn worker<D: Dialer>(
    id: usize,
    queue: TaskQueue,
    attempt: Arc<ConnectionAttempt<D>>,
    results: mpsc::Sender<ScanResult>,
    progress_total: Option<usize>,
) {
    let mut processed = 0usize;

    loop {
        // Lock is released before the task is probed.
        let task = queue.lock().await.recv().await;
        let Some(task) = task else { break };

        if let Some(total) = progress_total {
            output::print_progress(&task, total);
        }

        if let Some(result) = attempt.run(&task).await {
            tracing::debug!(worker = id, %task, "port open");
            if results.send(result).await.is_err() {
                tracing::warn!(worker = id, "result queue closed early");
                break;
            }
        }
        processed += 1;
    }

    tracing::debug!(worker = id, processed, "worker finished");
}
