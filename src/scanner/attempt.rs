//! Connection attempts with bounded retry and exponential backoff.
//!
//! A port that never accepts is dropped silently after the last attempt:
//! closed, filtered, and flaky ports all look the same to the caller.

use super::dialer::Dialer;
use super::ScanResult;
use crate::banner::read_banner;
use crate::types::ScanTask;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// How many times to dial a task and how long to wait between tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_base: Duration,
}

impl RetryPolicy {
    /// Default number of dial attempts per task.
    pub const DEFAULT_ATTEMPTS: u32 = 3;
    /// Default backoff unit.
    pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);

    /// Create a policy; at least one attempt is always made.
    pub fn new(max_attempts: u32, backoff_base: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_base,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff_base(&self) -> Duration {
        self.backoff_base
    }

    /// Sleep after failed attempt `attempt` (0-indexed): `base * 2^attempt`.
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.backoff_base.saturating_mul(factor)
    }

    /// Total time spent sleeping when every attempt fails.
    pub fn total_backoff(&self) -> Duration {
        (0..self.max_attempts)
            .map(|i| self.delay(i))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ATTEMPTS, Self::DEFAULT_BACKOFF)
    }
}

/// Dials one task at a time and grabs a banner from whatever answers.
pub struct ConnectionAttempt<D> {
    dialer: Arc<D>,
    connect_timeout: Duration,
    banner_timeout: Duration,
    retry: RetryPolicy,
}

impl<D: Dialer> ConnectionAttempt<D> {
    pub fn new(
        dialer: Arc<D>,
        connect_timeout: Duration,
        banner_timeout: Duration,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            dialer,
            connect_timeout,
            banner_timeout,
            retry,
        }
    }

    /// Probe `task`, returning a result only if some attempt connected.
    pub async fn run(&self, task: &ScanTask) -> Option<ScanResult> {
        for attempt in 0..self.retry.max_attempts() {
            match self
                .dialer
                .dial(&task.host, task.port, self.connect_timeout)
                .await
            {
                Ok(mut stream) => {
                    let banner = read_banner(&mut stream, self.banner_timeout).await;
                    drop(stream);
                    return Some(ScanResult::new(&task.host, task.port).with_banner(banner));
                }
                Err(e) => {
                    let delay = self.retry.delay(attempt);
                    tracing::debug!(%task, attempt, error = %e, "dial failed");
                    tracing::trace!(%task, ?delay, "backing off");
                    sleep(delay).await;
                }
            }
        }

        tracing::debug!(%task, attempts = self.retry.max_attempts(), "giving up");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banner::BANNER_TIMEOUT;
    use crate::scanner::testing::FakeDialer;
    use tokio::time::Instant;

    fn attempt(dialer: Arc<FakeDialer>) -> ConnectionAttempt<FakeDialer> {
        ConnectionAttempt::new(
            dialer,
            Duration::from_secs(5),
            BANNER_TIMEOUT,
            RetryPolicy::default(),
        )
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay(0), Duration::from_secs(1));
        assert_eq!(policy.delay(1), Duration::from_secs(2));
        assert_eq!(policy.delay(2), Duration::from_secs(4));
        assert_eq!(policy.total_backoff(), Duration::from_secs(7));
    }

    #[test]
    fn test_backoff_saturates() {
        let policy = RetryPolicy::new(3, Duration::from_secs(1));
        assert_eq!(policy.delay(40), Duration::from_secs(u32::MAX as u64));
    }

    #[test]
    fn test_at_least_one_attempt() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_port_connects_once() {
        let dialer = Arc::new(FakeDialer::new().open("host", 22, "SSH-2.0-test\r\n"));
        let result = attempt(Arc::clone(&dialer))
            .run(&ScanTask::new("host", 22))
            .await
            .expect("port is open");

        assert_eq!(result.target, "host");
        assert_eq!(result.port, 22);
        assert_eq!(result.banner.as_deref(), Some("SSH-2.0-test\r\n"));
        assert_eq!(dialer.dial_count("host", 22), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_silent_service_has_no_banner() {
        let dialer = Arc::new(FakeDialer::new().open("host", 80, ""));
        let result = attempt(dialer).run(&ScanTask::new("host", 80)).await;
        assert_eq!(result.unwrap().banner, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_port_exhausts_retries() {
        let dialer = Arc::new(FakeDialer::new());
        let start = Instant::now();

        let result = attempt(Arc::clone(&dialer))
            .run(&ScanTask::new("host", 9999))
            .await;

        assert!(result.is_none());
        assert_eq!(dialer.dial_count("host", 9999), 3);
        let waited = start.elapsed();
        assert!(waited >= Duration::from_secs(7) && waited < Duration::from_secs(8));
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_within_retry_budget() {
        let dialer = Arc::new(FakeDialer::new().flaky("host", 443, 2));
        let start = Instant::now();

        let result = attempt(Arc::clone(&dialer))
            .run(&ScanTask::new("host", 443))
            .await;

        assert!(result.is_some());
        assert_eq!(dialer.dial_count("host", 443), 3);
        // Slept after the first two failures only.
        let waited = start.elapsed();
        assert!(waited >= Duration::from_secs(3) && waited < Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_flaky_beyond_budget_is_dropped() {
        let dialer = Arc::new(FakeDialer::new().flaky("host", 443, 3));
        let result = attempt(Arc::clone(&dialer))
            .run(&ScanTask::new("host", 443))
            .await;

        assert!(result.is_none());
        assert_eq!(dialer.dial_count("host", 443), 3);
    }
}
