//! Scan tasks and the target × port enumerator.

use std::fmt;

/// One (host, port) pair to probe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScanTask {
    pub host: String,
    pub port: u16,
}

impl ScanTask {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for ScanTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // IPv6 literals need brackets to stay unambiguous next to the port.
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Number of tasks a scan over `targets` × `ports` produces.
pub fn total_tasks(targets: &[String], ports: &[u16]) -> usize {
    targets.len() * ports.len()
}

/// Lazily yields one [`ScanTask`] per (target, port), target-major.
#[derive(Debug, Clone)]
pub struct TaskEnumerator {
    targets: Vec<String>,
    ports: Vec<u16>,
    target_idx: usize,
    port_idx: usize,
}

impl TaskEnumerator {
    pub fn new(targets: Vec<String>, ports: Vec<u16>) -> Self {
        Self {
            targets,
            ports,
            target_idx: 0,
            port_idx: 0,
        }
    }

    fn remaining(&self) -> usize {
        if self.ports.is_empty() || self.target_idx >= self.targets.len() {
            return 0;
        }
        (self.targets.len() - self.target_idx) * self.ports.len() - self.port_idx
    }
}

impl Iterator for TaskEnumerator {
    type Item = ScanTask;

    fn next(&mut self) -> Option<ScanTask> {
        if self.ports.is_empty() {
            return None;
        }
        let host = self.targets.get(self.target_idx)?;
        let task = ScanTask::new(host.clone(), self.ports[self.port_idx]);

        self.port_idx += 1;
        if self.port_idx == self.ports.len() {
            self.port_idx = 0;
            self.target_idx += 1;
        }
        Some(task)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for TaskEnumerator {}
