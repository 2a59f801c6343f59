//! In-memory dialer for exercising the scanner without the network.

use super::dialer::Dialer;
use crate::error::{DialResult, ScanError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::io::{AsyncWriteExt, DuplexStream};

#[derive(Debug, Clone)]
struct Service {
    banner: Vec<u8>,
    failures_before_open: u32,
}

/// Dialer that accepts connections only to registered services.
#[derive(Debug, Default)]
pub struct FakeDialer {
    services: HashMap<(String, u16), Service>,
    dials: Mutex<HashMap<(String, u16), u32>>,
}

impl FakeDialer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an open port that greets with `banner`.
    pub fn open(mut self, host: &str, port: u16, banner: &str) -> Self {
        self.services.insert(
            (host.to_string(), port),
            Service {
                banner: banner.as_bytes().to_vec(),
                failures_before_open: 0,
            },
        );
        self
    }

    /// Register a port that refuses the first `failures` dials.
    pub fn flaky(mut self, host: &str, port: u16, failures: u32) -> Self {
        self.services.insert(
            (host.to_string(), port),
            Service {
                banner: Vec::new(),
                failures_before_open: failures,
            },
        );
        self
    }

    /// How many times `host:port` was dialed.
    pub fn dial_count(&self, host: &str, port: u16) -> u32 {
        self.dials
            .lock()
            .unwrap()
            .get(&(host.to_string(), port))
            .copied()
            .unwrap_or(0)
    }

    /// Total dials across every address.
    pub fn total_dials(&self) -> u32 {
        self.dials.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl Dialer for FakeDialer {
    type Stream = DuplexStream;

    async fn dial(&self, host: &str, port: u16, _timeout: Duration) -> DialResult<DuplexStream> {
        let key = (host.to_string(), port);
        let attempt = {
            let mut dials = self.dials.lock().unwrap();
            let count = dials.entry(key.clone()).or_insert(0);
            *count += 1;
            *count
        };

        let service = match self.services.get(&key) {
            Some(service) if attempt > service.failures_before_open => service.clone(),
            _ => return Err(ScanError::ConnectionRefused),
        };

        let (client, mut server) = tokio::io::duplex(service.banner.len().max(1));
        if !service.banner.is_empty() {
            server.write_all(&service.banner).await?;
        }
        drop(server);
        Ok(client)
    }
}
