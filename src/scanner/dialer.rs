//! Dialer abstraction and the TCP connect implementation.
//!
//! The [`Dialer`] trait is the seam between the retry logic and the
//! network, so connection attempts can be driven by an in-memory dialer.

use crate::error::{DialResult, ScanError};
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::AsyncRead;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Opens a connection to a (host, port) pair.
#[async_trait]
pub trait Dialer: Send + Sync + 'static {
    /// Connection type handed to the banner reader.
    type Stream: AsyncRead + Unpin + Send;

    /// Dial `host:port`, giving up after `connect_timeout`.
    async fn dial(&self, host: &str, port: u16, connect_timeout: Duration)
        -> DialResult<Self::Stream>;
}

/// TCP connect dialer using the operating system's socket API.
///
/// Host names are resolved by tokio at dial time; the timeout covers
/// resolution and the handshake together.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpDialer;

#[async_trait]
impl Dialer for TcpDialer {
    type Stream = TcpStream;

    async fn dial(
        &self,
        host: &str,
        port: u16,
        connect_timeout: Duration,
    ) -> DialResult<TcpStream> {
        match timeout(connect_timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) => Err(classify(host, port, e)),
            Err(_) => Err(ScanError::Timeout),
        }
    }
}

fn classify(host: &str, port: u16, e: std::io::Error) -> ScanError {
    if e.kind() == std::io::ErrorKind::ConnectionRefused {
        return ScanError::ConnectionRefused;
    }

    let error_str = e.to_string().to_lowercase();
    if error_str.contains("unreachable") {
        if error_str.contains("host") {
            ScanError::HostUnreachable
        } else {
            ScanError::NetworkUnreachable(e.to_string())
        }
    } else if error_str.contains("lookup") || error_str.contains("resolve") {
        ScanError::Resolution {
            host: host.to_string(),
            reason: e.to_string(),
        }
    } else {
        ScanError::ConnectionFailed {
            target: host.to_string(),
            port,
            reason: e.to_string(),
        }
    }
}
