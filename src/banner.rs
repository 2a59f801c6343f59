//! Banner grabbing for freshly opened TCP connections.
//!
//! Performs a single passive read: nothing is sent to the peer, so services
//! that wait for the client to speak first yield an empty banner.

use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::timeout;

/// Maximum bytes to read for a banner.
pub const MAX_BANNER_SIZE: usize = 1024;

/// Read deadline for the banner, independent of the connect timeout.
pub const BANNER_TIMEOUT: Duration = Duration::from_secs(2);

/// Read whatever the peer sends first, within `deadline`.
///
/// Returns an empty string on timeout, EOF, or read error.
pub async fn read_banner<S>(stream: &mut S, deadline: Duration) -> String
where
    S: AsyncRead + Unpin,
{
    let mut buffer = vec![0u8; MAX_BANNER_SIZE];

    match timeout(deadline, stream.read(&mut buffer)).await {
        Ok(Ok(n)) => {
            tracing::trace!(bytes = n, "banner read");
            String::from_utf8_lossy(&buffer[..n]).into_owned()
        }
        Ok(Err(e)) => {
            tracing::trace!(error = %e, "banner read failed");
            String::new()
        }
        Err(_) => String::new(),
    }
}
