//! JSON output formatting.

use crate::scanner::ScanResult;
use std::io::Write;

/// Write results as an indented JSON array followed by a newline.
pub fn write_json<W: Write>(out: &mut W, results: &[ScanResult]) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *out, results)?;
    writeln!(out).map_err(serde_json::Error::io)
}
