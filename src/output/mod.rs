//! Output formatting module.
//!
//! Renders a finished [`ScanReport`] as JSON or as plain text, and prints the
//! per-task progress lines emitted while a scan runs.

mod json_format;
mod plain;

pub use json_format::write_json;
pub use plain::{print_progress, write_plain};

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::scanner::ScanReport;
use std::io::Write;

/// Write scan results to `out` in the requested format.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &ScanReport,
    format: OutputFormat,
    color: bool,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => write_json(out, &report.results)?,
        OutputFormat::Plain => write_plain(out, report, color)?,
    }
    Ok(())
}
