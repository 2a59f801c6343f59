//! Plain text output formatting.
//!
//! One line per open port, then a summary block.

use crate::scanner::ScanReport;
use crate::types::ScanTask;
use console::Style;
use std::io::{self, Write};

/// Write results as `[+] host:port OPEN` lines followed by a scan summary.
pub fn write_plain<W: Write>(out: &mut W, report: &ScanReport, color: bool) -> io::Result<()> {
    let paint = |text: &str, st: Style| -> String {
        if color {
            st.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    };

    for result in &report.results {
        write!(
            out,
            "{} {}:{} {}",
            paint("[+]", Style::new().green().bold()),
            result.target,
            result.port,
            paint("OPEN", Style::new().green()),
        )?;
        if let Some(banner) = &result.banner {
            write!(out, " - Banner: {:?}", banner)?;
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", paint("Scan Summary:", Style::new().bold()))?;
    writeln!(out, "  Open Ports: {}", report.open_ports())?;
    writeln!(out, "  Total Ports Scanned: {}", report.total_tasks)?;
    writeln!(out, "  Time Taken: {:?}", report.elapsed)?;

    Ok(())
}

/// Print a progress line for a task a worker just picked up.
///
/// Goes to stderr so JSON on stdout stays parseable.
pub fn print_progress(task: &ScanTask, total_ports: usize) {
    eprintln!(
        "Scanning port {}/{} on {}",
        task.port, total_ports, task.host
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ScanResult;
    use std::time::Duration;

    fn render(report: &ScanReport) -> String {
        let mut buf = Vec::new();
        write_plain(&mut buf, report, false).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_report_summary() {
        let report = ScanReport {
            results: Vec::new(),
            total_tasks: 1,
            elapsed: Duration::from_millis(1500),
        };
        assert_eq!(
            render(&report),
            "\nScan Summary:\n  Open Ports: 0\n  Total Ports Scanned: 1\n  Time Taken: 1.5s\n"
        );
    }

    #[test]
    fn test_open_port_lines() {
        let report = ScanReport {
            results: vec![
                ScanResult::new("127.0.0.1", 22).with_banner("SSH-2.0-OpenSSH_8.9\r\n"),
                ScanResult::new("127.0.0.1", 80),
            ],
            total_tasks: 1024,
            elapsed: Duration::from_secs(3),
        };
        let text = render(&report);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            r#"[+] 127.0.0.1:22 OPEN - Banner: "SSH-2.0-OpenSSH_8.9\r\n""#
        );
        assert_eq!(lines[1], "[+] 127.0.0.1:80 OPEN");
        assert!(text.contains("  Open Ports: 2\n"));
        assert!(text.contains("  Total Ports Scanned: 1024\n"));
    }
}
