//! Target list parsing.
//!
//! Targets are host names or IP literals handed to the resolver at dial
//! time, so no validation happens here.

/// Split a comma-separated target list and trim each entry.
///
/// Empty entries are kept; they simply never connect.
pub fn parse_targets(spec: &str) -> Vec<String> {
    spec.split(',').map(|t| t.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_target() {
        assert_eq!(parse_targets("127.0.0.1"), vec!["127.0.0.1"]);
    }

    #[test]
    fn test_targets_are_trimmed() {
        assert_eq!(
            parse_targets(" host1 ,host2,  ::1"),
            vec!["host1", "host2", "::1"]
        );
    }

    #[test]
    fn test_trailing_comma_keeps_empty_entry() {
        assert_eq!(parse_targets("a,"), vec!["a", ""]);
    }
}
