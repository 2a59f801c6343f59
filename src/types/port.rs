//! Port selection and lenient port-list parsing.
//!
//! Unlike a strict port specification, a malformed entry in an explicit list
//! is skipped rather than rejected, and ranges are taken as given: an
//! inverted range simply selects nothing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The set of ports a scan covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortSelection {
    /// Inclusive range `start..=end`.
    Range { start: u16, end: u16 },
    /// Comma-separated explicit list, e.g. `"22, 80,443"`.
    List(String),
}

impl PortSelection {
    /// Build a selection from the range bounds and an optional explicit list.
    ///
    /// A non-empty list overrides the range.
    pub fn new(start: u16, end: u16, list: Option<&str>) -> Self {
        match list {
            Some(list) if !list.is_empty() => Self::List(list.to_string()),
            _ => Self::Range { start, end },
        }
    }

    /// Resolve the selection into concrete port numbers, in order.
    pub fn resolve(&self) -> Vec<u16> {
        match self {
            Self::Range { start, end } => (*start..=*end).collect(),
            Self::List(list) => parse_port_list(list),
        }
    }
}

impl Default for PortSelection {
    fn default() -> Self {
        Self::Range { start: 1, end: 1024 }
    }
}

impl fmt::Display for PortSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range { start, end } => write!(f, "{}-{}", start, end),
            Self::List(list) => write!(f, "{}", list),
        }
    }
}

/// Parse a comma-separated port list, dropping entries that are not integers.
///
/// Order and duplicates are kept as written.
pub fn parse_port_list(spec: &str) -> Vec<u16> {
    spec.split(',')
        .filter_map(|part| part.trim().parse::<u16>().ok())
        .collect()
}
