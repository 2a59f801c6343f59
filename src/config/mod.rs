//! Configuration management for portscan.
//!
//! Persistent defaults live in an XDG-compliant settings file; command-line
//! flags override them when given.

mod settings;

pub use settings::{AppSettings, Paths};
