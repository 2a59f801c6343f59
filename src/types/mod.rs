//! Core scan input types.
//!
//! Targets and ports are resolved leniently from their string forms, then
//! crossed into [`ScanTask`]s by the [`TaskEnumerator`].

mod port;
mod target;
mod task;

pub use port::{parse_port_list, PortSelection};
pub use target::parse_targets;
pub use task::{total_tasks, ScanTask, TaskEnumerator};
