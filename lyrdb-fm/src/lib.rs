//! lyrdb-fm library - Fetch Monitor module
//!
//! Observes the external lyrics-fetch process and the catalog database,
//! reports progress to the operator, and detects completion. Strictly
//! read-only towards the store; console output is its only side effect.

pub mod logtail;
pub mod monitor;
pub mod probe;
pub mod report;

pub use monitor::{Monitor, MonitorSettings};
pub use probe::{CmdlineProbe, ProcessProbe};
