//! Runtime orchestration layer for the complexity timeline.
//!
//! Runs CSV retrieval and analysis off the UI thread and hands the single
//! outcome back through a channel.

pub mod orchestrator;

pub use timeline_core as core;
pub use timeline_data as data;
