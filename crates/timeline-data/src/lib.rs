//! Data pipeline for the complexity timeline.
//!
//! Responsible for reading the CSV dataset, normalizing rows into monthly
//! records, aggregating per-month statistics and the global average, and
//! generating the comparative narrative for a selected month.

pub mod aggregator;
pub mod analysis;
pub mod narrative;
pub mod normalizer;
pub mod source;

pub use timeline_core as core;
