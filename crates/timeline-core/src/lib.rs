//! Shared domain layer for the complexity timeline.
//!
//! Holds the typed records that flow through the pipeline, the error
//! taxonomy, command-line settings, and number formatting helpers.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
