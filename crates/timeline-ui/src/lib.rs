//! Terminal UI layer for the complexity timeline.
//!
//! Provides themes, the header, month selector and chart components, the
//! monthly table view, and the application event loop built on top of
//! [`ratatui`].

pub mod app;
pub mod components;
pub mod table_view;
pub mod themes;

pub use timeline_core as core;
