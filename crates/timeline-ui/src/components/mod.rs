pub mod chart;
pub mod header;
pub mod month_selector;
