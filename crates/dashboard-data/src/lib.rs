//! Data layer for the sales dashboard.
//!
//! Loads the sales CSV into an immutable [`table::SalesTable`], aggregates
//! regional yearly totals and breakdowns, and assembles the snapshot the
//! presentation layer renders.

pub mod aggregator;
pub mod reader;
pub mod snapshot;
pub mod table;

pub use dashboard_core as core;
