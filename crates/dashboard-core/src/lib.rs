//! Shared types for the sales dashboard.
//!
//! Holds the error taxonomy, record and summary types, period parsing,
//! number formatting and the command-line settings used by every other
//! crate in the workspace.

pub mod error;
pub mod formatting;
pub mod models;
pub mod period;
pub mod settings;

pub use error::{DashboardError, Result};
