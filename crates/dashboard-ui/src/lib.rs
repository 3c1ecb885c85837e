//! Presentation layer for the sales dashboard.
//!
//! Provides themes, the header, metric card and revenue chart widgets, the
//! full dashboard view, the interactive event loop built on [`ratatui`], and
//! the plain text / JSON report presenter.

pub mod app;
pub mod components;
pub mod dashboard_view;
pub mod report;
pub mod themes;

pub use dashboard_core as core;
