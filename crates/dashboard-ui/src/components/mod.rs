//! Reusable dashboard widgets.

pub mod header;
pub mod metric_card;
pub mod revenue_chart;
