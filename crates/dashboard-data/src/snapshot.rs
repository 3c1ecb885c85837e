//! Assembles everything one dashboard frame shows: a metric card per
//! configured region and the bar chart for the current selection.

use serde::Serialize;

use dashboard_core::formatting::{format_change, format_currency};
use dashboard_core::models::{BreakdownRow, Dimension, RegionalSummary};
use dashboard_core::settings::DashboardConfig;
use tracing::warn;

use crate::aggregator::RevenueAggregator;
use crate::table::SalesTable;

// ── Selection ─────────────────────────────────────────────────────────────────

/// User choices that parameterise the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub region: String,
    pub dimension: Dimension,
    /// Chart the comparison year instead of the target year.
    pub show_previous_year: bool,
}

impl Selection {
    /// Year the chart shows under `config`.
    pub fn chart_year(&self, config: &DashboardConfig) -> i32 {
        if self.show_previous_year {
            config.comparison_year
        } else {
            config.year
        }
    }
}

// ── Snapshot types ────────────────────────────────────────────────────────────

/// Body of a metric card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CardState {
    Ready {
        /// Formatted current-year revenue, e.g. `"$ 1,234.56"`.
        content: String,
        /// Formatted YoY delta, e.g. `"vs. Last Year: 50.00% change"`.
        description: String,
        summary: RegionalSummary,
    },
    /// The region could not be summarised; shown as a "no data" card.
    Error { message: String },
}

/// One region's card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub title: String,
    #[serde(flatten)]
    pub state: CardState,
}

impl MetricCard {
    pub fn is_error(&self) -> bool {
        matches!(self.state, CardState::Error { .. })
    }
}

/// The bar chart for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    /// Heading, e.g. `"Sales for 2018"`.
    pub title: String,
    pub region: String,
    pub year: i32,
    pub dimension: Dimension,
    /// Bars in display order.
    pub rows: Vec<BreakdownRow>,
}

/// Everything needed to render one dashboard frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub year: i32,
    pub cards: Vec<MetricCard>,
    pub chart: ChartView,
}

// ── Builders ──────────────────────────────────────────────────────────────────

/// Compute the metric cards for every configured region, in order.
pub fn build_cards(table: &SalesTable, config: &DashboardConfig) -> Vec<MetricCard> {
    RevenueAggregator::summarize_regions(table, &config.regions, config.year)
        .into_iter()
        .map(|(region, result)| {
            let state = match result {
                Ok(summary) => CardState::Ready {
                    content: format_currency(summary.total_revenue),
                    description: format_change(summary.change_pct),
                    summary,
                },
                Err(e) => {
                    warn!("Card {}: {}", region, e);
                    CardState::Error {
                        message: e.to_string(),
                    }
                }
            };
            MetricCard {
                title: region,
                state,
            }
        })
        .collect()
}

/// Compute the chart for `selection`.
pub fn build_chart(
    table: &SalesTable,
    config: &DashboardConfig,
    selection: &Selection,
) -> ChartView {
    let year = selection.chart_year(config);
    let rows = RevenueAggregator::breakdown(
        table,
        &selection.region,
        year,
        selection.dimension,
        Some(config.top_n),
    );
    ChartView {
        title: format!("Sales for {year}"),
        region: selection.region.clone(),
        year,
        dimension: selection.dimension,
        rows,
    }
}

/// Run one full recomputation pass for the current selection.
pub fn build_snapshot(
    table: &SalesTable,
    config: &DashboardConfig,
    selection: &Selection,
) -> DashboardSnapshot {
    DashboardSnapshot {
        year: config.year,
        cards: build_cards(table, config),
        chart: build_chart(table, config, selection),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
