//! Revenue aggregation: yearly regional totals, year-over-year change and
//! per-selection breakdowns by month or product category.

use std::collections::BTreeMap;

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::formatting::percent_change;
use dashboard_core::models::{BreakdownRow, Dimension, RegionalSummary};
use tracing::debug;

use crate::table::SalesTable;

/// Revenue per year, per region.
pub type YearlyTotals<'a> = BTreeMap<&'a str, BTreeMap<i32, f64>>;

// ── RevenueAggregator ─────────────────────────────────────────────────────────

/// Stateless helper that groups sales rows into dashboard figures.
pub struct RevenueAggregator;

impl RevenueAggregator {
    /// Sum revenue by (region, year).
    ///
    /// A region/year pair is present in the result iff the table has at least
    /// one row for it, even when those rows sum to zero.
    pub fn yearly_totals(table: &SalesTable) -> YearlyTotals<'_> {
        let mut totals: YearlyTotals<'_> = BTreeMap::new();
        for record in table.records() {
            *totals
                .entry(record.region.as_str())
                .or_default()
                .entry(record.year)
                .or_insert(0.0) += record.revenue;
        }
        totals
    }

    /// Current-year total and change against `year - 1` for one region.
    ///
    /// Fails with [`DashboardError::MissingRegion`] when the region has no
    /// rows in `year`. A missing previous year is not an error; it leaves
    /// `change_pct` empty.
    pub fn summarize_region(
        table: &SalesTable,
        region: &str,
        year: i32,
    ) -> Result<RegionalSummary> {
        let totals = Self::yearly_totals(table);
        Self::summary_from_totals(&totals, region, year)
    }

    /// Summaries for a fixed list of regions, in the given order.
    ///
    /// Each region carries its own result so a missing region does not stop
    /// the others from being reported.
    pub fn summarize_regions(
        table: &SalesTable,
        regions: &[String],
        year: i32,
    ) -> Vec<(String, Result<RegionalSummary>)> {
        let totals = Self::yearly_totals(table);
        regions
            .iter()
            .map(|region| {
                (
                    region.clone(),
                    Self::summary_from_totals(&totals, region, year),
                )
            })
            .collect()
    }

    /// Revenue for one region and year grouped by `dimension`.
    ///
    /// `top_n` only applies to [`Dimension::ProductCategory`]. An empty
    /// selection yields an empty vector.
    pub fn breakdown(
        table: &SalesTable,
        region: &str,
        year: i32,
        dimension: Dimension,
        top_n: Option<usize>,
    ) -> Vec<BreakdownRow> {
        let rows = match dimension {
            Dimension::Month => Self::breakdown_by_month(table, region, year),
            Dimension::ProductCategory => {
                Self::breakdown_by_category(table, region, year, top_n)
            }
        };
        debug!(
            "Breakdown {} for {} {}: {} rows",
            dimension.cli_name(),
            region,
            year,
            rows.len()
        );
        rows
    }

    /// Monthly revenue, ascending by month, labelled `"01"`..`"12"`.
    pub fn breakdown_by_month(table: &SalesTable, region: &str, year: i32) -> Vec<BreakdownRow> {
        let mut by_month: BTreeMap<u32, BreakdownRow> = BTreeMap::new();
        for record in table.rows_for(region, year) {
            by_month
                .entry(record.month)
                .or_insert_with(|| BreakdownRow::new(record.month_label(), 0.0))
                .revenue += record.revenue;
        }
        by_month.into_values().collect()
    }

    /// Category revenue, largest first, optionally cut to the `top_n`
    /// largest. Equal sums are ordered by category name, with the
    /// `"unknown"` group of empty categories after every named one.
    pub fn breakdown_by_category(
        table: &SalesTable,
        region: &str,
        year: i32,
        top_n: Option<usize>,
    ) -> Vec<BreakdownRow> {
        // Keyed by (is_unknown, name) so named categories sort first.
        let mut groups: BTreeMap<(bool, &str), f64> = BTreeMap::new();
        for record in table.rows_for(region, year) {
            let key = (record.product_category.is_none(), record.category_label());
            *groups.entry(key).or_insert(0.0) += record.revenue;
        }

        let mut rows: Vec<BreakdownRow> = groups
            .into_iter()
            .map(|((_, label), revenue)| BreakdownRow::new(label, revenue))
            .collect();
        // Stable sort keeps key order among ties.
        rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
        if let Some(n) = top_n {
            rows.truncate(n);
        }
        rows
    }

    // ── Private ───────────────────────────────────────────────────────────────

    fn summary_from_totals(
        totals: &YearlyTotals<'_>,
        region: &str,
        year: i32,
    ) -> Result<RegionalSummary> {
        let by_year = totals.get(region);
        let total_revenue = by_year
            .and_then(|years| years.get(&year))
            .copied()
            .ok_or_else(|| DashboardError::MissingRegion {
                region: region.to_string(),
                year,
            })?;
        let previous_total = year
            .checked_sub(1)
            .and_then(|prev| by_year.and_then(|years| years.get(&prev)))
            .copied();

        Ok(RegionalSummary {
            region: region.to_string(),
            year,
            total_revenue,
            previous_total,
            change_pct: previous_total.and_then(|prev| percent_change(total_revenue, prev)),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
