//! The immutable, load-once sales table.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use dashboard_core::models::SalesRecord;

/// Every transaction row of the dataset.
///
/// Built once at start-up and only ever handed out by shared reference; no
/// method mutates the rows after construction.
#[derive(Debug, Clone, Default)]
pub struct SalesTable {
    records: Vec<SalesRecord>,
    source: Option<PathBuf>,
}

impl SalesTable {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self {
            records,
            source: None,
        }
    }

    /// Remember which file the rows came from.
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.records.iter().map(|r| r.year).collect();
        years.into_iter().collect()
    }

    /// Distinct region codes present, ascending.
    pub fn regions(&self) -> Vec<&str> {
        let regions: BTreeSet<&str> = self.records.iter().map(|r| r.region.as_str()).collect();
        regions.into_iter().collect()
    }

    /// Rows for one region in one year, in table order.
    pub fn rows_for<'a>(
        &'a self,
        region: &'a str,
        year: i32,
    ) -> impl Iterator<Item = &'a SalesRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| r.year == year && r.region == region)
    }

    /// `true` when at least one row exists for `region` in `year`.
    pub fn has_rows(&self, region: &str, year: i32) -> bool {
        self.rows_for(region, year).next().is_some()
    }
}
