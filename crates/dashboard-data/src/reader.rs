//! CSV loading for the sales dataset.
//!
//! Reads the pre-aggregated transaction table, checks the header for the
//! required columns and converts every row into a [`SalesRecord`] with its
//! calendar fields derived from `year_month`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::SalesRecord;
use dashboard_core::period::parse_year_month;
use tracing::{debug, info};

use crate::table::SalesTable;

pub const PERIOD_COLUMN: &str = "year_month";
pub const REGION_COLUMN: &str = "seller_state";
pub const CATEGORY_COLUMN: &str = "product_category_name_english";
pub const REVENUE_COLUMN: &str = "revenue";

/// Columns every input file must carry, in the order they are reported when
/// missing.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    PERIOD_COLUMN,
    REGION_COLUMN,
    CATEGORY_COLUMN,
    REVENUE_COLUMN,
];

/// Cell values read as "no value", on top of the empty cell.
pub const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// `true` for an empty cell or one of [`MISSING_MARKERS`].
pub fn is_missing(cell: &str) -> bool {
    cell.is_empty() || MISSING_MARKERS.contains(&cell)
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the sales table from a CSV file on disk.
pub fn load_sales_table(path: &Path) -> Result<SalesTable> {
    let file = File::open(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_sales_csv(file)?;
    let table = SalesTable::new(records).with_source(path);

    info!(
        "Loaded {} rows from {} (years: {:?}, regions: {})",
        table.len(),
        path.display(),
        table.years(),
        table.regions().len()
    );
    Ok(table)
}

/// Parse CSV text into sales records.
///
/// Fails on the first row whose period or revenue cannot be parsed; a
/// partially loaded table is never returned.
pub fn parse_sales_csv<R: Read>(input: R) -> Result<Vec<SalesRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::resolve(&headers)?;
    debug!(
        "CSV headers: {:?}",
        headers.iter().collect::<Vec<_>>()
    );

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        records.push(columns.to_record(&row, line)?);
    }

    debug!("Parsed {} sales rows", records.len());
    Ok(records)
}

// ── Column lookup ─────────────────────────────────────────────────────────────

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    period: usize,
    region: usize,
    category: usize,
    revenue: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim().eq_ignore_ascii_case(name))
        };

        let found: Vec<Option<usize>> = REQUIRED_COLUMNS.iter().map(|c| find(*c)).collect();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .zip(&found)
            .filter(|(_, idx)| idx.is_none())
            .map(|(name, _)| name.to_string())
            .collect();

        match found.as_slice() {
            [Some(period), Some(region), Some(category), Some(revenue)] => Ok(Self {
                period: *period,
                region: *region,
                category: *category,
                revenue: *revenue,
            }),
            _ => Err(DashboardError::Schema { missing }),
        }
    }

    fn to_record(&self, row: &csv::StringRecord, line: u64) -> Result<SalesRecord> {
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        let period_text = cell(self.period);
        let period = parse_year_month(period_text).ok_or_else(|| DashboardError::MalformedDate {
            line,
            value: period_text.to_string(),
        })?;

        let category = cell(self.category);

        Ok(SalesRecord {
            year: period.year,
            month: period.month,
            region: cell(self.region).to_string(),
            product_category: (!is_missing(category)).then(|| category.to_string()),
            revenue: parse_revenue(cell(self.revenue), line)?,
        })
    }
}

/// Parse a revenue cell. Missing and `NaN` cells count as no revenue.
fn parse_revenue(text: &str, line: u64) -> Result<f64> {
    if is_missing(text) {
        return Ok(0.0);
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(0.0),
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(DashboardError::InvalidRevenue {
            line,
            value: text.to_string(),
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "year_month,seller_state,product_category_name_english,revenue";

    fn parse(body: &str) -> Result<Vec<SalesRecord>> {
        parse_sales_csv(format!("{HEADER}\n{body}").as_bytes())
    }

    #[test]
    fn test_parse_derives_year_and_month() {
        let records = parse("2018-03,SP,toys,100.5\n2017-12,MG,,20\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].year, 2018);
        assert_eq!(records[0].month, 3);
        assert_eq!(records[0].region, "SP");
        assert_eq!(records[0].product_category.as_deref(), Some("toys"));
        assert!((records[0].revenue - 100.5).abs() < 1e-9);
        assert_eq!(records[1].year, 2017);
        assert_eq!(records[1].month, 12);
    }

    #[test]
    fn test_empty_category_is_none() {
        let records = parse("2018-03,SP,,10\n2018-03,SP,  ,10\n").unwrap();
        assert!(records.iter().all(|r| r.product_category.is_none()));
    }

    #[test]
    fn test_missing_markers_are_unknown_category() {
        let records =
            parse("2018-03,SP,NA,1
2018-03,SP,null,1
2018-03,SP,None,1
2018-03,SP,N/A,1
")
                .unwrap();
        assert!(records.iter().all(|r| r.product_category.is_none()));
        assert!(records.iter().all(|r| r.category_label() == "unknown"));

        // Markers are matched exactly, not by case.
        let records = parse("2018-03,SP,Null,1
").unwrap();
        assert_eq!(records[0].product_category.as_deref(), Some("Null"));
    }

    #[test]
    fn test_column_order_and_extra_columns_are_ignored() {
        let csv = "revenue,extra,SELLER_STATE,product_category_name_english,year_month\n\
                   42,x,PR,garden,2018-01-15\n";
        let records = parse_sales_csv(csv.as_bytes()).unwrap();
        assert_eq!(records[0].region, "PR");
        assert_eq!(records[0].month, 1);
        assert!((records[0].revenue - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_bom_prefixed_header() {
        let csv = format!("\u{feff}{HEADER}\n2018-02,SP,toys,5\n");
        let records = parse_sales_csv(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_missing_columns_are_all_reported() {
        let err = parse_sales_csv("year_month,revenue\n2018-01,5\n".as_bytes()).unwrap_err();
        match err {
            DashboardError::Schema { missing } => {
                assert_eq!(missing, vec!["seller_state", "product_category_name_english"]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_period_reports_line() {
        let err = parse("2018-01,SP,toys,5\n2018-13,SP,toys,5\n").unwrap_err();
        match err {
            DashboardError::MalformedDate { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "2018-13");
            }
            other => panic!("expected malformed date, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_period_is_malformed() {
        let err = parse(",SP,toys,5\n").unwrap_err();
        assert!(matches!(err, DashboardError::MalformedDate { .. }));
    }

    #[test]
    fn test_revenue_cells() {
        let records = parse("2018-01,SP,a,\n2018-01,SP,b,NaN\n2018-01,SP,c,-3.5\n").unwrap();
        assert_eq!(records[0].revenue, 0.0);
        assert_eq!(records[1].revenue, 0.0);
        assert!((records[2].revenue + 3.5).abs() < 1e-9);

        let records = parse("2018-01,SP,a,NA
2018-01,SP,b,null
").unwrap();
        assert!(records.iter().all(|r| r.revenue == 0.0));

        let err = parse("2018-01,SP,a,12abc\n").unwrap_err();
        assert!(matches!(err, DashboardError::InvalidRevenue { line: 2, .. }));

        let err = parse("2018-01,SP,a,inf\n").unwrap_err();
        assert!(matches!(err, DashboardError::InvalidRevenue { .. }));
    }

    #[test]
    fn test_ragged_row_is_csv_error() {
        let err = parse("2018-01,SP,toys\n").unwrap_err();
        assert!(matches!(err, DashboardError::Csv(_)));
    }

    #[test]
    fn test_header_only_file_gives_empty_table() {
        let records = parse("").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_load_sales_table_from_file() {
        let mut file = NamedTempFile::new().expect("tempfile");
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "2018-05,SP,toys,10").unwrap();
        writeln!(file, "2017-05,SP,toys,8").unwrap();

        let table = load_sales_table(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.source(), Some(file.path()));
    }

    #[test]
    fn test_load_sales_table_missing_file() {
        let err = load_sales_table(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::FileRead { .. }));
        assert!(err.is_load_error());
    }
}
