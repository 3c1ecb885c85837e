use serde::{Deserialize, Serialize};

/// Label used for rows whose product category cell is empty.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// A single transaction row read from the sales CSV, with its calendar
/// fields already derived from the `year_month` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Calendar year derived from the period.
    pub year: i32,
    /// Calendar month (1–12) derived from the period.
    pub month: u32,
    /// Region code, e.g. `"SP"`.
    pub region: String,
    /// Product category, `None` when the cell was empty.
    #[serde(default)]
    pub product_category: Option<String>,
    /// Revenue amount. Not validated for sign.
    pub revenue: f64,
}

impl SalesRecord {
    /// Category label used for grouping; absent categories map to
    /// [`UNKNOWN_CATEGORY`].
    pub fn category_label(&self) -> &str {
        self.product_category.as_deref().unwrap_or(UNKNOWN_CATEGORY)
    }

    /// Month rendered as two-digit text, e.g. `"03"`.
    pub fn month_label(&self) -> String {
        format!("{:02}", self.month)
    }
}

/// Revenue total for one region in one year, compared with the year before.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalSummary {
    pub region: String,
    pub year: i32,
    /// Sum of revenue for `region` in `year`.
    pub total_revenue: f64,
    /// Sum of revenue for `region` in `year - 1`, when any rows exist.
    pub previous_total: Option<f64>,
    /// Percent change against `previous_total`; `None` when there is no
    /// previous total or it is zero.
    pub change_pct: Option<f64>,
}

/// One bar of a breakdown chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    /// Two-digit month or product category label.
    pub dimension_value: String,
    pub revenue: f64,
}

impl BreakdownRow {
    pub fn new(dimension_value: impl Into<String>, revenue: f64) -> Self {
        Self {
            dimension_value: dimension_value.into(),
            revenue,
        }
    }
}

/// Dimension a breakdown chart is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    #[default]
    Month,
    ProductCategory,
}

impl Dimension {
    /// All dimensions in tab order.
    pub const ALL: [Dimension; 2] = [Dimension::Month, Dimension::ProductCategory];

    /// Tab label shown in the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Month => "Month",
            Dimension::ProductCategory => "Product Category",
        }
    }

    /// Short name accepted on the command line and persisted to disk.
    pub fn cli_name(&self) -> &'static str {
        match self {
            Dimension::Month => "month",
            Dimension::ProductCategory => "category",
        }
    }

    /// Parse a CLI name. Unknown names fall back to [`Dimension::Month`].
    pub fn from_cli_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "category" | "product_category" | "product-category" => Dimension::ProductCategory,
            _ => Dimension::Month,
        }
    }

    /// The other dimension.
    pub fn toggled(self) -> Self {
        match self {
            Dimension::Month => Dimension::ProductCategory,
            Dimension::ProductCategory => Dimension::Month,
        }
    }

    /// Position of this dimension in [`Dimension::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Dimension::Month => 0,
            Dimension::ProductCategory => 1,
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: Option<&str>, month: u32) -> SalesRecord {
        SalesRecord {
            year: 2018,
            month,
            region: "SP".to_string(),
            product_category: category.map(str::to_string),
            revenue: 10.0,
        }
    }

    #[test]
    fn test_category_label_falls_back_to_unknown() {
        assert_eq!(record(None, 1).category_label(), "unknown");
        assert_eq!(record(Some("toys"), 1).category_label(), "toys");
    }

    #[test]
    fn test_month_label_zero_padded() {
        assert_eq!(record(None, 3).month_label(), "03");
        assert_eq!(record(None, 12).month_label(), "12");
    }

    #[test]
    fn test_dimension_cli_names() {
        assert_eq!(Dimension::from_cli_name("month"), Dimension::Month);
        assert_eq!(
            Dimension::from_cli_name("category"),
            Dimension::ProductCategory
        );
        assert_eq!(
            Dimension::from_cli_name("Product_Category"),
            Dimension::ProductCategory
        );
        assert_eq!(Dimension::from_cli_name("weekly"), Dimension::Month);
        for dim in Dimension::ALL {
            assert_eq!(Dimension::from_cli_name(dim.cli_name()), dim);
        }
    }

    #[test]
    fn test_dimension_toggle_and_index() {
        assert_eq!(Dimension::Month.toggled(), Dimension::ProductCategory);
        assert_eq!(Dimension::ProductCategory.toggled(), Dimension::Month);
        assert_eq!(Dimension::ALL[Dimension::ProductCategory.index()], Dimension::ProductCategory);
    }

    #[test]
    fn test_dimension_serde_snake_case() {
        let json = serde_json::to_string(&Dimension::ProductCategory).unwrap();
        assert_eq!(json, "\"product_category\"");
    }

    #[test]
    fn test_dimension_display_uses_tab_label() {
        assert_eq!(Dimension::ProductCategory.to_string(), "Product Category");
    }
}
