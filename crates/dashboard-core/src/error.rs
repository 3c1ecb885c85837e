use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the sales dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// One or more required columns are absent from the CSV header.
    #[error("Missing required column(s): {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    /// A `year_month` cell could not be parsed as a calendar month.
    #[error("Malformed period {value:?} on line {line}")]
    MalformedDate { line: u64, value: String },

    /// A `revenue` cell is present but not a number.
    #[error("Invalid revenue {value:?} on line {line}")]
    InvalidRevenue { line: u64, value: String },

    /// A configured region has no rows for the requested year.
    #[error("No data for region {region} in {year}")]
    MissingRegion { region: String, year: i32 },

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV stream itself is structurally broken.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON document could not be parsed or written.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// No dataset was given and none could be discovered.
    #[error("Data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// `true` for errors that abort loading the dataset.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            DashboardError::Schema { .. }
                | DashboardError::MalformedDate { .. }
                | DashboardError::InvalidRevenue { .. }
                | DashboardError::FileRead { .. }
                | DashboardError::Csv(_)
                | DashboardError::DataPathNotFound(_)
        )
    }
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_schema_lists_all_columns() {
        let err = DashboardError::Schema {
            missing: vec!["seller_state".to_string(), "revenue".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Missing required column(s): seller_state, revenue"
        );
    }

    #[test]
    fn test_error_display_malformed_date() {
        let err = DashboardError::MalformedDate {
            line: 7,
            value: "2018-13".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed period \"2018-13\" on line 7");
    }

    #[test]
    fn test_error_display_invalid_revenue() {
        let err = DashboardError::InvalidRevenue {
            line: 3,
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid revenue \"abc\" on line 3");
    }

    #[test]
    fn test_error_display_missing_region() {
        let err = DashboardError::MissingRegion {
            region: "RJ".to_string(),
            year: 2018,
        };
        assert_eq!(err.to_string(), "No data for region RJ in 2018");
    }

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = DashboardError::FileRead {
            path: PathBuf::from("/some/main_data.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/main_data.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_data_path_not_found() {
        let err = DashboardError::DataPathNotFound(PathBuf::from("/missing/data.csv"));
        assert_eq!(err.to_string(), "Data path not found: /missing/data.csv");
    }

    #[test]
    fn test_error_display_config() {
        let err = DashboardError::Config("region list is empty".to_string());
        assert_eq!(err.to_string(), "Configuration error: region list is empty");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DashboardError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: DashboardError = json_err.into();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }

    #[test]
    fn test_is_load_error() {
        assert!(DashboardError::Schema { missing: vec![] }.is_load_error());
        assert!(DashboardError::MalformedDate {
            line: 2,
            value: "x".to_string()
        }
        .is_load_error());
        assert!(!DashboardError::MissingRegion {
            region: "SP".to_string(),
            year: 2018
        }
        .is_load_error());
        assert!(!DashboardError::Config("x".to_string()).is_load_error());
    }
}
