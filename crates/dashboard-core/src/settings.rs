use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{DashboardError, Result};
use crate::models::Dimension;

/// Default target year of the dashboard.
pub const DEFAULT_YEAR: i32 = 2018;

/// Default top-N limit for the product category chart.
pub const DEFAULT_TOP_N: usize = 5;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Regional sales dashboard with year-over-year revenue comparison
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sales-dashboard",
    about = "Regional sales dashboard with year-over-year revenue comparison",
    version
)]
pub struct Settings {
    /// Sales CSV file (discovered automatically if not specified)
    #[arg(long, env = "SALES_DASHBOARD_DATA")]
    pub data: Option<PathBuf>,

    /// View mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "report"])]
    pub view: String,

    /// Output format for the report view
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Target year for the metric cards
    #[arg(long, default_value_t = DEFAULT_YEAR, value_parser = year_parser())]
    pub year: i32,

    /// Year shown when the previous-year toggle is on (defaults to year - 1)
    #[arg(long, value_parser = year_parser())]
    pub comparison_year: Option<i32>,

    /// Regions shown as metric cards, in display order
    #[arg(long, value_delimiter = ',', default_value = "SP,MG,PR")]
    pub regions: Vec<String>,

    /// Initially selected region (defaults to the first configured region)
    #[arg(long)]
    pub region: Option<String>,

    /// Chart grouping
    #[arg(long, default_value = "month", value_parser = ["month", "category"])]
    pub chart: String,

    /// Start with the previous-year toggle on
    #[arg(long)]
    pub previous_year: bool,

    /// Number of product categories shown in the category chart
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..=50))]
    pub top_n: u32,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(
        long,
        default_value = "INFO",
        value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"]
    )]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

/// Years accepted on the command line.
fn year_parser() -> clap::builder::RangedI64ValueParser<i32> {
    clap::value_parser!(i32).range(1..=9999)
}

// ── DashboardConfig ────────────────────────────────────────────────────────────

/// Validated, static configuration consumed by the aggregation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Year the metric cards report on.
    pub year: i32,
    /// Year charted when the previous-year toggle is on.
    pub comparison_year: i32,
    /// Fixed, ordered region set.
    pub regions: Vec<String>,
    /// Maximum number of bars in the product category chart.
    pub top_n: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            year: DEFAULT_YEAR,
            comparison_year: DEFAULT_YEAR - 1,
            regions: vec!["SP".to_string(), "MG".to_string(), "PR".to_string()],
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl DashboardConfig {
    /// Reject configurations the dashboard cannot render.
    pub fn validate(&self) -> Result<()> {
        if self.regions.is_empty() {
            return Err(DashboardError::Config("region list is empty".to_string()));
        }
        if let Some(blank) = self.regions.iter().find(|r| r.trim().is_empty()) {
            return Err(DashboardError::Config(format!(
                "blank region code {blank:?}"
            )));
        }
        for (i, region) in self.regions.iter().enumerate() {
            if self.regions[..i].contains(region) {
                return Err(DashboardError::Config(format!(
                    "region {region} is listed more than once"
                )));
            }
        }
        if self.top_n == 0 {
            return Err(DashboardError::Config(
                "top-n must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.sales-dashboard/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<String>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".sales-dashboard").join("last_used.json")
    }

    /// Read persisted params; `Ok(None)` when the file does not exist.
    pub fn try_load_from(path: &std::path::Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be read.
    pub fn load_from(path: &std::path::Path) -> Self {
        match Self::try_load_from(path) {
            Ok(params) => params.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Atomically write params to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation – accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!("Could not clear {}: {}", config_path.display(), e);
            }
            return settings.apply_debug();
        }

        let last = LastUsedParams::load_from(config_path);

        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "chart") {
            if let Some(v) = last.chart {
                settings.chart = v;
            }
        }
        // A remembered region only applies while it is still configured.
        if settings.region.is_none() {
            settings.region = last.region.filter(|r| settings.regions.contains(r));
        }

        settings = settings.apply_debug();

        if let Err(e) = LastUsedParams::from(&settings).save_to(config_path) {
            tracing::warn!("Could not persist {}: {}", config_path.display(), e);
        }

        settings
    }

    /// `--debug` overrides the log level.
    fn apply_debug(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }

    /// Build and validate the aggregation configuration.
    pub fn dashboard_config(&self) -> Result<DashboardConfig> {
        let regions: Vec<String> = self
            .regions
            .iter()
            .map(|r| r.trim().to_string())
            .collect();
        let config = DashboardConfig {
            year: self.year,
            comparison_year: self
                .comparison_year
                .unwrap_or_else(|| self.year.saturating_sub(1)),
            regions,
            top_n: self.top_n as usize,
        };
        config.validate()?;

        if let Some(region) = &self.region {
            if !config.regions.contains(region) {
                return Err(DashboardError::Config(format!(
                    "selected region {region} is not one of {}",
                    config.regions.join(", ")
                )));
            }
        }
        Ok(config)
    }

    /// Chart dimension selected on the command line or restored from disk.
    pub fn dimension(&self) -> Dimension {
        Dimension::from_cli_name(&self.chart)
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            region: s.region.clone(),
            chart: Some(s.chart.clone()),
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
