mod bootstrap;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use dashboard_core::settings::Settings;
use dashboard_core::DashboardError;
use dashboard_data::reader::load_sales_table;
use dashboard_data::snapshot::{build_snapshot, Selection};
use dashboard_ui::app::App;
use dashboard_ui::report::{self, TextReport};

/// Exit status for a dataset that could not be found or loaded.
const EXIT_LOAD_FAILED: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let (message, code) = failure(&err);
            tracing::error!("{message}");
            eprintln!("{message}");
            ExitCode::from(code)
        }
    }
}

/// User-facing message and exit status for a failed run.
fn failure(err: &anyhow::Error) -> (String, u8) {
    let is_load_error = err
        .downcast_ref::<DashboardError>()
        .is_some_and(DashboardError::is_load_error);
    if is_load_error {
        (format!("Could not load sales data: {err:#}"), EXIT_LOAD_FAILED)
    } else {
        (format!("Error: {err:#}"), 1)
    }
}

fn run() -> Result<()> {
    let settings = Settings::load_with_last_used();
    let config = settings.dashboard_config()?;
    let interactive = settings.view == "dashboard";

    bootstrap::ensure_directories()?;
    // The TUI owns the terminal, so it logs to a file unless told otherwise.
    let log_file = match (&settings.log_file, interactive) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(bootstrap::default_log_file()),
        (None, false) => None,
    };
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref(), !interactive)?;

    tracing::info!("Sales Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Year: {}, Regions: {}, Theme: {}",
        settings.view,
        config.year,
        config.regions.join(","),
        settings.theme
    );

    let data_path = match settings.data.clone().or_else(bootstrap::discover_data_path) {
        Some(path) => path,
        None => {
            return Err(DashboardError::DataPathNotFound(bootstrap::DATA_FILE_NAME.into()).into())
        }
    };
    let table = load_sales_table(&data_path)
        .with_context(|| format!("loading sales data from {}", data_path.display()))?;

    match settings.view.as_str() {
        "report" => {
            let selection = Selection {
                region: settings
                    .region
                    .clone()
                    .or_else(|| config.regions.first().cloned())
                    .unwrap_or_default(),
                dimension: settings.dimension(),
                show_previous_year: settings.previous_year,
            };
            let snapshot = build_snapshot(&table, &config, &selection);

            let stdout = io::stdout();
            let mut out = stdout.lock();
            if settings.format == "json" {
                report::write_json(&snapshot, &mut out)?;
            } else {
                report::present(&snapshot, &mut TextReport::new(&mut out))?;
            }
            out.flush()?;
        }

        _ => {
            tracing::info!("Starting interactive dashboard...");
            let app = App::new(
                &table,
                config,
                &settings.theme,
                settings.region.as_deref(),
                settings.dimension(),
                settings.previous_year,
            );
            app.run()
                .map_err(|e| DashboardError::Terminal(e.to_string()))?;
        }
    }

    Ok(())
}
