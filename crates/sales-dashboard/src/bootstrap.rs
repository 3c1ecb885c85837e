use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Name of the dataset file looked up by [`discover_data_path`].
pub const DATA_FILE_NAME: &str = "main_data.csv";

const APP_DIR: &str = ".sales-dashboard";

// ── Directory bootstrap ────────────────────────────────────────────────────────

fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Ensure `~/.sales-dashboard/` and `~/.sales-dashboard/logs/` exist.
pub fn ensure_directories() -> anyhow::Result<()> {
    let dir = app_dir();
    std::fs::create_dir_all(dir.join("logs"))
        .with_context(|| format!("creating {}", dir.display()))?;
    Ok(())
}

/// Default log file used by the interactive view.
pub fn default_log_file() -> PathBuf {
    app_dir().join("logs").join("dashboard.log")
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` value to an [`EnvFilter`] directive.
fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        other => other.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Events go to `log_file` when given (appending) and to stderr when
/// `to_stderr` is set. The TUI passes a file and no stderr so log lines do
/// not tear the alternate screen.
pub fn setup_logging(
    log_level: &str,
    log_file: Option<&Path>,
    to_stderr: bool,
) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(level_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}

// ── Data-path discovery ────────────────────────────────────────────────────────

/// Candidate dataset locations, in lookup order.
pub fn data_path_candidates(cwd: &Path, home: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = vec![
        cwd.join(DATA_FILE_NAME),
        cwd.join("dashboard").join(DATA_FILE_NAME),
    ];
    if let Some(home) = home {
        candidates.push(home.join(APP_DIR).join(DATA_FILE_NAME));
    }
    candidates
}

/// Locate the sales dataset.
///
/// Checks the following paths in order and returns the first file found:
/// 1. `./main_data.csv`
/// 2. `./dashboard/main_data.csv`
/// 3. `~/.sales-dashboard/main_data.csv`
pub fn discover_data_path() -> Option<PathBuf> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let home = dirs::home_dir();
    data_path_candidates(&cwd, home.as_deref())
        .into_iter()
        .find(|p| p.is_file())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn first_existing(cwd: &Path, home: Option<&Path>) -> Option<PathBuf> {
        data_path_candidates(cwd, home)
            .into_iter()
            .find(|p| p.is_file())
    }

    #[test]
    fn test_ensure_directories() {
        let tmp = TempDir::new().expect("tempdir");

        // Override HOME so that dirs::home_dir() resolves to our temp dir.
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", tmp.path());

        let result = ensure_directories();
        let log_file = default_log_file();

        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }

        result.expect("ensure_directories should succeed");

        let app_dir = tmp.path().join(".sales-dashboard");
        assert!(app_dir.is_dir(), ".sales-dashboard dir must exist");
        assert!(app_dir.join("logs").is_dir(), "logs subdir must exist");
        assert_eq!(log_file, app_dir.join("logs").join("dashboard.log"));
    }

    #[test]
    fn test_level_directive() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("CRITICAL"), "error");
        assert_eq!(level_directive("info"), "info");
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("ERROR"), "error");
        assert_eq!(level_directive("TRACE"), "trace");
    }

    #[test]
    fn test_candidates_order() {
        let cwd = Path::new("/work");
        let home = Path::new("/home/u");
        assert_eq!(
            data_path_candidates(cwd, Some(home)),
            vec![
                PathBuf::from("/work/main_data.csv"),
                PathBuf::from("/work/dashboard/main_data.csv"),
                PathBuf::from("/home/u/.sales-dashboard/main_data.csv"),
            ]
        );
        assert_eq!(data_path_candidates(cwd, None).len(), 2);
    }

    #[test]
    fn test_discovery_returns_none_when_absent() {
        let cwd = TempDir::new().expect("tempdir");
        let home = TempDir::new().expect("tempdir");
        assert_eq!(first_existing(cwd.path(), Some(home.path())), None);
    }

    #[test]
    fn test_discovery_prefers_working_directory() {
        let cwd = TempDir::new().expect("tempdir");
        let home = TempDir::new().expect("tempdir");
        let local = cwd.path().join("main_data.csv");
        std::fs::write(&local, "year_month\n").unwrap();
        std::fs::create_dir_all(cwd.path().join("dashboard")).unwrap();
        std::fs::write(cwd.path().join("dashboard").join("main_data.csv"), "").unwrap();

        assert_eq!(first_existing(cwd.path(), Some(home.path())), Some(local));
    }

    #[test]
    fn test_discovery_falls_back_to_home() {
        let cwd = TempDir::new().expect("tempdir");
        let home = TempDir::new().expect("tempdir");
        let dir = home.path().join(".sales-dashboard");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("main_data.csv"), "").unwrap();

        assert_eq!(
            first_existing(cwd.path(), Some(home.path())),
            Some(dir.join("main_data.csv"))
        );
    }

    #[test]
    fn test_discovery_ignores_directories() {
        let cwd = TempDir::new().expect("tempdir");
        std::fs::create_dir_all(cwd.path().join("main_data.csv")).unwrap();
        assert_eq!(first_existing(cwd.path(), None), None);
    }
}
