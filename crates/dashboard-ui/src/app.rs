//! Application state and TUI event loop for the sales dashboard.
//!
//! [`App`] owns the theme, the user's selection and the last computed
//! snapshot. Every interaction that changes the selection triggers one full
//! recomputation over the shared, read-only [`SalesTable`].

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tracing::debug;

use dashboard_core::models::Dimension;
use dashboard_core::settings::DashboardConfig;
use dashboard_data::snapshot::{build_snapshot, DashboardSnapshot, Selection};
use dashboard_data::table::SalesTable;

use crate::dashboard_view::{self, DashboardViewData};
use crate::themes::Theme;

const TICK_RATE: Duration = Duration::from_millis(250);

/// Root application state for the dashboard TUI.
pub struct App<'t> {
    table: &'t SalesTable,
    config: DashboardConfig,
    /// Dataset name shown in the header.
    source: String,
    pub theme: Theme,
    pub selection: Selection,
    pub snapshot: DashboardSnapshot,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl<'t> App<'t> {
    /// Build the initial state and compute the first snapshot.
    ///
    /// `region` falls back to the first configured region when absent or not
    /// configured.
    pub fn new(
        table: &'t SalesTable,
        config: DashboardConfig,
        theme_name: &str,
        region: Option<&str>,
        dimension: Dimension,
        show_previous_year: bool,
    ) -> Self {
        let region = region
            .filter(|r| config.regions.iter().any(|c| c == r))
            .or_else(|| config.regions.first().map(String::as_str))
            .unwrap_or_default()
            .to_string();
        let selection = Selection {
            region,
            dimension,
            show_previous_year,
        };
        let snapshot = build_snapshot(table, &config, &selection);
        let source = table
            .source()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "in-memory".to_string());

        Self {
            table,
            config,
            source,
            theme: Theme::from_name(theme_name),
            selection,
            snapshot,
            should_quit: false,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the interactive dashboard until `q`, `Esc` or `Ctrl+C`.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(TICK_RATE)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Apply one key press. Returns `true` when the selection changed and
    /// the snapshot was recomputed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                false
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                false
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('m') | KeyCode::Char('c') => {
                self.selection.dimension = self.selection.dimension.toggled();
                self.refresh();
                true
            }
            KeyCode::Right | KeyCode::Char('r') => self.step_region(1),
            KeyCode::Left => self.step_region(-1),
            KeyCode::Char('p') => {
                self.selection.show_previous_year = !self.selection.show_previous_year;
                self.refresh();
                true
            }
            _ => false,
        }
    }

    /// Move the region selection by `step`, wrapping around.
    fn step_region(&mut self, step: isize) -> bool {
        let regions = &self.config.regions;
        if regions.len() < 2 {
            return false;
        }
        let current = regions
            .iter()
            .position(|r| *r == self.selection.region)
            .unwrap_or(0);
        let len = regions.len() as isize;
        let next = (current as isize + step).rem_euclid(len) as usize;
        self.selection.region = regions[next].clone();
        self.refresh();
        true
    }

    /// Recompute the snapshot for the current selection.
    fn refresh(&mut self) {
        debug!(
            "Recomputing for region={} chart={} previous_year={}",
            self.selection.region,
            self.selection.dimension.cli_name(),
            self.selection.show_previous_year
        );
        self.snapshot = build_snapshot(self.table, &self.config, &self.selection);
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        if self.table.is_empty() {
            dashboard_view::render_no_data(frame, area, &self.source, &self.theme);
            return;
        }
        let data = DashboardViewData {
            snapshot: &self.snapshot,
            selection: &self.selection,
            config: &self.config,
            source: &self.source,
        };
        dashboard_view::render_dashboard(frame, area, &data, &self.theme);
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
