//! Non-interactive output of a [`DashboardSnapshot`].
//!
//! [`Presenter`] is the card/chart rendering contract; [`present`] walks a
//! snapshot in display order and feeds it to any implementation.
//! [`TextReport`] prints plain text and [`write_json`] dumps the snapshot as
//! pretty JSON for scripting.

use std::io::{self, Write};

use dashboard_core::formatting::format_currency;
use dashboard_core::models::BreakdownRow;
use dashboard_data::snapshot::{CardState, DashboardSnapshot};
use unicode_width::UnicodeWidthStr;

/// Receives the pieces of a dashboard in display order.
pub trait Presenter {
    /// A region card: `primary` is the revenue, `secondary` the YoY line.
    fn render_metric_card(&mut self, title: &str, primary: &str, secondary: &str)
        -> io::Result<()>;

    /// A region card that could not be computed.
    fn render_card_error(&mut self, title: &str, message: &str) -> io::Result<()>;

    /// The chart. `rows` are already in bar order.
    fn render_bar_chart(&mut self, title: &str, rows: &[BreakdownRow]) -> io::Result<()>;
}

/// Feed `snapshot` to `presenter`: every card in configured order, then the
/// chart.
pub fn present<P: Presenter + ?Sized>(
    snapshot: &DashboardSnapshot,
    presenter: &mut P,
) -> io::Result<()> {
    for card in &snapshot.cards {
        match &card.state {
            CardState::Ready {
                content,
                description,
                ..
            } => presenter.render_metric_card(&card.title, content, description)?,
            CardState::Error { message } => presenter.render_card_error(&card.title, message)?,
        }
    }

    let chart = &snapshot.chart;
    let title = format!(
        "{} ({}, by {})",
        chart.title,
        chart.region,
        chart.dimension.label()
    );
    presenter.render_bar_chart(&title, &chart.rows)
}

/// Write `snapshot` as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(snapshot: &DashboardSnapshot, mut writer: W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, snapshot)?;
    writeln!(writer)
}

// ── Text presenter ────────────────────────────────────────────────────────────

/// Plain-text [`Presenter`].
///
/// ```text
/// SP
///   $ 150.00
///   vs. Last Year: 50.00% change
///
/// Sales for 2018 (SP, by Month)
///   01  $ 150.00
/// ```
pub struct TextReport<W: Write> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TextReport<W> {
    fn render_metric_card(
        &mut self,
        title: &str,
        primary: &str,
        secondary: &str,
    ) -> io::Result<()> {
        writeln!(self.out, "{title}")?;
        writeln!(self.out, "  {primary}")?;
        writeln!(self.out, "  {secondary}")?;
        writeln!(self.out)
    }

    fn render_card_error(&mut self, title: &str, message: &str) -> io::Result<()> {
        writeln!(self.out, "{title}")?;
        writeln!(self.out, "  No data: {message}")?;
        writeln!(self.out)
    }

    fn render_bar_chart(&mut self, title: &str, rows: &[BreakdownRow]) -> io::Result<()> {
        writeln!(self.out, "{title}")?;
        if rows.is_empty() {
            return writeln!(self.out, "  (no sales)");
        }
        let label_width = rows
            .iter()
            .map(|r| r.dimension_value.width())
            .max()
            .unwrap_or(0);
        for row in rows {
            let pad = label_width - row.dimension_value.width();
            writeln!(
                self.out,
                "  {}{}  {}",
                row.dimension_value,
                " ".repeat(pad),
                format_currency(row.revenue)
            )?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
