use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use dashboard_core::formatting::format_compact;
use dashboard_data::snapshot::ChartView;

use crate::themes::Theme;

const BAR_GAP: u16 = 1;
const MAX_BAR_WIDTH: u16 = 12;

/// Vertical bar chart of one breakdown. Bars keep the breakdown's order.
pub struct RevenueChart<'a> {
    pub chart: &'a ChartView,
    pub theme: &'a Theme,
}

impl<'a> RevenueChart<'a> {
    pub fn new(chart: &'a ChartView, theme: &'a Theme) -> Self {
        Self { chart, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.card_border)
            .title(Span::styled(
                format!(" {} ", self.chart.title),
                self.theme.value,
            ));

        if self.chart.rows.is_empty() {
            let text = vec![
                Line::from(""),
                Line::from(Span::styled("No sales for this selection", self.theme.warning)),
                Line::from(Span::styled(
                    format!("{} in {}", self.chart.region, self.chart.year),
                    self.theme.dim,
                )),
            ];
            frame.render_widget(Paragraph::new(text).block(block), area);
            return;
        }

        let width = bar_width(area.width.saturating_sub(2), self.chart.rows.len());
        let bars: Vec<Bar> = self
            .chart
            .rows
            .iter()
            .map(|row| {
                Bar::default()
                    .value(bar_value(row.revenue))
                    .text_value(format_compact(row.revenue))
                    .label(Line::from(truncate_label(
                        &row.dimension_value,
                        usize::from(width),
                    )))
            })
            .collect();

        let chart = BarChart::default()
            .block(block)
            .bar_width(width)
            .bar_gap(BAR_GAP)
            .bar_style(self.theme.bar)
            .value_style(self.theme.bar_value)
            .label_style(self.theme.bar_label)
            .data(BarGroup::default().bars(&bars));

        frame.render_widget(chart, area);
    }
}

/// Widest bar that fits `count` bars into `inner_width` columns.
pub fn bar_width(inner_width: u16, count: usize) -> u16 {
    if count == 0 {
        return MAX_BAR_WIDTH;
    }
    let count = u16::try_from(count).unwrap_or(u16::MAX);
    let per_bar = inner_width.saturating_add(BAR_GAP) / count;
    per_bar.saturating_sub(BAR_GAP).clamp(1, MAX_BAR_WIDTH)
}

/// Bars cannot go below zero; negative sums draw as empty bars.
fn bar_value(revenue: f64) -> u64 {
    if revenue.is_finite() && revenue > 0.0 {
        revenue.round() as u64
    } else {
        0
    }
}

/// Cut `label` to at most `width` terminal columns.
pub fn truncate_label(label: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for c in label.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
