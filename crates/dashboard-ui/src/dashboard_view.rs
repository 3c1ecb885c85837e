//! Full-screen dashboard layout.
//!
//! Stacks the header, one metric card per configured region, the chart-mode
//! tabs, the selection line, the revenue chart and a key help footer.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use dashboard_core::models::Dimension;
use dashboard_core::settings::DashboardConfig;
use dashboard_data::snapshot::{DashboardSnapshot, Selection};

use crate::components::header::Header;
use crate::components::metric_card::MetricCardWidget;
use crate::components::revenue_chart::RevenueChart;
use crate::themes::Theme;

/// Inputs for one frame of the dashboard.
pub struct DashboardViewData<'a> {
    pub snapshot: &'a DashboardSnapshot,
    pub selection: &'a Selection,
    pub config: &'a DashboardConfig,
    /// Dataset name shown in the header.
    pub source: &'a str,
}

pub const HELP_TEXT: &str = "Tab: chart mode  ←/→: region  p: previous year  q: quit";

/// Render the whole dashboard into `area`.
pub fn render_dashboard(frame: &mut Frame, area: Rect, data: &DashboardViewData, theme: &Theme) {
    let [header_area, cards_area, tabs_area, selection_area, chart_area, help_area] =
        Layout::vertical([
            Constraint::Length(Header::HEIGHT),
            Constraint::Length(MetricCardWidget::HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .areas(area);

    let header = Header::new(data.config.year, data.source, theme);
    frame.render_widget(
        Paragraph::new(Text::from(header.to_lines(header_area.width))),
        header_area,
    );

    render_cards(frame, cards_area, data.snapshot, theme);

    let tabs = Tabs::new(Dimension::ALL.iter().map(|d| d.label()))
        .select(data.selection.dimension.index())
        .style(theme.tab)
        .highlight_style(theme.tab_selected)
        .divider("|");
    frame.render_widget(tabs, tabs_area);

    frame.render_widget(
        Paragraph::new(selection_line(data.selection, data.config, theme)),
        selection_area,
    );

    RevenueChart::new(&data.snapshot.chart, theme).render(frame, chart_area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(HELP_TEXT, theme.dim))),
        help_area,
    );
}

/// Lay the metric cards out side by side in configured order.
fn render_cards(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot, theme: &Theme) {
    let count = snapshot.cards.len();
    if count == 0 {
        return;
    }
    let constraints = vec![Constraint::Ratio(1, count as u32); count];
    let slots = Layout::horizontal(constraints).split(area);
    for (card, slot) in snapshot.cards.iter().zip(slots.iter()) {
        MetricCardWidget::new(card, theme).render(frame, *slot);
    }
}

/// `"Region: SP (1/3)   Previous Year: off"`
pub fn selection_line<'a>(
    selection: &'a Selection,
    config: &DashboardConfig,
    theme: &Theme,
) -> Line<'a> {
    let position = config
        .regions
        .iter()
        .position(|r| *r == selection.region)
        .map(|i| format!(" ({}/{})", i + 1, config.regions.len()))
        .unwrap_or_default();
    let toggle = if selection.show_previous_year {
        "on"
    } else {
        "off"
    };

    Line::from(vec![
        Span::styled("Region: ", theme.label),
        Span::styled(selection.region.as_str(), theme.value),
        Span::styled(position, theme.dim),
        Span::styled("   Previous Year: ", theme.label),
        Span::styled(toggle, theme.value),
    ])
}

/// Placeholder shown when the dataset has no rows at all.
pub fn render_no_data(frame: &mut Frame, area: Rect, source: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No sales data found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(format!("{source} contains no rows."), theme.dim)),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Sales Dashboard "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
