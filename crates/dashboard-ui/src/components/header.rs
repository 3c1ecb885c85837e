use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Dashboard header, three lines:
///
/// 1. `"SALES DASHBOARD"` title.
/// 2. A separator as wide as `width` (at most 60 columns).
/// 3. `"[ 2018 vs 2017 | main_data.csv ]"`: the card year and the year
///    before it, which is what every card's change is measured against.
pub struct Header<'a> {
    /// Year the metric cards report on.
    pub year: i32,
    /// Name of the loaded dataset.
    pub source: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(year: i32, source: &'a str, theme: &'a Theme) -> Self {
        Self {
            year,
            source,
            theme,
        }
    }

    /// Number of terminal rows [`Header::to_lines`] produces.
    pub const HEIGHT: u16 = 3;

    pub fn to_lines(&self, width: u16) -> Vec<Line<'a>> {
        let separator = "─".repeat(usize::from(width.min(60)));

        vec![
            Line::from(Span::styled("SALES DASHBOARD", self.theme.header)),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(
                    format!("{} vs {}", self.year, self.year.saturating_sub(1)),
                    self.theme.value,
                ),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.source, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
