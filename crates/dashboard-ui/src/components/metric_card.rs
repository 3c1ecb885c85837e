use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use dashboard_data::snapshot::{CardState, MetricCard};

use crate::themes::Theme;

/// One region's revenue card: the total on the first line and the
/// year-over-year delta below it, or a "no data" message.
pub struct MetricCardWidget<'a> {
    pub card: &'a MetricCard,
    pub theme: &'a Theme,
}

impl<'a> MetricCardWidget<'a> {
    /// Rows a card needs, borders included.
    pub const HEIGHT: u16 = 4;

    pub fn new(card: &'a MetricCard, theme: &'a Theme) -> Self {
        Self { card, theme }
    }

    /// Body lines inside the border.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        match &self.card.state {
            CardState::Ready {
                content,
                description,
                summary,
            } => vec![
                Line::from(Span::styled(content.clone(), self.theme.card_value)),
                Line::from(Span::styled(
                    description.clone(),
                    self.theme.change_style(summary.change_pct),
                )),
            ],
            CardState::Error { message } => vec![
                Line::from(Span::styled("No data", self.theme.warning)),
                Line::from(Span::styled(message.clone(), self.theme.dim)),
            ],
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let border = if self.card.is_error() {
            self.theme.error
        } else {
            self.theme.card_border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(
                format!(" {} ", self.card.title),
                self.theme.card_title,
            ));
        frame.render_widget(Paragraph::new(self.to_lines()).block(block), area);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::models::RegionalSummary;
    use ratatui::backend::TestBackend;
    use ratatui::style::Color;
    use ratatui::Terminal;

    fn ready_card(change_pct: Option<f64>) -> MetricCard {
        MetricCard {
            title: "SP".to_string(),
            state: CardState::Ready {
                content: "$ 150.00".to_string(),
                description: dashboard_core::formatting::format_change(change_pct),
                summary: RegionalSummary {
                    region: "SP".to_string(),
                    year: 2018,
                    total_revenue: 150.0,
                    previous_total: change_pct.map(|_| 100.0),
                    change_pct,
                },
            },
        }
    }

    fn error_card() -> MetricCard {
        MetricCard {
            title: "RJ".to_string(),
            state: CardState::Error {
                message: "No data for region RJ in 2018".to_string(),
            },
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_ready_card_lines() {
        let theme = Theme::dark();
        let card = ready_card(Some(50.0));
        let lines = MetricCardWidget::new(&card, &theme).to_lines();
        assert_eq!(text(&lines[0]), "$ 150.00");
        assert_eq!(text(&lines[1]), "vs. Last Year: 50.00% change");
        assert_eq!(lines[1].spans[0].style.fg, Some(Color::Green));
    }

    #[test]
    fn test_ready_card_without_comparison_is_dimmed() {
        let theme = Theme::dark();
        let card = ready_card(None);
        let lines = MetricCardWidget::new(&card, &theme).to_lines();
        assert_eq!(text(&lines[1]), "vs. Last Year: n/a");
        assert_eq!(lines[1].spans[0].style.fg, theme.change_none.fg);
    }

    #[test]
    fn test_error_card_lines() {
        let theme = Theme::dark();
        let card = error_card();
        let lines = MetricCardWidget::new(&card, &theme).to_lines();
        assert_eq!(text(&lines[0]), "No data");
        assert!(text(&lines[1]).contains("RJ"));
    }

    #[test]
    fn test_render_writes_title_into_border() {
        let backend = TestBackend::new(40, MetricCardWidget::HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let card = ready_card(Some(50.0));

        terminal
            .draw(|frame| {
                let area = frame.area();
                MetricCardWidget::new(&card, &theme).render(frame, area);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let top: String = (0..40).map(|x| buffer[(x, 0)].symbol().to_string()).collect();
        assert!(top.contains(" SP "), "top border was {top:?}");
        let body: String = (0..40).map(|x| buffer[(x, 1)].symbol().to_string()).collect();
        assert!(body.contains("$ 150.00"), "body was {body:?}");
    }

    #[test]
    fn test_render_error_card_does_not_panic() {
        let backend = TestBackend::new(20, MetricCardWidget::HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();
        let card = error_card();

        terminal
            .draw(|frame| {
                let area = frame.area();
                MetricCardWidget::new(&card, &theme).render(frame, area);
            })
            .unwrap();
    }
}
