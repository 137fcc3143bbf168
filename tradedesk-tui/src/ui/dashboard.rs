//! Dashboard page — static entry cards, no fetch and no view state.

use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::theme;

pub fn render(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Backtesting, screening, and trading journal",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled("Strategies [2]", theme::accent_bold())),
        Line::from(Span::styled(
            "Test your trading strategies against historical data and review the results.",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled("Screening [3]", theme::accent_bold())),
        Line::from(Span::styled(
            "Find the stocks that match your criteria and spot potential trades.",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled("Journal [4]", theme::accent_bold())),
        Line::from(Span::styled(
            "Track and analyze your trades to sharpen your strategy.",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled("Press ? for all keyboard shortcuts", theme::neutral())),
    ];

    let text = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(text, area);
}
