//! Strategies page — one card per catalog entry.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use tradedesk_core::domain::Strategy;

use crate::app::{AppState, ViewState};
use crate::theme;
use crate::ui::truncate;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.strategies.view {
        ViewState::Loading => {
            let text = Paragraph::new(Span::styled("Loading strategies...", theme::muted()))
                .alignment(Alignment::Center);
            f.render_widget(text, area);
        }
        ViewState::Failed(message) => {
            let text = Paragraph::new(Span::styled(*message, theme::negative()))
                .alignment(Alignment::Center);
            f.render_widget(text, area);
        }
        ViewState::Loaded(strategies) if strategies.is_empty() => {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "You have not created any strategies yet",
                    theme::muted(),
                )),
                Line::from(Span::styled(
                    "Press [n] to create your first strategy",
                    theme::accent(),
                )),
            ];
            f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
        }
        ViewState::Loaded(strategies) => render_cards(f, area, strategies, app.strategies.cursor),
    }
}

fn render_cards(f: &mut Frame, area: Rect, strategies: &[Strategy], cursor: usize) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(format!("{} strategies", strategies.len()), theme::accent()),
        Span::styled(
            "  [j/k]select [Enter]detail [b]acktest [n]ew [r]eload",
            theme::muted(),
        ),
    ]));
    lines.push(Line::from(""));

    for (i, strategy) in strategies.iter().enumerate().skip(cursor) {
        let is_cursor = i == cursor;
        push_card(&mut lines, strategy, is_cursor, area.width as usize);
        if lines.len() > area.height as usize {
            break;
        }
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn push_card(lines: &mut Vec<Line<'_>>, strategy: &Strategy, is_cursor: bool, width: usize) {
    let headline_style = if is_cursor {
        theme::accent_bold().add_modifier(Modifier::REVERSED)
    } else {
        theme::accent_bold()
    };

    lines.push(Line::from(Span::styled(
        format!(" {} ", strategy.name),
        headline_style,
    )));
    lines.push(Line::from(Span::styled(
        format!("   {}", truncate(&strategy.description, width.saturating_sub(4))),
        theme::muted(),
    )));

    if strategy.parameters.is_empty() {
        lines.push(Line::from(Span::styled(
            "   no parameters",
            theme::muted(),
        )));
    } else {
        // Show the first few parameters; the detail view has them all.
        for (key, value) in strategy.parameters.iter().take(4) {
            lines.push(Line::from(vec![
                Span::styled(format!("   {key}: "), theme::muted()),
                Span::styled(value.to_string(), theme::neutral()),
            ]));
        }
        if strategy.parameters.len() > 4 {
            lines.push(Line::from(Span::styled(
                format!("   ... {} more", strategy.parameters.len() - 4),
                theme::muted(),
            )));
        }
    }

    lines.push(Line::from(""));
}
