//! Screening page — one card per saved run.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use tradedesk_core::domain::ScreenResult;

use crate::app::{AppState, ViewState};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.screening.view {
        ViewState::Loading => {
            let text = Paragraph::new(Span::styled(
                "Loading screening results...",
                theme::muted(),
            ))
            .alignment(Alignment::Center);
            f.render_widget(text, area);
        }
        ViewState::Failed(message) => {
            let text = Paragraph::new(Span::styled(*message, theme::negative()))
                .alignment(Alignment::Center);
            f.render_widget(text, area);
        }
        ViewState::Loaded(screens) if screens.is_empty() => {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No screenings have been run yet",
                    theme::muted(),
                )),
                Line::from(Span::styled(
                    "Press [n] to run your first screening",
                    theme::accent(),
                )),
            ];
            f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
        }
        ViewState::Loaded(screens) => render_cards(f, area, screens, app.screening.cursor),
    }
}

fn render_cards(f: &mut Frame, area: Rect, screens: &[ScreenResult], cursor: usize) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(format!("{} screenings", screens.len()), theme::accent()),
        Span::styled(
            "  [j/k]select [Enter]detail [d]uplicate [n]ew [r]eload",
            theme::muted(),
        ),
    ]));
    lines.push(Line::from(""));

    // The selected card renders first; j/k walks the list.
    for (i, screen) in screens.iter().enumerate().skip(cursor) {
        let is_cursor = i == cursor;
        push_card(&mut lines, screen, is_cursor);
        if lines.len() > area.height as usize {
            break;
        }
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn push_card(lines: &mut Vec<Line<'_>>, screen: &ScreenResult, is_cursor: bool) {
    let headline_style = if is_cursor {
        theme::accent_bold().add_modifier(Modifier::REVERSED)
    } else {
        theme::accent_bold()
    };

    lines.push(Line::from(vec![
        Span::styled(format!(" Screening of {} ", screen.date), headline_style),
        Span::styled(
            format!("  created {}", screen.created_at.format("%Y-%m-%d %H:%M")),
            theme::muted(),
        ),
    ]));

    if let Some(notes) = &screen.notes {
        lines.push(Line::from(Span::styled(
            format!("   {notes}"),
            theme::muted(),
        )));
    }

    let criteria = screen
        .filter_criteria
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join(" · ");
    lines.push(Line::from(vec![
        Span::styled("   Criteria: ", theme::muted()),
        Span::styled(criteria, theme::neutral()),
    ]));

    lines.push(Line::from(vec![
        Span::styled(
            format!("   Matches ({}): ", screen.match_count()),
            theme::muted(),
        ),
        Span::styled(screen.results.tickers.join(" "), theme::positive()),
    ]));

    lines.push(Line::from(""));
}
