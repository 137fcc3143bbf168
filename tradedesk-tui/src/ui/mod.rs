//! Top-level UI layout — nav header, active page, status bar, overlays.

pub mod dashboard;
pub mod detail;
pub mod journal;
pub mod overlays;
pub mod screening;
pub mod status_bar;
pub mod strategies;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Overlay, Page};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: 1-line nav header, content, 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_nav(f, chunks[0], app);
    draw_page(f, chunks[1], app);
    status_bar::render(f, chunks[2], app);

    // Overlays sit on top of the content area.
    match &app.overlay {
        Overlay::None => {}
        Overlay::Welcome => overlays::render_welcome(f, chunks[1]),
        Overlay::Help => overlays::render_help(f, chunks[1]),
        Overlay::ErrorHistory => overlays::render_error_history(f, chunks[1], app),
        Overlay::TradeDetail(idx) => detail::render_trade(f, chunks[1], app, *idx),
        Overlay::ScreenDetail(idx) => detail::render_screen(f, chunks[1], app, *idx),
        Overlay::StrategyDetail(idx) => detail::render_strategy(f, chunks[1], app, *idx),
        Overlay::ConfirmDeleteTrade { ticker, .. } => {
            overlays::render_confirm_delete(f, chunks[1], ticker)
        }
        Overlay::Form(form) => overlays::render_form(f, chunks[1], form),
        Overlay::BacktestResult(summary) => detail::render_backtest(f, chunks[1], summary),
    }
}

/// The navigation shell: fixed page list, active one highlighted by
/// comparing against the current page.
fn draw_nav(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans = vec![Span::styled(" TradeDesk ", theme::accent_bold())];
    for page in [
        Page::Dashboard,
        Page::Strategies,
        Page::Screening,
        Page::Journal,
    ] {
        spans.push(Span::raw(" "));
        let label = format!(" {}:{} ", page.index() + 1, page.label());
        let style = if page == app.active_page {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else {
            theme::muted()
        };
        spans.push(Span::styled(label, style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_page(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} ", app.active_page.label()))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match app.active_page {
        Page::Dashboard => dashboard::render(f, inner),
        Page::Strategies => strategies::render(f, inner, app),
        Page::Screening => screening::render(f, inner, app),
        Page::Journal => journal::render(f, inner, app),
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}.")
    }
}

/// First visible row index so the cursor stays on screen.
pub(crate) fn scroll_start(cursor: usize, visible: usize) -> usize {
    if visible == 0 || cursor < visible {
        0
    } else {
        cursor + 1 - visible
    }
}
