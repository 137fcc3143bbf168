//! Journal page — summary tiles, open-only filter, trade table.
//!
//! The body is one of four mutually exclusive views: loading, error,
//! empty call-to-action, or the populated table. The summary tiles
//! are recomputed from the loaded collection on every draw.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use tradedesk_core::domain::Trade;
use tradedesk_core::stats;

use crate::app::{AppState, ViewState};
use crate::theme;
use crate::ui::{scroll_start, truncate};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let journal = &app.journal;
    let trades = journal.view.records();
    let show_tiles = !trades.is_empty();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(if show_tiles { 3 } else { 0 }),
            Constraint::Min(1),
        ])
        .split(area);

    render_header(f, chunks[0], journal.open_only);
    if show_tiles {
        render_summary(f, chunks[1], trades);
    }
    render_body(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, open_only: bool) {
    let filter = if open_only {
        Span::styled("open positions only", theme::accent())
    } else {
        Span::styled("all trades", theme::muted())
    };
    let line = Line::from(vec![
        Span::styled("Filter: ", theme::muted()),
        filter,
        Span::styled(
            "  [o]filter [j/k]move [Enter]detail [n]ew [e]dit [x]delete [r]eload",
            theme::muted(),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// The three stat tiles: open positions, total P/L, win rate.
fn render_summary(f: &mut Frame, area: Rect, trades: &[Trade]) {
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let total = stats::total_profit_loss(trades);
    let rate = stats::win_rate_pct(trades);

    render_tile(
        f,
        tiles[0],
        "Open positions",
        stats::open_position_count(trades).to_string(),
        theme::text(),
    );
    render_tile(
        f,
        tiles[1],
        "Profit / Loss",
        stats::format_money(total),
        theme::pnl(total),
    );
    render_tile(
        f,
        tiles[2],
        "Win rate",
        stats::format_pct(rate),
        theme::win_rate(rate),
    );
}

fn render_tile(f: &mut Frame, area: Rect, label: &str, value: String, style: Style) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(format!(" {label} "))
        .title_style(theme::muted());
    let inner = block.inner(area);
    f.render_widget(block, area);
    let value = Paragraph::new(Span::styled(value, style.add_modifier(Modifier::BOLD)))
        .alignment(Alignment::Center);
    f.render_widget(value, inner);
}

fn render_body(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.journal.view {
        ViewState::Loading => {
            let text = Paragraph::new(Span::styled("Loading trades...", theme::muted()))
                .alignment(Alignment::Center);
            f.render_widget(text, area);
        }
        ViewState::Failed(message) => {
            let text = Paragraph::new(Span::styled(*message, theme::negative()))
                .alignment(Alignment::Center);
            f.render_widget(text, area);
        }
        ViewState::Loaded(trades) if trades.is_empty() => {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "You have not recorded any trades yet",
                    theme::muted(),
                )),
                Line::from(Span::styled(
                    "Press [n] to record your first trade",
                    theme::accent(),
                )),
            ];
            let text = Paragraph::new(lines).alignment(Alignment::Center);
            f.render_widget(text, area);
        }
        ViewState::Loaded(trades) => render_table(f, area, trades, app.journal.cursor),
    }
}

fn render_table(f: &mut Frame, area: Rect, trades: &[Trade], cursor: usize) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        format!(
            "{:<8} {:>10} {:>10} {:>9} {:>24} {:<12} {:<7}",
            "Ticker", "Entry", "Exit", "Size", "P/L", "Setup", "Status"
        ),
        theme::accent_bold(),
    )));

    let visible = (area.height as usize).saturating_sub(1);
    let start = scroll_start(cursor, visible);
    let end = (start + visible).min(trades.len());

    for (i, trade) in trades.iter().enumerate().take(end).skip(start) {
        let is_cursor = i == cursor;
        let base = if is_cursor {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else {
            theme::text()
        };

        let exit = trade
            .exit_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".into());
        let (pnl_text, pnl_style) = pnl_cell(trade);
        let pnl_style = if is_cursor { base } else { pnl_style };
        let status_style = if is_cursor {
            base
        } else {
            theme::trade_status(trade.is_open)
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{:<8} ", truncate(&trade.ticker, 8)), base),
            Span::styled(format!("{:>10} ", trade.entry_date), base),
            Span::styled(format!("{exit:>10} "), base),
            Span::styled(format!("{:>9.2} ", trade.position_size), base),
            Span::styled(format!("{pnl_text:>24} "), pnl_style),
            Span::styled(format!("{:<12} ", truncate(&trade.setup_type, 12)), base),
            Span::styled(format!("{:<7}", trade.status_label()), status_style),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}

/// P/L column: `+150.00 € (4.17%)`, or a dash while the position is
/// still open.
fn pnl_cell(trade: &Trade) -> (String, Style) {
    match trade.profit_loss {
        Some(pnl) => {
            let text = match trade.profit_loss_percent {
                Some(pct) => format!("{} ({pct:.2}%)", stats::format_money(pnl)),
                None => stats::format_money(pnl),
            };
            (text, theme::pnl(pnl))
        }
        None => ("-".into(), theme::muted()),
    }
}
