//! Record detail overlays — the full fields of one selected record,
//! rendered from the in-memory collection. Absent optionals show a
//! dash.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use tradedesk_core::api::BacktestSummary;
use tradedesk_core::stats;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

pub fn render_trade(f: &mut Frame, area: Rect, app: &AppState, idx: usize) {
    let popup = centered_rect(65, 75, area);
    f.render_widget(Clear, popup);

    let block = overlay_block(" Trade Detail [Esc]close ");
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let Some(trade) = app.journal.view.records().get(idx) else {
        f.render_widget(
            Paragraph::new(Span::styled("Entry not found.", theme::muted())),
            inner,
        );
        return;
    };

    let dash = || "-".to_string();
    let mut lines: Vec<Line> = Vec::new();

    field(&mut lines, "Ticker", trade.ticker.clone());
    styled_field(
        &mut lines,
        "Status",
        trade.status_label().into(),
        theme::trade_status(trade.is_open),
    );
    field(&mut lines, "Setup", trade.setup_type.clone());
    lines.push(Line::from(""));

    field(&mut lines, "Entry date", trade.entry_date.to_string());
    field(&mut lines, "Entry price", format!("{:.2}", trade.entry_price));
    field(
        &mut lines,
        "Exit date",
        trade.exit_date.map(|d| d.to_string()).unwrap_or_else(dash),
    );
    field(
        &mut lines,
        "Exit price",
        trade
            .exit_price
            .map(|p| format!("{p:.2}"))
            .unwrap_or_else(dash),
    );
    field(
        &mut lines,
        "Position size",
        format!("{:.2}", trade.position_size),
    );
    lines.push(Line::from(""));

    match trade.profit_loss {
        Some(pnl) => styled_field(
            &mut lines,
            "P/L",
            stats::format_money(pnl),
            theme::pnl(pnl),
        ),
        None => field(&mut lines, "P/L", dash()),
    }
    field(
        &mut lines,
        "P/L %",
        trade
            .profit_loss_percent
            .map(|p| format!("{p:.2}%"))
            .unwrap_or_else(dash),
    );
    field(
        &mut lines,
        "Strategy",
        trade
            .strategy_id
            .map(|id| format!("#{id}"))
            .unwrap_or_else(dash),
    );

    if let Some(notes) = &trade.notes {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("  Notes:", theme::muted())));
        lines.push(Line::from(Span::styled(
            format!("  {notes}"),
            theme::text(),
        )));
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

pub fn render_screen(f: &mut Frame, area: Rect, app: &AppState, idx: usize) {
    let popup = centered_rect(70, 75, area);
    f.render_widget(Clear, popup);

    let block = overlay_block(" Screening Detail [Esc]close ");
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let Some(screen) = app.screening.view.records().get(idx) else {
        f.render_widget(
            Paragraph::new(Span::styled("Entry not found.", theme::muted())),
            inner,
        );
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    field(&mut lines, "Date", screen.date.to_string());
    field(
        &mut lines,
        "Created",
        screen.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    );
    field(
        &mut lines,
        "Notes",
        screen.notes.clone().unwrap_or_else(|| "-".into()),
    );
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("  Criteria:", theme::accent_bold())));
    if screen.filter_criteria.is_empty() {
        lines.push(Line::from(Span::styled("    none", theme::muted())));
    }
    for (key, value) in &screen.filter_criteria {
        lines.push(Line::from(vec![
            Span::styled(format!("    {key}: "), theme::muted()),
            Span::styled(value.to_string(), theme::neutral()),
        ]));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        format!("  Matched tickers ({}):", screen.match_count()),
        theme::accent_bold(),
    )));
    lines.push(Line::from(Span::styled(
        format!("    {}", screen.results.tickers.join(" ")),
        theme::positive(),
    )));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

pub fn render_strategy(f: &mut Frame, area: Rect, app: &AppState, idx: usize) {
    let popup = centered_rect(65, 70, area);
    f.render_widget(Clear, popup);

    let block = overlay_block(" Strategy Detail [Esc]close ");
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let Some(strategy) = app.strategies.view.records().get(idx) else {
        f.render_widget(
            Paragraph::new(Span::styled("Entry not found.", theme::muted())),
            inner,
        );
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    field(&mut lines, "Name", strategy.name.clone());
    field(
        &mut lines,
        "Created",
        strategy.created_at.format("%Y-%m-%d %H:%M").to_string(),
    );
    field(
        &mut lines,
        "Updated",
        strategy
            .updated_at
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".into()),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  {}", strategy.description),
        theme::text(),
    )));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("  Parameters:", theme::accent_bold())));
    if strategy.parameters.is_empty() {
        lines.push(Line::from(Span::styled("    none", theme::muted())));
    }
    for (key, value) in &strategy.parameters {
        lines.push(Line::from(vec![
            Span::styled(format!("    {key}: "), theme::muted()),
            Span::styled(value.to_string(), theme::neutral()),
        ]));
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

pub fn render_backtest(f: &mut Frame, area: Rect, summary: &BacktestSummary) {
    let popup = centered_rect(60, 70, area);
    f.render_widget(Clear, popup);

    let block = overlay_block(" Backtest Result [Esc]close ");
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut lines: Vec<Line> = Vec::new();

    if summary.total_trades == 0 {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "The backtest produced no trades.",
            theme::muted(),
        )));
        f.render_widget(Paragraph::new(lines), inner);
        return;
    }

    field(&mut lines, "Trades", summary.total_trades.to_string());
    field(&mut lines, "Winners", summary.winning_trades.to_string());
    field(&mut lines, "Losers", summary.losing_trades.to_string());
    styled_field(
        &mut lines,
        "Win rate",
        stats::format_pct(summary.win_rate),
        theme::win_rate(summary.win_rate),
    );
    lines.push(Line::from(""));

    field(
        &mut lines,
        "Profit factor",
        format!("{:.2}", summary.profit_factor),
    );
    field(
        &mut lines,
        "Max drawdown",
        format!("{:.1}%", summary.max_drawdown),
    );
    field(&mut lines, "CAGR", format!("{:.1}%", summary.cagr));
    lines.push(Line::from(""));

    styled_field(
        &mut lines,
        "Net profit",
        format!(
            "{} ({:.2}%)",
            stats::format_money(summary.net_profit),
            summary.net_profit_percent
        ),
        theme::pnl(summary.net_profit),
    );
    field(
        &mut lines,
        "Final equity",
        format!("{:.2} €", summary.final_equity),
    );

    f.render_widget(Paragraph::new(lines), inner);
}

fn overlay_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(title)
        .title_style(theme::accent_bold())
}

fn field(lines: &mut Vec<Line<'_>>, label: &str, value: String) {
    styled_field(lines, label, value, theme::text());
}

fn styled_field(lines: &mut Vec<Line<'_>>, label: &str, value: String, style: Style) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {label:>14}: "), theme::muted()),
        Span::styled(value, style),
    ]));
}
