//! Overlay widgets — welcome, help, error history, confirm dialog,
//! and the create/edit forms.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::forms::FormState;
use crate::theme;
use crate::ui::centered_rect;

/// First-run welcome overlay.
pub fn render_welcome(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 45, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Welcome to TradeDesk ")
        .title_style(theme::accent_bold());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Getting started:", theme::accent_bold())),
        Line::from(""),
        Line::from(Span::styled(
            "  1. Press 4 to open the trading journal",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  2. Press n to record your first trade",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  3. Press 3 to browse screening runs, 2 for strategies",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  4. Press ? any time for the full key reference",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled("Press any key to dismiss...", theme::neutral())),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

/// Keyboard reference overlay.
pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 85, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help [Esc]close ")
        .title_style(theme::accent_bold());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global");
    key(&mut lines, "1-4", "Switch page");
    key(&mut lines, "Tab / Shift+Tab", "Cycle pages forward / back");
    key(&mut lines, "?", "This help");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Journal");
    key(&mut lines, "j / k", "Move cursor down / up");
    key(&mut lines, "o", "Toggle open-positions-only filter");
    key(&mut lines, "Enter", "Trade detail");
    key(&mut lines, "n / e / x", "New / edit / delete trade");
    key(&mut lines, "r", "Reload");
    lines.push(Line::from(""));

    section(&mut lines, "Screening");
    key(&mut lines, "j / k", "Select run");
    key(&mut lines, "Enter", "Run detail");
    key(&mut lines, "n", "New screening");
    key(&mut lines, "d", "Duplicate: re-run with the same criteria");
    key(&mut lines, "r", "Reload");
    lines.push(Line::from(""));

    section(&mut lines, "Strategies");
    key(&mut lines, "j / k", "Select strategy");
    key(&mut lines, "Enter", "Strategy detail");
    key(&mut lines, "n", "New strategy");
    key(&mut lines, "b", "Launch a backtest");
    key(&mut lines, "r", "Reload");
    lines.push(Line::from(""));

    section(&mut lines, "Forms");
    key(&mut lines, "Tab / Shift+Tab", "Next / previous field");
    key(&mut lines, "Enter", "Submit");
    key(&mut lines, "Esc", "Cancel");
    lines.push(Line::from(""));

    section(&mut lines, "Errors");
    key(&mut lines, "e (in help)", "Open the error history");

    f.render_widget(Paragraph::new(lines), inner);
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let start = app.error_scroll;
    let end = (start + visible_height).min(app.error_history.len());

    let mut lines: Vec<Line> = Vec::new();
    for i in start..end {
        let err = &app.error_history[i];
        let is_active = i == app.error_scroll;
        let style = if is_active {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(&err.message, style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(&err.context, theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

/// Delete confirmation dialog.
pub fn render_confirm_delete(f: &mut Frame, area: Rect, ticker: &str) {
    let popup = centered_rect(45, 25, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::warning())
        .title(" Confirm ")
        .title_style(theme::warning());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Delete trade {ticker}? This cannot be undone."),
            theme::text(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y]", theme::negative()),
            Span::styled(" delete    ", theme::muted()),
            Span::styled("[n]", theme::accent()),
            Span::styled(" keep", theme::muted()),
        ]),
    ];

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

/// Create/edit form overlay: one field per line, active field
/// highlighted, parse errors pinned under their field.
pub fn render_form(f: &mut Frame, area: Rect, form: &FormState) {
    let popup = centered_rect(60, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(format!(" {} [Enter]submit [Esc]cancel ", form.title))
        .title_style(theme::accent_bold());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));

    for (i, field) in form.fields.iter().enumerate() {
        let is_active = i == form.active;
        let marker = if field.required { "*" } else { " " };

        let label_style = if is_active {
            theme::accent_bold()
        } else {
            theme::muted()
        };
        let value_style = if is_active {
            theme::accent().add_modifier(Modifier::UNDERLINED)
        } else {
            theme::text()
        };

        let mut spans = vec![
            Span::styled(format!("  {marker}{:>14}: ", field.label), label_style),
            Span::styled(field.value.clone(), value_style),
        ];
        if is_active {
            spans.push(Span::styled("_", theme::accent()));
        }
        if field.value.is_empty() && !field.hint.is_empty() {
            spans.push(Span::styled(format!("  ({})", field.hint), theme::muted()));
        }
        lines.push(Line::from(spans));

        if let Some(error) = &field.error {
            lines.push(Line::from(Span::styled(
                format!("                    {error}"),
                theme::negative(),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  * required   [Tab] next field",
        theme::muted(),
    )));

    f.render_widget(Paragraph::new(lines), inner);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(
        title.to_string(),
        theme::accent_bold(),
    )));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:>18}  "), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
