//! Keyboard dispatch — overlays first, then global keys, then the
//! active page. Every key event resolves to at most one navigation
//! target; a row action never also triggers the row's detail view.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay, Page};
use crate::forms::{self, FormState};
use crate::worker::WorkerCommand;

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::Help => {
            handle_help_overlay(app, key);
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::TradeDetail(_)
        | Overlay::ScreenDetail(_)
        | Overlay::StrategyDetail(_)
        | Overlay::BacktestResult(_) => {
            handle_dismiss_overlay(app, key);
            return;
        }
        Overlay::ConfirmDeleteTrade { .. } => {
            handle_confirm_delete(app, key);
            return;
        }
        Overlay::Form(_) => {
            handle_form_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => {
            app.open_page(Page::Dashboard);
            return;
        }
        KeyCode::Char('2') => {
            app.open_page(Page::Strategies);
            return;
        }
        KeyCode::Char('3') => {
            app.open_page(Page::Screening);
            return;
        }
        KeyCode::Char('4') => {
            app.open_page(Page::Journal);
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Tab => {
            let page = if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_page.prev()
            } else {
                app.active_page.next()
            };
            app.open_page(page);
            return;
        }
        KeyCode::BackTab => {
            let page = app.active_page.prev();
            app.open_page(page);
            return;
        }
        _ => {}
    }

    // 3. Page-specific keys.
    match app.active_page {
        Page::Dashboard => {} // static cards, navigation only
        Page::Journal => handle_journal_key(app, key),
        Page::Screening => handle_screening_key(app, key),
        Page::Strategies => handle_strategies_key(app, key),
    }
}

fn handle_help_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('e') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
        }
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_dismiss_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            app.overlay = Overlay::None;
        }
        _ => {}
    }
}

fn handle_confirm_delete(app: &mut AppState, key: KeyEvent) {
    let (id, ticker) = match &app.overlay {
        Overlay::ConfirmDeleteTrade { id, ticker } => (*id, ticker.clone()),
        _ => return,
    };
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            let _ = app.worker_tx.send(WorkerCommand::DeleteTrade { id });
            app.set_status(format!("Deleting trade {ticker}..."));
            app.overlay = Overlay::None;
        }
        KeyCode::Esc | KeyCode::Char('n') => {
            app.overlay = Overlay::None;
        }
        _ => {}
    }
}

fn handle_form_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
        }
        KeyCode::Enter => submit_form(app),
        KeyCode::Tab | KeyCode::Down => with_form(app, FormState::next_field),
        KeyCode::BackTab | KeyCode::Up => with_form(app, FormState::prev_field),
        KeyCode::Backspace => with_form(app, FormState::backspace),
        KeyCode::Char(c) => with_form(app, |form| form.insert_char(c)),
        _ => {}
    }
}

fn with_form(app: &mut AppState, op: impl FnOnce(&mut FormState)) {
    if let Overlay::Form(form) = &mut app.overlay {
        op(form);
    }
}

/// Parse the whole form; either send its one command and close, or
/// pin the error to the offending field and keep the overlay open.
fn submit_form(app: &mut AppState) {
    let command = {
        let Overlay::Form(form) = &mut app.overlay else {
            return;
        };
        match forms::build_command(form) {
            Ok(command) => command,
            Err(err) => {
                form.active = err.field;
                form.fields[err.field].error = Some(err.message);
                return;
            }
        }
    };

    let status = match &command {
        WorkerCommand::CreateTrade(_) | WorkerCommand::UpdateTrade { .. } => "Saving trade...",
        WorkerCommand::RunScreen(_) => "Running screening...",
        WorkerCommand::CreateStrategy(_) => "Saving strategy...",
        WorkerCommand::RunBacktest(_) => "Running backtest...",
        _ => "Working...",
    };
    let _ = app.worker_tx.send(command);
    app.set_status(status);
    app.overlay = Overlay::None;
}

fn handle_journal_key(app: &mut AppState, key: KeyEvent) {
    let count = app.journal.view.records().len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if count > 0 && app.journal.cursor + 1 < count {
                app.journal.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.journal.cursor = app.journal.cursor.saturating_sub(1);
        }
        KeyCode::Char('o') => app.toggle_open_only(),
        KeyCode::Char('r') => app.reload_journal(),
        KeyCode::Char('n') => {
            app.overlay = Overlay::Form(FormState::new_trade());
        }
        KeyCode::Enter => {
            if count > 0 {
                app.overlay = Overlay::TradeDetail(app.journal.cursor);
            }
        }
        KeyCode::Char('e') => {
            if let Some(form) = app.selected_trade().map(FormState::edit_trade) {
                app.overlay = Overlay::Form(form);
            }
        }
        KeyCode::Char('x') => {
            if let Some((id, ticker)) = app.selected_trade().map(|t| (t.id, t.ticker.clone())) {
                app.overlay = Overlay::ConfirmDeleteTrade { id, ticker };
            }
        }
        _ => {}
    }
}

fn handle_screening_key(app: &mut AppState, key: KeyEvent) {
    let count = app.screening.view.records().len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if count > 0 && app.screening.cursor + 1 < count {
                app.screening.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.screening.cursor = app.screening.cursor.saturating_sub(1);
        }
        KeyCode::Char('r') => app.reload_screens(),
        KeyCode::Char('n') => {
            app.overlay = Overlay::Form(FormState::new_screen(None));
        }
        KeyCode::Enter => {
            if count > 0 {
                app.overlay = Overlay::ScreenDetail(app.screening.cursor);
            }
        }
        KeyCode::Char('d') => {
            if let Some(form) = app
                .selected_screen()
                .map(|screen| FormState::new_screen(Some(screen)))
            {
                app.overlay = Overlay::Form(form);
            }
        }
        _ => {}
    }
}

fn handle_strategies_key(app: &mut AppState, key: KeyEvent) {
    let count = app.strategies.view.records().len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if count > 0 && app.strategies.cursor + 1 < count {
                app.strategies.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.strategies.cursor = app.strategies.cursor.saturating_sub(1);
        }
        KeyCode::Char('r') => app.reload_strategies(),
        KeyCode::Char('n') => {
            app.overlay = Overlay::Form(FormState::new_strategy());
        }
        KeyCode::Enter => {
            if count > 0 {
                app.overlay = Overlay::StrategyDetail(app.strategies.cursor);
            }
        }
        KeyCode::Char('b') => {
            if let Some(form) = app.selected_strategy().map(FormState::backtest) {
                app.overlay = Overlay::Form(form);
            }
        }
        _ => {}
    }
}
