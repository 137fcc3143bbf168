//! End-to-end lifecycle tests: app state + real worker thread + a
//! scripted backend.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use tradedesk_core::api::{
    ApiError, BacktestOutcome, BacktestRequest, NewStrategy, NewTrade, ScreenOutcome,
    ScreenRequest, TradePatch, TradingApi,
};
use tradedesk_core::domain::{ScreenResult, Strategy, Trade};

use tradedesk_tui::app::{apply_response, AppState, ViewState, TRADES_LOAD_ERROR};
use tradedesk_tui::worker::{spawn_worker, WorkerCommand};

/// Backend stub: two trades, one open; the open-only filter returns
/// just the open one. Trades can be switched into failure mode.
struct ScriptedApi {
    fail_trades: Arc<AtomicBool>,
}

fn trade(id: i64, is_open: bool) -> Trade {
    serde_json::from_str(&format!(
        r#"{{
            "id": {id},
            "ticker": "T{id}",
            "entry_date": "2024-01-05",
            "entry_price": 100.0,
            "position_size": 10.0,
            "setup_type": "Breakout",
            "is_open": {is_open}
        }}"#
    ))
    .unwrap()
}

impl TradingApi for ScriptedApi {
    fn list_trades(&self, open_only: bool) -> Result<Vec<Trade>, ApiError> {
        if self.fail_trades.load(Ordering::Relaxed) {
            return Err(ApiError::Network("connection refused".into()));
        }
        let all = vec![trade(1, true), trade(2, false)];
        Ok(if open_only {
            all.into_iter().filter(|t| t.is_open).collect()
        } else {
            all
        })
    }

    fn list_screens(&self) -> Result<Vec<ScreenResult>, ApiError> {
        Ok(Vec::new())
    }

    fn list_strategies(&self) -> Result<Vec<Strategy>, ApiError> {
        Ok(Vec::new())
    }

    fn create_trade(&self, _trade: &NewTrade) -> Result<Trade, ApiError> {
        Ok(trade(3, true))
    }

    fn update_trade(&self, _id: i64, _patch: &TradePatch) -> Result<Trade, ApiError> {
        Ok(trade(1, false))
    }

    fn delete_trade(&self, _id: i64) -> Result<(), ApiError> {
        Ok(())
    }

    fn run_screen(&self, _request: &ScreenRequest) -> Result<ScreenOutcome, ApiError> {
        Err(ApiError::Status {
            code: 500,
            detail: "screener offline".into(),
        })
    }

    fn create_strategy(&self, _strategy: &NewStrategy) -> Result<Strategy, ApiError> {
        Err(ApiError::Status {
            code: 400,
            detail: "duplicate name".into(),
        })
    }

    fn run_backtest(&self, _request: &BacktestRequest) -> Result<BacktestOutcome, ApiError> {
        Ok(BacktestOutcome::default())
    }
}

struct Harness {
    app: AppState,
    fail_trades: Arc<AtomicBool>,
    _worker: std::thread::JoinHandle<()>,
}

fn harness() -> Harness {
    let fail_trades = Arc::new(AtomicBool::new(false));
    let api = ScriptedApi {
        fail_trades: fail_trades.clone(),
    };
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker = spawn_worker(Box::new(api), cmd_rx, resp_tx);
    Harness {
        app: AppState::new(cmd_tx, resp_rx, PathBuf::from(".")),
        fail_trades,
        _worker: worker,
    }
}

/// Block for the next worker response and fold it in.
fn pump_one(app: &mut AppState) {
    let resp = app
        .worker_rx
        .recv_timeout(Duration::from_secs(2))
        .expect("worker response");
    apply_response(app, resp);
}

#[test]
fn load_then_toggle_filters_through_the_worker() {
    let mut h = harness();

    h.app.reload_journal();
    pump_one(&mut h.app);
    assert_eq!(h.app.journal.view.records().len(), 2);

    // Dependency change: one new fetch with the new filter value.
    h.app.toggle_open_only();
    assert!(h.app.journal.view.is_loading());
    pump_one(&mut h.app);

    let records = h.app.journal.view.records();
    assert_eq!(records.len(), 1);
    assert!(records[0].is_open);
}

#[test]
fn failure_shows_fixed_message_and_no_stale_rows() {
    let mut h = harness();

    h.app.reload_journal();
    pump_one(&mut h.app);
    assert_eq!(h.app.journal.view.records().len(), 2);

    h.fail_trades.store(true, Ordering::Relaxed);
    h.app.reload_journal();
    pump_one(&mut h.app);

    assert_eq!(h.app.journal.view, ViewState::Failed(TRADES_LOAD_ERROR));
    assert!(h.app.journal.view.records().is_empty());
    // The concrete cause lands in the history, not in the view.
    assert!(h.app.error_history[0].message.contains("connection refused"));
}

#[test]
fn superseded_fetch_never_overwrites_the_newer_one() {
    let mut h = harness();

    // Two dispatches back to back: the worker answers in order, but
    // only the second response may land.
    h.app.reload_journal();
    h.app.toggle_open_only();

    pump_one(&mut h.app); // stale response, discarded
    assert!(h.app.journal.view.is_loading());

    pump_one(&mut h.app); // current response
    assert_eq!(h.app.journal.view.records().len(), 1);
}

#[test]
fn successful_delete_triggers_a_refetch() {
    let mut h = harness();

    h.app.reload_journal();
    pump_one(&mut h.app);

    let _ = h.app.worker_tx.send(WorkerCommand::DeleteTrade { id: 1 });
    pump_one(&mut h.app); // TradeDeleted → dispatches a refetch
    assert!(h.app.journal.view.is_loading());
    pump_one(&mut h.app); // refetched collection arrives
    assert_eq!(h.app.journal.view.records().len(), 2);
}

#[test]
fn backend_rejection_keeps_previous_data() {
    let mut h = harness();

    h.app.reload_screens();
    pump_one(&mut h.app);
    assert_eq!(h.app.screening.view, ViewState::Loaded(Vec::new()));

    // A failed mutation surfaces in the history; the collection stays.
    let _ = h.app.worker_tx.send(WorkerCommand::CreateStrategy(NewStrategy {
        name: "Momentum".into(),
        description: "dup".into(),
        parameters: Default::default(),
    }));
    pump_one(&mut h.app);
    assert_eq!(h.app.screening.view, ViewState::Loaded(Vec::new()));
    assert!(h.app.error_history[0].message.contains("duplicate name"));
}
