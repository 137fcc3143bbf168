//! Application state — single-owner, render-thread only.
//!
//! Each fetching page runs the same lifecycle: dispatch one fetch to
//! the worker, show `Loading`, then land in `Loaded` or `Failed`.
//! Every fetch carries a monotonically increasing request id; a
//! response bearing anything but the page's latest id is dropped, so
//! a slow superseded request can never overwrite a newer one.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use tradedesk_core::api::{ApiError, BacktestSummary};
use tradedesk_core::domain::{ScreenResult, Strategy, Trade};

use crate::forms::FormState;
use crate::worker::{WorkerCommand, WorkerResponse};

pub type RequestId = u64;

/// Fixed user-facing messages, one per collection. The concrete
/// cause goes to the log and the error history, never to these.
pub const TRADES_LOAD_ERROR: &str = "The trades could not be loaded. Please try again later.";
pub const SCREENS_LOAD_ERROR: &str =
    "The screening results could not be loaded. Please try again later.";
pub const STRATEGIES_LOAD_ERROR: &str =
    "The strategies could not be loaded. Please try again later.";

/// Which page is active. Order matches the nav bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Page {
    Dashboard,
    Strategies,
    Screening,
    Journal,
}

impl Page {
    pub fn index(self) -> usize {
        match self {
            Page::Dashboard => 0,
            Page::Strategies => 1,
            Page::Screening => 2,
            Page::Journal => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Page::Dashboard),
            1 => Some(Page::Strategies),
            2 => Some(Page::Screening),
            3 => Some(Page::Journal),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Strategies => "Strategies",
            Page::Screening => "Screening",
            Page::Journal => "Journal",
        }
    }

    pub fn next(self) -> Page {
        Page::from_index((self.index() + 1) % 4).unwrap()
    }

    pub fn prev(self) -> Page {
        Page::from_index((self.index() + 3) % 4).unwrap()
    }
}

/// The three-state load lifecycle of a remote collection.
///
/// One enum with data per state instead of loading/data/error flags:
/// the states are mutually exclusive by construction, so stale data
/// can never show next to an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Loaded(Vec<T>),
    Failed(&'static str),
}

impl<T> ViewState<T> {
    pub fn records(&self) -> &[T] {
        match self {
            ViewState::Loaded(records) => records,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Backend,
    Input,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Backend => "API",
            ErrorCategory::Input => "INPUT",
            ErrorCategory::Other => "ERR",
        }
    }
}

/// An entry in the error-history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Journal page: the collection plus its one dependency, the
/// open-only filter.
#[derive(Debug)]
pub struct JournalPageState {
    pub view: ViewState<Trade>,
    pub open_only: bool,
    pub cursor: usize,
    pub last_req: RequestId,
}

impl JournalPageState {
    pub fn new() -> Self {
        Self {
            view: ViewState::Loading,
            open_only: false,
            cursor: 0,
            last_req: 0,
        }
    }
}

impl Default for JournalPageState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct ScreenPageState {
    pub view: ViewState<ScreenResult>,
    pub cursor: usize,
    pub last_req: RequestId,
}

impl ScreenPageState {
    pub fn new() -> Self {
        Self {
            view: ViewState::Loading,
            cursor: 0,
            last_req: 0,
        }
    }
}

impl Default for ScreenPageState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct StrategiesPageState {
    pub view: ViewState<Strategy>,
    pub cursor: usize,
    pub last_req: RequestId,
}

impl StrategiesPageState {
    pub fn new() -> Self {
        Self {
            view: ViewState::Loading,
            cursor: 0,
            last_req: 0,
        }
    }
}

impl Default for StrategiesPageState {
    fn default() -> Self {
        Self::new()
    }
}

/// Which overlay (if any) sits on top of the active page.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    None,
    Welcome,
    Help,
    ErrorHistory,
    TradeDetail(usize),
    ScreenDetail(usize),
    StrategyDetail(usize),
    ConfirmDeleteTrade { id: i64, ticker: String },
    Form(FormState),
    BacktestResult(BacktestSummary),
}

/// Top-level application state.
pub struct AppState {
    pub active_page: Page,
    pub running: bool,

    pub journal: JournalPageState,
    pub screening: ScreenPageState,
    pub strategies: StrategiesPageState,

    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,

    next_req: RequestId,

    #[allow(dead_code)]
    pub state_path: PathBuf,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        state_path: PathBuf,
    ) -> Self {
        Self {
            active_page: Page::Dashboard,
            running: true,
            journal: JournalPageState::new(),
            screening: ScreenPageState::new(),
            strategies: StrategiesPageState::new(),
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(50),
            error_scroll: 0,
            overlay: Overlay::None,
            next_req: 0,
            state_path,
        }
    }

    fn issue_request(&mut self) -> RequestId {
        self.next_req += 1;
        self.next_req
    }

    /// Switch pages. A fetching page refetches on entry, mirroring a
    /// fresh mount; Dashboard is static.
    pub fn open_page(&mut self, page: Page) {
        self.active_page = page;
        match page {
            Page::Journal => self.reload_journal(),
            Page::Screening => self.reload_screens(),
            Page::Strategies => self.reload_strategies(),
            Page::Dashboard => {}
        }
    }

    pub fn reload_journal(&mut self) {
        let req_id = self.issue_request();
        self.journal.last_req = req_id;
        self.journal.view = ViewState::Loading;
        let _ = self.worker_tx.send(WorkerCommand::FetchTrades {
            open_only: self.journal.open_only,
            req_id,
        });
    }

    pub fn reload_screens(&mut self) {
        let req_id = self.issue_request();
        self.screening.last_req = req_id;
        self.screening.view = ViewState::Loading;
        let _ = self.worker_tx.send(WorkerCommand::FetchScreens { req_id });
    }

    pub fn reload_strategies(&mut self) {
        let req_id = self.issue_request();
        self.strategies.last_req = req_id;
        self.strategies.view = ViewState::Loading;
        let _ = self
            .worker_tx
            .send(WorkerCommand::FetchStrategies { req_id });
    }

    /// Flip the journal's open-only filter. The dependency change
    /// triggers exactly one fresh fetch.
    pub fn toggle_open_only(&mut self) {
        self.journal.open_only = !self.journal.open_only;
        self.journal.cursor = 0;
        self.reload_journal();
    }

    pub fn selected_trade(&self) -> Option<&Trade> {
        self.journal.view.records().get(self.journal.cursor)
    }

    pub fn selected_screen(&self) -> Option<&ScreenResult> {
        self.screening.view.records().get(self.screening.cursor)
    }

    pub fn selected_strategy(&self) -> Option<&Strategy> {
        self.strategies.view.records().get(self.strategies.cursor)
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > 50 {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

fn category_of(err: &ApiError) -> ErrorCategory {
    if err.is_transport() {
        ErrorCategory::Network
    } else {
        ErrorCategory::Backend
    }
}

/// Fold a worker response into the app state.
///
/// Collection responses are gated on the request id recorded at
/// dispatch time; anything older is logged and dropped. Mutation
/// responses refetch the owning collection on success so the page
/// always re-renders from backend truth.
pub fn apply_response(app: &mut AppState, resp: WorkerResponse) {
    match resp {
        WorkerResponse::Trades { req_id, result } => {
            if req_id != app.journal.last_req {
                tracing::debug!(req_id, latest = app.journal.last_req, "stale journal response");
                return;
            }
            match result {
                Ok(trades) => {
                    app.journal.cursor = app.journal.cursor.min(trades.len().saturating_sub(1));
                    app.journal.view = ViewState::Loaded(trades);
                }
                Err(err) => {
                    tracing::error!(error = %err, "journal fetch failed");
                    app.journal.view = ViewState::Failed(TRADES_LOAD_ERROR);
                    app.push_error(category_of(&err), err.to_string(), "journal".into());
                }
            }
        }
        WorkerResponse::Screens { req_id, result } => {
            if req_id != app.screening.last_req {
                tracing::debug!(req_id, latest = app.screening.last_req, "stale screening response");
                return;
            }
            match result {
                Ok(screens) => {
                    app.screening.cursor =
                        app.screening.cursor.min(screens.len().saturating_sub(1));
                    app.screening.view = ViewState::Loaded(screens);
                }
                Err(err) => {
                    tracing::error!(error = %err, "screening fetch failed");
                    app.screening.view = ViewState::Failed(SCREENS_LOAD_ERROR);
                    app.push_error(category_of(&err), err.to_string(), "screening".into());
                }
            }
        }
        WorkerResponse::Strategies { req_id, result } => {
            if req_id != app.strategies.last_req {
                tracing::debug!(req_id, latest = app.strategies.last_req, "stale strategies response");
                return;
            }
            match result {
                Ok(strategies) => {
                    app.strategies.cursor =
                        app.strategies.cursor.min(strategies.len().saturating_sub(1));
                    app.strategies.view = ViewState::Loaded(strategies);
                }
                Err(err) => {
                    tracing::error!(error = %err, "strategies fetch failed");
                    app.strategies.view = ViewState::Failed(STRATEGIES_LOAD_ERROR);
                    app.push_error(category_of(&err), err.to_string(), "strategies".into());
                }
            }
        }
        WorkerResponse::TradeSaved(result) => match result {
            Ok(trade) => {
                app.set_status(format!("Trade {} saved", trade.ticker));
                app.reload_journal();
            }
            Err(err) => {
                app.push_error(category_of(&err), err.to_string(), "save trade".into());
            }
        },
        WorkerResponse::TradeDeleted { id, result } => match result {
            Ok(()) => {
                app.set_status(format!("Trade #{id} deleted"));
                app.reload_journal();
            }
            Err(err) => {
                app.push_error(category_of(&err), err.to_string(), format!("delete trade #{id}"));
            }
        },
        WorkerResponse::ScreenFinished(result) => match result {
            Ok(outcome) => {
                app.set_status(format!(
                    "Screening finished: {} matches",
                    outcome.results.len()
                ));
                app.reload_screens();
            }
            Err(err) => {
                app.push_error(category_of(&err), err.to_string(), "run screening".into());
            }
        },
        WorkerResponse::StrategySaved(result) => match result {
            Ok(strategy) => {
                app.set_status(format!("Strategy '{}' saved", strategy.name));
                app.reload_strategies();
            }
            Err(err) => {
                app.push_error(category_of(&err), err.to_string(), "save strategy".into());
            }
        },
        WorkerResponse::BacktestFinished(result) => match result {
            Ok(outcome) => {
                app.set_status(format!(
                    "Backtest finished: {} trades",
                    outcome.summary.total_trades
                ));
                app.overlay = Overlay::BacktestResult(outcome.summary);
            }
            Err(err) => {
                app.push_error(category_of(&err), err.to_string(), "backtest".into());
            }
        },
    }
}
