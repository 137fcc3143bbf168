//! The backend API boundary.
//!
//! The `TradingApi` trait abstracts the HTTP transport so the TUI
//! worker can hold a trait object and tests can substitute a mock.
//! Implementations do not retry: a failed call surfaces immediately
//! and the user re-triggers the fetch.

mod http;

pub use http::HttpApi;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{CriterionValue, ParamValue, ScreenResult, Strategy, Trade};

/// Structured client-side error, displayable in the TUI status line.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("backend returned HTTP {code}: {detail}")]
    Status { code: u16, detail: String },

    #[error("{what} not found")]
    NotFound { what: String },

    #[error("response could not be decoded: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether the failure happened before the backend answered.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Timeout(_))
    }
}

/// Payload for recording a new trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrade {
    pub ticker: String,
    pub entry_date: NaiveDate,
    #[serde(default)]
    pub exit_date: Option<NaiveDate>,
    pub entry_price: f64,
    #[serde(default)]
    pub exit_price: Option<f64>,
    pub position_size: f64,
    pub setup_type: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub strategy_id: Option<i64>,
    pub is_open: bool,
}

/// Partial update for an existing trade. Only present fields are
/// sent; the backend recomputes P/L when an exit price arrives.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TradePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
}

/// Payload for launching a screening run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenRequest {
    pub criteria: BTreeMap<String, CriterionValue>,
    pub tickers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of_date: Option<NaiveDate>,
    pub save_results: bool,
}

/// What the screening endpoint returns for a fresh run. The saved
/// record is refetched through `list_screens` afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScreenOutcome {
    #[serde(default)]
    pub screen_id: Option<i64>,
    pub date: NaiveDate,
    #[serde(default)]
    pub results: Vec<ScreenMatch>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScreenMatch {
    pub ticker: String,
}

/// Payload for creating a catalog strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewStrategy {
    pub name: String,
    pub description: String,
    pub parameters: BTreeMap<String, ParamValue>,
}

/// Payload for launching a backtest of a catalog strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestRequest {
    pub tickers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy_id: Option<i64>,
    pub strategy_params: BTreeMap<String, ParamValue>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub save_results: bool,
}

/// Backtest summary metrics. The backend sends an empty object when
/// the run produced no trades, so every field defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestSummary {
    pub total_trades: u32,
    pub winning_trades: u32,
    pub losing_trades: u32,
    /// Percentage in 0..=100.
    pub win_rate: f64,
    pub profit_factor: f64,
    pub max_drawdown: f64,
    /// Percentage in 0..=100.
    pub cagr: f64,
    pub final_equity: f64,
    pub net_profit: f64,
    pub net_profit_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BacktestOutcome {
    #[serde(default)]
    pub backtest_id: Option<i64>,
    #[serde(default)]
    pub strategy_id: Option<i64>,
    #[serde(default)]
    pub summary: BacktestSummary,
}

/// Everything the terminal client asks of the backend.
pub trait TradingApi: Send + Sync {
    fn list_trades(&self, open_only: bool) -> Result<Vec<Trade>, ApiError>;
    fn list_screens(&self) -> Result<Vec<ScreenResult>, ApiError>;
    fn list_strategies(&self) -> Result<Vec<Strategy>, ApiError>;

    fn create_trade(&self, trade: &NewTrade) -> Result<Trade, ApiError>;
    fn update_trade(&self, id: i64, patch: &TradePatch) -> Result<Trade, ApiError>;
    fn delete_trade(&self, id: i64) -> Result<(), ApiError>;

    fn run_screen(&self, request: &ScreenRequest) -> Result<ScreenOutcome, ApiError>;
    fn create_strategy(&self, strategy: &NewStrategy) -> Result<Strategy, ApiError>;
    fn run_backtest(&self, request: &BacktestRequest) -> Result<BacktestOutcome, ApiError>;
}
