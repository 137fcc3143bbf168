//! TradeDesk TUI — four-page terminal client over the trading backend.
//!
//! Pages:
//! 1. Dashboard — static entry cards
//! 2. Strategies — catalog cards, backtest launch
//! 3. Screening — saved screening runs, duplicate/re-run
//! 4. Journal — trade table with summary tiles and open-only filter
//!
//! All network I/O runs on a background worker thread; the render
//! thread owns every piece of state and drains worker responses
//! between frames.

pub mod app;
pub mod forms;
pub mod input;
pub mod persistence;
pub mod theme;
pub mod ui;
pub mod worker;
