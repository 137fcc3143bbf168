//! TradeDesk Core — backend records, derived stats, and the HTTP client.
//!
//! Everything the terminal UI needs that is not rendering:
//! - Domain types for the three backend collections (trades,
//!   screening runs, strategies)
//! - The derived-stat calculator for the journal summary
//! - The `TradingApi` trait and its blocking HTTP implementation
//! - Client configuration

pub mod api;
pub mod config;
pub mod domain;
pub mod stats;

pub use config::Config;
