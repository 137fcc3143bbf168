//! A journal trade as the backend reports it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One journal entry. Open positions have no exit fields yet; the
/// backend computes `profit_loss` when an exit price is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: i64,
    pub ticker: String,
    pub entry_date: NaiveDate,
    #[serde(default)]
    pub exit_date: Option<NaiveDate>,
    pub entry_price: f64,
    #[serde(default)]
    pub exit_price: Option<f64>,
    pub position_size: f64,
    #[serde(default)]
    pub profit_loss: Option<f64>,
    #[serde(default)]
    pub profit_loss_percent: Option<f64>,
    pub setup_type: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub strategy_id: Option<i64>,
    pub is_open: bool,
}

impl Trade {
    /// Realized P/L, with "not yet realized" counted as zero.
    pub fn pnl_or_zero(&self) -> f64 {
        self.profit_loss.unwrap_or(0.0)
    }

    /// Closed with a positive realized P/L.
    pub fn is_winner(&self) -> bool {
        !self.is_open && self.pnl_or_zero() > 0.0
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_open {
            "Open"
        } else {
            "Closed"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trade() -> Trade {
        Trade {
            id: 1,
            ticker: "AAPL".into(),
            entry_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            exit_date: Some(NaiveDate::from_ymd_opt(2024, 1, 19).unwrap()),
            entry_price: 180.0,
            exit_price: Some(187.5),
            position_size: 20.0,
            profit_loss: Some(150.0),
            profit_loss_percent: Some(4.17),
            setup_type: "Breakout".into(),
            notes: None,
            strategy_id: None,
            is_open: false,
        }
    }

    #[test]
    fn winner_requires_closed_and_positive() {
        let mut trade = sample_trade();
        assert!(trade.is_winner());

        trade.is_open = true;
        assert!(!trade.is_winner());

        trade.is_open = false;
        trade.profit_loss = Some(-10.0);
        assert!(!trade.is_winner());

        trade.profit_loss = None;
        assert!(!trade.is_winner());
        assert_eq!(trade.pnl_or_zero(), 0.0);
    }

    #[test]
    fn deserializes_backend_row_with_nulls() {
        let json = r#"{
            "id": 7,
            "ticker": "MSFT",
            "entry_date": "2024-02-01",
            "exit_date": null,
            "entry_price": 410.0,
            "exit_price": null,
            "position_size": 5.0,
            "profit_loss": null,
            "profit_loss_percent": null,
            "setup_type": "Pullback",
            "is_open": true
        }"#;
        let trade: Trade = serde_json::from_str(json).unwrap();
        assert_eq!(trade.ticker, "MSFT");
        assert!(trade.is_open);
        assert!(trade.exit_date.is_none());
        assert!(trade.profit_loss.is_none());
        assert_eq!(trade.status_label(), "Open");
    }
}
