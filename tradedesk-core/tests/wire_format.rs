//! Decoding tests against backend-shaped JSON payloads.
//!
//! The payload shapes mirror what the journal/screen/strategies
//! routers actually emit, including the space-separated timestamps
//! and null optionals.

use tradedesk_core::domain::{CriterionValue, ScreenResult, Strategy, Trade};

#[test]
fn decodes_journal_listing() {
    let json = r#"[
        {
            "id": 1,
            "ticker": "AAPL",
            "entry_date": "2024-01-05",
            "exit_date": "2024-01-19",
            "entry_price": 180.0,
            "exit_price": 187.5,
            "position_size": 20.0,
            "profit_loss": 150.0,
            "profit_loss_percent": 4.17,
            "setup_type": "Breakout",
            "is_open": false
        },
        {
            "id": 2,
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
        }
    ]"#;

    let trades: Vec<Trade> = serde_json::from_str(json).unwrap();
    assert_eq!(trades.len(), 2);
    assert!(trades[0].is_winner());
    assert!(trades[1].is_open);
    assert_eq!(trades[1].pnl_or_zero(), 0.0);
}

#[test]
fn decodes_screen_listing_with_mixed_criteria() {
    let json = r#"[
        {
            "id": 5,
            "date": "2024-05-02",
            "filter_criteria": {
                "min_volume": 500000,
                "above_sma200": true,
                "sector": "Technology"
            },
            "results": {"tickers": ["AAPL", "NVDA", "AMD"]},
            "notes": "Screening with 3 results",
            "created_at": "2024-05-02 09:31:00"
        }
    ]"#;

    let screens: Vec<ScreenResult> = serde_json::from_str(json).unwrap();
    assert_eq!(screens[0].match_count(), 3);
    assert_eq!(
        screens[0].filter_criteria["min_volume"],
        CriterionValue::Number(500000.0)
    );
}

#[test]
fn decodes_strategy_listing_with_and_without_parameters() {
    let json = r#"[
        {
            "id": 1,
            "name": "RSI Reversal",
            "description": "Buy oversold",
            "parameters": {"rsi_period": 14, "long_only": true},
            "created_at": "2024-01-10 08:00:00",
            "updated_at": "2024-02-01 12:30:00"
        },
        {
            "id": 2,
            "name": "Momentum",
            "description": "Ride the trend",
            "parameters_summary": "lookback: 90, ...",
            "created_at": "2024-01-11 08:00:00"
        }
    ]"#;

    let strategies: Vec<Strategy> = serde_json::from_str(json).unwrap();
    assert_eq!(strategies[0].parameters.len(), 2);
    // The list endpoint's summary rows carry no parameter map.
    assert!(strategies[1].parameters.is_empty());
    assert!(strategies[1].updated_at.is_none());
}
