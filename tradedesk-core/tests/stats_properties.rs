//! Property tests for the journal stat functions.

use chrono::NaiveDate;
use proptest::prelude::*;

use tradedesk_core::domain::Trade;
use tradedesk_core::stats;

fn arb_trade() -> impl Strategy<Value = Trade> {
    (
        proptest::option::of(-10_000.0f64..10_000.0),
        any::<bool>(),
        1.0f64..1_000.0,
    )
        .prop_map(|(profit_loss, is_open, position_size)| Trade {
            id: 0,
            ticker: "TEST".into(),
            entry_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            exit_date: None,
            entry_price: 100.0,
            exit_price: None,
            position_size,
            profit_loss,
            profit_loss_percent: None,
            setup_type: "Breakout".into(),
            notes: None,
            strategy_id: None,
            is_open,
        })
}

proptest! {
    #[test]
    fn total_equals_sum_of_present_pnl(trades in prop::collection::vec(arb_trade(), 0..50)) {
        let expected: f64 = trades.iter().map(|t| t.profit_loss.unwrap_or(0.0)).sum();
        prop_assert!((stats::total_profit_loss(&trades) - expected).abs() < 1e-6);
    }

    #[test]
    fn win_rate_stays_in_bounds(trades in prop::collection::vec(arb_trade(), 0..50)) {
        let rate = stats::win_rate_pct(&trades);
        prop_assert!((0.0..=100.0).contains(&rate));
    }

    #[test]
    fn win_rate_is_zero_when_nothing_is_closed(
        mut trades in prop::collection::vec(arb_trade(), 0..50)
    ) {
        for trade in &mut trades {
            trade.is_open = true;
        }
        prop_assert_eq!(stats::win_rate_pct(&trades), 0.0);
    }

    #[test]
    fn open_count_plus_closed_count_is_total(trades in prop::collection::vec(arb_trade(), 0..50)) {
        let open = stats::open_position_count(&trades);
        let closed = trades.iter().filter(|t| !t.is_open).count();
        prop_assert_eq!(open + closed, trades.len());
    }
}
