//! Derived journal statistics.
//!
//! Pure functions over the currently loaded trade collection. The UI
//! recomputes these on every render; collections are small, so there
//! is no memoization and no cached field to go stale.

use crate::domain::Trade;

/// Sum of realized P/L across the collection. Trades without a
/// realized P/L count as zero.
pub fn total_profit_loss(trades: &[Trade]) -> f64 {
    trades.iter().map(Trade::pnl_or_zero).sum()
}

/// Percentage of closed trades with a positive P/L, in 0..=100.
/// Defined as 0.0 when no trade is closed yet.
pub fn win_rate_pct(trades: &[Trade]) -> f64 {
    let closed = trades.iter().filter(|t| !t.is_open).count();
    if closed == 0 {
        return 0.0;
    }
    let winners = trades.iter().filter(|t| t.is_winner()).count();
    winners as f64 / closed as f64 * 100.0
}

pub fn open_position_count(trades: &[Trade]) -> usize {
    trades.iter().filter(|t| t.is_open).count()
}

/// Money with an explicit sign and two decimals: `+100.00 €`.
pub fn format_money(value: f64) -> String {
    format!("{value:+.2} €")
}

/// Percentage with one decimal: `100.0%`.
pub fn format_pct(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trade(pnl: Option<f64>, is_open: bool) -> Trade {
        Trade {
            id: 0,
            ticker: "TEST".into(),
            entry_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            exit_date: None,
            entry_price: 100.0,
            exit_price: None,
            position_size: 1.0,
            profit_loss: pnl,
            profit_loss_percent: None,
            setup_type: "Breakout".into(),
            notes: None,
            strategy_id: None,
            is_open,
        }
    }

    #[test]
    fn totals_treat_missing_pnl_as_zero() {
        let trades = vec![
            trade(Some(150.0), false),
            trade(None, true),
            trade(Some(-25.5), false),
        ];
        assert!((total_profit_loss(&trades) - 124.5).abs() < 1e-9);
    }

    #[test]
    fn win_rate_only_counts_closed_trades() {
        let trades = vec![
            trade(Some(150.0), false),
            trade(Some(-50.0), false),
            trade(Some(999.0), true), // open, must not count
        ];
        assert!((win_rate_pct(&trades) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn win_rate_is_zero_without_closed_trades() {
        assert_eq!(win_rate_pct(&[]), 0.0);
        assert_eq!(win_rate_pct(&[trade(Some(10.0), true)]), 0.0);
    }

    /// Two trades: +150 closed, -50 open. Expected: total +100.00 €,
    /// win rate 100.0% (1 of 1 closed), one open position.
    #[test]
    fn journal_summary_example() {
        let trades = vec![trade(Some(150.0), false), trade(Some(-50.0), true)];
        assert_eq!(format_money(total_profit_loss(&trades)), "+100.00 €");
        assert_eq!(format_pct(win_rate_pct(&trades)), "100.0%");
        assert_eq!(open_position_count(&trades), 1);
    }

    #[test]
    fn money_formatting_keeps_the_sign() {
        assert_eq!(format_money(-50.0), "-50.00 €");
        assert_eq!(format_money(0.0), "+0.00 €");
        assert_eq!(format_money(1234.567), "+1234.57 €");
    }
}
