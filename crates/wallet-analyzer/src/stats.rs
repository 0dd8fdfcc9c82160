//! Numeric primitives shared by the scoring, qualification, and tagging
//! engines. All functions are pure and total: degenerate input produces a
//! defined value instead of an error.

use copyscope_core::types::Trade;
use statrs::statistics::{Data, Distribution};

/// Arithmetic mean; 0 for an empty sequence.
pub fn average(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    Data::new(xs.to_vec()).mean().unwrap_or(0.0)
}

/// Median; 0 for an empty sequence.
pub fn median(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }

    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Population standard deviation; 0 for fewer than 2 samples.
pub fn std_deviation(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return 0.0;
    }

    let mean = average(xs);
    let variance = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / xs.len() as f64;
    variance.sqrt()
}

/// Maximum running-peak drawdown over a cumulative-returns curve, in percent.
///
/// Returns 0 for fewer than 2 points. A zero or negative peak contributes 0
/// at that point rather than dividing by it.
pub fn estimate_drawdown(cumulative: &[f64]) -> f64 {
    if cumulative.len() < 2 {
        return 0.0;
    }

    let mut peak = cumulative[0];
    let mut max_drawdown: f64 = 0.0;

    for &value in cumulative {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            max_drawdown = max_drawdown.max((peak - value) / peak * 100.0);
        }
    }

    max_drawdown
}

/// Sharpe-like ratio: `(mean(returns) - risk_free_rate) / stddev(returns)`.
/// Returns 0 with fewer than 2 samples or zero standard deviation.
pub fn sharpe_like(returns: &[f64], risk_free_rate: f64) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }

    let std_dev = std_deviation(returns);
    if std_dev == 0.0 {
        return 0.0;
    }

    (average(returns) - risk_free_rate) / std_dev
}

/// Share of losing trades that the immediately following trade recovered
/// from, in percent.
///
/// Iterates consecutive trade pairs: a trade with negative `pnl_pct` counts
/// as a loss, and counts as recovered when the next trade's `pnl_pct` is
/// positive. Zero losses yields 100 — vacuously perfect recovery.
pub fn post_loss_recovery_rate(trades: &[Trade]) -> f64 {
    let mut losses = 0u64;
    let mut recoveries = 0u64;

    for pair in trades.windows(2) {
        if pair[0].is_loss() {
            losses += 1;
            if pair[1].is_win() {
                recoveries += 1;
            }
        }
    }

    if losses == 0 {
        return 100.0;
    }

    recoveries as f64 / losses as f64 * 100.0
}

/// Equity curve indexed at 100, compounding each trade's `pnl_pct` in
/// sequence. The standard input to [`estimate_drawdown`] for a trade history.
pub fn cumulative_curve(trades: &[Trade]) -> Vec<f64> {
    let mut curve = Vec::with_capacity(trades.len() + 1);
    let mut equity = 100.0;
    curve.push(equity);

    for trade in trades {
        equity *= 1.0 + trade.pnl_pct / 100.0;
        curve.push(equity);
    }

    curve
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use copyscope_core::types::TradeSide;
    use rust_decimal::Decimal;

    fn make_trade(pnl_pct: f64, minutes_ago: i64) -> Trade {
        Trade {
            wallet_address: "0xstat".to_string(),
            coin: "ETH".to_string(),
            side: TradeSide::Long,
            size_usd: Decimal::new(1000, 0),
            leverage: 3.0,
            pnl_pct,
            duration_min: 45.0,
            timestamp: Utc::now() - Duration::minutes(minutes_ago),
            price: Decimal::new(3000, 0),
        }
    }

    #[test]
    fn test_average_and_median_empty() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_std_deviation_is_population() {
        // Population stddev of [2, 4, 4, 4, 5, 5, 7, 9] is exactly 2
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((std_deviation(&xs) - 2.0).abs() < 1e-12);

        assert_eq!(std_deviation(&[]), 0.0);
        assert_eq!(std_deviation(&[5.0]), 0.0);
    }

    #[test]
    fn test_drawdown_known_case() {
        // Peak 110, trough 88 => (110 - 88) / 110 = 20%
        let curve = [100.0, 110.0, 100.0, 88.0, 113.0];
        assert!((estimate_drawdown(&curve) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_drawdown_degenerate_input() {
        assert_eq!(estimate_drawdown(&[]), 0.0);
        assert_eq!(estimate_drawdown(&[100.0]), 0.0);
        // Monotonically rising curve never draws down
        assert_eq!(estimate_drawdown(&[100.0, 105.0, 111.0]), 0.0);
    }

    #[test]
    fn test_drawdown_nonpositive_peak_does_not_divide() {
        // A curve that starts at or below zero must not panic or produce NaN
        let dd = estimate_drawdown(&[0.0, -5.0, -10.0]);
        assert!(dd.is_finite());
        assert_eq!(dd, 0.0);
    }

    #[test]
    fn test_sharpe_like_zero_volatility() {
        assert_eq!(sharpe_like(&[1.0, 1.0, 1.0], 0.0), 0.0);
        assert_eq!(sharpe_like(&[1.0], 0.0), 0.0);
        assert_eq!(sharpe_like(&[], 0.0), 0.0);
    }

    #[test]
    fn test_sharpe_like_positive_returns() {
        let sharpe = sharpe_like(&[2.0, -1.0, 3.0, 1.0, 1.5], 0.0);
        assert!(sharpe > 0.0, "expected positive sharpe, got {}", sharpe);
    }

    #[test]
    fn test_post_loss_recovery_no_losses_is_perfect() {
        assert_eq!(post_loss_recovery_rate(&[]), 100.0);

        let all_wins = vec![make_trade(1.0, 30), make_trade(2.0, 20), make_trade(0.5, 10)];
        assert_eq!(post_loss_recovery_rate(&all_wins), 100.0);
    }

    #[test]
    fn test_post_loss_recovery_counts_pairs() {
        // loss -> win (recovered), loss -> loss (not), trailing loss ignored
        let trades = vec![
            make_trade(-1.0, 50),
            make_trade(2.0, 40),
            make_trade(-1.5, 30),
            make_trade(-0.5, 20),
            make_trade(1.0, 10),
        ];
        // Losses with a following trade: -1.0, -1.5, -0.5 => recoveries: 2
        let rate = post_loss_recovery_rate(&trades);
        assert!((rate - 66.666).abs() < 0.01, "got {}", rate);
    }

    #[test]
    fn test_cumulative_curve_compounds() {
        let trades = vec![make_trade(10.0, 20), make_trade(-10.0, 10)];
        let curve = cumulative_curve(&trades);

        assert_eq!(curve.len(), 3);
        assert!((curve[0] - 100.0).abs() < 1e-12);
        assert!((curve[1] - 110.0).abs() < 1e-12);
        assert!((curve[2] - 99.0).abs() < 1e-12);
    }
}
