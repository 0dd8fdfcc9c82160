//! Hard-threshold qualification gate for scored wallets.
//!
//! Criteria are evaluated in a fixed order and the first failure is the
//! reported reason; this ordering is part of the observable contract.

use chrono::Utc;
use copyscope_core::types::{Trade, Wallet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::stats;

/// Hard minimums a wallet must clear to be portfolio-eligible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualificationThresholds {
    pub min_total_trades: u64,
    pub min_roi_30d_pct: f64,
    pub min_win_rate_pct: f64,
    pub max_drawdown_pct: f64,
    pub min_total_score: f64,
}

impl Default for QualificationThresholds {
    fn default() -> Self {
        Self {
            min_total_trades: 30,
            min_roi_30d_pct: 5.0,
            min_win_rate_pct: 55.0,
            max_drawdown_pct: 25.0,
            min_total_score: 75.0,
        }
    }
}

/// Outcome of the qualification gate. Disqualification is a normal result,
/// not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualificationResult {
    pub qualified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

pub struct QualificationFilter {
    thresholds: QualificationThresholds,
}

impl QualificationFilter {
    pub fn new() -> Self {
        Self {
            thresholds: QualificationThresholds::default(),
        }
    }

    pub fn with_thresholds(thresholds: QualificationThresholds) -> Self {
        Self { thresholds }
    }

    /// Evaluate the criteria in order: total trades, 30-day ROI, win rate,
    /// estimated drawdown, total score. The first failure is the reason.
    pub fn evaluate(&self, wallet: &Wallet, trades: &[Trade]) -> QualificationResult {
        let limits = &self.thresholds;

        if wallet.total_trades < limits.min_total_trades {
            return Self::disqualified(format!(
                "total trades {} below minimum {}",
                wallet.total_trades, limits.min_total_trades
            ));
        }

        if wallet.roi_30d < limits.min_roi_30d_pct {
            return Self::disqualified(format!(
                "30-day ROI {:.2}% below minimum {:.2}%",
                wallet.roi_30d, limits.min_roi_30d_pct
            ));
        }

        if wallet.win_rate < limits.min_win_rate_pct {
            return Self::disqualified(format!(
                "win rate {:.2}% below minimum {:.2}%",
                wallet.win_rate, limits.min_win_rate_pct
            ));
        }

        let mut trades = trades.to_vec();
        trades.sort_by_key(|t| t.timestamp);
        let drawdown = stats::estimate_drawdown(&stats::cumulative_curve(&trades));
        if drawdown > limits.max_drawdown_pct {
            return Self::disqualified(format!(
                "estimated drawdown {:.2}% above maximum {:.2}%",
                drawdown, limits.max_drawdown_pct
            ));
        }

        if wallet.score.total < limits.min_total_score {
            return Self::disqualified(format!(
                "total score {:.2} below minimum {:.2}",
                wallet.score.total, limits.min_total_score
            ));
        }

        QualificationResult {
            qualified: true,
            reason: None,
        }
    }

    /// Copy of the wallet with the qualification verdict applied.
    pub fn qualified_wallet(&self, wallet: &Wallet, trades: &[Trade]) -> Wallet {
        let result = self.evaluate(wallet, trades);

        debug!(
            address = %wallet.address,
            qualified = result.qualified,
            reason = result.reason.as_deref().unwrap_or(""),
            "Evaluated qualification"
        );

        let mut updated = wallet.clone();
        updated.qualified = result.qualified;
        updated.disqualify_reason = result.reason;
        updated.last_updated = Utc::now();
        updated
    }

    fn disqualified(reason: String) -> QualificationResult {
        QualificationResult {
            qualified: false,
            reason: Some(reason),
        }
    }
}

impl Default for QualificationFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use copyscope_core::types::TradeSide;
    use rust_decimal::Decimal;

    fn make_trade(pnl_pct: f64, hours_ago: i64) -> Trade {
        Trade {
            wallet_address: "0xqual".to_string(),
            coin: "ETH".to_string(),
            side: TradeSide::Long,
            size_usd: Decimal::new(1000, 0),
            leverage: 4.0,
            pnl_pct,
            duration_min: 60.0,
            timestamp: Utc::now() - Duration::hours(hours_ago),
            price: Decimal::new(3200, 0),
        }
    }

    fn passing_wallet() -> (Wallet, Vec<Trade>) {
        let mut wallet = Wallet::new("0xpass");
        wallet.total_trades = 50;
        wallet.roi_30d = 20.0;
        wallet.win_rate = 60.0;
        wallet.score.total = 90.0;

        // Gentle equity curve: max drawdown well under 25%
        let trades = (0..50)
            .map(|i| make_trade(if i % 4 == 0 { -1.0 } else { 2.0 }, (50 - i) * 6))
            .collect();

        (wallet, trades)
    }

    #[test]
    fn test_all_criteria_pass() {
        let filter = QualificationFilter::new();
        let (wallet, trades) = passing_wallet();

        let result = filter.evaluate(&wallet, &trades);
        assert!(result.qualified);
        assert!(result.reason.is_none());
    }

    #[test]
    fn test_first_failing_criterion_wins() {
        let filter = QualificationFilter::new();
        let (mut wallet, trades) = passing_wallet();

        // Both trade count and ROI fail; trade count is reported
        wallet.total_trades = 10;
        wallet.roi_30d = -2.0;

        let result = filter.evaluate(&wallet, &trades);
        assert!(!result.qualified);
        let reason = result.reason.unwrap();
        assert!(
            reason.contains("total trades"),
            "expected trade-count reason, got: {}",
            reason
        );
        assert!(reason.contains("10"));
        assert!(reason.contains("30"));
    }

    #[test]
    fn test_roi_failure_reported_when_trades_pass() {
        let filter = QualificationFilter::new();
        let (mut wallet, trades) = passing_wallet();
        wallet.roi_30d = 1.0;

        let result = filter.evaluate(&wallet, &trades);
        assert!(!result.qualified);
        assert!(result.reason.unwrap().contains("30-day ROI"));
    }

    #[test]
    fn test_win_rate_failure() {
        let filter = QualificationFilter::new();
        let (mut wallet, trades) = passing_wallet();
        wallet.win_rate = 40.0;

        let result = filter.evaluate(&wallet, &trades);
        assert!(!result.qualified);
        assert!(result.reason.unwrap().contains("win rate"));
    }

    #[test]
    fn test_drawdown_failure() {
        let filter = QualificationFilter::new();
        let (wallet, _) = passing_wallet();

        // Deep loss streak: equity collapses well past 25% from its peak
        let trades: Vec<Trade> = (0..50)
            .map(|i| make_trade(if i < 10 { 3.0 } else { -4.0 }, (50 - i) * 6))
            .collect();

        let result = filter.evaluate(&wallet, &trades);
        assert!(!result.qualified);
        assert!(result.reason.unwrap().contains("drawdown"));
    }

    #[test]
    fn test_score_failure_checked_last() {
        let filter = QualificationFilter::new();
        let (mut wallet, trades) = passing_wallet();
        wallet.score.total = 60.0;

        let result = filter.evaluate(&wallet, &trades);
        assert!(!result.qualified);
        assert!(result.reason.unwrap().contains("total score"));
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let filter = QualificationFilter::new();
        let (mut wallet, trades) = passing_wallet();
        wallet.total_trades = 5;

        let first = filter.evaluate(&wallet, &trades);
        let second = filter.evaluate(&wallet, &trades);
        assert_eq!(first.qualified, second.qualified);
        assert_eq!(first.reason, second.reason);
    }

    #[test]
    fn test_qualified_wallet_copies() {
        let filter = QualificationFilter::new();
        let (mut wallet, trades) = passing_wallet();
        wallet.total_trades = 5;

        let updated = filter.qualified_wallet(&wallet, &trades);
        assert!(!updated.qualified);
        assert!(updated.disqualify_reason.is_some());
        // Input untouched
        assert!(wallet.disqualify_reason.is_none());
    }

    #[test]
    fn test_custom_thresholds() {
        let filter = QualificationFilter::with_thresholds(QualificationThresholds {
            min_total_trades: 5,
            min_total_score: 50.0,
            ..Default::default()
        });

        let (mut wallet, trades) = passing_wallet();
        wallet.total_trades = 7;
        wallet.score.total = 55.0;

        let result = filter.evaluate(&wallet, &trades);
        assert!(result.qualified);
    }
}
