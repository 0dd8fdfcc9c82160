//! Weighted scoring engine for wallet evaluation.
//!
//! Combines per-wallet trade statistics into nine sub-scores, each
//! independently normalized to 0-100, and a weighted total in the same
//! range. Weights and normalization anchors are configurable so tests can
//! substitute alternate threshold sets.

use chrono::Utc;
use copyscope_core::types::{ScoreComponents, Trade, Wallet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::stats;

/// Weight configuration for the composite score. The nine weights must sum
/// to 1.0 so the total stays in the same 0-100 range as the components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub roi_30d: f64,
    pub win_rate: f64,
    pub pnl_per_trade: f64,
    pub leverage_avg: f64,
    pub drawdown: f64,
    pub consistency: f64,
    pub frequency: f64,
    pub post_loss: f64,
    pub roi_trend: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.roi_30d
            + self.win_rate
            + self.pnl_per_trade
            + self.leverage_avg
            + self.drawdown
            + self.consistency
            + self.frequency
            + self.post_loss
            + self.roi_trend
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            roi_30d: 0.25,
            win_rate: 0.15,
            pnl_per_trade: 0.10,
            leverage_avg: 0.10,
            drawdown: 0.15,
            consistency: 0.10,
            frequency: 0.05,
            post_loss: 0.05,
            roi_trend: 0.05,
        }
    }
}

/// Normalization anchors for the sub-scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    /// 30-day ROI (percent) that maps to a full ROI sub-score.
    pub full_score_roi_pct: f64,
    /// Average per-trade PnL (percent) that maps to a full sub-score.
    pub full_score_pnl_per_trade_pct: f64,
    /// Average leverage at or above which the leverage sub-score is 0.
    pub zero_score_leverage: f64,
    /// Drawdown (percent) at or above which the drawdown sub-score is 0.
    pub zero_score_drawdown_pct: f64,
    /// Trades per day that map to a full frequency sub-score.
    pub full_score_trades_per_day: f64,
    /// Cap applied to the interval coefficient of variation before scoring.
    pub interval_cv_cap: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            full_score_roi_pct: 50.0,
            full_score_pnl_per_trade_pct: 5.0,
            zero_score_leverage: 20.0,
            zero_score_drawdown_pct: 50.0,
            full_score_trades_per_day: 3.0,
            interval_cv_cap: 2.0,
        }
    }
}

/// Pure scoring transform: wallet + trade history in, score components out.
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self {
            config: ScoringConfig::default(),
        }
    }

    pub fn with_config(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Compute the nine sub-scores and the weighted total.
    pub fn score(&self, wallet: &Wallet, trades: &[Trade]) -> ScoreComponents {
        let mut trades = trades.to_vec();
        trades.sort_by_key(|t| t.timestamp);

        let components = ScoreComponents {
            roi_30d: self.roi_component(wallet),
            win_rate: wallet.win_rate.clamp(0.0, 100.0),
            pnl_per_trade: self.pnl_per_trade_component(&trades),
            leverage_avg: self.leverage_component(&trades),
            drawdown: self.drawdown_component(&trades),
            consistency: self.consistency_component(&trades),
            frequency: self.frequency_component(&trades),
            post_loss: stats::post_loss_recovery_rate(&trades),
            roi_trend: self.roi_trend_component(&trades),
            total: 0.0,
        };

        let total = self.weighted_total(&components);

        debug!(
            address = %wallet.address,
            total = total,
            trades = trades.len(),
            "Scored wallet"
        );

        ScoreComponents { total, ..components }
    }

    /// Copy of the wallet with `score` populated; no other field changes.
    pub fn scored_wallet(&self, wallet: &Wallet, trades: &[Trade]) -> Wallet {
        let mut scored = wallet.clone();
        scored.score = self.score(wallet, trades);
        scored.last_updated = Utc::now();
        scored
    }

    fn weighted_total(&self, c: &ScoreComponents) -> f64 {
        let w = &self.config.weights;
        let total = c.roi_30d * w.roi_30d
            + c.win_rate * w.win_rate
            + c.pnl_per_trade * w.pnl_per_trade
            + c.leverage_avg * w.leverage_avg
            + c.drawdown * w.drawdown
            + c.consistency * w.consistency
            + c.frequency * w.frequency
            + c.post_loss * w.post_loss
            + c.roi_trend * w.roi_trend;
        total.clamp(0.0, 100.0)
    }

    fn roi_component(&self, wallet: &Wallet) -> f64 {
        (wallet.roi_30d / self.config.full_score_roi_pct * 100.0).clamp(0.0, 100.0)
    }

    fn pnl_per_trade_component(&self, trades: &[Trade]) -> f64 {
        if trades.is_empty() {
            return 0.0;
        }
        let pnls: Vec<f64> = trades.iter().map(|t| t.pnl_pct).collect();
        (stats::average(&pnls) / self.config.full_score_pnl_per_trade_pct * 100.0).clamp(0.0, 100.0)
    }

    fn leverage_component(&self, trades: &[Trade]) -> f64 {
        if trades.is_empty() {
            return 0.0;
        }
        let leverages: Vec<f64> = trades.iter().map(|t| t.leverage).collect();
        let avg = stats::average(&leverages);
        (1.0 - avg / self.config.zero_score_leverage).clamp(0.0, 1.0) * 100.0
    }

    fn drawdown_component(&self, trades: &[Trade]) -> f64 {
        if trades.is_empty() {
            return 0.0;
        }
        let drawdown = stats::estimate_drawdown(&stats::cumulative_curve(trades));
        (1.0 - drawdown / self.config.zero_score_drawdown_pct).clamp(0.0, 1.0) * 100.0
    }

    /// Regularity of trade timing: low coefficient of variation across
    /// inter-trade intervals scores high.
    fn consistency_component(&self, trades: &[Trade]) -> f64 {
        if trades.len() < 3 {
            return 0.0;
        }

        let intervals: Vec<f64> = trades
            .windows(2)
            .map(|w| (w[1].timestamp - w[0].timestamp).num_seconds() as f64 / 3600.0)
            .collect();

        let mean = stats::average(&intervals);
        if mean <= 0.0 {
            return 0.0;
        }

        let cv = stats::std_deviation(&intervals) / mean;
        let cap = self.config.interval_cv_cap;
        (1.0 - cv.min(cap) / cap) * 100.0
    }

    fn frequency_component(&self, trades: &[Trade]) -> f64 {
        if trades.len() < 2 {
            return 0.0;
        }

        let span_days = ((trades[trades.len() - 1].timestamp - trades[0].timestamp)
            .num_seconds() as f64
            / 86_400.0)
            .max(1.0);
        let trades_per_day = trades.len() as f64 / span_days;

        (trades_per_day / self.config.full_score_trades_per_day * 100.0).clamp(0.0, 100.0)
    }

    /// Recent-half vs older-half PnL comparison, centered at a neutral 50.
    fn roi_trend_component(&self, trades: &[Trade]) -> f64 {
        if trades.len() < 4 {
            return 50.0;
        }

        let mid = trades.len() / 2;
        let older: Vec<f64> = trades[..mid].iter().map(|t| t.pnl_pct).collect();
        let recent: Vec<f64> = trades[mid..].iter().map(|t| t.pnl_pct).collect();

        let delta = stats::average(&recent) - stats::average(&older);
        (50.0 + delta * 10.0).clamp(0.0, 100.0)
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}
