//! Wallet records and derived analysis state.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::tags::WalletTags;

/// A tracked wallet with account-level metrics and derived analysis state.
///
/// The wallet is identified by its on-chain address. Score, qualification,
/// tags, and copy mode are derived fields recomputed from the trade history
/// on each pipeline run; the pipeline never mutates an input record in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub address: String,

    // Account-level metrics supplied by the upstream source
    /// Trailing 7-day return, in percent.
    pub roi_7d: f64,
    /// Trailing 30-day return, in percent.
    pub roi_30d: f64,
    /// All-time return, in percent.
    pub roi_alltime: f64,
    /// Win rate in percent (0-100).
    pub win_rate: f64,
    pub total_trades: u64,
    pub pnl_usd: Decimal,

    // Derived state
    #[serde(default)]
    pub score: ScoreComponents,
    #[serde(default)]
    pub qualified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disqualify_reason: Option<String>,
    #[serde(default)]
    pub tags: WalletTags,
    #[serde(default)]
    pub copy_mode: CopyMode,
    pub last_updated: DateTime<Utc>,

    // Batch-analysis failure marker. A marked record takes the place of the
    // wallet's result so batch output stays order- and count-preserving.
    #[serde(default)]
    pub analysis_error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Wallet {
    /// Create a wallet record with account metrics and no derived state.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            roi_7d: 0.0,
            roi_30d: 0.0,
            roi_alltime: 0.0,
            win_rate: 0.0,
            total_trades: 0,
            pnl_usd: Decimal::ZERO,
            score: ScoreComponents::default(),
            qualified: false,
            disqualify_reason: None,
            tags: WalletTags::default(),
            copy_mode: CopyMode::None,
            last_updated: Utc::now(),
            analysis_error: false,
            error_message: None,
        }
    }

    /// Copy of this record marked as failed analysis.
    pub fn with_analysis_error(&self, message: impl Into<String>) -> Self {
        let mut marked = self.clone();
        marked.analysis_error = true;
        marked.error_message = Some(message.into());
        marked.last_updated = Utc::now();
        marked
    }
}

/// Nine weighted sub-scores plus the clamped total, all in [0, 100].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub roi_30d: f64,
    pub win_rate: f64,
    pub pnl_per_trade: f64,
    pub leverage_avg: f64,
    pub drawdown: f64,
    pub consistency: f64,
    pub frequency: f64,
    pub post_loss: f64,
    pub roi_trend: f64,
    pub total: f64,
}

/// Recommended capital-allocation tier for mirroring a wallet's trades.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CopyMode {
    Conservative,
    Standard,
    Aggressive,
    #[default]
    None,
}
