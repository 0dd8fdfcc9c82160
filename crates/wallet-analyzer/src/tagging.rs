//! Rule-based behavioral classification for wallets.
//!
//! Derives the closed tag record from a wallet's trade history: trading
//! style, behavior pattern, session timing with a UTC-offset and continent
//! estimate, asset focus, directional bias, and an optional profit
//! orientation. Every field resolves to its documented default when the
//! history is empty.

use chrono::{Timelike, Utc};
use copyscope_core::types::{
    AssetFocus, BehaviorPattern, Continent, DirectionalBias, ProfitOrientation, TimePattern, Trade,
    TradeSide, TradingStyle, UtcZone, Wallet, WalletTags,
};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::stats;

/// Classification thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggingConfig {
    /// Below this trade count the wallet is tagged `inactive`.
    pub min_active_trades: usize,

    // Style thresholds
    /// Average holding time (minutes) at or below which a wallet scalps.
    pub scalper_max_duration_min: f64,
    /// Share of consecutive same-side pairs that marks a trend follower.
    pub trend_min_persistence: f64,
    pub trend_min_trades: usize,
    /// Side-persistence at or below which positioning oscillates.
    pub range_max_persistence: f64,

    // Behavior thresholds
    /// Position-size coefficient of variation below which sizing is
    /// disciplined.
    pub disciplined_max_size_cv: f64,
    pub aggressive_min_leverage: f64,
    /// Average post-loss size ratio at or above which losses are chased.
    pub aggressive_loss_escalation: f64,

    // Timing thresholds
    /// Active hours (out of 24) at or above which activity counts as
    /// around-the-clock.
    pub even_spread_min_active_hours: usize,

    // Asset-focus thresholds
    /// Share of trades in the top asset that marks a focused wallet.
    pub focus_min_share: f64,
    pub altcoin_min_distinct: usize,
    /// BTC+ETH share below which a many-asset wallet hunts altcoins.
    pub altcoin_max_majors_share: f64,

    // Direction thresholds
    /// Long (or short) percentage at or above which positioning is skewed.
    pub direction_skew_pct: f64,

    // Profit-orientation thresholds
    pub orientation_min_side_trades: usize,
    /// Average-PnL edge (percentage points) one side needs over the other.
    pub orientation_min_edge_pct: f64,
}

impl Default for TaggingConfig {
    fn default() -> Self {
        Self {
            min_active_trades: 5,
            scalper_max_duration_min: 60.0,
            trend_min_persistence: 0.75,
            trend_min_trades: 20,
            range_max_persistence: 0.35,
            disciplined_max_size_cv: 0.3,
            aggressive_min_leverage: 10.0,
            aggressive_loss_escalation: 1.5,
            even_spread_min_active_hours: 18,
            focus_min_share: 0.5,
            altcoin_min_distinct: 5,
            altcoin_max_majors_share: 0.3,
            direction_skew_pct: 65.0,
            orientation_min_side_trades: 5,
            orientation_min_edge_pct: 1.0,
        }
    }
}

/// Rule-based tagging engine. Assigns the whole tag record in one pass.
pub struct TaggingEngine {
    config: TaggingConfig,
}

impl TaggingEngine {
    pub fn new() -> Self {
        Self {
            config: TaggingConfig::default(),
        }
    }

    pub fn with_config(config: TaggingConfig) -> Self {
        Self { config }
    }

    /// Classify a trade history into a complete tag record.
    pub fn tag(&self, trades: &[Trade]) -> WalletTags {
        let mut trades = trades.to_vec();
        trades.sort_by_key(|t| t.timestamp);

        let (time_pattern, utc_zone, continent) =
            time_profile(&trades, self.config.even_spread_min_active_hours);
        let (directional_bias, direction_percent) = self.classify_direction(&trades);

        WalletTags {
            style: self.classify_style(&trades),
            behavior: self.classify_behavior(&trades),
            time_pattern,
            utc_zone,
            continent,
            asset_focus: self.classify_assets(&trades),
            directional_bias,
            direction_percent,
            profit_orientation: self.classify_orientation(&trades),
        }
    }

    /// Copy of the wallet with `tags` populated.
    pub fn tagged_wallet(&self, wallet: &Wallet, trades: &[Trade]) -> Wallet {
        let tags = self.tag(trades);

        debug!(
            address = %wallet.address,
            style = ?tags.style,
            behavior = ?tags.behavior,
            time_pattern = ?tags.time_pattern,
            "Tagged wallet"
        );

        let mut tagged = wallet.clone();
        tagged.tags = tags;
        tagged.last_updated = Utc::now();
        tagged
    }

    fn classify_style(&self, trades: &[Trade]) -> TradingStyle {
        if trades.len() < 2 {
            return TradingStyle::default();
        }

        let durations: Vec<f64> = trades.iter().map(|t| t.duration_min).collect();
        if stats::average(&durations) <= self.config.scalper_max_duration_min {
            return TradingStyle::Scalper;
        }

        let persistence = side_persistence(trades);
        if persistence >= self.config.trend_min_persistence
            && trades.len() >= self.config.trend_min_trades
        {
            return TradingStyle::TrendFollower;
        }
        if persistence <= self.config.range_max_persistence {
            return TradingStyle::RangeTrader;
        }

        TradingStyle::Swing
    }

    fn classify_behavior(&self, trades: &[Trade]) -> BehaviorPattern {
        if trades.len() < self.config.min_active_trades {
            return BehaviorPattern::Inactive;
        }

        let leverages: Vec<f64> = trades.iter().map(|t| t.leverage).collect();
        if stats::average(&leverages) >= self.config.aggressive_min_leverage
            || self.chases_losses(trades)
        {
            return BehaviorPattern::Aggressive;
        }

        let sizes: Vec<f64> = trades
            .iter()
            .map(|t| t.size_usd.to_f64().unwrap_or(0.0))
            .collect();
        let mean_size = stats::average(&sizes);
        if mean_size > 0.0 {
            let size_cv = stats::std_deviation(&sizes) / mean_size;
            if size_cv < self.config.disciplined_max_size_cv {
                return BehaviorPattern::Disciplined;
            }
        }

        BehaviorPattern::Opportunistic
    }

    /// Average size ratio of the trade immediately following a loss.
    fn chases_losses(&self, trades: &[Trade]) -> bool {
        let ratios: Vec<f64> = trades
            .windows(2)
            .filter(|pair| pair[0].is_loss())
            .filter_map(|pair| {
                let before = pair[0].size_usd.to_f64().unwrap_or(0.0);
                let after = pair[1].size_usd.to_f64().unwrap_or(0.0);
                (before > 0.0).then_some(after / before)
            })
            .collect();

        !ratios.is_empty() && stats::average(&ratios) >= self.config.aggressive_loss_escalation
    }

    fn classify_assets(&self, trades: &[Trade]) -> AssetFocus {
        if trades.is_empty() {
            return AssetFocus::default();
        }

        let mut counts: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
        for trade in trades {
            *counts.entry(trade.coin.to_uppercase()).or_insert(0) += 1;
        }

        let total = trades.len() as f64;
        let (top_coin, top_count) = counts
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(coin, count)| (coin.clone(), *count))
            .unwrap_or_default();

        if top_count as f64 / total >= self.config.focus_min_share {
            match top_coin.as_str() {
                "BTC" => return AssetFocus::BtcFocused,
                "ETH" => return AssetFocus::EthFocused,
                _ => {}
            }
        }

        let majors: usize = counts
            .iter()
            .filter(|(coin, _)| coin.as_str() == "BTC" || coin.as_str() == "ETH")
            .map(|(_, count)| *count)
            .sum();
        if counts.len() >= self.config.altcoin_min_distinct
            && (majors as f64 / total) < self.config.altcoin_max_majors_share
        {
            return AssetFocus::AltcoinHunter;
        }

        AssetFocus::Diversified
    }

    fn classify_direction(&self, trades: &[Trade]) -> (DirectionalBias, String) {
        if trades.is_empty() {
            return (DirectionalBias::default(), "long_0_short_0".to_string());
        }

        let long_count = trades.iter().filter(|t| t.side == TradeSide::Long).count();
        let long_pct = (long_count as f64 / trades.len() as f64 * 100.0).round() as i64;
        let short_pct = 100 - long_pct;

        let bias = if long_pct as f64 >= self.config.direction_skew_pct {
            DirectionalBias::LongDominant
        } else if short_pct as f64 >= self.config.direction_skew_pct {
            DirectionalBias::ShortDominant
        } else {
            DirectionalBias::BalancedPositioning
        };

        (bias, format!("long_{}_short_{}", long_pct, short_pct))
    }

    fn classify_orientation(&self, trades: &[Trade]) -> Option<ProfitOrientation> {
        let long_pnls: Vec<f64> = trades
            .iter()
            .filter(|t| t.side == TradeSide::Long)
            .map(|t| t.pnl_pct)
            .collect();
        let short_pnls: Vec<f64> = trades
            .iter()
            .filter(|t| t.side == TradeSide::Short)
            .map(|t| t.pnl_pct)
            .collect();

        let avg_long = stats::average(&long_pnls);
        let avg_short = stats::average(&short_pnls);
        let min_trades = self.config.orientation_min_side_trades;
        let min_edge = self.config.orientation_min_edge_pct;

        if long_pnls.len() >= min_trades && avg_long > 0.0 && avg_long >= avg_short + min_edge {
            return Some(ProfitOrientation::EfficientLong);
        }
        if short_pnls.len() >= min_trades && avg_short > 0.0 && avg_short >= avg_long + min_edge {
            return Some(ProfitOrientation::EfficientShort);
        }

        None
    }
}

impl Default for TaggingEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Share of consecutive trade pairs holding the same side.
fn side_persistence(trades: &[Trade]) -> f64 {
    let pairs = trades.len().saturating_sub(1);
    if pairs == 0 {
        return 0.0;
    }

    let same_side = trades
        .windows(2)
        .filter(|pair| pair[0].side == pair[1].side)
        .count();
    same_side as f64 / pairs as f64
}

/// Hour-of-day trade counts.
fn hourly_histogram(trades: &[Trade]) -> [u64; 24] {
    let mut histogram = [0u64; 24];
    for trade in trades {
        histogram[trade.timestamp.hour() as usize] += 1;
    }
    histogram
}

/// Session classification from the hour-of-day distribution. Evenly spread
/// (or empty) activity maps to the around-the-clock profile; otherwise the
/// dominant 8-hour third of the day picks the session, UTC offset, and
/// continent estimate.
fn time_profile(trades: &[Trade], min_active_hours: usize) -> (TimePattern, UtcZone, Continent) {
    if trades.is_empty() {
        return (TimePattern::default(), UtcZone::default(), Continent::default());
    }

    let histogram = hourly_histogram(trades);
    let active_hours = histogram.iter().filter(|&&count| count > 0).count();
    if active_hours >= min_active_hours {
        return (
            TimePattern::TwentyFourHourOperator,
            UtcZone::Zero,
            Continent::Global,
        );
    }

    let asia: u64 = histogram[0..8].iter().sum();
    let europe: u64 = histogram[8..16].iter().sum();
    let americas: u64 = histogram[16..24].iter().sum();

    if asia >= europe && asia >= americas {
        (TimePattern::AsianHours, UtcZone::Plus8, Continent::Asia)
    } else if europe >= americas {
        (TimePattern::EuropeanHours, UtcZone::Plus1, Continent::Europe)
    } else {
        (
            TimePattern::AmericanHours,
            UtcZone::Minus5,
            Continent::Americas,
        )
    }
}

/// Market-session bucket for portfolio distribution summaries, derived from
/// the trade timestamps with the default spread threshold.
pub fn session_bucket(trades: &[Trade]) -> &'static str {
    let min_active_hours = TaggingConfig::default().even_spread_min_active_hours;
    time_profile(trades, min_active_hours).0.market_session()
}
