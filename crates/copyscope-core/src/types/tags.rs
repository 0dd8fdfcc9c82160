//! Behavioral classification tags.
//!
//! Every field of [`WalletTags`] is drawn from a closed enumeration and has a
//! defined default, so a wallet with an empty trade history still resolves to
//! a complete tag record.

use serde::{Deserialize, Serialize};

/// Trading style derived from trade duration, frequency, and directional
/// persistence. Defaults to `swing` when the history is too thin to tell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradingStyle {
    Scalper,
    #[default]
    Swing,
    TrendFollower,
    RangeTrader,
}

/// Behavior pattern derived from position sizing and reaction to losses.
/// Defaults to `inactive` (trivial or empty trade count).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorPattern {
    Disciplined,
    Aggressive,
    Opportunistic,
    #[default]
    Inactive,
}

/// Session pattern from the hour-of-day distribution of trades. An evenly
/// spread (or empty) history defaults to the around-the-clock operator tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePattern {
    AsianHours,
    EuropeanHours,
    AmericanHours,
    #[serde(rename = "24h_operator")]
    #[default]
    TwentyFourHourOperator,
}

impl TimePattern {
    /// Market-session bucket used by portfolio distribution summaries.
    pub fn market_session(&self) -> &'static str {
        match self {
            TimePattern::AsianHours => "asia_session",
            TimePattern::EuropeanHours => "europe_session",
            TimePattern::AmericanHours => "us_session",
            TimePattern::TwentyFourHourOperator => "24h_session",
        }
    }
}

/// UTC-offset estimate for the dominant trading session. Defaults to UTC+0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UtcZone {
    #[serde(rename = "utc+8")]
    Plus8,
    #[serde(rename = "utc+1")]
    Plus1,
    #[serde(rename = "utc-5")]
    Minus5,
    #[serde(rename = "utc+0")]
    #[default]
    Zero,
}

/// Continent guess matching the dominant session. Defaults to `global`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Continent {
    Asia,
    Europe,
    Americas,
    #[default]
    Global,
}

/// Asset concentration tag. Defaults to `diversified`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetFocus {
    BtcFocused,
    EthFocused,
    AltcoinHunter,
    #[default]
    Diversified,
}

/// Long/short skew of the wallet's positioning. Defaults to balanced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionalBias {
    LongDominant,
    ShortDominant,
    #[default]
    BalancedPositioning,
}

/// Supplementary tag for how the wallet realizes profit. Optional: only
/// assigned when one side shows a clear realized-PnL edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfitOrientation {
    EfficientLong,
    EfficientShort,
}

/// Closed tag record assigned once by the tagging engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletTags {
    pub style: TradingStyle,
    pub behavior: BehaviorPattern,
    pub time_pattern: TimePattern,
    pub utc_zone: UtcZone,
    pub continent: Continent,
    pub asset_focus: AssetFocus,
    pub directional_bias: DirectionalBias,
    /// Encoded long/short split, e.g. `"long_74_short_26"`.
    pub direction_percent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_orientation: Option<ProfitOrientation>,
}

impl Default for WalletTags {
    fn default() -> Self {
        Self {
            style: TradingStyle::default(),
            behavior: BehaviorPattern::default(),
            time_pattern: TimePattern::default(),
            utc_zone: UtcZone::default(),
            continent: Continent::default(),
            asset_focus: AssetFocus::default(),
            directional_bias: DirectionalBias::default(),
            direction_percent: "long_0_short_0".to_string(),
            profit_orientation: None,
        }
    }
}
