//! Trade records consumed by the analysis pipeline.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single perpetual trade executed by a tracked wallet.
///
/// Trades are immutable once recorded. The persistence collaborator upserts
/// them by [`Trade::composite_key`] rather than a generated identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub wallet_address: String,
    pub coin: String,
    pub side: TradeSide,
    /// Position notional in USD.
    pub size_usd: Decimal,
    pub leverage: f64,
    /// Realized return for the trade, in percent.
    pub pnl_pct: f64,
    /// Holding time in minutes.
    pub duration_min: f64,
    pub timestamp: DateTime<Utc>,
    pub price: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Long,
    Short,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Long => write!(f, "long"),
            TradeSide::Short => write!(f, "short"),
        }
    }
}

impl Trade {
    /// Composite identity used by the persistence layer for upserts:
    /// (wallet, timestamp, coin, side, price, size).
    pub fn composite_key(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}:{}",
            self.wallet_address,
            self.timestamp.timestamp_millis(),
            self.coin,
            self.side,
            self.price,
            self.size_usd
        )
    }

    pub fn is_win(&self) -> bool {
        self.pnl_pct > 0.0
    }

    pub fn is_loss(&self) -> bool {
        self.pnl_pct < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_trade(side: TradeSide, pnl_pct: f64) -> Trade {
        Trade {
            wallet_address: "0xabc".to_string(),
            coin: "BTC".to_string(),
            side,
            size_usd: Decimal::new(2500, 0),
            leverage: 5.0,
            pnl_pct,
            duration_min: 90.0,
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
            price: Decimal::new(62_450, 0),
        }
    }

    #[test]
    fn test_composite_key_distinguishes_side() {
        let long = make_trade(TradeSide::Long, 1.0);
        let short = make_trade(TradeSide::Short, 1.0);

        assert_ne!(long.composite_key(), short.composite_key());
        assert!(long.composite_key().contains(":long:"));
        assert!(short.composite_key().contains(":short:"));
    }

    #[test]
    fn test_win_loss_flags() {
        assert!(make_trade(TradeSide::Long, 2.5).is_win());
        assert!(make_trade(TradeSide::Long, -1.0).is_loss());

        // Break-even is neither a win nor a loss
        let flat = make_trade(TradeSide::Short, 0.0);
        assert!(!flat.is_win());
        assert!(!flat.is_loss());
    }

    #[test]
    fn test_side_serializes_lowercase() {
        let json = serde_json::to_string(&TradeSide::Long).unwrap();
        assert_eq!(json, "\"long\"");
    }
}
