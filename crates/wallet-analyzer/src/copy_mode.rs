//! Copy-mode tier assignment for qualified wallets.
//!
//! Tiers are evaluated strictest-first so a wallet lands in the highest
//! (most conservative) tier whose score threshold it meets. Disqualified
//! wallets are always `NONE` regardless of score.

use chrono::Utc;
use copyscope_core::types::{CopyMode, Wallet};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Risk bounds a tier imposes on the downstream copy-trading consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierBounds {
    pub min_score: f64,
    pub max_leverage: f64,
    pub max_position_size_pct: f64,
}

/// The three real tiers, strictest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyTierTable {
    pub conservative: TierBounds,
    pub standard: TierBounds,
    pub aggressive: TierBounds,
}

impl Default for CopyTierTable {
    fn default() -> Self {
        Self {
            conservative: TierBounds {
                min_score: 85.0,
                max_leverage: 2.0,
                max_position_size_pct: 5.0,
            },
            standard: TierBounds {
                min_score: 75.0,
                max_leverage: 5.0,
                max_position_size_pct: 10.0,
            },
            aggressive: TierBounds {
                min_score: 70.0,
                max_leverage: 10.0,
                max_position_size_pct: 20.0,
            },
        }
    }
}

pub struct CopyModeAssigner {
    tiers: CopyTierTable,
}

impl CopyModeAssigner {
    pub fn new() -> Self {
        Self {
            tiers: CopyTierTable::default(),
        }
    }

    pub fn with_tiers(tiers: CopyTierTable) -> Self {
        Self { tiers }
    }

    /// Highest tier whose score threshold the wallet meets; `NONE` for
    /// disqualified wallets or scores below every tier.
    pub fn assign(&self, wallet: &Wallet) -> CopyMode {
        if !wallet.qualified {
            return CopyMode::None;
        }

        let score = wallet.score.total;
        if score >= self.tiers.conservative.min_score {
            CopyMode::Conservative
        } else if score >= self.tiers.standard.min_score {
            CopyMode::Standard
        } else if score >= self.tiers.aggressive.min_score {
            CopyMode::Aggressive
        } else {
            CopyMode::None
        }
    }

    /// Risk bounds for a tier; `NONE` binds nothing.
    pub fn bounds(&self, mode: CopyMode) -> Option<&TierBounds> {
        match mode {
            CopyMode::Conservative => Some(&self.tiers.conservative),
            CopyMode::Standard => Some(&self.tiers.standard),
            CopyMode::Aggressive => Some(&self.tiers.aggressive),
            CopyMode::None => None,
        }
    }

    /// Copy of the wallet with `copy_mode` populated.
    pub fn assigned_wallet(&self, wallet: &Wallet) -> Wallet {
        let mode = self.assign(wallet);

        debug!(
            address = %wallet.address,
            score = wallet.score.total,
            mode = ?mode,
            "Assigned copy mode"
        );

        let mut assigned = wallet.clone();
        assigned.copy_mode = mode;
        assigned.last_updated = Utc::now();
        assigned
    }
}

impl Default for CopyModeAssigner {
    fn default() -> Self {
        Self::new()
    }
}
