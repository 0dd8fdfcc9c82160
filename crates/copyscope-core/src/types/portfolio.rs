//! Portfolio snapshot artifacts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// An immutable portfolio snapshot.
///
/// Each pipeline run constructs a brand-new snapshot; the persistence
/// collaborator stores them insert-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Included wallet addresses, ordered by total score descending.
    pub wallets: Vec<String>,
    pub meta: PortfolioMeta,
}

impl Portfolio {
    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }
}

/// Distribution summaries over the included wallets, expressed as
/// percentages keyed by tag value. Within each category the values sum to
/// 100 up to floating-point rounding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioMeta {
    pub style: BTreeMap<String, f64>,
    pub region: BTreeMap<String, f64>,
    pub directional_bias: BTreeMap<String, f64>,
    pub time_pattern: BTreeMap<String, f64>,
    pub profit_orientation: BTreeMap<String, f64>,
    pub market_session: BTreeMap<String, f64>,
}
