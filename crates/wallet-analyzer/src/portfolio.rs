//! Portfolio construction from the qualified wallet set.
//!
//! Selects the top wallets by total score, caps the snapshot size, and
//! summarizes tag distributions over the included wallets only. Pure
//! function of its inputs: no I/O, and a fresh immutable snapshot per run.

use chrono::Utc;
use copyscope_core::types::{Portfolio, PortfolioMeta, Trade, Wallet};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::info;
use uuid::Uuid;

use crate::tagging;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioConfig {
    /// Snapshot size cap.
    pub max_wallets: usize,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self { max_wallets: 10 }
    }
}

pub struct PortfolioConstructor {
    config: PortfolioConfig,
}

impl PortfolioConstructor {
    pub fn new() -> Self {
        Self {
            config: PortfolioConfig::default(),
        }
    }

    pub fn with_config(config: PortfolioConfig) -> Self {
        Self { config }
    }

    /// Build a snapshot from the qualified wallet set.
    ///
    /// Wallets are ranked by `score.total` descending and truncated to the
    /// configured cap; distribution percentages cover the included wallets
    /// only. Unqualified records are ignored defensively.
    pub fn construct(
        &self,
        qualified: &[Wallet],
        trades_by_wallet: &HashMap<String, Vec<Trade>>,
    ) -> Portfolio {
        let mut ranked: Vec<&Wallet> = qualified.iter().filter(|w| w.qualified).collect();
        ranked.sort_by(|a, b| b.score.total.total_cmp(&a.score.total));
        ranked.truncate(self.config.max_wallets);

        let meta = self.distributions(&ranked, trades_by_wallet);
        let wallets: Vec<String> = ranked.iter().map(|w| w.address.clone()).collect();

        info!(
            included = wallets.len(),
            candidates = qualified.len(),
            "Constructed portfolio snapshot"
        );

        Portfolio {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            wallets,
            meta,
        }
    }

    fn distributions(
        &self,
        included: &[&Wallet],
        trades_by_wallet: &HashMap<String, Vec<Trade>>,
    ) -> PortfolioMeta {
        let mut meta = PortfolioMeta::default();
        if included.is_empty() {
            return meta;
        }

        let mut style = BTreeMap::new();
        let mut region = BTreeMap::new();
        let mut bias = BTreeMap::new();
        let mut time = BTreeMap::new();
        let mut orientation = BTreeMap::new();
        let mut session = BTreeMap::new();

        for wallet in included {
            bump(&mut style, tag_key(&wallet.tags.style));
            bump(&mut region, tag_key(&wallet.tags.continent));
            bump(&mut bias, tag_key(&wallet.tags.directional_bias));
            bump(&mut time, tag_key(&wallet.tags.time_pattern));

            let orientation_key = wallet
                .tags
                .profit_orientation
                .as_ref()
                .map(tag_key)
                .unwrap_or_else(|| "none".to_string());
            bump(&mut orientation, orientation_key);

            let trades = trades_by_wallet
                .get(&wallet.address)
                .map(Vec::as_slice)
                .unwrap_or_default();
            bump(&mut session, tagging::session_bucket(trades).to_string());
        }

        let total = included.len() as f64;
        meta.style = to_percentages(style, total);
        meta.region = to_percentages(region, total);
        meta.directional_bias = to_percentages(bias, total);
        meta.time_pattern = to_percentages(time, total);
        meta.profit_orientation = to_percentages(orientation, total);
        meta.market_session = to_percentages(session, total);
        meta
    }
}

impl Default for PortfolioConstructor {
    fn default() -> Self {
        Self::new()
    }
}

fn bump(counts: &mut BTreeMap<String, u64>, key: String) {
    *counts.entry(key).or_insert(0) += 1;
}

/// Serialized wire name of a tag value, e.g. `TwentyFourHourOperator` ->
/// `"24h_operator"`.
fn tag_key<T: Serialize>(tag: &T) -> String {
    serde_json::to_value(tag)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string())
}

fn to_percentages(counts: BTreeMap<String, u64>, total: f64) -> BTreeMap<String, f64> {
    counts
        .into_iter()
        .map(|(key, count)| (key, count as f64 / total * 100.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use copyscope_core::types::{
        Continent, DirectionalBias, ProfitOrientation, TimePattern, TradingStyle,
    };

    fn qualified_wallet(address: &str, score: f64) -> Wallet {
        let mut wallet = Wallet::new(address);
        wallet.qualified = true;
        wallet.score.total = score;
        wallet.tags.style = TradingStyle::Scalper;
        wallet.tags.continent = Continent::Asia;
        wallet.tags.directional_bias = DirectionalBias::LongDominant;
        wallet.tags.time_pattern = TimePattern::AsianHours;
        wallet
    }

    fn assert_sums_to_100(category: &BTreeMap<String, f64>) {
        let sum: f64 = category.values().sum();
        assert!(
            (sum - 100.0).abs() < 1e-6,
            "distribution sums to {} instead of 100",
            sum
        );
    }

    #[test]
    fn test_caps_at_max_wallets() {
        let constructor = PortfolioConstructor::new();
        let wallets: Vec<Wallet> = (0..15)
            .map(|i| qualified_wallet(&format!("0x{i:02x}"), 70.0 + i as f64))
            .collect();

        let portfolio = constructor.construct(&wallets, &HashMap::new());
        assert_eq!(portfolio.len(), 10);
    }

    #[test]
    fn test_sorted_by_score_descending() {
        let constructor = PortfolioConstructor::new();
        let wallets = vec![
            qualified_wallet("0xlow", 76.0),
            qualified_wallet("0xhigh", 93.0),
            qualified_wallet("0xmid", 84.0),
        ];

        let portfolio = constructor.construct(&wallets, &HashMap::new());
        assert_eq!(portfolio.wallets, vec!["0xhigh", "0xmid", "0xlow"]);
    }

    #[test]
    fn test_unqualified_wallets_excluded() {
        let constructor = PortfolioConstructor::new();
        let mut sneaky = qualified_wallet("0xsneaky", 99.0);
        sneaky.qualified = false;
        let wallets = vec![sneaky, qualified_wallet("0xok", 80.0)];

        let portfolio = constructor.construct(&wallets, &HashMap::new());
        assert_eq!(portfolio.wallets, vec!["0xok"]);
    }

    #[test]
    fn test_distributions_sum_to_100() {
        let constructor = PortfolioConstructor::new();
        let mut wallets: Vec<Wallet> = (0..4)
            .map(|i| qualified_wallet(&format!("0x{i}"), 80.0 + i as f64))
            .collect();
        wallets[0].tags.style = TradingStyle::Swing;
        wallets[1].tags.profit_orientation = Some(ProfitOrientation::EfficientLong);

        let portfolio = constructor.construct(&wallets, &HashMap::new());
        assert_sums_to_100(&portfolio.meta.style);
        assert_sums_to_100(&portfolio.meta.region);
        assert_sums_to_100(&portfolio.meta.directional_bias);
        assert_sums_to_100(&portfolio.meta.time_pattern);
        assert_sums_to_100(&portfolio.meta.profit_orientation);
        assert_sums_to_100(&portfolio.meta.market_session);
    }

    #[test]
    fn test_distribution_keys_use_wire_names() {
        let constructor = PortfolioConstructor::new();
        let mut wallet = qualified_wallet("0xwire", 90.0);
        wallet.tags.time_pattern = TimePattern::TwentyFourHourOperator;

        let portfolio = constructor.construct(&[wallet], &HashMap::new());
        assert!(portfolio.meta.time_pattern.contains_key("24h_operator"));
        assert!(portfolio.meta.style.contains_key("scalper"));
        assert!(portfolio.meta.profit_orientation.contains_key("none"));
        // No trade history for the wallet: session falls back to 24h
        assert!(portfolio.meta.market_session.contains_key("24h_session"));
    }

    #[test]
    fn test_each_run_is_a_fresh_snapshot() {
        let constructor = PortfolioConstructor::new();
        let wallets = vec![qualified_wallet("0xsnap", 85.0)];

        let first = constructor.construct(&wallets, &HashMap::new());
        let second = constructor.construct(&wallets, &HashMap::new());

        assert_ne!(first.id, second.id);
        assert_eq!(first.wallets, second.wallets);
    }

    #[test]
    fn test_empty_input_empty_snapshot() {
        let constructor = PortfolioConstructor::new();
        let portfolio = constructor.construct(&[], &HashMap::new());

        assert!(portfolio.is_empty());
        assert!(portfolio.meta.style.is_empty());
    }
}
