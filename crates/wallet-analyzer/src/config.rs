//! Aggregated pipeline configuration.
//!
//! Every engine owns its config struct with fixed-constant defaults;
//! `AnalyzerConfig` bundles them so callers can inject one object (and
//! tests can substitute alternate threshold sets). `from_env` applies a
//! small set of operational overrides on top of the defaults.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::copy_mode::CopyTierTable;
use crate::portfolio::PortfolioConfig;
use crate::qualification::QualificationThresholds;
use crate::retry::RetryPolicy;
use crate::scoring::ScoringConfig;
use crate::tagging::TaggingConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    pub scoring: ScoringConfig,
    pub qualification: QualificationThresholds,
    pub tagging: TaggingConfig,
    pub tiers: CopyTierTable,
    pub portfolio: PortfolioConfig,
    /// Wallets analyzed in parallel per batch.
    pub concurrency: usize,
    pub retry: RetryPolicy,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            qualification: QualificationThresholds::default(),
            tagging: TaggingConfig::default(),
            tiers: CopyTierTable::default(),
            portfolio: PortfolioConfig::default(),
            concurrency: 5,
            retry: RetryPolicy::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Some(concurrency) = env_parse("COPYSCOPE_CONCURRENCY") {
            config.concurrency = concurrency;
        }
        if let Some(max_wallets) = env_parse("COPYSCOPE_MAX_WALLETS") {
            config.portfolio.max_wallets = max_wallets;
        }
        if let Some(min_score) = env_parse("COPYSCOPE_MIN_SCORE") {
            config.qualification.min_total_score = min_score;
        }
        if let Some(attempts) = env_parse("COPYSCOPE_RETRY_MAX_ATTEMPTS") {
            config.retry.max_attempts = attempts;
        }
        config
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|value| value.parse().ok())
}
