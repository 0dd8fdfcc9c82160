//! Per-wallet pipeline and the batch analysis driver.
//!
//! The pipeline runs score -> qualify -> tag -> copy-mode strictly in that
//! order (qualification depends on score, copy mode on qualification). The
//! driver fans wallets out under a bounded semaphore and always returns one
//! result per input wallet, in input order: failures become marked records,
//! never missing entries.

use copyscope_core::types::{Trade, Wallet};
use copyscope_core::{Error, Result};
use futures_util::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::config::AnalyzerConfig;
use crate::copy_mode::CopyModeAssigner;
use crate::qualification::QualificationFilter;
use crate::retry::RetryPolicy;
use crate::scoring::ScoringEngine;
use crate::source::{self, WalletSource};
use crate::tagging::TaggingEngine;

/// Single-wallet analysis pipeline.
pub struct WalletAnalyzer {
    scoring: ScoringEngine,
    qualification: QualificationFilter,
    tagging: TaggingEngine,
    copy_mode: CopyModeAssigner,
}

impl WalletAnalyzer {
    pub fn new() -> Self {
        Self::with_config(&AnalyzerConfig::default())
    }

    pub fn with_config(config: &AnalyzerConfig) -> Self {
        Self {
            scoring: ScoringEngine::with_config(config.scoring.clone()),
            qualification: QualificationFilter::with_thresholds(config.qualification.clone()),
            tagging: TaggingEngine::with_config(config.tagging.clone()),
            copy_mode: CopyModeAssigner::with_tiers(config.tiers.clone()),
        }
    }

    /// Run the full stage chain for one wallet.
    ///
    /// Never fails for business-logic outcomes: disqualification, `NONE`
    /// copy mode, and default tags on an empty history are normal results.
    /// Invalid input produces a marked record instead of an error.
    pub fn analyze(&self, wallet: &Wallet, trades: &[Trade]) -> Wallet {
        match self.try_analyze(wallet, trades) {
            Ok(analyzed) => analyzed,
            Err(err) => {
                warn!(address = %wallet.address, error = %err, "Wallet analysis failed");
                wallet.with_analysis_error(err.to_string())
            }
        }
    }

    /// Fallible variant used by the batch driver's retry wrapper.
    pub fn try_analyze(&self, wallet: &Wallet, trades: &[Trade]) -> Result<Wallet> {
        validate(wallet, trades)?;

        let mut trades = trades.to_vec();
        trades.sort_by_key(|t| t.timestamp);

        let scored = self.scoring.scored_wallet(wallet, &trades);
        let qualified = self.qualification.qualified_wallet(&scored, &trades);
        let tagged = self.tagging.tagged_wallet(&qualified, &trades);
        Ok(self.copy_mode.assigned_wallet(&tagged))
    }
}

impl Default for WalletAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(wallet: &Wallet, trades: &[Trade]) -> Result<()> {
    if wallet.address.trim().is_empty() {
        return Err(Error::invalid_input("wallet address is empty"));
    }

    for trade in trades {
        if trade.wallet_address != wallet.address {
            return Err(Error::invalid_input(format!(
                "trade list contains records for {}",
                trade.wallet_address
            )));
        }
        if !trade.pnl_pct.is_finite()
            || !trade.leverage.is_finite()
            || !trade.duration_min.is_finite()
        {
            return Err(Error::invalid_input(format!(
                "trade {} carries non-finite numerics",
                trade.composite_key()
            )));
        }
    }

    Ok(())
}

/// Fans wallets through the pipeline with bounded concurrency and bounded
/// retries per unit of work.
pub struct BatchAnalysisDriver {
    analyzer: Arc<WalletAnalyzer>,
    concurrency: usize,
    retry: RetryPolicy,
}

impl BatchAnalysisDriver {
    pub fn new() -> Self {
        Self::with_config(&AnalyzerConfig::default())
    }

    pub fn with_config(config: &AnalyzerConfig) -> Self {
        Self {
            analyzer: Arc::new(WalletAnalyzer::with_config(config)),
            concurrency: config.concurrency.max(1),
            retry: config.retry.clone(),
        }
    }

    /// Analyze every wallet against its trade history.
    ///
    /// Output order and count always match the input, regardless of
    /// completion order or per-wallet failures.
    pub async fn batch_analyze(
        &self,
        wallets: &[Wallet],
        trades_by_wallet: &HashMap<String, Vec<Trade>>,
    ) -> Vec<Wallet> {
        info!(
            wallets = wallets.len(),
            concurrency = self.concurrency,
            "Starting batch analysis"
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let futures = wallets.iter().map(|wallet| {
            let semaphore = Arc::clone(&semaphore);
            let trades = trades_by_wallet
                .get(&wallet.address)
                .cloned()
                .unwrap_or_default();

            async move {
                // The semaphore is never closed; a failed acquire would only
                // mean running unthrottled.
                let _permit = semaphore.acquire().await.ok();

                let analyzer: &WalletAnalyzer = &self.analyzer;
                let trades_ref: &[Trade] = &trades;
                let result = self
                    .retry
                    .run(move |_| async move { analyzer.try_analyze(wallet, trades_ref) })
                    .await;

                match result {
                    Ok(analyzed) => analyzed,
                    Err(err) => {
                        warn!(
                            address = %wallet.address,
                            error = %err,
                            "Wallet analysis exhausted retries"
                        );
                        wallet.with_analysis_error(err.to_string())
                    }
                }
            }
        });

        let results = join_all(futures).await;
        info!(
            analyzed = results.len(),
            errors = results.iter().filter(|w| w.analysis_error).count(),
            "Batch analysis finished"
        );
        results
    }

    /// Fetch each address from the upstream source (through the retry
    /// policy) and analyze it. Fetch exhaustion yields a marked record for
    /// that address only.
    pub async fn batch_analyze_from_source(
        &self,
        addresses: &[String],
        source: &dyn WalletSource,
        lookback_days: u32,
    ) -> Vec<Wallet> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let futures = addresses.iter().map(|address| {
            let semaphore = Arc::clone(&semaphore);

            async move {
                let _permit = semaphore.acquire().await.ok();

                let wallet =
                    match source::fetch_wallet_with_retry(source, &self.retry, address).await {
                        Ok(wallet) => wallet,
                        Err(err) => {
                            warn!(address = %address, error = %err, "Wallet fetch exhausted retries");
                            return Wallet::new(address.clone()).with_analysis_error(err.to_string());
                        }
                    };

                let trades = match source::fetch_trades_with_retry(
                    source,
                    &self.retry,
                    address,
                    lookback_days,
                )
                .await
                {
                    Ok(trades) => trades,
                    Err(err) => {
                        warn!(address = %address, error = %err, "Trade fetch exhausted retries");
                        return wallet.with_analysis_error(err.to_string());
                    }
                };

                self.analyzer.analyze(&wallet, &trades)
            }
        });

        join_all(futures).await
    }
}

impl Default for BatchAnalysisDriver {
    fn default() -> Self {
        Self::new()
    }
}
