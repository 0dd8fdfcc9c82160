//! Contract for the upstream wallet/trade source.
//!
//! The pipeline never fetches data itself; callers inject a source that
//! supplies normalized records for an address and lookback window. Sources
//! may fail transiently, so calls go through the shared retry policy.

use async_trait::async_trait;
use copyscope_core::types::{Trade, Wallet};
use copyscope_core::Result;

use crate::retry::RetryPolicy;

/// Upstream supplier of normalized wallet and trade records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletSource: Send + Sync {
    /// Account-level metrics for a wallet address.
    async fn fetch_wallet(&self, address: &str) -> Result<Wallet>;

    /// Trade history for a wallet over the trailing lookback window.
    async fn fetch_trades(&self, address: &str, lookback_days: u32) -> Result<Vec<Trade>>;
}

/// Fetch a wallet through the retry policy.
pub async fn fetch_wallet_with_retry(
    source: &dyn WalletSource,
    retry: &RetryPolicy,
    address: &str,
) -> Result<Wallet> {
    retry.run(move |_| source.fetch_wallet(address)).await
}

/// Fetch a trade history through the retry policy.
pub async fn fetch_trades_with_retry(
    source: &dyn WalletSource,
    retry: &RetryPolicy,
    address: &str,
    lookback_days: u32,
) -> Result<Vec<Trade>> {
    retry
        .run(move |_| source.fetch_trades(address, lookback_days))
        .await
}
