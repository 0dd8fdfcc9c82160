//! Run the full pipeline over synthetic fixtures and print the resulting
//! wallets and portfolio snapshot as JSON.
//!
//! Run with: `cargo run -p wallet-analyzer --example analyze_fixtures`

use chrono::{Duration, Utc};
use copyscope_core::types::{Trade, TradeSide, Wallet};
use rust_decimal::Decimal;
use std::collections::HashMap;
use wallet_analyzer::{AnalyzerConfig, BatchAnalysisDriver, PortfolioConstructor};

fn fixture_trades(address: &str, base_pnl: f64, leverage: f64, count: usize) -> Vec<Trade> {
    (0..count)
        .map(|i| Trade {
            wallet_address: address.to_string(),
            coin: if i % 3 == 0 { "ETH" } else { "BTC" }.to_string(),
            side: if i % 4 == 0 {
                TradeSide::Short
            } else {
                TradeSide::Long
            },
            size_usd: Decimal::new(1_500, 0),
            leverage,
            pnl_pct: if i % 9 == 8 { -1.2 } else { base_pnl },
            duration_min: 240.0,
            timestamp: Utc::now() - Duration::hours(((count - i) * 8) as i64),
            price: Decimal::new(60_000, 0),
        })
        .collect()
}

fn fixture_wallet(address: &str, roi_30d: f64, win_rate: f64, total_trades: u64) -> Wallet {
    let mut wallet = Wallet::new(address);
    wallet.roi_30d = roi_30d;
    wallet.roi_7d = roi_30d / 4.0;
    wallet.roi_alltime = roi_30d * 3.0;
    wallet.win_rate = win_rate;
    wallet.total_trades = total_trades;
    wallet
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let wallets = vec![
        fixture_wallet("0xsteady", 42.0, 78.0, 60),
        fixture_wallet("0xmoderate", 18.0, 61.0, 45),
        fixture_wallet("0xthin", 35.0, 70.0, 8),
        fixture_wallet("0xunderwater", -12.0, 44.0, 90),
    ];

    let mut trades_by_wallet = HashMap::new();
    trades_by_wallet.insert("0xsteady".to_string(), fixture_trades("0xsteady", 3.8, 2.0, 60));
    trades_by_wallet.insert(
        "0xmoderate".to_string(),
        fixture_trades("0xmoderate", 1.6, 4.0, 45),
    );
    trades_by_wallet.insert("0xthin".to_string(), fixture_trades("0xthin", 2.4, 3.0, 8));
    trades_by_wallet.insert(
        "0xunderwater".to_string(),
        fixture_trades("0xunderwater", -0.8, 12.0, 90),
    );

    let config = AnalyzerConfig::from_env();
    let driver = BatchAnalysisDriver::with_config(&config);
    let analyzed = driver.batch_analyze(&wallets, &trades_by_wallet).await;

    for wallet in &analyzed {
        println!("{}", serde_json::to_string_pretty(wallet)?);
    }

    let qualified: Vec<Wallet> = analyzed.into_iter().filter(|w| w.qualified).collect();
    let portfolio =
        PortfolioConstructor::with_config(config.portfolio.clone()).construct(&qualified, &trades_by_wallet);
    println!("{}", serde_json::to_string_pretty(&portfolio)?);

    Ok(())
}
