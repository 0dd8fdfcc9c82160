//! Copyscope: Wallet Analysis and Portfolio Construction for Copy Trading
//!
//! This is the root crate that provides benchmark access to the internal
//! modules. For actual functionality, use the individual crates directly:
//!
//! - `copyscope-core`: Domain types (wallets, trades, tags, portfolios) and
//!   the shared error type
//! - `wallet-analyzer`: Statistics, scoring, qualification, tagging,
//!   copy-mode assignment, portfolio construction, and the batch driver

// Re-export for benchmarks
pub use copyscope_core as core;
pub use wallet_analyzer as analyzer;
