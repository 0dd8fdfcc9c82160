//! Wallet Analyzer
//!
//! Scores, qualifies, tags, and tier-assigns trading wallets, then
//! assembles the best-qualifying ones into portfolio snapshots.

pub mod batch;
pub mod config;
pub mod copy_mode;
pub mod portfolio;
pub mod qualification;
pub mod retry;
pub mod scoring;
pub mod source;
pub mod stats;
pub mod tagging;

pub use batch::{BatchAnalysisDriver, WalletAnalyzer};
pub use config::AnalyzerConfig;
pub use copy_mode::{CopyModeAssigner, CopyTierTable, TierBounds};
pub use portfolio::{PortfolioConfig, PortfolioConstructor};
pub use qualification::{QualificationFilter, QualificationResult, QualificationThresholds};
pub use retry::RetryPolicy;
pub use scoring::{ScoringConfig, ScoringEngine, ScoringWeights};
pub use source::WalletSource;
pub use tagging::{TaggingConfig, TaggingEngine};
