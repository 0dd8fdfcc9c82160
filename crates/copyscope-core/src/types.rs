//! Core domain types for the Copyscope pipeline.

pub mod portfolio;
pub mod tags;
pub mod trade;
pub mod wallet;

pub use portfolio::*;
pub use tags::*;
pub use trade::*;
pub use wallet::*;
