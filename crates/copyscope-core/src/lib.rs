//! Copyscope Core Library
//!
//! Shared domain types and errors for the wallet analysis pipeline.

pub mod error;
pub mod types;

pub use error::{Error, Result};
