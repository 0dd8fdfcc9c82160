//! Error types for the Copyscope analysis pipeline.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Source error: {message}")]
    Source { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn source(message: impl Into<String>) -> Self {
        Self::Source {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
