//! Error types for the finance bot

use thiserror::Error;

/// Result type alias for bot operations
pub type Result<T> = std::result::Result<T, BotError>;

#[derive(Error, Debug)]
pub enum BotError {

    // =============================
    // Configuration
    // =============================

    #[error("Configuration error: {0}")]
    ConfigError(String),

    // =============================
    // Language Model Service
    // =============================

    #[error("LLM service error: {0}")]
    ServiceError(String),

    #[error("LLM rejected request (status {status}): {message}")]
    InvalidRequest { status: u16, message: String },

    #[error("LLM returned an empty response")]
    EmptyResponse,

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl BotError {
    /// Whether a failed LLM call is worth attempting again.
    ///
    /// Rejected prompts and missing configuration fail the same way every
    /// time; transport failures, 5xx/429 responses and empty candidates may not.
    pub fn is_retryable(&self) -> bool {
        match self {
            BotError::ServiceError(_)
            | BotError::EmptyResponse
            | BotError::HttpError(_)
            | BotError::SerializationError(_) => true,
            BotError::ConfigError(_)
            | BotError::InvalidRequest { .. }
            | BotError::IoError(_) => false,
        }
    }
}
