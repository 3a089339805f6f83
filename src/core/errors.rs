//! Custom error types for translation operations

use thiserror::Error;

/// Translation-related errors
///
/// These never cross the engine boundary: the provider chain and the batch
/// translator fold every variant into "keep the original text".
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Provider answered with a non-success status
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP or provider status code
        status: u16,
        /// Start of the response body
        message: String,
    },

    /// Rate limiter could not hand out a permit
    #[error("Rate limiter error: {message}")]
    RateLimitError {
        /// Details
        message: String,
    },

    /// Network error
    #[error("Network error: {message}")]
    NetworkError {
        /// Details
        message: String,
    },

    /// Invalid response from provider
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        /// Details
        message: String,
    },

    /// Request timeout
    #[error("Request timeout after {timeout_ms}ms")]
    TimeoutError {
        /// Limit that elapsed
        timeout_ms: u64,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Details
        message: String,
    },

    /// Upstream article source failed
    #[error("News source error: {message}")]
    NewsSourceError {
        /// Details
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Dictionary pattern failed to compile
    #[error("Pattern error: {0}")]
    PatternError(#[from] regex::Error),

    /// Layered configuration could not be read
    #[error("Config source error: {0}")]
    ConfigSourceError(#[from] config::ConfigError),
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
