//! Unified error types for seeding and undo operations.

use thiserror::Error;

/// Errors raised while configuring, fetching or writing seed data.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong with the configuration
        message: String,
    },

    /// Any failure reported by the ORM or the underlying driver
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Transport failure, non-success status or undecodable body from the rewards API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reward document that is not valid JSON of the expected shape
    #[error("Failed to parse reward data: {0}")]
    Json(#[from] serde_json::Error),

    /// Category tree file that is not valid TOML of the expected shape
    #[error("Failed to parse category tree: {0}")]
    Toml(#[from] toml::de::Error),

    /// Reading a local data file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
