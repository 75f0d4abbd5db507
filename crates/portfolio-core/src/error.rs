//! Error types for the portfolio behavior layer
//!
//! Behavior paths (navigation, clock, announcements) never fail; they degrade
//! to no-ops. These errors only cover set-up: reading configuration and
//! wiring the page.

use thiserror::Error;

/// Main error type for portfolio set-up
#[derive(Error, Debug)]
pub enum PortfolioError {
    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Configuration could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required browser global or element is unavailable
    #[error("DOM error: {0}")]
    Dom(String),

    /// A global tracing subscriber was already installed
    #[error("Logging error: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// The runtime was asked to start a second time
    #[error("Portfolio already started")]
    AlreadyStarted,
}

/// Result type alias using PortfolioError
pub type PortfolioResult<T> = Result<T, PortfolioError>;
