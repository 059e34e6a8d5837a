//! # Error Types
//!
//! Custom error types for Battery Block using `thiserror`.
//!
//! Only configuration and argument handling can fail. The telemetry
//! pipeline degrades to absent fields and an "unavailable" reading instead.

use thiserror::Error;

/// Main error type for Battery Block
#[derive(Debug, Error)]
pub enum BatteryBlockError {
    /// Malformed custom icon pair (expected `FULL,EMPTY`)
    #[error("Invalid icon specification: {0}")]
    InvalidIcons(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Battery Block
pub type Result<T> = std::result::Result<T, BatteryBlockError>;
