//! Error types for atoll-strategy.

use thiserror::Error;

/// Strategy error types.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("Invalid product parameters for {symbol}: {reason}")]
    InvalidParams { symbol: String, reason: String },
}

/// Result type alias for strategy operations.
pub type StrategyResult<T> = std::result::Result<T, StrategyError>;
