//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Feed error: {0}")]
    Feed(#[from] atoll_feed::FeedError),

    #[error("Strategy error: {0}")]
    Strategy(#[from] atoll_strategy::StrategyError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] atoll_telemetry::TelemetryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
