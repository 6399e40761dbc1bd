//! Application configuration.

use atoll_signal::SignalConfig;
use atoll_strategy::ProductParams;
use atoll_telemetry::DEFAULT_LOG_BUDGET;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{AppError, AppResult};

/// Full agent configuration, loaded once at startup.
///
/// Products are keyed by listing symbol; the key set is the closed set of
/// products the agent will ever quote. Everything is static for the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Regression and history parameters, shared across products.
    #[serde(default)]
    pub signal: SignalConfig,

    /// Diagnostics payload byte budget.
    #[serde(default = "default_log_budget")]
    pub log_budget: usize,

    /// Per-product strategy parameters, keyed by symbol.
    pub products: BTreeMap<String, ProductParams>,
}

fn default_log_budget() -> usize {
    DEFAULT_LOG_BUDGET
}

impl AppConfig {
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would misbehave at quote time. Runs once
    /// at startup; parameters are trusted afterwards.
    pub fn validate(&self) -> AppResult<()> {
        if self.products.is_empty() {
            return Err(AppError::Config("no products configured".to_string()));
        }
        for (symbol, params) in &self.products {
            params.validate(symbol)?;
        }
        Ok(())
    }
}
