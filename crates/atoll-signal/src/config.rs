//! Signal configuration.

use serde::{Deserialize, Serialize};

/// Regression and history parameters, shared across products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Window of fair-price samples for the weighted regression.
    #[serde(default = "default_regression_window")]
    pub regression_window: usize,

    /// Window for the plain (unweighted) regime regression.
    #[serde(default = "default_linear_window")]
    pub linear_window: usize,

    /// Exponent multiplier `w` in the per-sample weight `exp(w * i)`.
    /// Larger values concentrate the fit on the newest samples.
    #[serde(default = "default_weight_multiplier")]
    pub weight_multiplier: f64,
}

impl SignalConfig {
    /// How much fair-price history each product retains: enough for the
    /// larger of the two regression windows.
    pub fn history_len(&self) -> usize {
        self.regression_window.max(self.linear_window)
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            regression_window: default_regression_window(),
            linear_window: default_linear_window(),
            weight_multiplier: default_weight_multiplier(),
        }
    }
}

fn default_regression_window() -> usize {
    100
}
fn default_linear_window() -> usize {
    100
}
fn default_weight_multiplier() -> f64 {
    5.0
}
