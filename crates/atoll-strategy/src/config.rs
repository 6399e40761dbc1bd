//! Per-product strategy parameters.
//!
//! Every configured product carries one validated [`ProductParams`]; the
//! strategy variant set is closed and known at compile time, so selection
//! is a tagged enum rather than string dispatch.

use atoll_core::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{StrategyError, StrategyResult};

/// Which quoting behavior a product uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyKind {
    /// Quote symmetrically around a known, near-constant fundamental value,
    /// ignoring the live fair price. Aggressive takes plus resting passive
    /// quotes.
    StableValue { anchor: Price },
    /// Same aggressive-take + passive-post pattern, centered on the live
    /// EMA instead of a constant.
    EmaMaker,
    /// Trade reversions of the popular average toward the EMA; liquidation
    /// only inside the deadband. No passive quotes.
    MeanReversion,
    /// EMA-centered aggressive takes only, no resting quotes.
    #[default]
    EmaTaker,
}

impl StrategyKind {
    /// Whether this variant consumes the trend estimator's output.
    pub fn uses_trend(&self) -> bool {
        matches!(self, Self::MeanReversion)
    }
}

/// Static per-product configuration, immutable for the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductParams {
    /// Strategy variant for this product.
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Maximum absolute inventory the exchange permits.
    #[serde(default = "default_position_limit")]
    pub position_limit: i64,

    /// EMA smoothing weight, in (0, 1].
    #[serde(default = "default_exponential_param")]
    pub exponential_param: Decimal,

    /// Inventory band before forced unwinding kicks in.
    #[serde(default = "default_liquidation_threshold")]
    pub liquidation_threshold: i64,

    /// Share of the excess inventory unwound per cycle, in (0, 1].
    #[serde(default = "default_liquidation_fraction")]
    pub liquidation_fraction: Decimal,

    /// Spread offset (ticks) for aggressive market-taking: buy below
    /// `center - mm_epsilon`, sell above `center + mm_epsilon`.
    #[serde(default)]
    pub mm_epsilon: i64,

    /// Spread offset (ticks) for passive resting quotes.
    #[serde(default = "default_makemm_epsilon")]
    pub makemm_epsilon: i64,

    /// Mean-reversion deadband around the EMA.
    #[serde(default = "default_mr_epsilon")]
    pub mr_epsilon: Decimal,

    /// Regime slope magnitude above which the market counts as trending
    /// and mean-reversion entries are suppressed.
    #[serde(default = "default_trend_epsilon")]
    pub trend_epsilon: f64,

    /// Lots per passive resting quote.
    #[serde(default = "default_quote_size")]
    pub quote_size: i64,
}

impl Default for ProductParams {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            position_limit: default_position_limit(),
            exponential_param: default_exponential_param(),
            liquidation_threshold: default_liquidation_threshold(),
            liquidation_fraction: default_liquidation_fraction(),
            mm_epsilon: 0,
            makemm_epsilon: default_makemm_epsilon(),
            mr_epsilon: default_mr_epsilon(),
            trend_epsilon: default_trend_epsilon(),
            quote_size: default_quote_size(),
        }
    }
}

impl ProductParams {
    /// Validate at startup; parameters are never checked again at quote
    /// time.
    pub fn validate(&self, symbol: &str) -> StrategyResult<()> {
        let fail = |reason: &str| {
            Err(StrategyError::InvalidParams {
                symbol: symbol.to_string(),
                reason: reason.to_string(),
            })
        };

        if self.position_limit <= 0 {
            return fail("position_limit must be positive");
        }
        if self.exponential_param <= Decimal::ZERO || self.exponential_param > Decimal::ONE {
            return fail("exponential_param must be in (0, 1]");
        }
        if self.liquidation_threshold < 0 {
            return fail("liquidation_threshold must be non-negative");
        }
        if self.liquidation_fraction <= Decimal::ZERO || self.liquidation_fraction > Decimal::ONE {
            return fail("liquidation_fraction must be in (0, 1]");
        }
        if self.mm_epsilon < 0 || self.makemm_epsilon < 0 {
            return fail("epsilons must be non-negative");
        }
        if self.mr_epsilon < Decimal::ZERO {
            return fail("mr_epsilon must be non-negative");
        }
        if self.trend_epsilon < 0.0 {
            return fail("trend_epsilon must be non-negative");
        }
        if self.quote_size <= 0 {
            return fail("quote_size must be positive");
        }
        Ok(())
    }
}

fn default_position_limit() -> i64 {
    50
}
fn default_exponential_param() -> Decimal {
    Decimal::new(5, 1) // 0.5
}
fn default_liquidation_threshold() -> i64 {
    40
}
fn default_liquidation_fraction() -> Decimal {
    Decimal::ONE
}
fn default_makemm_epsilon() -> i64 {
    1
}
fn default_mr_epsilon() -> Decimal {
    Decimal::ONE
}
fn default_trend_epsilon() -> f64 {
    0.05
}
fn default_quote_size() -> i64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_validate() {
        let params = ProductParams::default();
        assert!(params.validate("KELP").is_ok());
        assert_eq!(params.strategy, StrategyKind::EmaTaker);
        assert_eq!(params.position_limit, 50);
        assert_eq!(params.exponential_param, dec!(0.5));
        assert_eq!(params.liquidation_threshold, 40);
        assert_eq!(params.quote_size, 10);
    }

    #[test]
    fn test_toml_stable_value() {
        let toml_str = r#"
            position_limit = 50
            mm_epsilon = 2
            makemm_epsilon = 2

            [strategy]
            kind = "stable_value"
            anchor = 10000
        "#;
        let params: ProductParams = toml::from_str(toml_str).unwrap();
        assert_eq!(
            params.strategy,
            StrategyKind::StableValue {
                anchor: Price::new(10_000)
            }
        );
        assert!(!params.strategy.uses_trend());
        assert!(params.validate("RAINFOREST_RESIN").is_ok());
    }

    #[test]
    fn test_toml_mean_reversion_uses_trend() {
        let toml_str = r#"
            mr_epsilon = 1.5

            [strategy]
            kind = "mean_reversion"
        "#;
        let params: ProductParams = toml::from_str(toml_str).unwrap();
        assert_eq!(params.strategy, StrategyKind::MeanReversion);
        assert!(params.strategy.uses_trend());
        assert_eq!(params.mr_epsilon, dec!(1.5));
    }

    #[test]
    fn test_validation_rejects_bad_params() {
        let bad_limit = ProductParams {
            position_limit: 0,
            ..Default::default()
        };
        assert!(bad_limit.validate("X").is_err());

        let bad_alpha = ProductParams {
            exponential_param: dec!(1.5),
            ..Default::default()
        };
        assert!(bad_alpha.validate("X").is_err());

        let bad_fraction = ProductParams {
            liquidation_fraction: Decimal::ZERO,
            ..Default::default()
        };
        assert!(bad_fraction.validate("X").is_err());

        let bad_quote = ProductParams {
            quote_size: 0,
            ..Default::default()
        };
        assert!(bad_quote.validate("X").is_err());
    }
}
