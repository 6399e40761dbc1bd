//! Price signals for the Atoll agent.
//!
//! Two estimators feed the quoting strategies:
//! - [`FairPriceState`]: the "popular average" book-derived fair price and
//!   its exponential moving average, maintained per product across cycles.
//! - [`TrendEstimate`]: weighted and plain linear regressions over recent
//!   fair-price history, for the mean-reversion/trend products.

pub mod config;
pub mod fair_price;
pub mod regression;

pub use config::SignalConfig;
pub use fair_price::{popular_average, FairPrice, FairPriceState};
pub use regression::{estimate_trend, linear_fit, weighted_fit, TrendEstimate, TrendFit};
