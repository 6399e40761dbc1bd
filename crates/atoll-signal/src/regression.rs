//! Linear trend fitting over fair-price history.
//!
//! Two fits feed the mean-reversion/trend products:
//! - a weighted least-squares line with per-sample weight `exp(w * i)`
//!   (i = 0 is the oldest sample in the window), which exponentially
//!   privileges recent samples and yields the projected price;
//! - a plain unweighted line over its own window, whose slope is used only
//!   as a directional regime signal.
//!
//! Weights are normalized by the largest one before the normal equations
//! are solved; the fit is identical and the sums stay finite for any
//! window length.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::config::SignalConfig;
use crate::fair_price::FairPriceState;

/// A fitted line `price = slope * t + intercept` over sample index t.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendFit {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendFit {
    const FLAT: Self = Self {
        slope: 0.0,
        intercept: 0.0,
    };

    /// Evaluate the line at sample index `t`.
    pub fn at(&self, t: f64) -> f64 {
        self.slope * t + self.intercept
    }
}

/// Combined trend output for one product and cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendEstimate {
    /// Weighted fit used for price projection.
    pub fit: TrendFit,
    /// Weighted line evaluated one step past the newest sample.
    pub projected: f64,
    /// Plain unweighted slope, a directional sign signal only.
    pub regime_slope: f64,
}

fn to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

fn fit(samples: &[Decimal], weight: impl Fn(usize) -> f64) -> TrendFit {
    match samples.len() {
        // Zero samples is a degenerate result, not a signal; callers treat
        // slope 0 as "no signal" and log the condition upstream.
        0 => TrendFit::FLAT,
        1 => TrendFit {
            slope: 0.0,
            intercept: to_f64(samples[0]),
        },
        n => {
            let (mut s0, mut s1, mut s2) = (0.0, 0.0, 0.0);
            let (mut t0, mut t1) = (0.0, 0.0);
            for (i, sample) in samples.iter().enumerate() {
                let w = weight(i);
                let x = i as f64;
                let y = to_f64(*sample);
                s0 += w;
                s1 += w * x;
                s2 += w * x * x;
                t0 += w * y;
                t1 += w * x * y;
            }
            let denom = s0 * s2 - s1 * s1;
            if denom.abs() < f64::EPSILON * (n as f64) {
                // All weight collapsed onto one index; no usable slope.
                return TrendFit {
                    slope: 0.0,
                    intercept: t0 / s0,
                };
            }
            TrendFit {
                slope: (s0 * t1 - s1 * t0) / denom,
                intercept: (t0 * s2 - t1 * s1) / denom,
            }
        }
    }
}

/// Weighted least-squares line over `samples` (oldest first).
///
/// Sample i carries weight `exp(multiplier * i)`, normalized by the newest
/// sample's weight.
pub fn weighted_fit(samples: &[Decimal], multiplier: f64) -> TrendFit {
    let newest = samples.len().saturating_sub(1) as f64;
    fit(samples, |i| (multiplier * (i as f64 - newest)).exp())
}

/// Plain least-squares line over `samples` (oldest first).
pub fn linear_fit(samples: &[Decimal]) -> TrendFit {
    fit(samples, |_| 1.0)
}

/// Run both regressions over a product's fair-price history.
pub fn estimate_trend(state: &FairPriceState, cfg: &SignalConfig) -> TrendEstimate {
    let weighted_samples = state.recent(cfg.regression_window);
    let fit = weighted_fit(&weighted_samples, cfg.weight_multiplier);
    let projected = fit.at(weighted_samples.len() as f64);

    let linear_samples = state.recent(cfg.linear_window);
    let regime_slope = linear_fit(&linear_samples).slope;

    TrendEstimate {
        fit,
        projected,
        regime_slope,
    }
}
