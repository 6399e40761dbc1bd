//! Inventory liquidation.
//!
//! When the position a cycle would reach (current position plus everything
//! already proposed this cycle) drifts past the liquidation threshold, unwind
//! a fraction of the excess back towards the threshold. Unwinds are priced at
//! the truncated fair value and sized against the resting volume on the far
//! side that is priced at fair or better, so the order only rests where the
//! book could plausibly fill it.

use atoll_core::{PositionBudget, Price, Qty};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Propose an unwinding order if the effective position exceeds `threshold`.
///
/// A long excess sells into bids priced at or above `fair`; a short excess
/// buys from asks priced at or below `fair`. The unwind size is
/// `trunc(fraction * excess)`, further capped by the matching resting volume
/// and by the budget's remaining capacity on the unwinding side.
pub fn liquidate(
    asks: &[(Price, Qty)],
    bids: &[(Price, Qty)],
    fair: Decimal,
    threshold: i64,
    fraction: Decimal,
    budget: &mut PositionBudget,
) -> Option<(Price, Qty)> {
    let effective = budget.effective_position();

    if effective > threshold {
        let excess = effective - threshold;
        let desired = scaled(excess, fraction);
        let resting: i64 = bids
            .iter()
            .filter(|(price, _)| price.to_decimal() >= fair)
            .map(|(_, qty)| qty.inner().max(0))
            .sum();
        let lots = budget.consume_short(desired.min(resting));
        if lots == 0 {
            return None;
        }
        Some((Price::from_decimal(fair), Qty::new(-lots)))
    } else if effective < -threshold {
        let excess = -threshold - effective;
        let desired = scaled(excess, fraction);
        let resting: i64 = asks
            .iter()
            .filter(|(price, _)| price.to_decimal() <= fair)
            .map(|(_, qty)| (-qty.inner()).max(0))
            .sum();
        let lots = budget.consume_long(desired.min(resting));
        if lots == 0 {
            return None;
        }
        Some((Price::from_decimal(fair), Qty::new(lots)))
    } else {
        None
    }
}

fn scaled(excess: i64, fraction: Decimal) -> i64 {
    (fraction * Decimal::from(excess))
        .trunc()
        .to_i64()
        .unwrap_or(0)
}
