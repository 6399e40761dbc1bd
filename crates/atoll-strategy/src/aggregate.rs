//! Candidate order aggregation.
//!
//! Sub-protocols may propose several orders at the same price within one
//! cycle. The harness expects at most one order per price level, so
//! candidates are netted per price before they leave the agent. Output
//! order follows first appearance of each price, which keeps cycles
//! deterministic and diffable.

use atoll_core::Order;

/// Net candidate orders to at most one order per price.
///
/// Quantities at the same price sum; prices that net to zero are dropped
/// entirely. All candidates are assumed to share one symbol (the driver
/// quotes one product at a time).
pub fn aggregate_orders(candidates: Vec<Order>) -> Vec<Order> {
    let mut merged: Vec<Order> = Vec::with_capacity(candidates.len());

    for order in candidates {
        match merged.iter_mut().find(|o| o.price == order.price) {
            Some(existing) => existing.qty = existing.qty + order.qty,
            None => merged.push(order),
        }
    }

    merged.retain(|o| !o.qty.is_zero());
    merged
}
