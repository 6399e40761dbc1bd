//! Per-product order book ladders.
//!
//! The harness feed delivers, for each product, two price → volume maps:
//! bids with positive volumes and asks with negative volumes (the volume is
//! the quantity *available to sell*, expressed from the counterparty's
//! side). A consistent book never lists a price on both ladders; either
//! ladder may be empty and every consumer must tolerate that.

use crate::{Price, Qty};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resting order ladders for one product at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDepth {
    /// Bid ladder: price → resting volume (positive).
    #[serde(default)]
    pub buy_orders: BTreeMap<Price, Qty>,
    /// Ask ladder: price → resting volume (negative, feed convention).
    #[serde(default)]
    pub sell_orders: BTreeMap<Price, Qty>,
}

impl OrderDepth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask levels sorted by price ascending (best ask first).
    pub fn asks_ascending(&self) -> Vec<(Price, Qty)> {
        self.sell_orders.iter().map(|(p, q)| (*p, *q)).collect()
    }

    /// Bid levels sorted by price descending (best bid first).
    pub fn bids_descending(&self) -> Vec<(Price, Qty)> {
        self.buy_orders.iter().rev().map(|(p, q)| (*p, *q)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.buy_orders.is_empty() && self.sell_orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth(asks: &[(i64, i64)], bids: &[(i64, i64)]) -> OrderDepth {
        let mut d = OrderDepth::new();
        for &(p, q) in asks {
            d.sell_orders.insert(Price::new(p), Qty::new(q));
        }
        for &(p, q) in bids {
            d.buy_orders.insert(Price::new(p), Qty::new(q));
        }
        d
    }

    #[test]
    fn test_asks_sorted_ascending() {
        let d = depth(&[(102, -3), (101, -5)], &[]);
        let asks = d.asks_ascending();
        assert_eq!(asks[0], (Price::new(101), Qty::new(-5)));
        assert_eq!(asks[1], (Price::new(102), Qty::new(-3)));
    }

    #[test]
    fn test_bids_sorted_descending() {
        let d = depth(&[], &[(98, 4), (99, 4)]);
        let bids = d.bids_descending();
        assert_eq!(bids[0], (Price::new(99), Qty::new(4)));
        assert_eq!(bids[1], (Price::new(98), Qty::new(4)));
    }

    #[test]
    fn test_empty_side_tolerated() {
        let d = depth(&[(101, -5)], &[]);
        assert!(d.bids_descending().is_empty());
        assert!(!d.is_empty());
    }

    #[test]
    fn test_json_string_keys() {
        // The harness serializes integer price keys as JSON strings.
        let json = r#"{"buy_orders":{"99":4,"98":4},"sell_orders":{"101":-5}}"#;
        let d: OrderDepth = serde_json::from_str(json).unwrap();
        assert_eq!(d.buy_orders.len(), 2);
        assert_eq!(d.sell_orders.get(&Price::new(101)), Some(&Qty::new(-5)));
    }
}
