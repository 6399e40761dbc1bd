//! Market snapshot reader.
//!
//! Extracts, per product, the sorted ask ladder (ascending), the sorted bid
//! ladder (descending), and the current position. Never mutates the
//! snapshot; a product with no resting orders on one side yields an empty
//! ladder, not an error — every consumer handles empty ladders.

use atoll_core::{Price, Qty, Symbol};

use crate::snapshot::CycleSnapshot;

/// Sorted ladders and position for one product in one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductView {
    pub symbol: Symbol,
    /// Ask levels, price ascending, volumes negative.
    pub asks: Vec<(Price, Qty)>,
    /// Bid levels, price descending, volumes positive.
    pub bids: Vec<(Price, Qty)>,
    /// Held position (0 when the product is absent from the position map).
    pub position: i64,
}

impl ProductView {
    /// Read one product out of a snapshot.
    ///
    /// Returns `None` when the snapshot carries no order depth for the
    /// product at all (the product is skipped for this cycle).
    pub fn from_snapshot(snapshot: &CycleSnapshot, symbol: &Symbol) -> Option<Self> {
        let depth = snapshot.order_depths.get(symbol)?;
        Some(Self {
            symbol: symbol.clone(),
            asks: depth.asks_ascending(),
            bids: depth.bids_descending(),
            position: snapshot.position_for(symbol),
        })
    }

    pub fn best_ask(&self) -> Option<Price> {
        self.asks.first().map(|(p, _)| *p)
    }

    pub fn best_bid(&self) -> Option<Price> {
        self.bids.first().map(|(p, _)| *p)
    }
}
