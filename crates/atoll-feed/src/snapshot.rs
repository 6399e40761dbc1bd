//! Per-cycle market snapshot from the exchange harness.

use atoll_core::{OrderDepth, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::FeedResult;

/// Everything the harness delivers for one decision cycle.
///
/// `observations` is pass-through data the core never interprets;
/// `trader_data` is the previous cycle's opaque state blob (the in-memory
/// state map is the primary persistence channel, so it is usually empty).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycleSnapshot {
    /// Exchange timestamp for this cycle.
    pub timestamp: u64,
    /// Order depths per product. A product may be absent for a cycle.
    #[serde(default)]
    pub order_depths: HashMap<Symbol, OrderDepth>,
    /// Held positions per product. Absence means flat.
    #[serde(default)]
    pub position: HashMap<Symbol, i64>,
    /// Opaque state blob from the previous cycle.
    #[serde(default)]
    pub trader_data: String,
    /// Observation data, passed through untouched.
    #[serde(default)]
    pub observations: serde_json::Value,
}

impl CycleSnapshot {
    /// Parse one snapshot from its harness JSON line.
    pub fn from_json(line: &str) -> FeedResult<Self> {
        Ok(serde_json::from_str(line)?)
    }

    /// Held position for a product, zero when absent.
    pub fn position_for(&self, symbol: &Symbol) -> i64 {
        self.position.get(symbol).copied().unwrap_or(0)
    }
}
