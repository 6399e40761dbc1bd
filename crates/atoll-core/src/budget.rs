//! Per-cycle position capacity tracking.
//!
//! Each decision cycle starts with a fresh budget per product: the current
//! position plus how much can still be bought or sold before the position
//! limit would be breached, assuming every proposed order fills. Every
//! sub-protocol that proposes an order consumes from the shared budget, so
//! later sub-protocols in the same cycle see updated headroom. The limit is
//! a hard invariant: a single cycle must never propose orders whose combined
//! fills could push the position outside `[-limit, +limit]`.

/// Remaining buy/sell capacity for one product within one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionBudget {
    position: i64,
    long_remaining: i64,
    short_remaining: i64,
    consumed_long: i64,
    consumed_short: i64,
}

impl PositionBudget {
    /// Budget for a product holding `position` under `limit`.
    ///
    /// If the position already sits beyond the limit (exchange-side drift),
    /// the breached side simply has zero headroom.
    pub fn new(position: i64, limit: i64) -> Self {
        Self {
            position,
            long_remaining: (limit - position).max(0),
            short_remaining: (limit + position).max(0),
            consumed_long: 0,
            consumed_short: 0,
        }
    }

    pub fn position(&self) -> i64 {
        self.position
    }

    /// Lots that can still be bought this cycle.
    pub fn long_remaining(&self) -> i64 {
        self.long_remaining
    }

    /// Lots that can still be sold this cycle.
    pub fn short_remaining(&self) -> i64 {
        self.short_remaining
    }

    /// Position as if every order proposed so far this cycle filled.
    pub fn effective_position(&self) -> i64 {
        self.position + self.consumed_long - self.consumed_short
    }

    /// Clip `lots` to remaining buy capacity and consume the result.
    pub fn consume_long(&mut self, lots: i64) -> i64 {
        let taken = lots.clamp(0, self.long_remaining);
        self.long_remaining -= taken;
        self.consumed_long += taken;
        taken
    }

    /// Clip `lots` to remaining sell capacity and consume the result.
    pub fn consume_short(&mut self, lots: i64) -> i64 {
        let taken = lots.clamp(0, self.short_remaining);
        self.short_remaining -= taken;
        self.consumed_short += taken;
        taken
    }
}
