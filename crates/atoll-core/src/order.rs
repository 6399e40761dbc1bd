//! Outbound limit orders.

use crate::{Price, Qty, Symbol};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A limit order to send to the exchange.
///
/// The quantity is signed: positive buys, negative sells. Multiple orders
/// for the same product and price must be coalesced before they leave the
/// agent (see the strategy crate's aggregator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub symbol: Symbol,
    pub price: Price,
    pub qty: Qty,
}

impl Order {
    pub fn new(symbol: impl Into<Symbol>, price: Price, qty: Qty) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            qty,
        }
    }

    /// Buy order (positive quantity).
    pub fn buy(symbol: impl Into<Symbol>, price: Price, lots: i64) -> Self {
        Self::new(symbol, price, Qty::new(lots))
    }

    /// Sell order (negative quantity).
    pub fn sell(symbol: impl Into<Symbol>, price: Price, lots: i64) -> Self {
        Self::new(symbol, price, Qty::new(-lots))
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}@{}", self.symbol, self.qty, self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_sell_signs() {
        let b = Order::buy("KELP", Price::new(2017), 10);
        let s = Order::sell("KELP", Price::new(2019), 10);
        assert!(b.qty.is_buy());
        assert!(s.qty.is_sell());
        assert_eq!(s.qty.inner(), -10);
    }

    #[test]
    fn test_display() {
        let o = Order::sell("RAINFOREST_RESIN", Price::new(10_002), 10);
        assert_eq!(o.to_string(), "RAINFOREST_RESIN -10@10002");
    }
}
