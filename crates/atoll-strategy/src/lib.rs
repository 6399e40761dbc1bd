//! Quoting strategies for the Atoll agent.
//!
//! Given a product's ladders, position, and fair price estimate, produce
//! directional market-making orders and inventory-liquidation orders,
//! capacity-limited by the product's position limit, then merge candidate
//! orders into at most one net order per price level.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod liquidate;
pub mod quoting;
pub mod take;

pub use aggregate::aggregate_orders;
pub use config::{ProductParams, StrategyKind};
pub use error::{StrategyError, StrategyResult};
pub use liquidate::liquidate;
pub use quoting::quote_product;
pub use take::{take_asks, take_bids};
