//! Core domain types for the Atoll market-making agent.
//!
//! This crate provides the fundamental types used throughout the system:
//! - `Symbol`: Product identifier on the simulated exchange
//! - `Price`, `Qty`: Integer tick/lot numeric types
//! - `Order`: A signed limit order (positive qty = buy, negative = sell)
//! - `OrderDepth`: The resting bid/ask ladders for one product
//! - `PositionBudget`: Per-cycle remaining capacity toward the position limit

pub mod budget;
pub mod depth;
pub mod num;
pub mod order;
pub mod symbol;

pub use budget::PositionBudget;
pub use depth::OrderDepth;
pub use num::{Price, Qty};
pub use order::Order;
pub use symbol::Symbol;
