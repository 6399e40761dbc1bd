//! Atoll quoting agent.
//!
//! Orchestrates one decision cycle end to end:
//! - parse the harness snapshot
//! - per product: ladder view, fair price update, trend estimate,
//!   strategy dispatch, order aggregation
//! - emit the harness response and the bounded diagnostics payload
//!
//! Products are isolated from each other: one product failing its cycle is
//! logged and skipped, the rest still quote.

pub mod config;
pub mod engine;
pub mod error;

pub use config::AppConfig;
pub use engine::{Agent, CycleOutput};
pub use error::{AppError, AppResult};
