//! Structured logging and cycle diagnostics for the Atoll agent.
//!
//! Two sinks:
//! - `tracing` structured logs, JSON in production and pretty in
//!   development, for operators;
//! - a per-cycle compressed diagnostics payload with a hard byte budget,
//!   matching the harness's log ingestion limit.

pub mod diagnostics;
pub mod error;
pub mod logging;

pub use diagnostics::{CycleLogger, DEFAULT_LOG_BUDGET};
pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
