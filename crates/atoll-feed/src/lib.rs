//! Harness-facing market data for the Atoll agent.
//!
//! The exchange harness hands the agent one [`CycleSnapshot`] per decision
//! cycle: order depths, held positions, an opaque state blob, and
//! observation data the core passes through untouched. [`ProductView`] is
//! the per-product reader over a snapshot — sorted ladders plus position —
//! that the estimator and strategies consume.

pub mod error;
pub mod snapshot;
pub mod view;

pub use error::{FeedError, FeedResult};
pub use snapshot::CycleSnapshot;
pub use view::ProductView;
