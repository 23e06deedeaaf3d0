//! Allocation event log processing
//!
//! - `timeline`: timestamp validation and ordering
//! - `analytics`: time/calling/Active metrics
//! - `traits` + `appliers` + `replay`: state rebuilt from events
//! - `actions`: lifecycle commands that append events
//! - `filter`, `loader`: listing and input

pub mod actions;
pub mod analytics;
// traits must come before appliers (enum_dispatch)
pub mod traits;
pub mod appliers;
pub mod filter;
pub mod loader;
pub mod replay;
pub mod timeline;

pub use actions::{AllocationCommand, CommandOutcome, execute, open_allocation};
pub use analytics::{AnalyticsCalculator, analyze, calculate};
pub use appliers::EventAction;
pub use filter::AllocationFilter;
pub use loader::{AllocationRecord, load_allocations, parse_allocations};
pub use replay::{check_consistency, replay};
pub use timeline::{OrderingPolicy, TimedEvent, Timeline};
pub use traits::EventApplier;
