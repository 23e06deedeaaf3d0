//! Allocation event log types
//!
//! - Events: immutable facts appended to an allocation
//! - State: allocation status folded from the event stream
//! - Analytics: durations and counts derived from the event stream

pub mod analytics;
pub mod event;
pub mod snapshot;
pub mod types;

// Re-exports
pub use analytics::{AllocationAnalytics, HoursMinutesSeconds, MinutesSeconds};
pub use event::{AllocationEvent, AllocationEventType};
pub use snapshot::{AllocationState, StateDrift};
pub use types::{AllocationStatus, CallingFlag};
