//! Event applier implementations
//!
//! Each applier implements the `EventApplier` trait and handles
//! one event type. Appliers are PURE functions.

use enum_dispatch::enum_dispatch;

use super::timeline::TimedEvent;
use super::traits::EventApplier;
use shared::allocation::{AllocationEventType, AllocationState};

mod calling;
mod created;
mod status_changed;

pub use calling::{CallingOffApplier, CallingOnApplier};
pub use created::CreatedApplier;
pub use status_changed::StatusChangedApplier;

/// Applier for event types this engine does not interpret
pub struct IgnoredApplier;

impl EventApplier for IgnoredApplier {
    fn apply(&self, _state: &mut AllocationState, event: &TimedEvent<'_>) {
        tracing::trace!(
            event_index = event.index,
            event_type = %event.event_type(),
            "Event type has no applier"
        );
    }
}

/// EventAction enum - dispatches to concrete applier implementations
///
/// Uses enum_dispatch for zero-cost static dispatch.
#[enum_dispatch(EventApplier)]
pub enum EventAction {
    Created(CreatedApplier),
    StatusChanged(StatusChangedApplier),
    CallingOn(CallingOnApplier),
    CallingOff(CallingOffApplier),
    Ignored(IgnoredApplier),
}

/// This is the ONLY place with a match on the event type.
impl From<&AllocationEventType> for EventAction {
    fn from(event_type: &AllocationEventType) -> Self {
        match event_type {
            AllocationEventType::Created => EventAction::Created(CreatedApplier),
            AllocationEventType::StatusChange => EventAction::StatusChanged(StatusChangedApplier),
            AllocationEventType::CallingOn => EventAction::CallingOn(CallingOnApplier),
            AllocationEventType::CallingOff => EventAction::CallingOff(CallingOffApplier),
            AllocationEventType::Other(_) => EventAction::Ignored(IgnoredApplier),
        }
    }
}
