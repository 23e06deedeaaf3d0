//! Created event applier

use crate::allocations::timeline::TimedEvent;
use crate::allocations::traits::EventApplier;
use shared::allocation::{AllocationState, AllocationStatus, CallingFlag};

/// Created applier - resets the state to a fresh allocation
pub struct CreatedApplier;

impl EventApplier for CreatedApplier {
    fn apply(&self, state: &mut AllocationState, event: &TimedEvent<'_>) {
        state.status = AllocationStatus::Allocated;
        state.calling_flag = CallingFlag::NonCalling;
        state.created_at = Some(event.at);
        state.completed_at = None;
        state.calling_since = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::allocation::{AllocationEvent, AllocationEventType};

    #[test]
    fn test_created_sets_initial_state() {
        let event = AllocationEvent::new(AllocationEventType::Created, "2025-06-01T09:00:00Z");
        let timed = TimedEvent {
            index: 0,
            at: 1_748_768_400_000,
            event: &event,
        };
        let mut state = AllocationState {
            status: AllocationStatus::Billing,
            calling_flag: CallingFlag::Calling,
            ..AllocationState::new()
        };

        CreatedApplier.apply(&mut state, &timed);

        assert_eq!(state.status, AllocationStatus::Allocated);
        assert_eq!(state.calling_flag, CallingFlag::NonCalling);
        assert_eq!(state.created_at, Some(1_748_768_400_000));
    }
}
