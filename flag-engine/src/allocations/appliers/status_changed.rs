//! Status Change event applier

use crate::allocations::timeline::TimedEvent;
use crate::allocations::traits::EventApplier;
use shared::allocation::{AllocationState, AllocationStatus, CallingFlag};

/// Status Change applier - moves the allocation to `newValue`
pub struct StatusChangedApplier;

impl EventApplier for StatusChangedApplier {
    fn apply(&self, state: &mut AllocationState, event: &TimedEvent<'_>) {
        let Some(status) = event.event.new_status() else {
            tracing::warn!(
                event_index = event.index,
                new_value = ?event.event.new_value,
                "Status change without a recognizable new status, skipped"
            );
            return;
        };

        state.status = status;
        if status == AllocationStatus::Complete {
            state.completed_at.get_or_insert(event.at);
            state.calling_flag = CallingFlag::NonCalling;
            state.calling_since = None;
        }
    }
}
