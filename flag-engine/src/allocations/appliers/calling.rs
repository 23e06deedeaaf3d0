//! Calling On / Calling Off event appliers

use crate::allocations::timeline::TimedEvent;
use crate::allocations::traits::EventApplier;
use shared::allocation::{AllocationState, CallingFlag};

/// Calling On applier - guest starts signaling staff
pub struct CallingOnApplier;

impl EventApplier for CallingOnApplier {
    fn apply(&self, state: &mut AllocationState, event: &TimedEvent<'_>) {
        // The flag value itself is not part of the event; keep a more
        // specific calling state if one was already set.
        if !state.calling_flag.is_calling() {
            state.calling_flag = CallingFlag::Calling;
        }
        state.calling_since.get_or_insert(event.at);
    }
}

/// Calling Off applier - guest stops signaling staff
pub struct CallingOffApplier;

impl EventApplier for CallingOffApplier {
    fn apply(&self, state: &mut AllocationState, _event: &TimedEvent<'_>) {
        state.calling_flag = CallingFlag::NonCalling;
        state.calling_since = None;
    }
}
