//! Allocation event processing traits

use enum_dispatch::enum_dispatch;
use shared::allocation::AllocationState;

use super::timeline::TimedEvent;

/// Folds one event into the allocation state
///
/// Implementations are pure: no I/O, no clock reads.
#[enum_dispatch]
pub trait EventApplier {
    fn apply(&self, state: &mut AllocationState, event: &TimedEvent<'_>);
}
