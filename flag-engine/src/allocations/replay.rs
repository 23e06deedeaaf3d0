//! Event replay - rebuild allocation state from its event log

use shared::allocation::{AllocationState, StateDrift};
use shared::models::Allocation;

use super::appliers::EventAction;
use super::timeline::Timeline;
use super::traits::EventApplier;

/// Fold every event of the timeline, in order, into a fresh state
pub fn replay(timeline: &Timeline<'_>) -> AllocationState {
    let mut state = AllocationState::new();
    for event in timeline.events() {
        let action = EventAction::from(event.event_type());
        action.apply(&mut state, event);
        state.last_event_at = Some(event.at);
        state.applied_events += 1;
    }
    state
}

/// Compare the record's stored status and flag against a replayed state
///
/// An empty log carries no evidence either way, so it never drifts.
pub fn check_consistency(allocation: &Allocation, state: &AllocationState) -> StateDrift {
    if state.applied_events == 0 {
        return StateDrift::default();
    }

    let drift = StateDrift {
        status: (allocation.status != state.status).then_some((allocation.status, state.status)),
        calling_flag: (allocation.calling_flag.is_calling() != state.calling_flag.is_calling())
            .then(|| (allocation.calling_flag.clone(), state.calling_flag.clone())),
    };

    if !drift.is_empty() {
        tracing::warn!(
            allocation_id = %allocation.id,
            ?drift,
            "Stored allocation fields disagree with its event log"
        );
    }
    drift
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocations::OrderingPolicy;
    use shared::allocation::{AllocationEvent, AllocationEventType, AllocationStatus, CallingFlag};

    fn allocation(status: AllocationStatus, events: Vec<AllocationEvent>) -> Allocation {
        Allocation {
            id: "alloc-7".to_string(),
            property_id: Some("prop-1".to_string()),
            guest_name: "Grace".to_string(),
            room_number: "310".to_string(),
            guest_category: None,
            staff_id: Some("staff-2".to_string()),
            seat_ids: vec!["seat-4".to_string()],
            status,
            calling_flag: CallingFlag::NonCalling,
            created_at: "2025-06-01T09:00:00Z".to_string(),
            updated_at: None,
            events,
        }
    }

    fn full_log() -> Vec<AllocationEvent> {
        vec![
            AllocationEvent::new(AllocationEventType::Created, "2025-06-01T09:00:00Z"),
            AllocationEvent::status_change(
                "2025-06-01T09:01:00Z",
                AllocationStatus::Allocated,
                AllocationStatus::Active,
            ),
            AllocationEvent::new(AllocationEventType::CallingOn, "2025-06-01T09:10:00Z"),
            AllocationEvent::new(AllocationEventType::CallingOff, "2025-06-01T09:12:00Z"),
            AllocationEvent::new(AllocationEventType::Other("Seat Swap".into()), "2025-06-01T09:20:00Z"),
            AllocationEvent::status_change(
                "2025-06-01T10:00:00Z",
                AllocationStatus::Active,
                AllocationStatus::Complete,
            ),
        ]
    }

    #[test]
    fn test_replay_full_lifecycle() {
        let alloc = allocation(AllocationStatus::Complete, full_log());
        let timeline = Timeline::build(&alloc, OrderingPolicy::Reject).unwrap();

        let state = replay(&timeline);

        assert_eq!(state.status, AllocationStatus::Complete);
        assert_eq!(state.calling_flag, CallingFlag::NonCalling);
        assert_eq!(state.applied_events, 6);
        assert_eq!(state.last_event_at, state.completed_at);
        assert!(state.created_at.is_some());
        assert!(check_consistency(&alloc, &state).is_empty());
    }

    #[test]
    fn test_replay_open_call() {
        let alloc = allocation(
            AllocationStatus::Allocated,
            vec![
                AllocationEvent::new(AllocationEventType::Created, "2025-06-01T09:00:00Z"),
                AllocationEvent::new(AllocationEventType::CallingOn, "2025-06-01T09:05:00Z"),
            ],
        );
        let timeline = Timeline::build(&alloc, OrderingPolicy::Sort).unwrap();

        let state = replay(&timeline);

        assert_eq!(state.calling_flag, CallingFlag::Calling);
        assert_eq!(state.calling_since, Some(timeline.events()[1].at));
    }

    #[test]
    fn test_drift_detected() {
        let mut alloc = allocation(AllocationStatus::Billing, full_log());
        alloc.calling_flag = CallingFlag::Calling;
        let timeline = Timeline::build(&alloc, OrderingPolicy::Sort).unwrap();
        let state = replay(&timeline);

        let drift = check_consistency(&alloc, &state);

        assert_eq!(
            drift.status,
            Some((AllocationStatus::Billing, AllocationStatus::Complete))
        );
        assert_eq!(
            drift.calling_flag,
            Some((CallingFlag::Calling, CallingFlag::NonCalling))
        );
    }

    #[test]
    fn test_empty_log_never_drifts() {
        let alloc = allocation(AllocationStatus::Billing, vec![]);
        let timeline = Timeline::build(&alloc, OrderingPolicy::Sort).unwrap();
        let state = replay(&timeline);

        assert_eq!(state.applied_events, 0);
        assert!(check_consistency(&alloc, &state).is_empty());
    }
}
