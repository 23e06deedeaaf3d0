//! Allocation analytics calculator
//!
//! Derives elapsed time, calling and Active-status durations from an
//! allocation's event log. Pure: the result depends only on the allocation
//! and the `now` passed in.
//!
//! Two behaviors are kept for parity with the console's numbers:
//! - the average calling time divides by every "Calling On" event, including
//!   ones whose interval could not be resolved;
//! - "Calling Off" events are not consumed when paired, so one "off" can
//!   close several "on" events.

use chrono::{DateTime, Utc};
use shared::allocation::{
    AllocationAnalytics, AllocationEventType, AllocationStatus, HoursMinutesSeconds,
    MinutesSeconds,
};
use shared::error::AppResult;
use shared::models::Allocation;
use tracing::debug;

use super::timeline::{OrderingPolicy, TimedEvent, Timeline};

/// Analytics calculator with a fixed ordering policy
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsCalculator {
    ordering: OrderingPolicy,
}

impl AnalyticsCalculator {
    pub fn new(ordering: OrderingPolicy) -> Self {
        Self { ordering }
    }

    /// Validate the event log and compute analytics as of `now`
    pub fn calculate(
        &self,
        allocation: &Allocation,
        now: DateTime<Utc>,
    ) -> AppResult<AllocationAnalytics> {
        let timeline = Timeline::build(allocation, self.ordering)?;
        Ok(analyze(allocation, &timeline, now.timestamp_millis()))
    }
}

/// Compute analytics with the default ordering policy
pub fn calculate(allocation: &Allocation, now: DateTime<Utc>) -> AppResult<AllocationAnalytics> {
    AnalyticsCalculator::default().calculate(allocation, now)
}

/// Compute analytics over an already validated timeline (`now` in Unix ms)
pub fn analyze(allocation: &Allocation, timeline: &Timeline<'_>, now: i64) -> AllocationAnalytics {
    let completed_at = first_status_change(timeline, |e| {
        e.event.new_status() == Some(AllocationStatus::Complete)
    })
    .map(|e| e.at);
    let total_time =
        HoursMinutesSeconds::from_millis(span(timeline.created_at(), completed_at.unwrap_or(now)));

    let calling_durations = calling_durations(allocation, timeline, now);
    let calling_count = timeline.of_type(&AllocationEventType::CallingOn).count() as u64;
    let total_calling_ms: u64 = calling_durations.iter().sum();
    let avg_calling_time = if calling_count > 0 {
        MinutesSeconds::from_millis(total_calling_ms / calling_count)
    } else {
        MinutesSeconds::default()
    };

    let active_ms = active_duration(allocation, timeline, now);
    let status_change_count = timeline.of_type(&AllocationEventType::StatusChange).count() as u64;

    debug!(
        allocation_id = %allocation.id,
        events = timeline.events().len(),
        calling_count,
        resolved_calls = calling_durations.len(),
        total_calling_ms,
        active_ms,
        completed = completed_at.is_some(),
        "Allocation analytics computed"
    );

    AllocationAnalytics {
        total_time,
        calling_count,
        avg_calling_time,
        total_calling_time: MinutesSeconds::from_millis(total_calling_ms),
        active_time: MinutesSeconds::from_millis(active_ms),
        status_change_count,
        calling_durations,
    }
}

/// Resolved calling intervals in "Calling On" order.
///
/// Each "on" is closed by the first "off" strictly after it. Without one,
/// the interval runs to `now` while the guest is still calling and is
/// dropped otherwise.
fn calling_durations(allocation: &Allocation, timeline: &Timeline<'_>, now: i64) -> Vec<u64> {
    let offs: Vec<i64> = timeline
        .of_type(&AllocationEventType::CallingOff)
        .map(|e| e.at)
        .collect();
    let still_calling = allocation.calling_flag.is_calling();

    timeline
        .of_type(&AllocationEventType::CallingOn)
        .filter_map(|on| match offs.iter().find(|&&off| off > on.at) {
            Some(&off) => Some(span(on.at, off)),
            None if still_calling => Some(span(on.at, now)),
            None => None,
        })
        .collect()
}

/// Length of the first Active interval.
///
/// Opened by the first change into Active, closed by the first later change
/// out of Active; runs to `now` if the allocation is still Active and
/// counts as zero if it left Active without a recorded transition.
fn active_duration(allocation: &Allocation, timeline: &Timeline<'_>, now: i64) -> u64 {
    let Some(start) = first_status_change(timeline, |e| {
        e.event.new_status() == Some(AllocationStatus::Active)
    }) else {
        return 0;
    };

    let end = first_status_change(timeline, |e| {
        e.event.old_status() == Some(AllocationStatus::Active) && e.at > start.at
    })
    .map(|e| e.at);

    match end {
        Some(end) => span(start.at, end),
        None if allocation.status == AllocationStatus::Active => span(start.at, now),
        None => 0,
    }
}

fn first_status_change<'t, 'a>(
    timeline: &'t Timeline<'a>,
    predicate: impl Fn(&TimedEvent<'a>) -> bool,
) -> Option<&'t TimedEvent<'a>> {
    timeline
        .of_type(&AllocationEventType::StatusChange)
        .find(|e| predicate(*e))
}

/// Milliseconds from `start` to `end`, zero if `end` is earlier
fn span(start: i64, end: i64) -> u64 {
    end.saturating_sub(start).max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shared::allocation::{AllocationEvent, CallingFlag};
    use shared::error::ErrorCode;
    use shared::util::format_timestamp;

    fn t0() -> DateTime<Utc> {
        "2025-06-01T09:00:00Z".parse().unwrap()
    }

    fn at(secs: i64) -> String {
        format_timestamp(t0() + Duration::seconds(secs))
    }

    fn allocation(events: Vec<AllocationEvent>) -> Allocation {
        Allocation {
            id: "alloc-1".to_string(),
            property_id: Some("prop-1".to_string()),
            guest_name: "Ada".to_string(),
            room_number: "204".to_string(),
            guest_category: None,
            staff_id: None,
            seat_ids: vec!["s1".to_string(), "s2".to_string()],
            status: AllocationStatus::Allocated,
            calling_flag: CallingFlag::NonCalling,
            created_at: at(0),
            updated_at: None,
            events,
        }
    }

    fn calling_on(secs: i64) -> AllocationEvent {
        AllocationEvent::new(AllocationEventType::CallingOn, at(secs))
    }

    fn calling_off(secs: i64) -> AllocationEvent {
        AllocationEvent::new(AllocationEventType::CallingOff, at(secs))
    }

    fn status(secs: i64, old: AllocationStatus, new: AllocationStatus) -> AllocationEvent {
        AllocationEvent::status_change(at(secs), old, new)
    }

    fn now_plus(secs: i64) -> DateTime<Utc> {
        t0() + Duration::seconds(secs)
    }

    #[test]
    fn test_zero_events() {
        let alloc = allocation(vec![]);
        let result = calculate(&alloc, now_plus(7_384)).unwrap();

        assert_eq!(result.calling_count, 0);
        assert_eq!(result.status_change_count, 0);
        assert_eq!(result.active_time, MinutesSeconds::default());
        assert_eq!(result.avg_calling_time, MinutesSeconds::default());
        assert!(result.calling_durations.is_empty());
        assert_eq!(
            result.total_time,
            HoursMinutesSeconds {
                hours: 2,
                minutes: 3,
                seconds: 4
            }
        );
    }

    #[test]
    fn test_paired_calling_interval() {
        let alloc = allocation(vec![calling_on(10), calling_off(100)]);
        let result = calculate(&alloc, now_plus(1_000)).unwrap();

        assert_eq!(result.calling_count, 1);
        assert_eq!(result.total_calling_time, MinutesSeconds { minutes: 1, seconds: 30 });
        assert_eq!(result.avg_calling_time, MinutesSeconds { minutes: 1, seconds: 30 });
        assert_eq!(result.calling_durations, vec![90_000]);
    }

    #[test]
    fn test_open_calling_interval_runs_to_now() {
        let mut alloc = allocation(vec![calling_on(0)]);
        alloc.calling_flag = CallingFlag::Calling;
        let result = calculate(&alloc, now_plus(45)).unwrap();

        assert_eq!(result.total_calling_time, MinutesSeconds { minutes: 0, seconds: 45 });
        assert_eq!(result.calling_durations, vec![45_000]);
    }

    #[test]
    fn test_orphaned_on_counts_but_has_no_duration() {
        // Second "on" never closed and the guest is no longer calling
        let alloc = allocation(vec![calling_on(0), calling_off(60), calling_on(120)]);
        let result = calculate(&alloc, now_plus(600)).unwrap();

        assert_eq!(result.calling_count, 2);
        assert_eq!(result.calling_durations, vec![60_000]);
        assert_eq!(result.total_calling_time, MinutesSeconds { minutes: 1, seconds: 0 });
        // 60s spread over both "on" events
        assert_eq!(result.avg_calling_time, MinutesSeconds { minutes: 0, seconds: 30 });
    }

    #[test]
    fn test_off_event_can_close_several_ons() {
        let alloc = allocation(vec![calling_on(0), calling_on(30), calling_off(60)]);
        let result = calculate(&alloc, now_plus(600)).unwrap();

        assert_eq!(result.calling_durations, vec![60_000, 30_000]);
        assert_eq!(result.total_calling_time, MinutesSeconds { minutes: 1, seconds: 30 });
        assert_eq!(result.avg_calling_time, MinutesSeconds { minutes: 0, seconds: 45 });
    }

    #[test]
    fn test_off_at_same_instant_does_not_close() {
        let mut alloc = allocation(vec![calling_on(30), calling_off(30)]);
        alloc.calling_flag = CallingFlag::CallingForCheckout;
        let result = calculate(&alloc, now_plus(90)).unwrap();

        // No "off" strictly after the "on": still calling, runs to now
        assert_eq!(result.calling_durations, vec![60_000]);
    }

    #[test]
    fn test_completed_allocation_stops_total_time() {
        let mut alloc = allocation(vec![status(
            3_661,
            AllocationStatus::Clear,
            AllocationStatus::Complete,
        )]);
        alloc.status = AllocationStatus::Complete;
        let result = calculate(&alloc, now_plus(86_400 * 30)).unwrap();

        assert_eq!(
            result.total_time,
            HoursMinutesSeconds {
                hours: 1,
                minutes: 1,
                seconds: 1
            }
        );
        assert_eq!(result.status_change_count, 1);
    }

    #[test]
    fn test_active_interval_still_open() {
        let mut alloc = allocation(vec![status(
            0,
            AllocationStatus::Allocated,
            AllocationStatus::Active,
        )]);
        alloc.status = AllocationStatus::Active;
        let result = calculate(&alloc, now_plus(125)).unwrap();

        assert_eq!(result.active_time, MinutesSeconds { minutes: 2, seconds: 5 });
    }

    #[test]
    fn test_active_interval_closed_by_transition_out() {
        let mut alloc = allocation(vec![
            status(60, AllocationStatus::Allocated, AllocationStatus::Active),
            status(660, AllocationStatus::Active, AllocationStatus::Billing),
        ]);
        alloc.status = AllocationStatus::Billing;
        let result = calculate(&alloc, now_plus(5_000)).unwrap();

        assert_eq!(result.active_time, MinutesSeconds { minutes: 10, seconds: 0 });
        assert_eq!(result.status_change_count, 2);
    }

    #[test]
    fn test_active_left_without_transition_is_zero() {
        let mut alloc = allocation(vec![status(
            60,
            AllocationStatus::Allocated,
            AllocationStatus::Active,
        )]);
        alloc.status = AllocationStatus::Billing;
        let result = calculate(&alloc, now_plus(5_000)).unwrap();

        assert_eq!(result.active_time, MinutesSeconds::default());
    }

    #[test]
    fn test_only_first_active_interval_counts() {
        let mut alloc = allocation(vec![
            status(0, AllocationStatus::Allocated, AllocationStatus::Active),
            status(60, AllocationStatus::Active, AllocationStatus::Billing),
            status(120, AllocationStatus::Billing, AllocationStatus::Active),
        ]);
        alloc.status = AllocationStatus::Active;
        let result = calculate(&alloc, now_plus(10_000)).unwrap();

        assert_eq!(result.active_time, MinutesSeconds { minutes: 1, seconds: 0 });
    }

    #[test]
    fn test_now_before_creation_clamps_to_zero() {
        let alloc = allocation(vec![]);
        let result = calculate(&alloc, now_plus(-30)).unwrap();
        assert_eq!(result.total_time, HoursMinutesSeconds::default());
    }

    #[test]
    fn test_malformed_timestamp_is_rejected() {
        let mut alloc = allocation(vec![calling_on(0), calling_off(10)]);
        alloc.events[1].timestamp = "soon".to_string();
        let err = calculate(&alloc, now_plus(60)).unwrap_err();

        assert_eq!(err.code, ErrorCode::EventTimestampInvalid);
        assert_eq!(
            err.detail("event_index").and_then(|v| v.as_u64()),
            Some(1)
        );
    }

    #[test]
    fn test_reject_policy_surfaces_ordering_error() {
        let alloc = allocation(vec![calling_off(60), calling_on(0)]);
        let err = AnalyticsCalculator::new(OrderingPolicy::Reject)
            .calculate(&alloc, now_plus(120))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EventsOutOfOrder);

        // Sorting restores the on/off pairing
        let sorted = calculate(&alloc, now_plus(120)).unwrap();
        assert_eq!(sorted.calling_durations, vec![60_000]);
    }

    #[test]
    fn test_unknown_events_are_ignored() {
        let alloc = allocation(vec![
            AllocationEvent::new(AllocationEventType::Created, at(0)),
            AllocationEvent::new(AllocationEventType::Other("Seat Swap".into()), at(5)),
        ]);
        let result = calculate(&alloc, now_plus(10)).unwrap();
        assert_eq!(result.calling_count, 0);
        assert_eq!(result.status_change_count, 0);
    }
}
