//! Validated, chronologically ordered view of an allocation's event log
//!
//! Every timestamp is parsed once here so the calculators downstream work on
//! plain Unix milliseconds and never see a malformed date.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shared::allocation::{AllocationEvent, AllocationEventType};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::Allocation;
use shared::util::parse_timestamp_millis;

/// What to do with an event log that is not sorted by timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderingPolicy {
    /// Stable sort by timestamp; equal timestamps keep insertion order
    #[default]
    Sort,
    /// Fail with `EventsOutOfOrder`
    Reject,
}

impl FromStr for OrderingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sort" => Ok(Self::Sort),
            "reject" => Ok(Self::Reject),
            other => Err(format!(
                "unknown event ordering policy {other:?} (expected \"sort\" or \"reject\")"
            )),
        }
    }
}

impl fmt::Display for OrderingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sort => f.write_str("sort"),
            Self::Reject => f.write_str("reject"),
        }
    }
}

/// An event with its parsed timestamp
#[derive(Debug, Clone, Copy)]
pub struct TimedEvent<'a> {
    /// Position in the allocation's `events` as received
    pub index: usize,
    /// Unix milliseconds
    pub at: i64,
    pub event: &'a AllocationEvent,
}

impl TimedEvent<'_> {
    pub fn event_type(&self) -> &AllocationEventType {
        &self.event.event_type
    }

    pub fn is(&self, event_type: &AllocationEventType) -> bool {
        self.event.event_type == *event_type
    }
}

/// Validated event log of one allocation
#[derive(Debug, Clone)]
pub struct Timeline<'a> {
    created_at: i64,
    events: Vec<TimedEvent<'a>>,
    reordered: bool,
}

impl<'a> Timeline<'a> {
    /// Parse every timestamp and enforce chronological order.
    ///
    /// Fails on the first unparseable timestamp (`createdAt` first, then
    /// events by index). Out-of-order logs are sorted or rejected
    /// according to `policy`.
    pub fn build(allocation: &'a Allocation, policy: OrderingPolicy) -> AppResult<Self> {
        let created_at = parse_timestamp_millis(&allocation.created_at)
            .ok_or_else(|| AppError::invalid_timestamp("createdAt", &allocation.created_at))?;

        let mut events = allocation
            .events
            .iter()
            .enumerate()
            .map(|(index, event)| {
                parse_timestamp_millis(&event.timestamp)
                    .map(|at| TimedEvent { index, at, event })
                    .ok_or_else(|| AppError::invalid_event_timestamp(index, &event.timestamp))
            })
            .collect::<AppResult<Vec<_>>>()?;

        let first_unordered = events.windows(2).position(|pair| pair[1].at < pair[0].at);
        let reordered = match (first_unordered, policy) {
            (None, _) => false,
            (Some(pos), OrderingPolicy::Reject) => {
                let index = events[pos + 1].index;
                return Err(AppError::with_message(
                    ErrorCode::EventsOutOfOrder,
                    format!("Event #{index} is earlier than the event before it"),
                )
                .with_detail("event_index", index)
                .with_detail("allocation_id", allocation.id.as_str()));
            }
            (Some(pos), OrderingPolicy::Sort) => {
                tracing::warn!(
                    allocation_id = %allocation.id,
                    event_index = events[pos + 1].index,
                    "Event log out of order, sorting by timestamp"
                );
                // sort_by_key is stable
                events.sort_by_key(|e| e.at);
                true
            }
        };

        Ok(Self {
            created_at,
            events,
            reordered,
        })
    }

    /// `createdAt` in Unix milliseconds
    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Events in chronological order
    pub fn events(&self) -> &[TimedEvent<'a>] {
        &self.events
    }

    /// Whether the log had to be sorted
    pub fn was_reordered(&self) -> bool {
        self.reordered
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events of one type, in chronological order
    pub fn of_type<'t>(
        &'t self,
        event_type: &'t AllocationEventType,
    ) -> impl Iterator<Item = &'t TimedEvent<'a>> + 't {
        self.events.iter().filter(move |e| e.is(event_type))
    }
}
