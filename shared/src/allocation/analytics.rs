//! Allocation analytics - durations and counts derived from the event log

use serde::{Deserialize, Serialize};

const MS_PER_SECOND: u64 = 1000;

/// Elapsed time split into hours, minutes and seconds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct HoursMinutesSeconds {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl HoursMinutesSeconds {
    /// Floor to whole seconds, then split with integer division
    pub fn from_millis(ms: u64) -> Self {
        let total = ms / MS_PER_SECOND;
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

/// Elapsed time split into minutes and seconds (minutes are not capped at 59)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct MinutesSeconds {
    pub minutes: u64,
    pub seconds: u64,
}

impl MinutesSeconds {
    /// Floor to whole seconds, then split with integer division
    pub fn from_millis(ms: u64) -> Self {
        Self::from_seconds(ms / MS_PER_SECOND)
    }

    pub fn from_seconds(total: u64) -> Self {
        Self {
            minutes: total / 60,
            seconds: total % 60,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.minutes * 60 + self.seconds
    }
}

/// Analytics record for one allocation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AllocationAnalytics {
    /// Creation to completion (or to now while not complete)
    pub total_time: HoursMinutesSeconds,
    /// Number of "Calling On" events
    pub calling_count: u64,
    /// Resolved calling time divided by `calling_count`
    pub avg_calling_time: MinutesSeconds,
    /// Sum of resolved calling intervals
    pub total_calling_time: MinutesSeconds,
    /// Time spent in the first Active interval
    pub active_time: MinutesSeconds,
    /// Number of "Status Change" events
    pub status_change_count: u64,
    /// Each resolved calling interval in milliseconds, in event order
    pub calling_durations: Vec<u64>,
}
