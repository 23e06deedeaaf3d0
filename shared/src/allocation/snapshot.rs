//! Allocation state - computed by replaying the event log

use super::types::{AllocationStatus, CallingFlag};
use serde::{Deserialize, Serialize};

/// Allocation state folded from its events
///
/// Timestamps are Unix milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AllocationState {
    pub status: AllocationStatus,
    pub calling_flag: CallingFlag,
    /// Timestamp of the `Created` event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    /// Timestamp of the transition into `Complete`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
    /// Start of the call in progress
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calling_since: Option<i64>,
    /// Timestamp of the last applied event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_event_at: Option<i64>,
    /// Number of applied events
    pub applied_events: usize,
}

impl AllocationState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Differences between a record's stored fields and its replayed state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StateDrift {
    /// (stored, replayed) status when they differ
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<(AllocationStatus, AllocationStatus)>,
    /// (stored, replayed) calling flag when they differ
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calling_flag: Option<(CallingFlag, CallingFlag)>,
}

impl StateDrift {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.calling_flag.is_none()
    }
}
