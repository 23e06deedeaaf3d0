//! Allocation events - immutable facts recorded against an allocation

use super::types::AllocationStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Allocation event - append-only audit record
///
/// Timestamps stay as the backend's ISO-8601 strings on the wire; they are
/// parsed and checked when an event log is turned into a timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationEvent {
    /// Event ID (absent on records written by older backends)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Event type
    pub event_type: AllocationEventType,
    /// When the event occurred (ISO 8601)
    pub timestamp: String,
    /// Previous status (status changes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    /// New status (status changes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    /// Free text, display only
    #[serde(default)]
    pub description: String,
}

impl AllocationEvent {
    pub fn new(event_type: AllocationEventType, timestamp: impl Into<String>) -> Self {
        Self {
            id: None,
            event_type,
            timestamp: timestamp.into(),
            old_value: None,
            new_value: None,
            description: String::new(),
        }
    }

    /// Build a status change event
    pub fn status_change(
        timestamp: impl Into<String>,
        old: AllocationStatus,
        new: AllocationStatus,
    ) -> Self {
        Self {
            old_value: Some(old.as_str().to_string()),
            new_value: Some(new.as_str().to_string()),
            description: format!("Status changed from {} to {}", old, new),
            ..Self::new(AllocationEventType::StatusChange, timestamp)
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// `old_value` parsed as a status, if it names one
    pub fn old_status(&self) -> Option<AllocationStatus> {
        self.old_value.as_deref().and_then(|v| v.parse().ok())
    }

    /// `new_value` parsed as a status, if it names one
    pub fn new_status(&self) -> Option<AllocationStatus> {
        self.new_value.as_deref().and_then(|v| v.parse().ok())
    }
}

/// Event type discriminator
///
/// Uses the console's display strings on the wire. Unknown discriminators
/// are kept verbatim so records round-trip unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum AllocationEventType {
    Created,
    StatusChange,
    CallingOn,
    CallingOff,
    Other(String),
}

impl AllocationEventType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Created => "Created",
            Self::StatusChange => "Status Change",
            Self::CallingOn => "Calling On",
            Self::CallingOff => "Calling Off",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for AllocationEventType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Created" => Self::Created,
            "Status Change" => Self::StatusChange,
            "Calling On" => Self::CallingOn,
            "Calling Off" => Self::CallingOff,
            _ => Self::Other(value),
        }
    }
}

impl From<AllocationEventType> for String {
    fn from(event_type: AllocationEventType) -> Self {
        match event_type {
            AllocationEventType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AllocationEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
