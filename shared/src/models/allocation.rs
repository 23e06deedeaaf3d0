//! Allocation Model (guest seat allocation)

use crate::allocation::{AllocationEvent, AllocationStatus, CallingFlag};
use serde::{Deserialize, Serialize};

/// Allocation record - a guest's assignment to seats for a service session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub id: String,
    /// Owning property
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    pub guest_name: String,
    pub room_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_category: Option<String>,
    /// Assigned staff member
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
    #[serde(default)]
    pub seat_ids: Vec<String>,
    pub status: AllocationStatus,
    #[serde(default)]
    pub calling_flag: CallingFlag,
    /// Creation time (ISO 8601), anchors elapsed-time computation
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Append-only event log, insertion order is chronological order
    #[serde(default)]
    pub events: Vec<AllocationEvent>,
}

impl Allocation {
    pub fn is_complete(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Create allocation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationCreate {
    pub property_id: String,
    pub guest_name: String,
    pub room_number: String,
    pub guest_category: Option<String>,
    pub staff_id: Option<String>,
    pub seat_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_deserialize_minimal() {
        let json = r#"{
            "id": "alloc-1",
            "guestName": "Ada",
            "roomNumber": "204",
            "status": "Allocated",
            "createdAt": "2025-06-01T09:00:00Z"
        }"#;
        let allocation: Allocation = serde_json::from_str(json).unwrap();
        assert_eq!(allocation.calling_flag, CallingFlag::NonCalling);
        assert!(allocation.events.is_empty());
        assert!(allocation.seat_ids.is_empty());
        assert!(!allocation.is_complete());
    }

    #[test]
    fn test_allocation_deserialize_full() {
        let json = r#"{
            "id": "alloc-1",
            "propertyId": "prop-9",
            "guestName": "Ada",
            "roomNumber": "204",
            "seatIds": ["s1", "s2"],
            "status": "Complete",
            "callingFlag": "Non Calling",
            "createdAt": "2025-06-01T09:00:00Z",
            "events": [{"eventType": "Created", "timestamp": "2025-06-01T09:00:00Z"}]
        }"#;
        let allocation: Allocation = serde_json::from_str(json).unwrap();
        assert_eq!(allocation.property_id.as_deref(), Some("prop-9"));
        assert_eq!(allocation.seat_ids, vec!["s1", "s2"]);
        assert_eq!(allocation.events.len(), 1);
        assert!(allocation.is_complete());
    }
}
