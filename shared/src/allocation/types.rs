//! Allocation value types: lifecycle status and calling flag

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Allocation lifecycle status
///
/// Serialized with the console's display names ("Allocated", "Active", ...).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum AllocationStatus {
    /// Seats assigned to guest
    #[default]
    Allocated,
    /// Guest is using seats
    Active,
    /// Processing checkout
    Billing,
    /// Cleaning in progress
    Clear,
    /// Fully completed
    Complete,
}

impl AllocationStatus {
    /// All statuses in lifecycle order
    pub const ALL: [AllocationStatus; 5] = [
        AllocationStatus::Allocated,
        AllocationStatus::Active,
        AllocationStatus::Billing,
        AllocationStatus::Clear,
        AllocationStatus::Complete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allocated => "Allocated",
            Self::Active => "Active",
            Self::Billing => "Billing",
            Self::Clear => "Clear",
            Self::Complete => "Complete",
        }
    }

    /// Short description shown next to the status option
    pub fn description(&self) -> &'static str {
        match self {
            Self::Allocated => "Seats assigned to guest",
            Self::Active => "Guest is using seats",
            Self::Billing => "Processing checkout",
            Self::Clear => "Cleaning in progress",
            Self::Complete => "Fully completed",
        }
    }

    /// Terminal status: seats are released and no further changes are accepted
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl FromStr for AllocationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown allocation status: {s}"))
    }
}

impl fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the guest is currently signaling staff
///
/// The wire value is free text: `"Non Calling"` means idle, anything else
/// means the guest is calling. The console writes `"Calling"` and
/// `"Calling for Checkout"`; other values are kept verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(from = "String", into = "String")]
pub enum CallingFlag {
    #[default]
    NonCalling,
    Calling,
    CallingForCheckout,
    Other(String),
}

impl CallingFlag {
    pub const NON_CALLING: &'static str = "Non Calling";
    pub const CALLING: &'static str = "Calling";
    pub const CALLING_FOR_CHECKOUT: &'static str = "Calling for Checkout";

    pub fn is_calling(&self) -> bool {
        !matches!(self, Self::NonCalling)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::NonCalling => Self::NON_CALLING,
            Self::Calling => Self::CALLING,
            Self::CallingForCheckout => Self::CALLING_FOR_CHECKOUT,
            Self::Other(value) => value,
        }
    }
}

impl From<String> for CallingFlag {
    fn from(value: String) -> Self {
        match value.as_str() {
            Self::NON_CALLING => Self::NonCalling,
            Self::CALLING => Self::Calling,
            Self::CALLING_FOR_CHECKOUT => Self::CallingForCheckout,
            _ => Self::Other(value),
        }
    }
}

impl From<CallingFlag> for String {
    fn from(flag: CallingFlag) -> Self {
        match flag {
            CallingFlag::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CallingFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&AllocationStatus::Billing).unwrap();
        assert_eq!(json, "\"Billing\"");

        let status: AllocationStatus = serde_json::from_str("\"Complete\"").unwrap();
        assert_eq!(status, AllocationStatus::Complete);
        assert!(status.is_terminal());

        assert!(serde_json::from_str::<AllocationStatus>("\"Paused\"").is_err());
        assert_eq!("Clear".parse::<AllocationStatus>(), Ok(AllocationStatus::Clear));
        assert!("active".parse::<AllocationStatus>().is_err());
    }

    #[test]
    fn test_status_descriptions() {
        assert_eq!(AllocationStatus::ALL.len(), 5);
        assert_eq!(AllocationStatus::Clear.description(), "Cleaning in progress");
        assert_eq!(AllocationStatus::Active.to_string(), "Active");
    }

    #[test]
    fn test_calling_flag_any_other_value_is_calling() {
        let idle: CallingFlag = serde_json::from_str("\"Non Calling\"").unwrap();
        assert_eq!(idle, CallingFlag::NonCalling);

        let calling: CallingFlag = serde_json::from_str("\"Calling\"").unwrap();
        assert!(calling.is_calling());

        let checkout: CallingFlag = serde_json::from_str("\"Calling for Checkout\"").unwrap();
        assert_eq!(checkout, CallingFlag::CallingForCheckout);
        assert!(checkout.is_calling());

        let custom: CallingFlag = serde_json::from_str("\"Needs Service\"").unwrap();
        assert!(custom.is_calling());
        assert_eq!(serde_json::to_string(&custom).unwrap(), "\"Needs Service\"");
    }

    #[test]
    fn test_calling_flag_serializes_display_name() {
        assert_eq!(
            serde_json::to_string(&CallingFlag::NonCalling).unwrap(),
            "\"Non Calling\""
        );
        assert_eq!(
            serde_json::to_string(&CallingFlag::Calling).unwrap(),
            "\"Calling\""
        );
    }
}
