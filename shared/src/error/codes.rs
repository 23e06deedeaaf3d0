//! Unified error codes for SmartFlags
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Allocation errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility with the console frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Timestamp could not be parsed
    InvalidTimestamp = 9,

    // ==================== 4xxx: Allocation ====================
    /// Allocation not found
    AllocationNotFound = 4001,
    /// Allocation is already complete
    AllocationCompleted = 4002,
    /// Requested status equals the current status
    StatusUnchanged = 4003,
    /// Guest is already calling
    AlreadyCalling = 4004,
    /// Guest is not calling
    NotCalling = 4005,
    /// Event timestamp could not be parsed
    EventTimestampInvalid = 4101,
    /// Events are not in chronological order
    EventsOutOfOrder = 4102,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// I/O error
    IoError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::InvalidTimestamp => "Invalid timestamp",

            // Allocation
            ErrorCode::AllocationNotFound => "Allocation not found",
            ErrorCode::AllocationCompleted => "Allocation is already complete",
            ErrorCode::StatusUnchanged => "Status is unchanged",
            ErrorCode::AlreadyCalling => "Guest is already calling",
            ErrorCode::NotCalling => "Guest is not calling",
            ErrorCode::EventTimestampInvalid => "Event timestamp is invalid",
            ErrorCode::EventsOutOfOrder => "Events are out of order",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::IoError => "I/O error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            9 => Ok(ErrorCode::InvalidTimestamp),

            // Allocation
            4001 => Ok(ErrorCode::AllocationNotFound),
            4002 => Ok(ErrorCode::AllocationCompleted),
            4003 => Ok(ErrorCode::StatusUnchanged),
            4004 => Ok(ErrorCode::AlreadyCalling),
            4005 => Ok(ErrorCode::NotCalling),
            4101 => Ok(ErrorCode::EventTimestampInvalid),
            4102 => Ok(ErrorCode::EventsOutOfOrder),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::IoError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::InvalidTimestamp.code(), 9);

        assert_eq!(ErrorCode::AllocationNotFound.code(), 4001);
        assert_eq!(ErrorCode::StatusUnchanged.code(), 4003);
        assert_eq!(ErrorCode::EventTimestampInvalid.code(), 4101);
        assert_eq!(ErrorCode::EventsOutOfOrder.code(), 4102);

        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::ConfigError.code(), 9005);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::AllocationCompleted.is_success());
    }

    #[test]
    fn test_try_from() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(4004), Ok(ErrorCode::AlreadyCalling));
        assert_eq!(ErrorCode::try_from(9002), Ok(ErrorCode::IoError));
        assert_eq!(ErrorCode::try_from(4), Err(InvalidErrorCode(4)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::EventsOutOfOrder).unwrap();
        assert_eq!(json, "4102");

        let code: ErrorCode = serde_json::from_str("4005").unwrap();
        assert_eq!(code, ErrorCode::NotCalling);

        let result: Result<ErrorCode, _> = serde_json::from_str("4999");
        assert!(result.is_err());
    }

    #[test]
    fn test_display_and_message() {
        assert_eq!(format!("{}", ErrorCode::AllocationNotFound), "4001");
        assert_eq!(
            ErrorCode::AllocationCompleted.message(),
            "Allocation is already complete"
        );
        assert_eq!(
            format!("{}", InvalidErrorCode(999)),
            "invalid error code: 999"
        );
    }
}
