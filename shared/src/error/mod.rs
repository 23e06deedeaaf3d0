//! Unified error system for SmartFlags
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified response format
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Allocation errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::AllocationNotFound);
//!
//! let err = AppError::invalid_event_timestamp(2, "not-a-date")
//!     .with_detail("allocation_id", "alloc-1");
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(4101));
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
