//! Shared types for SmartFlags
//!
//! Allocation records and their event log, analytics output types,
//! the unified error system, and time utilities.

pub mod allocation;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use allocation::{
    AllocationAnalytics, AllocationEvent, AllocationEventType, AllocationState, AllocationStatus,
    CallingFlag,
};
pub use error::{AppError, AppResult, ErrorCode};
pub use models::Allocation;
