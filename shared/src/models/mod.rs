//! Data models
//!
//! Records exchanged with the SmartFlags backend (camelCase JSON).

pub mod allocation;

// Re-exports
pub use allocation::*;
