//! SmartFlags allocation engine
//!
//! Analytics, replay and lifecycle commands over an allocation's event log.
//!
//! # Example
//!
//! ```no_run
//! use flag_engine::allocations::calculate;
//! use shared::models::Allocation;
//!
//! # fn demo(allocation: &Allocation) -> shared::error::AppResult<()> {
//! let analytics = calculate(allocation, chrono::Utc::now())?;
//! println!("{} calls", analytics.calling_count);
//! # Ok(())
//! # }
//! ```

pub mod allocations;
pub mod cli;
pub mod core;
pub mod utils;

pub use allocations::{AnalyticsCalculator, OrderingPolicy, calculate};
pub use crate::core::Config;
