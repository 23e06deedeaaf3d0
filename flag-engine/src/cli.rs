//! `flag-engine` command line
//!
//! # Commands
//!
//! - `flag-engine analyze <FILE>` - analytics per allocation as JSON
//! - `flag-engine replay <FILE>` - replayed state per allocation, with drift

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use shared::allocation::{AllocationAnalytics, AllocationState, StateDrift};
use shared::error::{ApiResponse, AppError};
use shared::util::parse_timestamp;

use crate::allocations::{
    AllocationFilter, AllocationRecord, AnalyticsCalculator, OrderingPolicy, Timeline,
    check_consistency, load_allocations, replay,
};
use crate::core::Config;

/// flag-engine - SmartFlags allocation analytics
#[derive(Parser, Debug)]
#[command(name = "flag-engine")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error), overrides LOG_LEVEL
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Out-of-order event logs: sort or reject, overrides EVENT_ORDERING
    #[arg(long, global = true)]
    pub ordering: Option<OrderingPolicy>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute analytics for every allocation in a file
    Analyze(AnalyzeArgs),
    /// Rebuild each allocation's state from its event log
    Replay(ReplayArgs),
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// JSON file: one allocation, an array, or an `allocations` envelope
    pub file: PathBuf,

    /// Evaluation instant (RFC 3339); defaults to the current time
    #[arg(long, env = "FLAG_ENGINE_NOW", value_parser = parse_now)]
    pub now: Option<DateTime<Utc>>,

    /// Include completed allocations
    #[arg(long)]
    pub include_complete: bool,

    /// Case-insensitive guest name / room number filter
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// JSON file: one allocation, an array, or an `allocations` envelope
    pub file: PathBuf,
}

fn parse_now(value: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(value).ok_or_else(|| format!("invalid timestamp: {value:?}"))
}

/// Analytics result of one allocation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub id: String,
    pub guest_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<AllocationAnalytics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiResponse<()>>,
}

/// Replay result of one allocation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub id: String,
    pub guest_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<AllocationState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drift: Option<StateDrift>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiResponse<()>>,
}

/// Compute analytics for the allocations the filter keeps
///
/// A failing allocation is reported in place; the others are unaffected.
/// Entries that could not be decoded are always reported, since the filter
/// has no record to look at.
pub fn analyze_allocations(
    records: &[AllocationRecord],
    filter: &AllocationFilter,
    calculator: AnalyticsCalculator,
    now: DateTime<Utc>,
) -> Vec<AnalyticsReport> {
    records
        .iter()
        .filter(|record| match &record.allocation {
            Ok(allocation) => filter.matches(allocation),
            Err(_) => true,
        })
        .map(|record| {
            let (analytics, error) = match record
                .allocation
                .as_ref()
                .map_err(Clone::clone)
                .and_then(|allocation| calculator.calculate(allocation, now))
            {
                Ok(analytics) => (Some(analytics), None),
                Err(e) => (None, Some(report_error(record, e))),
            };
            AnalyticsReport {
                id: record.id.clone(),
                guest_name: record.guest_name.clone(),
                analytics,
                error,
            }
        })
        .collect()
}

/// Replay every allocation and compare it with its stored fields
pub fn replay_allocations(
    records: &[AllocationRecord],
    policy: OrderingPolicy,
) -> Vec<ReplayReport> {
    records
        .iter()
        .map(|record| {
            let mut report = ReplayReport {
                id: record.id.clone(),
                guest_name: record.guest_name.clone(),
                state: None,
                drift: None,
                error: None,
            };
            let replayed = record
                .allocation
                .as_ref()
                .map_err(Clone::clone)
                .and_then(|allocation| {
                    Timeline::build(allocation, policy)
                        .map(|timeline| (allocation, replay(&timeline)))
                });
            match replayed {
                Ok((allocation, state)) => {
                    let drift = check_consistency(allocation, &state);
                    report.drift = (!drift.is_empty()).then_some(drift);
                    report.state = Some(state);
                }
                Err(e) => report.error = Some(report_error(record, e)),
            }
            report
        })
        .collect()
}

fn report_error(record: &AllocationRecord, err: AppError) -> ApiResponse<()> {
    let err = err.with_detail("record_index", record.index);
    tracing::error!(
        allocation_id = %record.id,
        record_index = record.index,
        code = %err.code,
        error = %err,
        "Allocation skipped"
    );
    ApiResponse::from(err)
}

/// Execute a parsed command line and return its JSON output
pub fn run(cli: &Cli, config: &Config) -> anyhow::Result<String> {
    let ordering = cli.ordering.unwrap_or(config.event_ordering);

    let value = match &cli.command {
        Command::Analyze(args) => {
            let records = load_allocations(&args.file)?;
            let filter = AllocationFilter::new(args.include_complete, args.search.clone());
            let now = args.now.unwrap_or_else(Utc::now);
            let reports =
                analyze_allocations(&records, &filter, AnalyticsCalculator::new(ordering), now);
            tracing::info!(
                file = %args.file.display(),
                loaded = records.len(),
                analyzed = reports.len(),
                failed = reports.iter().filter(|r| r.error.is_some()).count(),
                "Analysis finished"
            );
            serde_json::to_value(reports)?
        }
        Command::Replay(args) => {
            let records = load_allocations(&args.file)?;
            let reports = replay_allocations(&records, ordering);
            tracing::info!(
                file = %args.file.display(),
                replayed = reports.len(),
                drifted = reports.iter().filter(|r| r.drift.is_some()).count(),
                "Replay finished"
            );
            serde_json::to_value(reports)?
        }
    };

    let output = if cli.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(output)
}
