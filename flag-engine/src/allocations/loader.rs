//! Reading allocation records from JSON
//!
//! Entries are decoded one by one so a malformed record is reported on its
//! own instead of failing the whole document.

use std::path::Path;

use serde_json::Value;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::Allocation;

/// One entry of an allocations document
#[derive(Debug)]
pub struct AllocationRecord {
    /// Position in the document
    pub index: usize,
    /// `id` as found in the raw entry, empty when absent
    pub id: String,
    /// `guestName` as found in the raw entry, empty when absent
    pub guest_name: String,
    pub allocation: AppResult<Allocation>,
}

/// Parse a document holding one allocation, an array of them, or an
/// `{"allocations": [...]}` envelope
///
/// Only an unreadable document is an error; each entry carries its own
/// decoding result.
pub fn parse_allocations(json: &str) -> AppResult<Vec<AllocationRecord>> {
    let document: Value = serde_json::from_str(json)?;

    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(mut map) if map.contains_key("allocations") => {
            match map.remove("allocations") {
                Some(Value::Array(entries)) => entries,
                _ => {
                    return Err(AppError::invalid_request(
                        "`allocations` must be an array of allocations",
                    ));
                }
            }
        }
        object @ Value::Object(_) => vec![object],
        _ => {
            return Err(AppError::invalid_request(
                "Expected an allocation, an array of allocations or an allocations envelope",
            ));
        }
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| decode_record(index, entry))
        .collect())
}

/// Read and parse an allocations file
pub fn load_allocations(path: &Path) -> AppResult<Vec<AllocationRecord>> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| AppError::from(e).with_detail("path", path.display().to_string()))?;
    let records = parse_allocations(&json)
        .map_err(|e| e.with_detail("path", path.display().to_string()))?;
    tracing::debug!(
        path = %path.display(),
        count = records.len(),
        rejected = records.iter().filter(|r| r.allocation.is_err()).count(),
        "Allocations loaded"
    );
    Ok(records)
}

fn decode_record(index: usize, entry: Value) -> AllocationRecord {
    let text = |key: &str| {
        entry
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let id = text("id");
    let guest_name = text("guestName");

    let allocation = if entry.is_object() {
        check_timestamps(&entry).and_then(|()| {
            serde_json::from_value::<Allocation>(entry)
                .map_err(|e| AppError::with_message(ErrorCode::InvalidFormat, e.to_string()))
        })
    } else {
        Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            "Allocation record must be a JSON object",
        ))
    }
    .map_err(|e| e.with_detail("record_index", index));

    AllocationRecord {
        index,
        id,
        guest_name,
        allocation,
    }
}

/// Timestamps must be strings; anything else is reported like an
/// unparseable date, with the offending event's index.
fn check_timestamps(entry: &Value) -> AppResult<()> {
    match entry.get("createdAt") {
        Some(Value::String(_)) => {}
        other => return Err(AppError::invalid_timestamp("createdAt", &raw(other))),
    }

    if let Some(Value::Array(events)) = entry.get("events") {
        for (index, event) in events.iter().enumerate() {
            match event.get("timestamp") {
                Some(Value::String(_)) => {}
                other => return Err(AppError::invalid_event_timestamp(index, &raw(other))),
            }
        }
    }
    Ok(())
}

fn raw(value: Option<&Value>) -> String {
    value.map_or_else(|| "missing".to_string(), Value::to_string)
}
