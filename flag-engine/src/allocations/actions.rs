//! Allocation lifecycle commands
//!
//! Each command validates against the current record, appends the events it
//! produces and updates the stored status and calling flag so the two never
//! disagree.

use chrono::{DateTime, Utc};
use shared::allocation::{AllocationEvent, AllocationEventType, AllocationStatus, CallingFlag};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Allocation, AllocationCreate};
use shared::util::format_timestamp;
use uuid::Uuid;

/// Commands accepted by [`execute`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationCommand {
    ChangeStatus(AllocationStatus),
    /// Guest requests service
    SetCalling,
    /// Guest requests checkout: flag plus a move to Billing
    SetCallingForCheckout,
    ClearCalling,
}

/// What a command changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOutcome {
    /// Events appended to the allocation, in order
    pub events: Vec<AllocationEvent>,
    /// Seats freed by completion
    pub released_seats: Vec<String>,
}

/// Apply a command to an allocation at `now`
///
/// `SetCallingForCheckout` on an open "Calling" call upgrades the flag in
/// place. When the allocation is also already in `Billing`, nothing is
/// appended: the outcome is empty and only `callingFlag` and `updatedAt`
/// change. The log carries calls and transitions, not the call's purpose.
pub fn execute(
    allocation: &mut Allocation,
    command: AllocationCommand,
    now: DateTime<Utc>,
) -> AppResult<CommandOutcome> {
    if allocation.is_complete() {
        return Err(AppError::with_message(
            ErrorCode::AllocationCompleted,
            format!("Allocation {} is already complete", allocation.id),
        )
        .with_detail("allocation_id", allocation.id.as_str()));
    }

    let timestamp = format_timestamp(now);
    let mut outcome = CommandOutcome::default();

    match command {
        AllocationCommand::ChangeStatus(status) => {
            if status == allocation.status {
                return Err(AppError::with_message(
                    ErrorCode::StatusUnchanged,
                    format!("Status is already set to {status}"),
                )
                .with_detail("status", status.as_str()));
            }
            if status == AllocationStatus::Complete && allocation.calling_flag.is_calling() {
                outcome.events.push(calling_off(allocation, &timestamp));
            }
            outcome.events.push(status_change(allocation, status, &timestamp));
            if status == AllocationStatus::Complete {
                outcome.released_seats = std::mem::take(&mut allocation.seat_ids);
            }
        }
        AllocationCommand::SetCalling => {
            if allocation.calling_flag.is_calling() {
                return Err(already_calling(allocation));
            }
            outcome.events.push(calling_on(allocation, CallingFlag::Calling, &timestamp));
        }
        AllocationCommand::SetCallingForCheckout => {
            if allocation.calling_flag == CallingFlag::CallingForCheckout {
                return Err(already_calling(allocation));
            }
            if allocation.calling_flag.is_calling() {
                // Call already open: only its purpose changes
                allocation.calling_flag = CallingFlag::CallingForCheckout;
            } else {
                outcome
                    .events
                    .push(calling_on(allocation, CallingFlag::CallingForCheckout, &timestamp));
            }
            if allocation.status != AllocationStatus::Billing {
                outcome.events.push(
                    status_change(allocation, AllocationStatus::Billing, &timestamp)
                        .with_description("Calling for Checkout set - Status changed to Billing"),
                );
            }
        }
        AllocationCommand::ClearCalling => {
            if !allocation.calling_flag.is_calling() {
                return Err(AppError::with_message(
                    ErrorCode::NotCalling,
                    format!("Allocation {} has no open call", allocation.id),
                )
                .with_detail("allocation_id", allocation.id.as_str()));
            }
            outcome.events.push(calling_off(allocation, &timestamp));
        }
    }

    allocation.events.extend(outcome.events.iter().cloned());
    allocation.updated_at = Some(timestamp);

    tracing::info!(
        allocation_id = %allocation.id,
        status = %allocation.status,
        calling_flag = %allocation.calling_flag,
        events = outcome.events.len(),
        released_seats = outcome.released_seats.len(),
        "Allocation command applied"
    );
    Ok(outcome)
}

/// Validate a create payload and build a new allocation with its Created event
pub fn open_allocation(payload: AllocationCreate, now: DateTime<Utc>) -> AppResult<Allocation> {
    if payload.property_id.trim().is_empty() {
        return Err(required("propertyId", "Property is required"));
    }
    if payload.room_number.trim().is_empty() {
        return Err(required("roomNumber", "Room number is required"));
    }
    if payload.guest_name.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::NotFound,
            format!("No guest found in room number {}", payload.room_number.trim()),
        )
        .with_detail("room_number", payload.room_number.trim()));
    }
    if payload.staff_id.as_deref().is_none_or(|s| s.trim().is_empty()) {
        return Err(required("staffId", "Please select a staff member"));
    }
    if payload.seat_ids.is_empty() {
        return Err(AppError::validation("Please select at least one seat")
            .with_detail("field", "seatIds"));
    }

    let timestamp = format_timestamp(now);
    let created = AllocationEvent::new(AllocationEventType::Created, timestamp.clone())
        .with_id(Uuid::new_v4().to_string())
        .with_description(format!(
            "Allocation created for {} in room {}",
            payload.guest_name.trim(),
            payload.room_number.trim()
        ));

    let allocation = Allocation {
        id: Uuid::new_v4().to_string(),
        property_id: Some(payload.property_id),
        guest_name: payload.guest_name.trim().to_string(),
        room_number: payload.room_number.trim().to_string(),
        guest_category: payload.guest_category,
        staff_id: payload.staff_id,
        seat_ids: payload.seat_ids,
        status: AllocationStatus::Allocated,
        calling_flag: CallingFlag::NonCalling,
        created_at: timestamp,
        updated_at: None,
        events: vec![created],
    };

    tracing::info!(
        allocation_id = %allocation.id,
        room_number = %allocation.room_number,
        seats = allocation.seat_ids.len(),
        "Allocation opened"
    );
    Ok(allocation)
}

fn status_change(
    allocation: &mut Allocation,
    status: AllocationStatus,
    timestamp: &str,
) -> AllocationEvent {
    let event = AllocationEvent::status_change(timestamp, allocation.status, status)
        .with_id(Uuid::new_v4().to_string());
    allocation.status = status;
    event
}

fn calling_on(allocation: &mut Allocation, flag: CallingFlag, timestamp: &str) -> AllocationEvent {
    allocation.calling_flag = flag;
    AllocationEvent::new(AllocationEventType::CallingOn, timestamp)
        .with_id(Uuid::new_v4().to_string())
        .with_description(format!("Calling flag set to {}", allocation.calling_flag))
}

fn calling_off(allocation: &mut Allocation, timestamp: &str) -> AllocationEvent {
    allocation.calling_flag = CallingFlag::NonCalling;
    AllocationEvent::new(AllocationEventType::CallingOff, timestamp)
        .with_id(Uuid::new_v4().to_string())
        .with_description("Calling flag cleared")
}

fn already_calling(allocation: &Allocation) -> AppError {
    AppError::with_message(
        ErrorCode::AlreadyCalling,
        format!("Calling flag is already set to {}", allocation.calling_flag),
    )
    .with_detail("calling_flag", allocation.calling_flag.as_str())
}

fn required(field: &str, message: &str) -> AppError {
    AppError::with_message(ErrorCode::RequiredField, message).with_detail("field", field)
}
