//! Cloning one week's shifts into another.
//!
//! Cloning copies the stable part of a source week (shifts that are
//! published, not pending deletion, and free of staged edits) into the
//! week being edited, offset by the calendar distance between the two
//! weeks and reset to draft.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeShifts, FieldOp, ShiftStatus, WeekId, WriteBatch};

use super::context::ScheduleContext;

/// Maximum employee ids per source-week read, matching typical `in`-query
/// parameter limits.
pub const EMPLOYEE_QUERY_CHUNK: usize = 10;

/// Splits employee ids into groups of [`EMPLOYEE_QUERY_CHUNK`] for the
/// caller's source-week reads.
///
/// The reads may run concurrently, but every chunk must complete before
/// [`clone_week`] is invoked: no shift may be cloned from a partial
/// read.
pub fn chunk_employee_ids(employee_ids: &[String]) -> Vec<Vec<String>> {
    employee_ids
        .chunks(EMPLOYEE_QUERY_CHUNK)
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Everything a clone produces: the server batch and the post-clone
/// destination aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClonePlan {
    /// The atomic batch inserting the cloned draft shifts.
    pub batch: WriteBatch,
    /// The destination aggregates as they will look after the commit
    /// (one per employee that received at least one shift).
    pub updated: Vec<EmployeeShifts>,
    /// Total shifts cloned across all employees.
    pub cloned_shifts: u32,
}

/// Clones eligible shifts from a source week into the context's week.
///
/// A source shift is eligible when it is published, not pending deletion,
/// carries no staged edit, and its id is absent from the destination
/// aggregate. Eligible shifts move by the whole-week distance between the
/// two weeks' first days, reset to draft with fresh creation metadata
/// attributed to the acting user. Employees with no eligible shifts are
/// skipped entirely.
pub fn clone_week(
    ctx: &ScheduleContext,
    source_week_id: &WeekId,
    employee_ids: &[String],
    sources: &[EmployeeShifts],
    destinations: &[EmployeeShifts],
    now_ms: i64,
) -> EngineResult<ClonePlan> {
    ctx.validate()?;
    for source in sources {
        if source.week_id != *source_week_id {
            return Err(EngineError::WeekMismatch {
                employee_id: source.employee_id.clone(),
                found: source.week_id.to_string(),
                expected: source_week_id.to_string(),
            });
        }
    }
    for destination in destinations {
        if destination.week_id != ctx.week_id {
            return Err(EngineError::WeekMismatch {
                employee_id: destination.employee_id.clone(),
                found: destination.week_id.to_string(),
                expected: ctx.week_id.to_string(),
            });
        }
    }

    // Both first days are Mondays, so the distance is a whole number of
    // weeks, signed toward the destination.
    let weeks_diff =
        (ctx.week_id.first_day() - source_week_id.first_day()).num_days() / 7;
    let offset = Duration::weeks(weeks_diff);

    let mut batch = WriteBatch::new();
    let mut updated = Vec::new();
    let mut cloned_shifts = 0u32;

    for employee_id in employee_ids {
        let Some(source) = sources.iter().find(|agg| agg.employee_id == *employee_id) else {
            continue;
        };

        let mut destination = destinations
            .iter()
            .find(|agg| agg.employee_id == *employee_id)
            .cloned()
            .unwrap_or_else(|| {
                EmployeeShifts::new(
                    employee_id.clone(),
                    ctx.week_id.clone(),
                    ctx.location_id.clone(),
                )
            });

        let eligible: Vec<_> = source
            .shifts
            .values()
            .filter(|shift| {
                shift.is_published()
                    && !shift.deleting
                    && !shift.has_pending_update()
                    && !destination.shifts.contains_key(&shift.id)
            })
            .cloned()
            .collect();
        if eligible.is_empty() {
            continue;
        }

        let doc = destination.document_ref();
        for mut shift in eligible {
            shift.start += offset;
            shift.end += offset;
            shift.status = ShiftStatus::Draft;
            shift.pending_update = None;
            shift.deleting = false;
            shift.created_at = now_ms;
            shift.created_by = ctx.acting_user_id.clone();

            let value =
                serde_json::to_value(&shift).expect("shift serialization is infallible");
            batch.set_field(doc.clone(), format!("shifts.{}", shift.id), FieldOp::Set(value));
            destination.insert_shift(shift, now_ms);
            cloned_shifts += 1;
        }
        batch.set_field(doc, "updatedAt", FieldOp::ServerTimestamp);
        updated.push(destination);
    }

    Ok(ClonePlan {
        batch,
        updated,
        cloned_shifts,
    })
}
