//! Week publish and unpublish orchestration.
//!
//! Publishing applies every staged change for a week in one atomic batch:
//! drafts become visible, staged edits land, soft-deleted shifts are
//! removed, and the recomputed week summary is snapshotted alongside. The
//! engine assembles the batch and the matching local state; committing is
//! the document-store collaborator's job, so a failed commit leaves the
//! in-memory aggregates untouched and the whole publish retryable.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{OvertimePolicy, aggregate_week};
use crate::error::{EngineError, EngineResult};
use crate::models::{DocumentRef, EmployeeShifts, FieldOp, WeekSummary, WriteBatch};

use super::context::{NotificationScope, ScheduleContext, notification_recipients};

/// Everything a publish produces: the server batch, the summary snapshot
/// it contains, the notification recipients, and the post-publish local
/// aggregates.
///
/// The caller applies `updated` speculatively and reverts to the prior
/// aggregates if the batch commit fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishPlan {
    /// The atomic batch for the document-store collaborator.
    pub batch: WriteBatch,
    /// The week summary snapshotted in the batch.
    pub summary: WeekSummary,
    /// Employee ids to notify once the commit succeeds.
    pub recipients: Vec<String>,
    /// The aggregates as they will look after the commit.
    pub updated: Vec<EmployeeShifts>,
}

/// The unpublish counterpart of [`PublishPlan`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnpublishPlan {
    /// The atomic batch reverting every shift to draft.
    pub batch: WriteBatch,
    /// The aggregates as they will look after the commit.
    pub updated: Vec<EmployeeShifts>,
}

fn validate_week(ctx: &ScheduleContext, aggregates: &[EmployeeShifts]) -> EngineResult<()> {
    ctx.validate()?;
    for aggregate in aggregates {
        if aggregate.week_id != ctx.week_id {
            return Err(EngineError::WeekMismatch {
                employee_id: aggregate.employee_id.clone(),
                found: aggregate.week_id.to_string(),
                expected: ctx.week_id.to_string(),
            });
        }
    }
    Ok(())
}

/// Publishes a week: one atomic batch carrying every aggregate's staged
/// changes plus the week-summary snapshot.
///
/// Validation failures (missing location, mismatched week, zero shifts
/// overall) are returned before any batch is assembled. Publishing is
/// idempotent: re-publishing an unchanged week produces a batch with no
/// shift mutations and an identical summary.
pub fn publish(
    ctx: &ScheduleContext,
    aggregates: &[EmployeeShifts],
    scope: NotificationScope,
    known_employee_ids: &[String],
    projected_sales: Decimal,
    policy: Option<&OvertimePolicy>,
    now_ms: i64,
) -> EngineResult<PublishPlan> {
    validate_week(ctx, aggregates)?;
    if aggregates.iter().all(EmployeeShifts::is_empty) {
        return Err(EngineError::NothingToPublish {
            week_id: ctx.week_id.to_string(),
        });
    }

    let recipients = notification_recipients(scope, known_employee_ids, aggregates);

    let mut batch = WriteBatch::new();
    for aggregate in aggregates {
        aggregate.contribute_to_publish_batch(&mut batch);
    }

    // The snapshot reflects the week as it will stand once the batch
    // commits: staged edits applied, soft-deleted shifts gone.
    let updated: Vec<EmployeeShifts> = aggregates
        .iter()
        .map(|agg| agg.published_view(now_ms))
        .collect();
    let summary = aggregate_week(&updated, projected_sales, policy);

    let summary_doc = DocumentRef::week_summary(&ctx.location_id, &ctx.week_id);
    let value = serde_json::to_value(&summary).expect("summary serialization is infallible");
    batch.set_field(summary_doc.clone(), "summary", FieldOp::Set(value));
    batch.set_field(summary_doc, "updatedAt", FieldOp::ServerTimestamp);

    Ok(PublishPlan {
        batch,
        summary,
        recipients,
        updated,
    })
}

/// Unpublishes a week: one atomic batch reverting every shift to draft.
///
/// Staged edits and pending deletions are left in place on the reverted
/// shifts.
pub fn unpublish(
    ctx: &ScheduleContext,
    aggregates: &[EmployeeShifts],
    now_ms: i64,
) -> EngineResult<UnpublishPlan> {
    validate_week(ctx, aggregates)?;

    let mut batch = WriteBatch::new();
    for aggregate in aggregates {
        aggregate.contribute_to_unpublish_batch(&mut batch);
    }

    let updated = aggregates
        .iter()
        .map(|agg| agg.unpublished_view(now_ms))
        .collect();

    Ok(UnpublishPlan { batch, updated })
}
