//! The per-employee weekly shift aggregate.
//!
//! An [`EmployeeShifts`] holds every shift for one employee, in one week,
//! at one location. It owns overlap detection, per-employee wage
//! summation, and the per-shift contributions to publish/unpublish
//! batches.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::calculation::{OvertimePolicy, calculate_wage, has_overlap, shift_breakdowns};
use crate::models::batch::{DocumentRef, FieldOp, WriteBatch};
use crate::models::week::{WeekId, iso_weekday};
use crate::models::week_summary::EmployeeWageSummary;
use crate::models::{Shift, ShiftStatus, WageTotals};

/// Wage data computed by [`EmployeeShifts::calculate_wage_data`] and held
/// until the aggregate is next mutated.
#[derive(Debug, Clone, Default)]
struct WageData {
    per_shift: BTreeMap<String, WageTotals>,
    summary: EmployeeWageSummary,
}

/// All shifts for one employee, in one week, at one location.
///
/// Created lazily the first time a shift is added for an employee/week
/// pair, and never deleted explicitly; an empty aggregate is inert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeShifts {
    /// The employee all contained shifts belong to.
    pub employee_id: String,
    /// The ISO week the shifts fall in.
    pub week_id: WeekId,
    /// The location the shifts are scheduled at.
    pub location_id: String,
    /// The contained shifts, keyed by shift id.
    #[serde(default)]
    pub shifts: BTreeMap<String, Shift>,
    /// Last modification time, epoch milliseconds.
    #[serde(default)]
    pub updated_at: i64,
    #[serde(skip)]
    wage_data: Option<WageData>,
}

impl PartialEq for EmployeeShifts {
    fn eq(&self, other: &Self) -> bool {
        // The wage cache is derived state and does not participate
        self.employee_id == other.employee_id
            && self.week_id == other.week_id
            && self.location_id == other.location_id
            && self.shifts == other.shifts
            && self.updated_at == other.updated_at
    }
}

impl EmployeeShifts {
    /// Creates an empty aggregate for an employee/week/location triple.
    pub fn new(
        employee_id: impl Into<String>,
        week_id: WeekId,
        location_id: impl Into<String>,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            week_id,
            location_id: location_id.into(),
            shifts: BTreeMap::new(),
            updated_at: 0,
            wage_data: None,
        }
    }

    /// The document this aggregate is persisted under.
    pub fn document_ref(&self) -> DocumentRef {
        DocumentRef::employee_shifts(&self.location_id, &self.week_id, &self.employee_id)
    }

    /// Number of contained shifts, deleted-pending included.
    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    /// Returns true if the aggregate contains no shifts at all.
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    fn touch(&mut self, now_ms: i64) {
        self.updated_at = now_ms;
        self.wage_data = None;
    }

    /// Inserts a ready-made shift, keyed by its id.
    pub fn insert_shift(&mut self, shift: Shift, now_ms: i64) {
        self.shifts.insert(shift.id.clone(), shift);
        self.touch(now_ms);
    }

    /// Creates draft shifts from a template, one per requested ISO
    /// weekday.
    ///
    /// For each weekday in `apply_to_weekdays`, the calendar date in
    /// `target_dates` with that ISO weekday is located, the template's
    /// times-of-day are re-anchored onto it, the midnight-crossing rule is
    /// applied, and the resulting shift is inserted keyed
    /// `"{weekday}-{id_suffix}"` in draft status. A weekday with no
    /// matching date is silently skipped.
    pub fn add_shift(
        &mut self,
        template: &Shift,
        target_dates: &[NaiveDate],
        apply_to_weekdays: &[u32],
        id_suffix: &str,
        actor: &str,
        now_ms: i64,
    ) {
        let start_time = template.start.time();
        let end_time = template.end.time();

        for &weekday in apply_to_weekdays {
            let Some(date) = target_dates.iter().find(|d| iso_weekday(**d) == weekday) else {
                continue;
            };

            let mut shift = template.clone();
            shift.id = format!("{weekday}-{id_suffix}");
            shift.employee_id = self.employee_id.clone();
            shift.start = date.and_time(start_time);
            shift.end = date.and_time(end_time);
            shift.status = ShiftStatus::Draft;
            shift.pending_update = None;
            shift.deleting = false;
            shift.created_at = now_ms;
            shift.created_by = actor.to_string();
            shift.normalize();

            self.shifts.insert(shift.id.clone(), shift);
        }
        self.touch(now_ms);
    }

    /// Deletes a shift: a draft is removed immediately, a published shift
    /// is soft-deleted and survives until the next publish.
    pub fn delete_shift(&mut self, shift_id: &str, now_ms: i64) {
        let Some(shift) = self.shifts.get_mut(shift_id) else {
            return;
        };
        if shift.is_published() {
            shift.deleting = true;
        } else {
            self.shifts.remove(shift_id);
        }
        self.touch(now_ms);
    }

    /// Stages an edit on a contained shift (drafts change immediately,
    /// published shifts hold the edit in `pending_update`).
    pub fn edit_shift(&mut self, shift_id: &str, patch: crate::models::ShiftPatch, now_ms: i64) {
        if let Some(shift) = self.shifts.get_mut(shift_id) {
            shift.stage_update(patch);
            self.touch(now_ms);
        }
    }

    /// Reports whether a candidate range conflicts with any contained
    /// shift (closed-interval check, advisory only).
    pub fn has_overlap(
        &self,
        candidate_start: NaiveDateTime,
        candidate_end: NaiveDateTime,
        exclude_shift_id: Option<&str>,
    ) -> bool {
        has_overlap(
            candidate_start,
            candidate_end,
            exclude_shift_id,
            self.shifts.values(),
        )
    }

    /// Returns true if publishing this aggregate would change anything:
    /// any shift is pending deletion, carries a staged edit, or is still
    /// a draft.
    pub fn has_unpublished_changes(&self) -> bool {
        self.shifts
            .values()
            .any(|s| s.deleting || s.has_pending_update() || !s.is_published())
    }

    /// The shifts that participate in wage aggregation, in chronological
    /// order: everything not pending deletion.
    fn billable_shifts(&self) -> Vec<&Shift> {
        let mut shifts: Vec<&Shift> = self.shifts.values().filter(|s| !s.deleting).collect();
        shifts.sort_by_key(|s| s.start);
        shifts
    }

    /// Recomputes wage data for every contained shift under the given
    /// overtime policy and memoizes the result until the next mutation.
    ///
    /// In weekly mode, hours accumulate across the employee's shifts in
    /// chronological order; in daily mode the cap applies to each shift
    /// independently. The overtime premium rate is derived from the
    /// employee's weighted average regular rate for the week, computed
    /// before any per-shift breakdown.
    pub fn calculate_wage_data(&mut self, policy: Option<&OvertimePolicy>) -> EmployeeWageSummary {
        let mut data = WageData::default();
        for (shift, totals) in shift_breakdowns(self.shifts.values(), policy) {
            data.summary.totals.accumulate(&totals);
            data.summary.total_shifts += 1;
            data.per_shift.insert(shift.id.clone(), totals);
        }

        let summary = data.summary.clone();
        self.wage_data = Some(data);
        summary
    }

    /// The employee's wage summary for the week.
    ///
    /// Returns the memoized result of the last [`calculate_wage_data`]
    /// call if the aggregate has not been mutated since; otherwise
    /// computes a summary with no overtime policy in effect.
    ///
    /// [`calculate_wage_data`]: EmployeeShifts::calculate_wage_data
    pub fn wage_summary(&self) -> EmployeeWageSummary {
        if let Some(data) = &self.wage_data {
            return data.summary.clone();
        }
        let mut summary = EmployeeWageSummary::default();
        for shift in self.billable_shifts() {
            summary.totals.accumulate(&calculate_wage(shift, None));
            summary.total_shifts += 1;
        }
        summary
    }

    /// The wage breakdown computed for one shift by the last
    /// [`calculate_wage_data`] call.
    ///
    /// [`calculate_wage_data`]: EmployeeShifts::calculate_wage_data
    pub fn shift_wage(&self, shift_id: &str) -> Option<&WageTotals> {
        self.wage_data.as_ref()?.per_shift.get(shift_id)
    }

    /// Emits this aggregate's contribution to a publish batch.
    ///
    /// Shifts pending deletion emit a key deletion; shifts not yet
    /// published or carrying a staged edit emit a set of their published
    /// view; published shifts with no pending change emit nothing. Any
    /// emission also stamps the document's `updatedAt` with the store's
    /// server timestamp.
    pub fn contribute_to_publish_batch(&self, batch: &mut WriteBatch) {
        let doc = self.document_ref();
        let mut changed = false;

        for (id, shift) in &self.shifts {
            if shift.deleting {
                batch.set_field(doc.clone(), format!("shifts.{id}"), FieldOp::Delete);
                changed = true;
            } else if !shift.is_published() || shift.has_pending_update() {
                let published = shift.published_view();
                let value = serde_json::to_value(&published)
                    .expect("shift serialization is infallible");
                batch.set_field(doc.clone(), format!("shifts.{id}"), FieldOp::Set(value));
                changed = true;
            }
        }

        if changed {
            batch.set_field(doc, "updatedAt", FieldOp::ServerTimestamp);
        }
    }

    /// Emits this aggregate's contribution to an unpublish batch: every
    /// shift's status reverts to draft.
    pub fn contribute_to_unpublish_batch(&self, batch: &mut WriteBatch) {
        let doc = self.document_ref();
        for id in self.shifts.keys() {
            batch.set_field(
                doc.clone(),
                format!("shifts.{id}.status"),
                FieldOp::Set("draft".into()),
            );
        }
        if !self.shifts.is_empty() {
            batch.set_field(doc, "updatedAt", FieldOp::ServerTimestamp);
        }
    }

    /// The aggregate as it will look once a publish batch commits:
    /// soft-deleted shifts removed, staged edits applied, everything
    /// published.
    ///
    /// This is the local half of the publish command: the caller applies
    /// it speculatively and reverts to the prior state if the server
    /// commit fails.
    pub fn published_view(&self, now_ms: i64) -> EmployeeShifts {
        let mut view = self.clone();
        view.shifts = self
            .shifts
            .iter()
            .filter(|(_, shift)| !shift.deleting)
            .map(|(id, shift)| (id.clone(), shift.published_view()))
            .collect();
        view.touch(now_ms);
        view
    }

    /// The aggregate as it will look once an unpublish batch commits:
    /// every shift back in draft. Staged edits and deletion marks are
    /// preserved.
    pub fn unpublished_view(&self, now_ms: i64) -> EmployeeShifts {
        let mut view = self.clone();
        for shift in view.shifts.values_mut() {
            shift.status = ShiftStatus::Draft;
        }
        view.touch(now_ms);
        view
    }
}
