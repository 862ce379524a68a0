//! Shift model and per-shift lifecycle.
//!
//! A [`Shift`] is one contiguous work interval for one employee. Shifts are
//! created as drafts, become published through the schedule orchestrator,
//! stage post-publish edits in a [`ShiftPatch`], and are soft-deleted once
//! published so the removal survives until the next publish.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::week::iso_weekday;

/// Serde adapter for the fixed `DD-MM-YYYY HH:mm` wall-clock format used
/// for shift start/end times at every external boundary.
pub mod shift_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    use crate::error::{EngineError, EngineResult};

    /// The wall-clock format shifts cross the boundary in.
    pub const FORMAT: &str = "%d-%m-%Y %H:%M";

    /// Parses a `DD-MM-YYYY HH:mm` string into a timestamp.
    pub fn parse(value: &str) -> EngineResult<NaiveDateTime> {
        NaiveDateTime::parse_from_str(value, FORMAT).map_err(|err| {
            EngineError::InvalidTimeFormat {
                value: value.to_string(),
                message: err.to_string(),
            }
        })
    }

    /// Formats a timestamp as a `DD-MM-YYYY HH:mm` string.
    pub fn format(value: &NaiveDateTime) -> String {
        value.format(FORMAT).to_string()
    }

    /// Serializes a timestamp in the fixed format.
    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    /// Deserializes a timestamp from the fixed format.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }

    /// Serde adapter for optional timestamps in the fixed format.
    pub mod opt {
        use super::{FORMAT, parse};
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer, de};

        /// Serializes an optional timestamp in the fixed format.
        pub fn serialize<S>(
            value: &Option<NaiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(dt) => serializer.serialize_some(&dt.format(FORMAT).to_string()),
                None => serializer.serialize_none(),
            }
        }

        /// Deserializes an optional timestamp from the fixed format.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            match raw {
                Some(s) => parse(&s).map(Some).map_err(de::Error::custom),
                None => Ok(None),
            }
        }
    }
}

/// Lifecycle status of a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    /// Not yet visible to the employee.
    Draft,
    /// Visible to the employee.
    Published,
}

/// A checklist item attached to a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTask {
    /// What needs to be done.
    pub name: String,
    /// Whether the task has been completed.
    pub status: bool,
}

/// A staged partial edit to an already-published shift.
///
/// Only the fields present in the patch change at the next publish; the
/// shift retains its last-published values until then.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftPatch {
    /// New start time, if edited.
    #[serde(default, with = "shift_time::opt", skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDateTime>,
    /// New end time, if edited.
    #[serde(default, with = "shift_time::opt", skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,
    /// New position label, if edited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// New break length in minutes, if edited.
    #[serde(default, rename = "break", skip_serializing_if = "Option::is_none")]
    pub break_minutes: Option<u32>,
    /// New hourly wage, if edited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_wage: Option<Decimal>,
    /// New notes, if edited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ShiftPatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges a later patch into this one, field-wise. Fields set in
    /// `other` win over fields set earlier.
    pub fn merge(&mut self, other: ShiftPatch) {
        if other.start.is_some() {
            self.start = other.start;
        }
        if other.end.is_some() {
            self.end = other.end;
        }
        if other.position.is_some() {
            self.position = other.position;
        }
        if other.break_minutes.is_some() {
            self.break_minutes = other.break_minutes;
        }
        if other.hourly_wage.is_some() {
            self.hourly_wage = other.hourly_wage;
        }
        if other.notes.is_some() {
            self.notes = other.notes;
        }
    }
}

/// One scheduled work interval for one employee.
///
/// # Example
///
/// ```
/// use roster_engine::models::{Shift, ShiftStatus, shift_time};
/// use rust_decimal::Decimal;
///
/// let mut shift = Shift {
///     id: "2-a1b2c3".to_string(),
///     employee_id: "emp_001".to_string(),
///     start: shift_time::parse("01-01-2024 22:00").unwrap(),
///     end: shift_time::parse("01-01-2024 02:00").unwrap(),
///     position: None,
///     break_minutes: 0,
///     hourly_wage: Some(Decimal::new(20, 0)),
///     notes: None,
///     tasks: Default::default(),
///     status: ShiftStatus::Draft,
///     pending_update: None,
///     deleting: false,
///     created_at: 0,
///     created_by: String::new(),
/// };
///
/// // The naive end appears before the start, so the shift crosses midnight.
/// shift.normalize();
/// assert_eq!(shift_time::format(&shift.end), "02-01-2024 02:00");
/// assert_eq!(shift.base_hours(), Decimal::new(4, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Composite identifier, `"{weekday}-{suffix}"`.
    pub id: String,
    /// The employee this shift belongs to.
    pub employee_id: String,
    /// Wall-clock start of the shift.
    #[serde(with = "shift_time")]
    pub start: NaiveDateTime,
    /// Wall-clock end of the shift.
    #[serde(with = "shift_time")]
    pub end: NaiveDateTime,
    /// Optional position label (e.g. "Bartender").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Unpaid break length in minutes.
    #[serde(default, rename = "break")]
    pub break_minutes: u32,
    /// Hourly wage; absent means unpaid/volunteer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_wage: Option<Decimal>,
    /// Free-form notes for the employee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Optional checklist attached to the shift, keyed by task id.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tasks: BTreeMap<String, ShiftTask>,
    /// Lifecycle status.
    pub status: ShiftStatus,
    /// Staged edit applied at the next publish.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_update: Option<ShiftPatch>,
    /// Marked for removal at the next publish.
    #[serde(default)]
    pub deleting: bool,
    /// Creation timestamp, epoch milliseconds.
    #[serde(default)]
    pub created_at: i64,
    /// The user that created the shift.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_by: String,
}

impl Shift {
    /// Generates a random id suffix for a new shift.
    ///
    /// Shift ids are composite: the ISO weekday index of the shift joined
    /// with this suffix (or an externally supplied one).
    pub fn new_id_suffix() -> String {
        Uuid::new_v4().simple().to_string()
    }

    /// Applies the midnight-crossing rule: if the naive end time is not
    /// after the start, the shift is assumed to cross midnight and one day
    /// is added to the end.
    pub fn normalize(&mut self) {
        if self.end <= self.start {
            self.end += Duration::days(1);
        }
    }

    /// Elapsed hours between start and end minus the break, as a decimal.
    ///
    /// Never negative: a break longer than the shift floors at zero.
    pub fn base_hours(&self) -> Decimal {
        let worked_minutes =
            ((self.end - self.start).num_minutes() - i64::from(self.break_minutes)).max(0);
        Decimal::new(worked_minutes, 0) / Decimal::new(60, 0)
    }

    /// The ISO weekday (Monday = 1) the shift starts on.
    pub fn iso_weekday(&self) -> u32 {
        iso_weekday(self.start.date())
    }

    /// Returns true if the shift has been published.
    pub fn is_published(&self) -> bool {
        self.status == ShiftStatus::Published
    }

    /// Returns true if a non-empty edit is staged on this shift.
    pub fn has_pending_update(&self) -> bool {
        self.pending_update
            .as_ref()
            .is_some_and(|patch| !patch.is_empty())
    }

    /// Stages an edit on the shift.
    ///
    /// Draft shifts apply the patch immediately; published shifts stage it
    /// into `pending_update` (merging with any already-staged edit) so the
    /// last-published fields stay visible until the next publish.
    pub fn stage_update(&mut self, patch: ShiftPatch) {
        if patch.is_empty() {
            return;
        }
        match self.status {
            ShiftStatus::Draft => self.apply_patch(&patch),
            ShiftStatus::Published => match &mut self.pending_update {
                Some(existing) => existing.merge(patch),
                None => self.pending_update = Some(patch),
            },
        }
    }

    /// Applies a patch to the shift's fields directly, re-normalizing the
    /// time range afterwards.
    pub fn apply_patch(&mut self, patch: &ShiftPatch) {
        if let Some(start) = patch.start {
            self.start = start;
        }
        if let Some(end) = patch.end {
            self.end = end;
        }
        if let Some(position) = &patch.position {
            self.position = Some(position.clone());
        }
        if let Some(break_minutes) = patch.break_minutes {
            self.break_minutes = break_minutes;
        }
        if let Some(hourly_wage) = patch.hourly_wage {
            self.hourly_wage = Some(hourly_wage);
        }
        if let Some(notes) = &patch.notes {
            self.notes = Some(notes.clone());
        }
        self.normalize();
    }

    /// The shift as it will look after the next publish: any staged edit
    /// applied, status published, patch cleared.
    pub fn published_view(&self) -> Shift {
        let mut published = self.clone();
        if let Some(patch) = published.pending_update.take() {
            published.apply_patch(&patch);
        }
        published.status = ShiftStatus::Published;
        published
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_time(s: &str) -> NaiveDateTime {
        shift_time::parse(s).unwrap()
    }

    fn make_shift(start: &str, end: &str) -> Shift {
        Shift {
            id: "1-abc".to_string(),
            employee_id: "emp_001".to_string(),
            start: make_time(start),
            end: make_time(end),
            position: None,
            break_minutes: 0,
            hourly_wage: Some(Decimal::new(20, 0)),
            notes: None,
            tasks: BTreeMap::new(),
            status: ShiftStatus::Draft,
            pending_update: None,
            deleting: false,
            created_at: 1_700_000_000_000,
            created_by: "mgr_001".to_string(),
        }
    }

    /// SH-001: day shift is unchanged by normalization
    #[test]
    fn test_normalize_keeps_day_shift() {
        let mut shift = make_shift("01-01-2024 09:00", "01-01-2024 17:00");
        shift.normalize();
        assert_eq!(shift.end, make_time("01-01-2024 17:00"));
    }

    /// SH-002: end before start crosses midnight
    #[test]
    fn test_normalize_midnight_crossing() {
        let mut shift = make_shift("01-01-2024 22:00", "01-01-2024 02:00");
        shift.normalize();
        assert_eq!(shift.end, make_time("02-01-2024 02:00"));
        assert!(shift.end > shift.start);
    }

    /// SH-003: end equal to start is treated as crossing midnight
    #[test]
    fn test_normalize_equal_times() {
        let mut shift = make_shift("01-01-2024 09:00", "01-01-2024 09:00");
        shift.normalize();
        assert_eq!(shift.end, make_time("02-01-2024 09:00"));
    }

    /// SH-004: base hours subtract the break
    #[test]
    fn test_base_hours_with_break() {
        let mut shift = make_shift("01-01-2024 09:00", "01-01-2024 17:30");
        shift.break_minutes = 30;
        assert_eq!(shift.base_hours(), Decimal::new(8, 0));
    }

    /// SH-005: break longer than the shift floors at zero
    #[test]
    fn test_base_hours_never_negative() {
        let mut shift = make_shift("01-01-2024 09:00", "01-01-2024 10:00");
        shift.break_minutes = 120;
        assert_eq!(shift.base_hours(), Decimal::ZERO);
    }

    #[test]
    fn test_base_hours_fractional() {
        let shift = make_shift("01-01-2024 09:00", "01-01-2024 13:45");
        assert_eq!(shift.base_hours(), Decimal::new(475, 2)); // 4.75
    }

    #[test]
    fn test_iso_weekday() {
        // 01-01-2024 is a Monday
        let shift = make_shift("01-01-2024 09:00", "01-01-2024 17:00");
        assert_eq!(shift.iso_weekday(), 1);
        let sunday = make_shift("07-01-2024 09:00", "07-01-2024 17:00");
        assert_eq!(sunday.iso_weekday(), 7);
    }

    /// SH-006: editing a draft applies immediately
    #[test]
    fn test_stage_update_on_draft_applies_directly() {
        let mut shift = make_shift("01-01-2024 09:00", "01-01-2024 17:00");
        shift.stage_update(ShiftPatch {
            position: Some("Bartender".to_string()),
            ..Default::default()
        });
        assert_eq!(shift.position.as_deref(), Some("Bartender"));
        assert!(shift.pending_update.is_none());
    }

    /// SH-007: editing a published shift stages the patch
    #[test]
    fn test_stage_update_on_published_stages_patch() {
        let mut shift = make_shift("01-01-2024 09:00", "01-01-2024 17:00");
        shift.status = ShiftStatus::Published;
        shift.stage_update(ShiftPatch {
            hourly_wage: Some(Decimal::new(25, 0)),
            ..Default::default()
        });
        // Last-published fields stay in place until publish
        assert_eq!(shift.hourly_wage, Some(Decimal::new(20, 0)));
        assert!(shift.has_pending_update());
    }

    /// SH-008: staging twice merges field-wise, later patch wins
    #[test]
    fn test_stage_update_merges_patches() {
        let mut shift = make_shift("01-01-2024 09:00", "01-01-2024 17:00");
        shift.status = ShiftStatus::Published;
        shift.stage_update(ShiftPatch {
            position: Some("Host".to_string()),
            hourly_wage: Some(Decimal::new(22, 0)),
            ..Default::default()
        });
        shift.stage_update(ShiftPatch {
            hourly_wage: Some(Decimal::new(25, 0)),
            ..Default::default()
        });
        let staged = shift.pending_update.as_ref().unwrap();
        assert_eq!(staged.position.as_deref(), Some("Host"));
        assert_eq!(staged.hourly_wage, Some(Decimal::new(25, 0)));
    }

    #[test]
    fn test_stage_update_ignores_empty_patch() {
        let mut shift = make_shift("01-01-2024 09:00", "01-01-2024 17:00");
        shift.status = ShiftStatus::Published;
        shift.stage_update(ShiftPatch::default());
        assert!(shift.pending_update.is_none());
    }

    /// SH-009: published view applies the staged edit and clears it
    #[test]
    fn test_published_view_applies_pending_update() {
        let mut shift = make_shift("01-01-2024 09:00", "01-01-2024 17:00");
        shift.status = ShiftStatus::Published;
        shift.stage_update(ShiftPatch {
            end: Some(make_time("01-01-2024 18:00")),
            hourly_wage: Some(Decimal::new(25, 0)),
            ..Default::default()
        });

        let published = shift.published_view();
        assert_eq!(published.end, make_time("01-01-2024 18:00"));
        assert_eq!(published.hourly_wage, Some(Decimal::new(25, 0)));
        assert_eq!(published.status, ShiftStatus::Published);
        assert!(published.pending_update.is_none());
        // The source shift is untouched
        assert_eq!(shift.end, make_time("01-01-2024 17:00"));
    }

    /// SH-010: published view of a draft just publishes it
    #[test]
    fn test_published_view_of_draft() {
        let shift = make_shift("01-01-2024 09:00", "01-01-2024 17:00");
        let published = shift.published_view();
        assert_eq!(published.status, ShiftStatus::Published);
        assert_eq!(published.start, shift.start);
    }

    /// SH-011: patching the end across midnight re-normalizes
    #[test]
    fn test_apply_patch_renormalizes() {
        let mut shift = make_shift("01-01-2024 18:00", "01-01-2024 23:00");
        shift.apply_patch(&ShiftPatch {
            end: Some(make_time("01-01-2024 01:00")),
            ..Default::default()
        });
        assert_eq!(shift.end, make_time("02-01-2024 01:00"));
    }

    #[test]
    fn test_serialization_uses_wall_clock_format() {
        let shift = make_shift("05-06-2024 09:00", "05-06-2024 17:00");
        let json = serde_json::to_string(&shift).unwrap();
        assert!(json.contains("\"start\":\"05-06-2024 09:00\""));
        assert!(json.contains("\"end\":\"05-06-2024 17:00\""));
        assert!(json.contains("\"status\":\"draft\""));
    }

    #[test]
    fn test_deserialization_round_trip() {
        let mut shift = make_shift("05-06-2024 09:00", "05-06-2024 17:00");
        shift.tasks.insert(
            "t1".to_string(),
            ShiftTask {
                name: "Restock bar".to_string(),
                status: false,
            },
        );
        shift.pending_update = Some(ShiftPatch {
            start: Some(make_time("05-06-2024 10:00")),
            ..Default::default()
        });
        let json = serde_json::to_string(&shift).unwrap();
        let back: Shift = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shift);
    }

    #[test]
    fn test_deserialization_rejects_bad_time_format() {
        let json = r#"{
            "id": "1-abc",
            "employee_id": "emp_001",
            "start": "2024-06-05T09:00:00",
            "end": "05-06-2024 17:00",
            "status": "draft"
        }"#;
        let result: Result<Shift, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_time() {
        let err = shift_time::parse("05-06-2024 9am").unwrap_err();
        assert!(err.to_string().contains("05-06-2024 9am"));
    }

    #[test]
    fn test_new_id_suffix_is_unique() {
        assert_ne!(Shift::new_id_suffix(), Shift::new_id_suffix());
    }
}
