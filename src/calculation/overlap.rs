//! Shift overlap detection.
//!
//! Overlap checks are advisory: the engine reports a conflict for the
//! caller/UI to act on but never blocks shift creation on one.

use chrono::NaiveDateTime;

use crate::models::Shift;

/// Reports whether a candidate time range conflicts with any existing
/// shift.
///
/// Two shifts overlap when either candidate boundary falls inclusively
/// within an existing shift's `[start, end]` interval. The interval is
/// closed on both ends, so touching boundaries count as overlap. The
/// shift identified by `exclude_shift_id` is skipped, which allows
/// validating an edit to an existing shift against its siblings.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::has_overlap;
/// use roster_engine::models::shift_time;
///
/// let start = shift_time::parse("01-01-2024 16:00").unwrap();
/// let end = shift_time::parse("01-01-2024 20:00").unwrap();
/// assert!(!has_overlap(start, end, None, &[]));
/// ```
pub fn has_overlap<'a>(
    candidate_start: NaiveDateTime,
    candidate_end: NaiveDateTime,
    exclude_shift_id: Option<&str>,
    shifts: impl IntoIterator<Item = &'a Shift>,
) -> bool {
    shifts
        .into_iter()
        .filter(|shift| exclude_shift_id != Some(shift.id.as_str()))
        .any(|shift| {
            let within = |t: NaiveDateTime| t >= shift.start && t <= shift.end;
            within(candidate_start) || within(candidate_end)
        })
}
