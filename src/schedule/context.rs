//! Explicit operation context and notification scoping.
//!
//! Every orchestrator operation receives a [`ScheduleContext`] naming the
//! organization, location, week, and acting user; nothing is read from
//! ambient global state.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeShifts, WeekId};

/// The explicit context threaded through every schedule operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleContext {
    /// The organization the schedule belongs to.
    pub organization_id: String,
    /// The location whose week is being operated on.
    pub location_id: String,
    /// The week being operated on.
    pub week_id: WeekId,
    /// The user performing the operation; recorded as authorship on
    /// anything the operation creates.
    pub acting_user_id: String,
}

impl ScheduleContext {
    /// Validates the context before any batch is assembled.
    pub fn validate(&self) -> EngineResult<()> {
        if self.location_id.trim().is_empty() {
            return Err(EngineError::MissingLocation);
        }
        Ok(())
    }
}

/// Which employees are notified after a successful publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationScope {
    /// Every known employee at the location.
    All,
    /// Employees with at least one shift in the week.
    AllScheduled,
    /// Employees whose aggregate has unpublished changes.
    Changed,
    /// Nobody.
    None,
}

/// Computes the employee ids to notify after a successful publish.
///
/// The engine only produces the list; delivering notifications is an
/// external collaborator's concern.
pub fn notification_recipients(
    scope: NotificationScope,
    known_employee_ids: &[String],
    aggregates: &[EmployeeShifts],
) -> Vec<String> {
    match scope {
        NotificationScope::All => known_employee_ids.to_vec(),
        NotificationScope::AllScheduled => aggregates
            .iter()
            .filter(|agg| !agg.is_empty())
            .map(|agg| agg.employee_id.clone())
            .collect(),
        NotificationScope::Changed => aggregates
            .iter()
            .filter(|agg| agg.has_unpublished_changes())
            .map(|agg| agg.employee_id.clone())
            .collect(),
        NotificationScope::None => Vec::new(),
    }
}
