//! Request types for the scheduling engine API.
//!
//! This module defines the JSON request structures for the schedule
//! endpoints. Aggregates and shifts cross the boundary in their domain
//! shape; only the overtime override carries a raw mode string that is
//! validated on conversion.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{OvertimeMode, OvertimePolicy};
use crate::error::EngineResult;
use crate::models::{EmployeeShifts, WeekId};
use crate::schedule::{NotificationScope, ScheduleContext};

/// A per-request overtime policy override.
///
/// When present it replaces the policy resolved from the loaded
/// settings; the mode string is validated on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OvertimeOverride {
    /// `"weekly"` or `"daily"`.
    pub mode: String,
    /// Hours at the regular rate before overtime starts.
    pub hours_limit: Decimal,
    /// Overtime pay multiplier.
    pub multiplier: Decimal,
}

impl OvertimeOverride {
    /// Converts the override into a validated policy.
    pub fn into_policy(self) -> EngineResult<OvertimePolicy> {
        let mode: OvertimeMode = self.mode.parse()?;
        Ok(OvertimePolicy {
            mode,
            hours_limit: self.hours_limit,
            multiplier: self.multiplier,
        })
    }
}

/// Request body for the `/summary` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// Every employee aggregate for the week.
    pub aggregates: Vec<EmployeeShifts>,
    /// Projected sales for the labor percentage.
    #[serde(default)]
    pub projected_sales: Decimal,
    /// Optional overtime policy override.
    #[serde(default)]
    pub overtime: Option<OvertimeOverride>,
}

/// Request body for the `/publish` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    /// The operation context.
    pub context: ScheduleContext,
    /// Every employee aggregate for the week.
    pub aggregates: Vec<EmployeeShifts>,
    /// Which employees to notify after the commit.
    pub scope: NotificationScope,
    /// Every known employee id at the location (for the `all` scope).
    #[serde(default)]
    pub known_employee_ids: Vec<String>,
    /// Projected sales for the summary snapshot.
    #[serde(default)]
    pub projected_sales: Decimal,
    /// Optional overtime policy override.
    #[serde(default)]
    pub overtime: Option<OvertimeOverride>,
}

/// Request body for the `/unpublish` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnpublishRequest {
    /// The operation context.
    pub context: ScheduleContext,
    /// Every employee aggregate for the week.
    pub aggregates: Vec<EmployeeShifts>,
}

/// Request body for the `/clone` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloneWeekRequest {
    /// The operation context; its week is the clone destination.
    pub context: ScheduleContext,
    /// The week the shifts are cloned from.
    pub source_week_id: WeekId,
    /// The employees to clone shifts for.
    pub employee_ids: Vec<String>,
    /// The source week's aggregates (fully read before this call).
    pub sources: Vec<EmployeeShifts>,
    /// The destination week's existing aggregates, if any.
    #[serde(default)]
    pub destinations: Vec<EmployeeShifts>,
}
