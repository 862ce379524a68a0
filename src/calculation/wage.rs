//! Overtime-aware wage calculation.
//!
//! This module computes the hour/wage breakdown for a single shift, with
//! or without an overtime policy in effect. Overtime premiums are paid at
//! the employee's effective weighted average regular rate for the week
//! rather than the individual shift's own rate, so the weekly average must
//! be computed before any per-shift overtime.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{Shift, WageTotals};

/// How the overtime hour cap is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OvertimeMode {
    /// The cap applies to cumulative hours across the week, in shift
    /// chronological order.
    Weekly,
    /// The cap applies to each shift independently.
    Daily,
}

impl fmt::Display for OvertimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OvertimeMode::Weekly => write!(f, "weekly"),
            OvertimeMode::Daily => write!(f, "daily"),
        }
    }
}

impl FromStr for OvertimeMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(OvertimeMode::Weekly),
            "daily" => Ok(OvertimeMode::Daily),
            other => Err(EngineError::InvalidOvertimeMode {
                mode: other.to_string(),
            }),
        }
    }
}

/// An overtime policy: hours beyond the cap are paid at a premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimePolicy {
    /// Whether the cap is weekly-cumulative or per-shift.
    pub mode: OvertimeMode,
    /// Hours at the regular rate before overtime starts.
    pub hours_limit: Decimal,
    /// Overtime pay multiplier (e.g. 1.5 for time-and-a-half).
    pub multiplier: Decimal,
}

/// Per-shift context for an overtime calculation.
///
/// `average_rate` is the employee's effective weighted average regular
/// rate for the week (total base wage divided by total base hours across
/// all non-deleted shifts), computed once per employee before any
/// per-shift overtime. The overtime premium on top of a shift's own base
/// pay is `average_rate * (multiplier - 1)` per overtime hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OvertimeContext {
    /// The policy in effect.
    pub policy: OvertimePolicy,
    /// Hours already accumulated this week before this shift (ignored in
    /// daily mode, where the cap applies per shift).
    pub accumulated_hours: Decimal,
    /// The employee's weighted average regular rate for the week.
    pub average_rate: Decimal,
}

impl OvertimeContext {
    /// The premium-only hourly rate paid on top of base pay for overtime
    /// hours.
    pub fn premium_rate(&self) -> Decimal {
        self.average_rate * (self.policy.multiplier - Decimal::ONE)
    }
}

/// Computes the effective weighted average regular rate across a week's
/// shifts: total base wage over total base hours, ignoring `deleting`
/// shifts. Returns zero when no hours are scheduled.
pub fn average_regular_rate<'a>(shifts: impl IntoIterator<Item = &'a Shift>) -> Decimal {
    let mut total_hours = Decimal::ZERO;
    let mut total_wage = Decimal::ZERO;
    for shift in shifts.into_iter().filter(|s| !s.deleting) {
        let hours = shift.base_hours();
        total_hours += hours;
        if let Some(rate) = shift.hourly_wage {
            total_wage += hours * rate;
        }
    }
    if total_hours.is_zero() {
        Decimal::ZERO
    } else {
        total_wage / total_hours
    }
}

/// Computes the hour/wage breakdown for one shift.
///
/// Without a context every hour is a normal hour. With a context, the
/// portion of this shift's hours beyond the policy's cap (given the hours
/// already accumulated this week; daily mode treats every shift
/// independently) is overtime, paid at the shift's own rate plus the
/// week-average premium rate. A shift with no hourly wage contributes
/// zero wage regardless of hours.
///
/// # Examples
///
/// ```
/// use roster_engine::calculation::{
///     calculate_wage, OvertimeContext, OvertimeMode, OvertimePolicy,
/// };
/// use roster_engine::models::{Shift, ShiftStatus, shift_time};
/// use rust_decimal::Decimal;
///
/// let shift = Shift {
///     id: "2-a".to_string(),
///     employee_id: "emp_001".to_string(),
///     start: shift_time::parse("02-01-2024 09:00").unwrap(),
///     end: shift_time::parse("02-01-2024 17:00").unwrap(),
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
/// // 8 hours into a week already holding 8, capped at 10: 6 hours overtime.
/// let ctx = OvertimeContext {
///     policy: OvertimePolicy {
///         mode: OvertimeMode::Weekly,
///         hours_limit: Decimal::new(10, 0),
///         multiplier: Decimal::new(15, 1),
///     },
///     accumulated_hours: Decimal::new(8, 0),
///     average_rate: Decimal::new(20, 0),
/// };
/// let totals = calculate_wage(&shift, Some(&ctx));
/// assert_eq!(totals.normal_hours, Decimal::new(2, 0));
/// assert_eq!(totals.overtime_hours, Decimal::new(6, 0));
/// assert_eq!(totals.total_wage, Decimal::new(220, 0)); // 2*20 + 6*30
/// ```
pub fn calculate_wage(shift: &Shift, context: Option<&OvertimeContext>) -> WageTotals {
    let base_hours = shift.base_hours();
    let rate = shift.hourly_wage.unwrap_or(Decimal::ZERO);

    let (normal_hours, overtime_hours) = match context {
        None => (base_hours, Decimal::ZERO),
        Some(ctx) => {
            let accumulated = match ctx.policy.mode {
                OvertimeMode::Weekly => ctx.accumulated_hours,
                OvertimeMode::Daily => Decimal::ZERO,
            };
            let overtime = (accumulated + base_hours - ctx.policy.hours_limit)
                .max(Decimal::ZERO)
                .min(base_hours);
            (base_hours - overtime, overtime)
        }
    };

    // An unpaid shift contributes zero wage regardless of hours, premium
    // included.
    let (normal_wage, overtime_wage) = if shift.hourly_wage.is_none() {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        let premium_rate = context.map_or(Decimal::ZERO, OvertimeContext::premium_rate);
        (
            normal_hours * rate,
            overtime_hours * (rate + premium_rate),
        )
    };

    WageTotals {
        normal_hours,
        overtime_hours,
        total_hours: normal_hours + overtime_hours,
        normal_wage,
        overtime_wage,
        total_wage: normal_wage + overtime_wage,
    }
}

/// Computes per-shift wage breakdowns for one employee's week, in shift
/// chronological order.
///
/// Shifts pending deletion are excluded. The weighted average regular
/// rate is derived first, then each shift is broken down with the hours
/// accumulated so far (weekly mode) or a zero accumulator (daily mode).
pub fn shift_breakdowns<'a>(
    shifts: impl IntoIterator<Item = &'a Shift>,
    policy: Option<&OvertimePolicy>,
) -> Vec<(&'a Shift, WageTotals)> {
    let mut billable: Vec<&Shift> = shifts.into_iter().filter(|s| !s.deleting).collect();
    billable.sort_by_key(|s| s.start);

    let average_rate = average_regular_rate(billable.iter().copied());
    let mut accumulated = Decimal::ZERO;

    billable
        .into_iter()
        .map(|shift| {
            let context = policy.map(|policy| OvertimeContext {
                policy: *policy,
                accumulated_hours: match policy.mode {
                    OvertimeMode::Weekly => accumulated,
                    OvertimeMode::Daily => Decimal::ZERO,
                },
                average_rate,
            });
            let totals = calculate_wage(shift, context.as_ref());
            accumulated += shift.base_hours();
            (shift, totals)
        })
        .collect()
}
