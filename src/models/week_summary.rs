//! Wage totals and the manager-facing weekly summary.
//!
//! These types carry the hour/wage breakdowns produced by the wage
//! calculator, from a single shift up to the week-wide rollup that is
//! snapshotted at publish time.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Hour and wage breakdown, split into normal and overtime portions.
///
/// The invariants `total_hours = normal_hours + overtime_hours` and
/// `total_wage = normal_wage + overtime_wage` hold at every aggregation
/// level (shift, employee, day, week).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageTotals {
    /// Hours paid at the regular rate.
    pub normal_hours: Decimal,
    /// Hours paid at the overtime rate.
    pub overtime_hours: Decimal,
    /// All hours worked.
    pub total_hours: Decimal,
    /// Wage for the normal hours.
    pub normal_wage: Decimal,
    /// Wage for the overtime hours (base pay plus premium).
    pub overtime_wage: Decimal,
    /// Total wage.
    pub total_wage: Decimal,
}

impl WageTotals {
    /// Folds another breakdown into this one, field by field.
    pub fn accumulate(&mut self, other: &WageTotals) {
        self.normal_hours += other.normal_hours;
        self.overtime_hours += other.overtime_hours;
        self.total_hours += other.total_hours;
        self.normal_wage += other.normal_wage;
        self.overtime_wage += other.overtime_wage;
        self.total_wage += other.total_wage;
    }
}

/// Wage summary for one employee's week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeWageSummary {
    /// Hour/wage totals across the employee's non-deleted shifts.
    #[serde(flatten)]
    pub totals: WageTotals,
    /// Number of shifts contributing to the totals.
    pub total_shifts: u32,
}

/// Wage summary for one ISO weekday of the week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    /// Hour/wage totals for the day.
    #[serde(flatten)]
    pub totals: WageTotals,
    /// Number of shifts on the day.
    pub total_shifts: u32,
    /// Number of distinct employees with at least one shift on the day.
    pub people: u32,
}

/// The week-wide wage/hour rollup persisted as a snapshot at publish time.
///
/// # Example
///
/// ```
/// use roster_engine::models::WeekSummary;
/// use rust_decimal::Decimal;
///
/// let summary = WeekSummary::empty(Decimal::new(5000, 0));
/// assert_eq!(summary.labor_percentage, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    /// Hour/wage totals across every employee.
    #[serde(flatten)]
    pub totals: WageTotals,
    /// Total shifts in the week.
    pub total_shifts: u32,
    /// Employees with at least one shift.
    pub total_people: u32,
    /// Projected sales for the week, for labor percentage.
    pub projected_sales: Decimal,
    /// `total_wage / projected_sales * 100`, or zero without projected sales.
    pub labor_percentage: Decimal,
    /// Per-ISO-weekday breakdown (Monday = 1 through Sunday = 7).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub by_day: BTreeMap<u32, DaySummary>,
}

impl WeekSummary {
    /// An empty summary for a week with no scheduled shifts.
    pub fn empty(projected_sales: Decimal) -> Self {
        Self {
            projected_sales,
            ..Default::default()
        }
    }

    /// Recomputes `labor_percentage` from the current totals.
    pub fn update_labor_percentage(&mut self) {
        self.labor_percentage = if self.projected_sales > Decimal::ZERO {
            self.totals.total_wage / self.projected_sales * Decimal::new(100, 0)
        } else {
            Decimal::ZERO
        };
    }
}
