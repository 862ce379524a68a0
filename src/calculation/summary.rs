//! Week-level summary aggregation.
//!
//! Folds every employee's weekly aggregate into the location-wide totals
//! and per-day breakdowns that back the manager-facing summary, including
//! the labor-to-projected-sales percentage.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::calculation::wage::{OvertimePolicy, shift_breakdowns};
use crate::models::{EmployeeShifts, WeekSummary};

/// Aggregates every employee's week into one [`WeekSummary`].
///
/// Employee aggregates with no billable shifts are skipped entirely. Each
/// remaining employee contributes to the week totals and to the per-ISO-
/// weekday breakdown; `people` on a day counts each employee once no
/// matter how many shifts they work that day.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::aggregate_week;
/// use roster_engine::models::WeekSummary;
/// use rust_decimal::Decimal;
///
/// let summary = aggregate_week(&[], Decimal::new(5000, 0), None);
/// assert_eq!(summary, WeekSummary::empty(Decimal::new(5000, 0)));
/// ```
pub fn aggregate_week(
    aggregates: &[EmployeeShifts],
    projected_sales: Decimal,
    policy: Option<&OvertimePolicy>,
) -> WeekSummary {
    let mut summary = WeekSummary::empty(projected_sales);

    for aggregate in aggregates {
        let breakdowns = shift_breakdowns(aggregate.shifts.values(), policy);
        if breakdowns.is_empty() {
            continue;
        }

        summary.total_people += 1;
        let mut days_present: BTreeSet<u32> = BTreeSet::new();

        for (shift, totals) in breakdowns {
            summary.totals.accumulate(&totals);
            summary.total_shifts += 1;

            let weekday = shift.iso_weekday();
            let day = summary.by_day.entry(weekday).or_default();
            day.totals.accumulate(&totals);
            day.total_shifts += 1;
            if days_present.insert(weekday) {
                day.people += 1;
            }
        }
    }

    summary.update_labor_percentage();
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::OvertimeMode;
    use crate::models::{Shift, ShiftStatus, WeekId, shift_time};
    use std::collections::BTreeMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn week() -> WeekId {
        "2024-W01".parse().unwrap()
    }

    fn shift(id: &str, start: &str, end: &str, wage: &str) -> Shift {
        Shift {
            id: id.to_string(),
            employee_id: String::new(),
            start: shift_time::parse(start).unwrap(),
            end: shift_time::parse(end).unwrap(),
            position: None,
            break_minutes: 0,
            hourly_wage: Some(dec(wage)),
            notes: None,
            tasks: BTreeMap::new(),
            status: ShiftStatus::Draft,
            pending_update: None,
            deleting: false,
            created_at: 0,
            created_by: String::new(),
        }
    }

    fn aggregate(employee_id: &str, shifts: Vec<Shift>) -> EmployeeShifts {
        let mut agg = EmployeeShifts::new(employee_id, week(), "loc_1");
        for mut s in shifts {
            s.employee_id = employee_id.to_string();
            agg.insert_shift(s, 0);
        }
        agg
    }

    // ==========================================================================
    // WS-001: week totals fold across employees
    // ==========================================================================
    #[test]
    fn test_week_totals_across_employees() {
        let aggregates = vec![
            aggregate(
                "emp_001",
                vec![shift("1-a", "01-01-2024 09:00", "01-01-2024 17:00", "20")],
            ),
            aggregate(
                "emp_002",
                vec![shift("1-b", "01-01-2024 10:00", "01-01-2024 14:00", "25")],
            ),
        ];

        let summary = aggregate_week(&aggregates, dec("1000"), None);

        assert_eq!(summary.total_people, 2);
        assert_eq!(summary.total_shifts, 2);
        assert_eq!(summary.totals.total_hours, dec("12"));
        assert_eq!(summary.totals.total_wage, dec("260"));
        assert_eq!(summary.labor_percentage, dec("26"));
    }

    // ==========================================================================
    // WS-002: empty aggregates are filtered out
    // ==========================================================================
    #[test]
    fn test_empty_aggregates_filtered() {
        let aggregates = vec![
            aggregate("emp_001", vec![]),
            aggregate(
                "emp_002",
                vec![shift("1-b", "01-01-2024 10:00", "01-01-2024 14:00", "25")],
            ),
        ];

        let summary = aggregate_week(&aggregates, Decimal::ZERO, None);
        assert_eq!(summary.total_people, 1);
    }

    // ==========================================================================
    // WS-003: per-day breakdown counts people once per day
    // ==========================================================================
    #[test]
    fn test_per_day_breakdown() {
        let aggregates = vec![
            aggregate(
                "emp_001",
                vec![
                    shift("1-a", "01-01-2024 09:00", "01-01-2024 13:00", "20"),
                    shift("1-b", "01-01-2024 14:00", "01-01-2024 18:00", "20"),
                    shift("3-c", "03-01-2024 09:00", "03-01-2024 17:00", "20"),
                ],
            ),
            aggregate(
                "emp_002",
                vec![shift("1-d", "01-01-2024 10:00", "01-01-2024 14:00", "25")],
            ),
        ];

        let summary = aggregate_week(&aggregates, Decimal::ZERO, None);

        let monday = &summary.by_day[&1];
        assert_eq!(monday.total_shifts, 3);
        assert_eq!(monday.people, 2); // emp_001 counted once despite two shifts
        assert_eq!(monday.totals.total_hours, dec("12"));

        let wednesday = &summary.by_day[&3];
        assert_eq!(wednesday.total_shifts, 1);
        assert_eq!(wednesday.people, 1);

        assert!(!summary.by_day.contains_key(&2));
    }

    // ==========================================================================
    // WS-004: sum invariants hold at week and day level
    // ==========================================================================
    #[test]
    fn test_sum_invariants_with_overtime() {
        let policy = OvertimePolicy {
            mode: OvertimeMode::Weekly,
            hours_limit: dec("10"),
            multiplier: dec("1.5"),
        };
        let aggregates = vec![aggregate(
            "emp_001",
            vec![
                shift("1-a", "01-01-2024 09:00", "01-01-2024 17:00", "20"),
                shift("2-b", "02-01-2024 09:00", "02-01-2024 17:00", "20"),
            ],
        )];

        let summary = aggregate_week(&aggregates, dec("2000"), Some(&policy));

        assert_eq!(summary.totals.normal_hours, dec("10"));
        assert_eq!(summary.totals.overtime_hours, dec("6"));
        assert_eq!(
            summary.totals.total_hours,
            summary.totals.normal_hours + summary.totals.overtime_hours
        );
        assert_eq!(
            summary.totals.total_wage,
            summary.totals.normal_wage + summary.totals.overtime_wage
        );
        for day in summary.by_day.values() {
            assert_eq!(day.totals.total_hours, day.totals.normal_hours + day.totals.overtime_hours);
            assert_eq!(day.totals.total_wage, day.totals.normal_wage + day.totals.overtime_wage);
        }
        // 380 / 2000 * 100
        assert_eq!(summary.labor_percentage, dec("19"));
    }

    // ==========================================================================
    // WS-005: deleting shifts do not reach the summary
    // ==========================================================================
    #[test]
    fn test_deleting_shifts_excluded() {
        let mut doomed = shift("1-a", "01-01-2024 09:00", "01-01-2024 17:00", "20");
        doomed.deleting = true;
        let aggregates = vec![aggregate("emp_001", vec![doomed])];

        let summary = aggregate_week(&aggregates, Decimal::ZERO, None);
        assert_eq!(summary.total_people, 0);
        assert_eq!(summary.total_shifts, 0);
        assert!(summary.by_day.is_empty());
    }

    #[test]
    fn test_zero_projected_sales_zero_percentage() {
        let aggregates = vec![aggregate(
            "emp_001",
            vec![shift("1-a", "01-01-2024 09:00", "01-01-2024 17:00", "20")],
        )];
        let summary = aggregate_week(&aggregates, Decimal::ZERO, None);
        assert_eq!(summary.labor_percentage, Decimal::ZERO);
    }
}
