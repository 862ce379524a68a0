//! Configuration types for scheduling settings.
//!
//! This module contains the strongly-typed settings structures that are
//! deserialized from the scheduling settings record (a YAML file locally,
//! the same shape as the document-store settings record).

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::{OvertimeMode, OvertimePolicy};

/// One overtime rule: a cap on regular-rate hours and the premium
/// multiplier applied beyond it.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct OvertimeRule {
    /// Whether the rule is in effect.
    pub enabled: bool,
    /// Hours at the regular rate before overtime starts.
    #[serde(default)]
    pub hours: Decimal,
    /// Overtime pay multiplier (e.g. 1.5 for time-and-a-half).
    #[serde(default)]
    pub multiplier: Decimal,
}

/// The scheduling settings record.
///
/// Mirrors the external settings document: a weekly-cap rule and a
/// daily-cap rule, either of which may be disabled.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ScheduleSettings {
    /// Overtime rule applied to cumulative weekly hours.
    #[serde(default)]
    pub ot_week: OvertimeRule,
    /// Overtime rule applied to each shift independently.
    #[serde(default)]
    pub ot_day: OvertimeRule,
}

impl ScheduleSettings {
    /// Resolves the active overtime policy, if any.
    ///
    /// The weekly rule takes precedence when both rules are enabled.
    pub fn overtime_policy(&self) -> Option<OvertimePolicy> {
        if self.ot_week.enabled {
            Some(OvertimePolicy {
                mode: OvertimeMode::Weekly,
                hours_limit: self.ot_week.hours,
                multiplier: self.ot_week.multiplier,
            })
        } else if self.ot_day.enabled {
            Some(OvertimePolicy {
                mode: OvertimeMode::Daily,
                hours_limit: self.ot_day.hours,
                multiplier: self.ot_day.multiplier,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_have_no_policy() {
        let settings = ScheduleSettings::default();
        assert!(settings.overtime_policy().is_none());
    }

    #[test]
    fn test_weekly_rule_resolves_to_weekly_policy() {
        let settings = ScheduleSettings {
            ot_week: OvertimeRule {
                enabled: true,
                hours: Decimal::new(40, 0),
                multiplier: Decimal::new(15, 1),
            },
            ot_day: OvertimeRule::default(),
        };
        let policy = settings.overtime_policy().unwrap();
        assert_eq!(policy.mode, OvertimeMode::Weekly);
        assert_eq!(policy.hours_limit, Decimal::new(40, 0));
    }

    #[test]
    fn test_daily_rule_resolves_to_daily_policy() {
        let settings = ScheduleSettings {
            ot_week: OvertimeRule::default(),
            ot_day: OvertimeRule {
                enabled: true,
                hours: Decimal::new(8, 0),
                multiplier: Decimal::new(2, 0),
            },
        };
        let policy = settings.overtime_policy().unwrap();
        assert_eq!(policy.mode, OvertimeMode::Daily);
    }

    #[test]
    fn test_weekly_takes_precedence_over_daily() {
        let settings = ScheduleSettings {
            ot_week: OvertimeRule {
                enabled: true,
                hours: Decimal::new(40, 0),
                multiplier: Decimal::new(15, 1),
            },
            ot_day: OvertimeRule {
                enabled: true,
                hours: Decimal::new(8, 0),
                multiplier: Decimal::new(2, 0),
            },
        };
        assert_eq!(settings.overtime_policy().unwrap().mode, OvertimeMode::Weekly);
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let yaml = r#"
ot_week:
  enabled: true
  hours: 40
  multiplier: 1.5
ot_day:
  enabled: false
"#;
        let settings: ScheduleSettings = serde_yaml::from_str(yaml).unwrap();
        assert!(settings.ot_week.enabled);
        assert_eq!(settings.ot_week.multiplier, Decimal::new(15, 1));
        assert!(!settings.ot_day.enabled);
    }
}
