//! The runtime calendar factory.
//!
//! [`new_calendar`] validates a set of key/value options against a closed,
//! cycle-specific set, synthesizes a stateless [`Calendar`] wholly
//! parameterized by the resulting config, and registers it in the
//! process-wide registry. Validation is fail-fast and total: every
//! unrecognized key and every out-of-range value is collected and reported
//! in one [`ValidationError`]; nothing partially built is ever registered.

use std::collections::HashSet;

use cal_core::{Error, Result, ValidationError};

use crate::calendar::Calendar;
use crate::config::{CalendarConfig, Cycle, LeapRule, WeekRule, GREGORIAN_MONTH_LENGTHS};
use crate::registry::{self, CalendarHandle};
use crate::weekday::Weekday;

/// Which kind of year structure a new calendar should have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleKind {
    /// A month-based year (configurable month lengths and leap rule).
    Month,
    /// A week-based year (configurable weeks-in-month layout).
    Week,
}

/// A configuration option value handed to the factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// An integer value.
    Int(i64),
    /// A list of integers (month lengths, weeks-in-month layout).
    IntList(Vec<i64>),
    /// A text value (leap rule name, locale reference).
    Text(String),
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        OptionValue::Int(v)
    }
}

impl From<Vec<i64>> for OptionValue {
    fn from(v: Vec<i64>) -> Self {
        OptionValue::IntList(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::Text(v.to_string())
    }
}

const MONTH_KEYS: &[&str] = &[
    "epoch_shift",
    "leap_rule",
    "month_lengths",
    "leap_month",
    "first_day",
    "min_days",
    "locale",
];

const WEEK_KEYS: &[&str] = &[
    "weeks_in_month",
    "first_day",
    "min_days",
    "epoch_shift",
    "locale",
];

/// Validate `options` for `cycle`, synthesize the calendar, and register
/// it under `name`.
///
/// Re-registering an existing name with an identical configuration returns
/// the existing handle; a different configuration under an existing name
/// is a [`ValidationError`] (see [`registry`]).
pub fn new_calendar(
    name: &str,
    cycle: CycleKind,
    options: &[(&str, OptionValue)],
) -> Result<CalendarHandle> {
    let mut issues = ValidationError::new();
    if name.is_empty() {
        issues.push("name", "must not be empty");
    }

    let allowed: &[&str] = match cycle {
        CycleKind::Month => MONTH_KEYS,
        CycleKind::Week => WEEK_KEYS,
    };
    let mut seen: HashSet<&str> = HashSet::new();
    for (key, _) in options {
        if !allowed.contains(key) {
            issues.push(
                *key,
                format!(
                    "unrecognized option for a {}-cycle calendar",
                    match cycle {
                        CycleKind::Month => "month",
                        CycleKind::Week => "week",
                    }
                ),
            );
        }
        if !seen.insert(*key) {
            issues.push(*key, "given more than once");
        }
    }

    let config = match cycle {
        CycleKind::Month => build_month_config(options, &mut issues),
        CycleKind::Week => build_week_config(options, &mut issues),
    };

    issues.into_result()?;
    registry::register(Calendar::generated(name, config))
}

fn lookup<'a>(options: &'a [(&str, OptionValue)], key: &str) -> Option<&'a OptionValue> {
    options.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
}

fn int_option(
    options: &[(&str, OptionValue)],
    key: &'static str,
    issues: &mut ValidationError,
) -> Option<i64> {
    match lookup(options, key) {
        Some(OptionValue::Int(v)) => Some(*v),
        Some(_) => {
            issues.push(key, "expected an integer");
            None
        }
        None => None,
    }
}

fn text_option<'a>(
    options: &'a [(&str, OptionValue)],
    key: &'static str,
    issues: &mut ValidationError,
) -> Option<&'a str> {
    match lookup(options, key) {
        Some(OptionValue::Text(v)) => Some(v.as_str()),
        Some(_) => {
            issues.push(key, "expected text");
            None
        }
        None => None,
    }
}

fn list_option<'a>(
    options: &'a [(&str, OptionValue)],
    key: &'static str,
    issues: &mut ValidationError,
) -> Option<&'a [i64]> {
    match lookup(options, key) {
        Some(OptionValue::IntList(v)) => Some(v.as_slice()),
        Some(_) => {
            issues.push(key, "expected a list of integers");
            None
        }
        None => None,
    }
}

/// `first_day` / `min_days` as a week rule. Either key alone implies a
/// rule, with the other defaulting to Monday resp. 4.
fn week_rule_options(
    options: &[(&str, OptionValue)],
    issues: &mut ValidationError,
) -> Option<WeekRule> {
    let first_day = int_option(options, "first_day", issues);
    let min_days = int_option(options, "min_days", issues);
    if first_day.is_none() && min_days.is_none() {
        return None;
    }
    let first_day = match first_day {
        Some(v @ 1..=7) => Weekday::from_ordinal(v as u8).expect("checked range"),
        Some(v) => {
            issues.push("first_day", format!("must be in 1..=7, got {v}"));
            Weekday::Monday
        }
        None => Weekday::Monday,
    };
    let min_days = match min_days {
        Some(v @ 1..=7) => v as u8,
        Some(v) => {
            issues.push("min_days", format!("must be in 1..=7, got {v}"));
            4
        }
        None => 4,
    };
    Some(WeekRule { first_day, min_days })
}

fn build_month_config(
    options: &[(&str, OptionValue)],
    issues: &mut ValidationError,
) -> CalendarConfig {
    let leap_rule = match text_option(options, "leap_rule", issues) {
        Some("gregorian") | None => LeapRule::Gregorian,
        Some("julian") => LeapRule::Julian,
        Some("none") => LeapRule::None,
        Some(other) => {
            issues.push(
                "leap_rule",
                format!("must be one of gregorian, julian, none; got {other}"),
            );
            LeapRule::Gregorian
        }
    };

    let month_lengths: Vec<u8> = match list_option(options, "month_lengths", issues) {
        Some(list) => {
            let mut ok = true;
            if !(1..=24).contains(&list.len()) {
                issues.push(
                    "month_lengths",
                    format!("must have between 1 and 24 months, got {}", list.len()),
                );
                ok = false;
            }
            if list.iter().any(|&d| !(1..=31).contains(&d)) {
                issues.push("month_lengths", "every month length must be in 1..=31");
                ok = false;
            }
            if ok {
                list.iter().map(|&d| d as u8).collect()
            } else {
                GREGORIAN_MONTH_LENGTHS.to_vec()
            }
        }
        None => GREGORIAN_MONTH_LENGTHS.to_vec(),
    };

    let leap_month = match int_option(options, "leap_month", issues) {
        Some(v) if (1..=month_lengths.len() as i64).contains(&v) => v as u8,
        Some(v) => {
            issues.push(
                "leap_month",
                format!("must name a month in 1..={}, got {v}", month_lengths.len()),
            );
            1
        }
        None => 2u8.min(month_lengths.len() as u8),
    };

    CalendarConfig {
        cycle: Cycle::Month {
            month_lengths,
            leap_month,
            leap_rule,
        },
        epoch_shift: int_option(options, "epoch_shift", issues).unwrap_or(0),
        week_rule: week_rule_options(options, issues),
        has_year_zero: true,
        locale: text_option(options, "locale", issues).map(str::to_string),
    }
}

fn build_week_config(
    options: &[(&str, OptionValue)],
    issues: &mut ValidationError,
) -> CalendarConfig {
    let weeks_in_month: Vec<u8> = match list_option(options, "weeks_in_month", issues) {
        Some(list) => {
            // A quarter-shaped layout (e.g. [4, 4, 5]) repeats per quarter.
            let expanded: Vec<i64> = if list.len() == 3 {
                list.iter().cycle().take(12).copied().collect()
            } else {
                list.to_vec()
            };
            let mut ok = true;
            if expanded.len() != 12 {
                issues.push(
                    "weeks_in_month",
                    format!(
                        "must have 12 entries, or 3 repeated per quarter; got {}",
                        list.len()
                    ),
                );
                ok = false;
            }
            if expanded.iter().any(|&w| !(1..=26).contains(&w)) {
                issues.push(
                    "weeks_in_month",
                    "every month must span between 1 and 26 weeks",
                );
                ok = false;
            }
            let sum: i64 = expanded.iter().sum();
            if ok && sum != 52 {
                issues.push(
                    "weeks_in_month",
                    format!(
                        "layout must sum to 52 common-year weeks (long years append \
                         week 53 to the final month); got {sum}"
                    ),
                );
                ok = false;
            }
            if ok {
                expanded.iter().map(|&w| w as u8).collect()
            } else {
                vec![4, 4, 5, 4, 4, 5, 4, 4, 5, 4, 4, 5]
            }
        }
        None => vec![4, 4, 5, 4, 4, 5, 4, 4, 5, 4, 4, 5],
    };

    CalendarConfig {
        cycle: Cycle::Week { weeks_in_month },
        epoch_shift: int_option(options, "epoch_shift", issues).unwrap_or(0),
        // Week cycles always carry a rule; absent options mean ISO.
        week_rule: Some(week_rule_options(options, issues).unwrap_or(WeekRule::ISO)),
        has_year_zero: true,
        locale: text_option(options, "locale", issues).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::CalendarDate;
    use crate::time_unit::TimeUnit;

    #[test]
    fn unknown_options_are_rejected_by_name() {
        let err = new_calendar(
            "factory-test-unknown",
            CycleKind::Week,
            &[
                ("invalid_option", OptionValue::from("y")),
                ("another_bad_one", OptionValue::from(3)),
            ],
        )
        .unwrap_err();
        let Error::Validation(v) = err else {
            panic!("expected a validation error");
        };
        assert!(v.keys().contains(&"invalid_option"));
        assert!(v.keys().contains(&"another_bad_one"));
        assert!(!registry::is_registered("factory-test-unknown"));
    }

    #[test]
    fn out_of_range_week_rule_is_rejected() {
        let err = new_calendar(
            "factory-test-bad-rule",
            CycleKind::Week,
            &[("first_day", OptionValue::from(9)), ("min_days", OptionValue::from(0))],
        )
        .unwrap_err();
        let Error::Validation(v) = err else {
            panic!("expected a validation error");
        };
        assert_eq!(v.keys(), vec!["first_day", "min_days"]);
    }

    #[test]
    fn layout_must_sum_to_52() {
        let err = new_calendar(
            "factory-test-bad-layout",
            CycleKind::Week,
            &[("weeks_in_month", OptionValue::from(vec![5i64, 5, 5]))],
        )
        .unwrap_err();
        let Error::Validation(v) = err else {
            panic!("expected a validation error");
        };
        assert_eq!(v.keys(), vec!["weeks_in_month"]);
    }

    #[test]
    fn quarter_layout_expands_per_quarter() {
        let cal = new_calendar(
            "factory-test-445",
            CycleKind::Week,
            &[("weeks_in_month", OptionValue::from(vec![4i64, 4, 5]))],
        )
        .unwrap();
        assert_eq!(cal.days_in_month(2021, 3).unwrap(), 35);
        assert_eq!(cal.days_in_year(2021).unwrap(), 364);
        // Behaves exactly like the built-in ISO week calendar.
        assert_eq!(
            cal.date_to_iso_days(CalendarDate::new(2021, 1, 1)).unwrap(),
            Calendar::iso_week()
                .date_to_iso_days(CalendarDate::new(2021, 1, 1))
                .unwrap()
        );
    }

    #[test]
    fn us_week_calendar() {
        let cal = new_calendar(
            "factory-test-us-week",
            CycleKind::Week,
            &[("first_day", OptionValue::from(7)), ("min_days", OptionValue::from(1))],
        )
        .unwrap();
        // The year containing Jan 1 2016 (a Friday) starts on the Sunday
        // on or before it: Dec 27 2015.
        let start = cal.date_to_iso_days(CalendarDate::new(2016, 1, 1)).unwrap();
        let greg = Calendar::gregorian();
        assert_eq!(
            start,
            greg.date_to_iso_days(CalendarDate::new(2015, 12, 27)).unwrap()
        );
    }

    #[test]
    fn generated_month_calendar_with_julian_rule() {
        let cal = new_calendar(
            "factory-test-julian-rule",
            CycleKind::Month,
            &[
                ("leap_rule", OptionValue::from("julian")),
                ("epoch_shift", OptionValue::from(-2i64)),
            ],
        )
        .unwrap();
        // Same structure as the built-in Julian calendar, but with a year
        // zero: century years divide by 4.
        assert!(cal.is_leap_year(1900));
        assert_eq!(
            cal.date_to_iso_days(CalendarDate::new(1, 1, 1)).unwrap(),
            364
        );
        assert!(cal.valid_date(0, 1, 1));
    }

    #[test]
    fn thirteen_month_calendar_has_no_quarters() {
        let cal = new_calendar(
            "factory-test-thirteen",
            CycleKind::Month,
            &[
                ("month_lengths", OptionValue::from(vec![28i64; 13])),
                ("leap_rule", OptionValue::from("none")),
            ],
        )
        .unwrap();
        assert_eq!(cal.months_in_year(2024), 13);
        assert_eq!(cal.days_in_year(2024).unwrap(), 364);
        let d = cal.date(2024, 13, 28).unwrap();
        assert!(matches!(
            cal.quarter_of_year(d),
            Err(Error::NotDefined { .. })
        ));
        // Month arithmetic uses the variant's own month count.
        assert_eq!(
            cal.plus(d, TimeUnit::Months, 1, true).unwrap(),
            CalendarDate::new(2025, 1, 28)
        );
    }

    #[test]
    fn factory_registers_and_resolves() {
        let handle = new_calendar("factory-test-resolve", CycleKind::Month, &[]).unwrap();
        let resolved = registry::get("factory-test-resolve").unwrap();
        assert_eq!(handle.name(), resolved.name());
        assert_eq!(
            handle.cldr_calendar_type(),
            crate::calendar::CldrCalendarType::Other
        );
    }

    #[test]
    fn reregistration_policy() {
        let first = new_calendar("factory-test-policy", CycleKind::Month, &[]).unwrap();
        // Identical configuration: idempotent no-op.
        let second = new_calendar("factory-test-policy", CycleKind::Month, &[]).unwrap();
        assert!(std::sync::Arc::ptr_eq(&first, &second));
        // Different configuration: rejected, original untouched.
        let err = new_calendar(
            "factory-test-policy",
            CycleKind::Month,
            &[("leap_rule", OptionValue::from("none"))],
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(std::sync::Arc::ptr_eq(
            &first,
            &registry::get("factory-test-policy").unwrap()
        ));
    }
}
