//! Week-of-year numbering from a `(first_day, min_days)` rule.
//!
//! Week 1 of a year is the week containing day `min_days` of January:
//! snapping that anchor back to the rule's first weekday gives
//! [`first_week_start`]. The last week is the one containing day
//! `31 − min_days + 1` of December; snapping forward to the week-end day
//! gives [`last_week_end`]. A year spanning 53 weeks between those anchors
//! is a *long year*.
//!
//! A date is bucketed against `[first_week_start(y), last_week_end(y)]`:
//! below the range it belongs to the previous year's final week (53 in a
//! long year, else 52); above it, to week 1 of the next year; inside it,
//! week = `(d − first_week_start) / 7 + 1`. `(Monday, 4)` reproduces
//! ISO-8601 numbering; `(Sunday, 1)` the US convention.

use cal_core::{IsoDays, Week, Year};

use crate::calendar::Calendar;
use crate::config::{CalendarConfig, Cycle, WeekRule};
use crate::iso_days;
use crate::weekday::Weekday;

/// A week number qualified by the year it belongs to.
///
/// The year may differ from the date's calendar year near Dec 31 / Jan 1:
/// a date there can fall in the adjacent year's week 1 or week 52/53.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YearWeek {
    /// The week-numbering year.
    pub year: Year,
    /// 1-based week within that year (1–53).
    pub week: Week,
}

/// The day a week ends on: the day before the rule's first day.
fn week_end_day(first_day: Weekday) -> Weekday {
    let ord = (first_day.ordinal() + 5) % 7 + 1;
    Weekday::from_ordinal(ord).expect("wrapped ordinal always in 1..=7")
}

/// Iso-day of the first day of week 1 of `year` under `rule`: the nearest
/// `first_day` on or before day `min_days` of the year's first month.
pub(crate) fn first_week_start(cfg: &CalendarConfig, rule: WeekRule, year: Year) -> IsoDays {
    match &cfg.cycle {
        Cycle::Month { .. } => {
            let anchor = iso_days::month_anchor_iso(cfg, year, 1, rule.min_days as i64);
            iso_days::previous_or_on(anchor, rule.first_day)
        }
        Cycle::Week { .. } => iso_days::week_year_start(cfg, year),
    }
}

/// Iso-day of the last day of the final week of `year` under `rule`:
/// the nearest week-end day on or after day `len − min_days + 1` of the
/// year's final month.
pub(crate) fn last_week_end(cfg: &CalendarConfig, rule: WeekRule, year: Year) -> IsoDays {
    match &cfg.cycle {
        Cycle::Month { .. } => {
            let months = cfg.months_in_year(year);
            let len = iso_days::days_in_month(cfg, year, months) as i64;
            let anchor =
                iso_days::month_anchor_iso(cfg, year, months, len - rule.min_days as i64 + 1);
            iso_days::next_or_on(anchor, week_end_day(rule.first_day))
        }
        Cycle::Week { .. } => iso_days::week_year_start(cfg, year + 1) - 1,
    }
}

/// `true` if `year` spans 53 weeks under `rule`.
pub(crate) fn long_year(cfg: &CalendarConfig, rule: WeekRule, year: Year) -> bool {
    let span = last_week_end(cfg, rule, year) - first_week_start(cfg, rule, year) + 1;
    span / 7 == 53
}

/// Week of year for a date already converted to its iso-day count.
///
/// `year` is the date's own calendar year; the result may name the
/// adjacent year.
pub(crate) fn week_of_year(
    cfg: &CalendarConfig,
    rule: WeekRule,
    year: Year,
    days: IsoDays,
) -> YearWeek {
    let start = first_week_start(cfg, rule, year);
    if days < start {
        let prev = cfg.prev_year(year);
        let week = if long_year(cfg, rule, prev) { 53 } else { 52 };
        return YearWeek { year: prev, week };
    }
    if days > last_week_end(cfg, rule, year) {
        return YearWeek {
            year: cfg.next_year(year),
            week: 1,
        };
    }
    YearWeek {
        year,
        week: ((days - start) / 7 + 1) as Week,
    }
}

/// ISO-8601 week of an iso-day count: Gregorian year structure with the
/// `(Monday, 4)` rule, independent of the calendar the date came from.
pub(crate) fn iso_week_of_year(days: IsoDays) -> YearWeek {
    let cfg = Calendar::gregorian().config();
    let (year, _, _) = iso_days::date_from_iso_days(cfg, days);
    week_of_year(cfg, WeekRule::ISO, year, days)
}
