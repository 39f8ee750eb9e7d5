//! Closed-form conversion between dates and iso-day counts.
//!
//! Day 0 is proleptic Gregorian 0000-01-01; every variant converts through
//! this shared epoch, which makes the signed day count the common currency
//! between calendars.
//!
//! Month-cycle conversion is `days_before_year(y) + days-before-month +
//! (day − 1) + epoch_shift`, with the leap count in `[0, y)` expressed as
//! floor divisions so the formulas hold for negative years. The inverse
//! estimates the year from the rule's cycle length (400 years / 146 097
//! days for the Gregorian rule) and corrects by at most a step or two, so
//! cost does not grow with date magnitude.
//!
//! Week-cycle years are anchored to the week containing the configured
//! anchor day of the Gregorian January, snapped back to the rule's first
//! weekday; months are groups of whole weeks.

use cal_core::{Day, IsoDays, Month, Year};

use crate::config::{CalendarConfig, Cycle, LeapRule, WeekRule, GREGORIAN_MONTH_LENGTHS};
use crate::weekday::Weekday;

// ── Leap-rule arithmetic ──────────────────────────────────────────────────────

/// Number of leap years in `[0, y)` under `rule`, valid for negative `y`
/// through floor division.
pub(crate) fn leaps_before(rule: LeapRule, y: i64) -> i64 {
    match rule {
        LeapRule::Gregorian => {
            (y + 3).div_euclid(4) - (y + 99).div_euclid(100) + (y + 399).div_euclid(400)
        }
        LeapRule::Julian => (y + 3).div_euclid(4),
        LeapRule::None => 0,
    }
}

/// Leap-year predicate over the signed arithmetic year.
pub(crate) fn is_leap_arithmetic(rule: LeapRule, y: i64) -> bool {
    match rule {
        LeapRule::Gregorian => y % 4 == 0 && (y % 100 != 0 || y % 400 == 0),
        LeapRule::Julian => y % 4 == 0,
        LeapRule::None => false,
    }
}

// ── Weekday snapping ──────────────────────────────────────────────────────────

/// The nearest occurrence of `weekday` on or before `day`.
pub(crate) fn previous_or_on(day: IsoDays, weekday: Weekday) -> IsoDays {
    let delta = (Weekday::from_iso_days(day).ordinal() as i64 - weekday.ordinal() as i64)
        .rem_euclid(7);
    day - delta
}

/// The nearest occurrence of `weekday` on or after `day`.
pub(crate) fn next_or_on(day: IsoDays, weekday: Weekday) -> IsoDays {
    let delta = (weekday.ordinal() as i64 - Weekday::from_iso_days(day).ordinal() as i64)
        .rem_euclid(7);
    day + delta
}

// ── Month-cycle conversion ────────────────────────────────────────────────────

/// Days from the epoch to the start of arithmetic year `y` (before the
/// variant's epoch shift).
fn days_before_year(lengths: &[u8], rule: LeapRule, y: i64) -> i64 {
    let common: i64 = lengths.iter().map(|&d| d as i64).sum();
    common * y + leaps_before(rule, y)
}

/// Month-cycle anchor arithmetic: iso-day of `day` (which may lie outside
/// `1..=days_in_month`) in the given month of `year`.
pub(crate) fn month_anchor_iso(cfg: &CalendarConfig, year: Year, month: Month, day: i64) -> IsoDays {
    let Cycle::Month {
        month_lengths,
        leap_month,
        leap_rule,
    } = &cfg.cycle
    else {
        unreachable!("month anchors only exist for month cycles");
    };
    let y = cfg.arithmetic_year(year);
    let mut days = days_before_year(month_lengths, *leap_rule, y);
    days += month_lengths[..(month - 1) as usize]
        .iter()
        .map(|&d| d as i64)
        .sum::<i64>();
    if month > *leap_month && is_leap_arithmetic(*leap_rule, y) {
        days += 1;
    }
    days + (day - 1) + cfg.epoch_shift
}

fn month_from_iso(
    cfg: &CalendarConfig,
    lengths: &[u8],
    leap_month: u8,
    rule: LeapRule,
    days: IsoDays,
) -> (Year, Month, Day) {
    let z = days - cfg.epoch_shift;
    let common: i64 = lengths.iter().map(|&d| d as i64).sum();
    let (cycle_years, cycle_days) = match rule {
        LeapRule::Gregorian => (400, 400 * common + 97),
        LeapRule::Julian => (4, 4 * common + 1),
        LeapRule::None => (1, common),
    };
    // Closed-form estimate, then a bounded correction (at most two steps).
    let mut y = (z * cycle_years).div_euclid(cycle_days);
    while z < days_before_year(lengths, rule, y) {
        y -= 1;
    }
    while z >= days_before_year(lengths, rule, y + 1) {
        y += 1;
    }
    let mut doy = z - days_before_year(lengths, rule, y); // 0-based
    let leap = is_leap_arithmetic(rule, y);
    let mut month = 1u8;
    for (i, &len) in lengths.iter().enumerate() {
        let len = len as i64 + i64::from((i + 1) as u8 == leap_month && leap);
        if doy < len {
            break;
        }
        doy -= len;
        month += 1;
    }
    (cfg.external_year(y), month, (doy + 1) as Day)
}

/// Gregorian-structure conversion against the shared epoch, used to anchor
/// week-cycle years.
fn gregorian_ymd_to_iso(year: i64, month: Month, day: i64) -> IsoDays {
    let mut days = days_before_year(&GREGORIAN_MONTH_LENGTHS, LeapRule::Gregorian, year);
    days += GREGORIAN_MONTH_LENGTHS[..(month - 1) as usize]
        .iter()
        .map(|&d| d as i64)
        .sum::<i64>();
    if month > 2 && is_leap_arithmetic(LeapRule::Gregorian, year) {
        days += 1;
    }
    days + (day - 1)
}

fn gregorian_year_of_iso(days: IsoDays) -> i64 {
    let common = 365i64;
    let mut y = (days * 400).div_euclid(400 * common + 97);
    while days < days_before_year(&GREGORIAN_MONTH_LENGTHS, LeapRule::Gregorian, y) {
        y -= 1;
    }
    while days >= days_before_year(&GREGORIAN_MONTH_LENGTHS, LeapRule::Gregorian, y + 1) {
        y += 1;
    }
    y
}

// ── Week-cycle conversion ─────────────────────────────────────────────────────

fn week_rule_of(cfg: &CalendarConfig) -> WeekRule {
    cfg.week_rule
        .expect("week-cycle configs always carry a week rule")
}

/// Iso-day the week-cycle year `year` starts on: the week containing day
/// `min_days` of the Gregorian January (shifted by the variant's epoch
/// shift), snapped back to the rule's first weekday.
pub(crate) fn week_year_start(cfg: &CalendarConfig, year: Year) -> IsoDays {
    let rule = week_rule_of(cfg);
    let anchor = gregorian_ymd_to_iso(year as i64, 1, rule.min_days as i64) + cfg.epoch_shift;
    previous_or_on(anchor, rule.first_day)
}

/// Weeks in week-cycle year `year`: 52, or 53 in long years. Consecutive
/// year starts always differ by exactly 52 or 53 whole weeks, so years
/// partition the day line.
pub(crate) fn weeks_in_year(cfg: &CalendarConfig, year: Year) -> u8 {
    ((week_year_start(cfg, year + 1) - week_year_start(cfg, year)) / 7) as u8
}

fn week_from_iso(cfg: &CalendarConfig, weeks_in_month: &[u8], days: IsoDays) -> (Year, Month, Day) {
    // The Gregorian year of the (un-shifted) day is within one of the
    // week-year; correct against the year-start anchors.
    let mut y = gregorian_year_of_iso(days - cfg.epoch_shift) as Year;
    while days < week_year_start(cfg, y) {
        y -= 1;
    }
    while days >= week_year_start(cfg, y + 1) {
        y += 1;
    }
    let mut doy = days - week_year_start(cfg, y); // 0-based
    let total_weeks = weeks_in_year(cfg, y) as i64;
    let common_weeks: i64 = weeks_in_month.iter().map(|&w| w as i64).sum();
    let mut month = 1u8;
    for (i, &w) in weeks_in_month.iter().enumerate() {
        let mut len = w as i64 * 7;
        if i == weeks_in_month.len() - 1 {
            // Long years append their extra week to the final month.
            len += (total_weeks - common_weeks) * 7;
        }
        if doy < len {
            break;
        }
        doy -= len;
        month += 1;
    }
    (y, month, (doy + 1) as Day)
}

// ── Per-variant entry points ──────────────────────────────────────────────────

/// Convert a structurally valid date to its iso-day count.
pub(crate) fn date_to_iso_days(cfg: &CalendarConfig, year: Year, month: Month, day: Day) -> IsoDays {
    match &cfg.cycle {
        Cycle::Month { .. } => month_anchor_iso(cfg, year, month, day as i64),
        Cycle::Week { weeks_in_month } => {
            let before: i64 = weeks_in_month[..(month - 1) as usize]
                .iter()
                .map(|&w| w as i64 * 7)
                .sum();
            week_year_start(cfg, year) + before + (day as i64 - 1)
        }
    }
}

/// Decompose an iso-day count into this variant's `(year, month, day)`.
pub(crate) fn date_from_iso_days(cfg: &CalendarConfig, days: IsoDays) -> (Year, Month, Day) {
    match &cfg.cycle {
        Cycle::Month {
            month_lengths,
            leap_month,
            leap_rule,
        } => month_from_iso(cfg, month_lengths, *leap_month, *leap_rule, days),
        Cycle::Week { weeks_in_month } => week_from_iso(cfg, weeks_in_month, days),
    }
}

/// Days in the given month of `year`.
pub(crate) fn days_in_month(cfg: &CalendarConfig, year: Year, month: Month) -> u8 {
    match &cfg.cycle {
        Cycle::Month {
            month_lengths,
            leap_month,
            leap_rule,
        } => {
            let mut len = month_lengths[(month - 1) as usize];
            if month == *leap_month && is_leap_arithmetic(*leap_rule, cfg.arithmetic_year(year)) {
                len += 1;
            }
            len
        }
        Cycle::Week { weeks_in_month } => {
            let mut weeks = weeks_in_month[(month - 1) as usize];
            if month as usize == weeks_in_month.len() && weeks_in_year(cfg, year) == 53 {
                weeks += 1;
            }
            weeks * 7
        }
    }
}

/// Days in `year`.
pub(crate) fn days_in_year(cfg: &CalendarConfig, year: Year) -> u16 {
    match &cfg.cycle {
        Cycle::Month { leap_rule, .. } => {
            let common = cfg.common_year_days() as u16;
            common + u16::from(is_leap_arithmetic(*leap_rule, cfg.arithmetic_year(year)))
        }
        Cycle::Week { .. } => weeks_in_year(cfg, year) as u16 * 7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn gregorian_epoch_alignment() {
        let greg = CalendarConfig::gregorian();
        assert_eq!(date_to_iso_days(&greg, 0, 1, 1), 0);
        assert_eq!(date_to_iso_days(&greg, 1970, 1, 1), 719_528);
        assert_eq!(date_from_iso_days(&greg, 719_528), (1970, 1, 1));
    }

    #[test]
    fn julian_epoch_alignment() {
        let julian = CalendarConfig::julian();
        // Proleptic Julian 0001-01-01 = proleptic Gregorian 0000-12-30.
        assert_eq!(date_to_iso_days(&julian, 1, 1, 1), 364);
        let greg = CalendarConfig::gregorian();
        assert_eq!(date_to_iso_days(&greg, 0, 12, 30), 364);
        // Both calendars agree during the 3rd century.
        assert_eq!(
            date_to_iso_days(&julian, 250, 6, 1),
            date_to_iso_days(&greg, 250, 6, 1)
        );
    }

    #[test]
    fn round_trip_pinned_dates() {
        let greg = CalendarConfig::gregorian();
        for (y, m, d) in [
            (2000, 2, 29),
            (1900, 2, 28),
            (2016, 1, 1),
            (0, 1, 1),
            (-1, 12, 31),
            (9999, 12, 31),
            (-4712, 1, 1),
        ] {
            let days = date_to_iso_days(&greg, y, m, d);
            assert_eq!(date_from_iso_days(&greg, days), (y, m, d), "{y}-{m}-{d}");
        }
    }

    #[test]
    fn julian_round_trip_skips_year_zero() {
        let julian = CalendarConfig::julian();
        // External year -1 is arithmetic year 0, a Julian leap year.
        let days = date_to_iso_days(&julian, -1, 2, 29);
        assert_eq!(date_from_iso_days(&julian, days), (-1, 2, 29));
        // The day after -1-12-31 is 1-01-01: no year zero in between.
        let eve = date_to_iso_days(&julian, -1, 12, 31);
        assert_eq!(date_from_iso_days(&julian, eve + 1), (1, 1, 1));
    }

    #[test]
    fn consecutive_days_are_contiguous() {
        // Strict monotonicity in lexicographic order: every valid date's
        // iso-day is exactly one more than its predecessor's.
        for cfg in [
            CalendarConfig::gregorian(),
            CalendarConfig::julian(),
            CalendarConfig::iso_week(),
        ] {
            let mut prev: Option<IsoDays> = None;
            for year in 2014..=2017 {
                for month in 1..=12u8 {
                    for day in 1..=days_in_month(&cfg, year, month) {
                        let days = date_to_iso_days(&cfg, year, month, day);
                        if let Some(p) = prev {
                            assert_eq!(days, p + 1, "{year}-{month}-{day}");
                        }
                        prev = Some(days);
                    }
                }
            }
        }
    }

    #[test]
    fn iso_week_year_anchors() {
        let iso = CalendarConfig::iso_week();
        let greg = CalendarConfig::gregorian();
        // ISO week year 2020 starts Monday, Gregorian 2019-12-30.
        assert_eq!(
            week_year_start(&iso, 2020),
            date_to_iso_days(&greg, 2019, 12, 30)
        );
        assert_eq!(date_to_iso_days(&iso, 2020, 1, 1), week_year_start(&iso, 2020));
        // 2020 is a long year: 53 weeks, 371 days, a 42-day final month.
        assert_eq!(weeks_in_year(&iso, 2020), 53);
        assert_eq!(days_in_year(&iso, 2020), 371);
        assert_eq!(days_in_month(&iso, 2020, 12), 42);
        // 2021 is ordinary.
        assert_eq!(weeks_in_year(&iso, 2021), 52);
        assert_eq!(days_in_year(&iso, 2021), 364);
        assert_eq!(days_in_month(&iso, 2021, 12), 35);
    }

    #[test]
    fn weekday_snapping() {
        // Iso day 736_332 is Monday 2016-01-04.
        assert_eq!(previous_or_on(736_332, Weekday::Monday), 736_332);
        assert_eq!(previous_or_on(736_335, Weekday::Monday), 736_332);
        assert_eq!(next_or_on(736_332, Weekday::Sunday), 736_338);
        assert_eq!(next_or_on(736_338, Weekday::Sunday), 736_338);
    }

    #[test]
    fn leap_counting_matches_predicate() {
        for rule in [LeapRule::Gregorian, LeapRule::Julian, LeapRule::None] {
            for y in -500..500i64 {
                let delta = leaps_before(rule, y + 1) - leaps_before(rule, y);
                assert_eq!(delta == 1, is_leap_arithmetic(rule, y), "{rule:?} {y}");
            }
        }
    }

    proptest! {
        #[test]
        fn gregorian_round_trip(y in -3000i32..3000, m in 1u8..=12, d in 1u8..=31) {
            let cfg = CalendarConfig::gregorian();
            prop_assume!(d <= days_in_month(&cfg, y, m));
            let days = date_to_iso_days(&cfg, y, m, d);
            prop_assert_eq!(date_from_iso_days(&cfg, days), (y, m, d));
        }

        #[test]
        fn julian_round_trip(y in -3000i32..3000, m in 1u8..=12, d in 1u8..=31) {
            let cfg = CalendarConfig::julian();
            prop_assume!(y != 0);
            prop_assume!(d <= days_in_month(&cfg, y, m));
            let days = date_to_iso_days(&cfg, y, m, d);
            prop_assert_eq!(date_from_iso_days(&cfg, days), (y, m, d));
        }

        #[test]
        fn iso_week_round_trip(y in -3000i32..3000, m in 1u8..=12, d in 1u8..=42) {
            let cfg = CalendarConfig::iso_week();
            prop_assume!(d <= days_in_month(&cfg, y, m));
            let days = date_to_iso_days(&cfg, y, m, d);
            prop_assert_eq!(date_from_iso_days(&cfg, days), (y, m, d));
        }
    }
}
