//! Immutable calendar configuration values.
//!
//! A [`CalendarConfig`] fully determines a calendar variant's behavior:
//! its cycle layout (month- or week-based), leap rule, epoch shift, week
//! rule, and era policy. Configs are plain values, constructed once and
//! never mutated; every calendar operation is a pure function of a config
//! and its numeric arguments.

use cal_core::{IsoDays, Year};

use crate::weekday::Weekday;

/// First year accepted by any variant.
pub const MIN_YEAR: Year = -99_999;

/// Last year accepted by any variant.
pub const MAX_YEAR: Year = 99_999;

/// Leap-year rule for month-cycle calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LeapRule {
    /// Divisible by 4 and (not divisible by 100, or divisible by 400).
    Gregorian,
    /// Divisible by 4, no century exception.
    Julian,
    /// No leap years; every year has the common length.
    None,
}

/// The `(first_day, min_days)` pair driving week-of-year numbering.
///
/// `first_day` is the weekday a week starts on. `min_days` is the minimum
/// number of a partial first week's days that must fall inside the new year
/// for that week to count as week 1; ISO-8601 uses `(Monday, 4)`, the US
/// convention `(Sunday, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeekRule {
    /// The weekday a week starts on.
    pub first_day: Weekday,
    /// Minimum days of the partial first week inside the new year (1–7).
    pub min_days: u8,
}

impl WeekRule {
    /// The ISO-8601 rule: weeks start Monday, week 1 needs 4 days.
    pub const ISO: WeekRule = WeekRule {
        first_day: Weekday::Monday,
        min_days: 4,
    };
}

/// The structural cycle of a calendar: how its year divides into months.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cycle {
    /// A month-based year: fixed month lengths, one month receiving the
    /// intercalary day in leap years.
    Month {
        /// Common-year month lengths, one entry per month.
        month_lengths: Vec<u8>,
        /// 1-based month that grows by one day in leap years.
        leap_month: u8,
        /// Which years are leap years.
        leap_rule: LeapRule,
    },
    /// A week-based year: months are groups of whole weeks anchored to the
    /// configured week rule; long years append one week to the final month.
    Week {
        /// Weeks per month in a common (52-week) year; must sum to 52.
        weeks_in_month: Vec<u8>,
    },
}

/// The immutable description of one calendar variant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarConfig {
    /// Month- or week-based year structure.
    pub cycle: Cycle,
    /// Signed day offset from the shared reference epoch
    /// (day 0 = proleptic Gregorian 0000-01-01).
    pub epoch_shift: IsoDays,
    /// Week-numbering rule; `None` means week queries are not defined for
    /// this variant.
    pub week_rule: Option<WeekRule>,
    /// Whether the year sequence contains a year 0. When `false`, year 0
    /// fails validation and years …, −1, 1, … are adjacent.
    pub has_year_zero: bool,
    /// Opaque locale reference for the external locale collaborator.
    pub locale: Option<String>,
}

impl CalendarConfig {
    /// Proleptic Gregorian: standard month lengths, Gregorian leap rule,
    /// ISO week numbering, year zero present.
    pub fn gregorian() -> Self {
        CalendarConfig {
            cycle: Cycle::Month {
                month_lengths: GREGORIAN_MONTH_LENGTHS.to_vec(),
                leap_month: 2,
                leap_rule: LeapRule::Gregorian,
            },
            epoch_shift: 0,
            week_rule: Some(WeekRule::ISO),
            has_year_zero: true,
            locale: None,
        }
    }

    /// Proleptic Julian: standard month lengths, no century exception,
    /// no year zero, no week rule.
    ///
    /// The epoch shift of −2 aligns Julian 0001-01-01 with iso day 364
    /// (proleptic Gregorian 0000-12-30).
    pub fn julian() -> Self {
        CalendarConfig {
            cycle: Cycle::Month {
                month_lengths: GREGORIAN_MONTH_LENGTHS.to_vec(),
                leap_month: 2,
                leap_rule: LeapRule::Julian,
            },
            epoch_shift: -2,
            week_rule: None,
            has_year_zero: false,
            locale: None,
        }
    }

    /// ISO-8601 week calendar: twelve months of 4-4-5 weeks per quarter,
    /// weeks starting Monday, week 1 holding at least 4 January days.
    pub fn iso_week() -> Self {
        CalendarConfig {
            cycle: Cycle::Week {
                weeks_in_month: vec![4, 4, 5, 4, 4, 5, 4, 4, 5, 4, 4, 5],
            },
            epoch_shift: 0,
            week_rule: Some(WeekRule::ISO),
            has_year_zero: true,
            locale: None,
        }
    }

    /// Number of months in `_year`.
    ///
    /// Constant for every cycle currently expressible, but looked up per
    /// variant so callers never hard-code 12.
    pub fn months_in_year(&self, _year: Year) -> u8 {
        match &self.cycle {
            Cycle::Month { month_lengths, .. } => month_lengths.len() as u8,
            Cycle::Week { weeks_in_month } => weeks_in_month.len() as u8,
        }
    }

    /// Days in a common (non-leap) year of a month cycle, or common weeks
    /// × 7 for a week cycle.
    pub(crate) fn common_year_days(&self) -> i64 {
        match &self.cycle {
            Cycle::Month { month_lengths, .. } => {
                month_lengths.iter().map(|&d| d as i64).sum()
            }
            Cycle::Week { weeks_in_month } => {
                weeks_in_month.iter().map(|&w| w as i64).sum::<i64>() * 7
            }
        }
    }

    /// Map an external year to the signed arithmetic year used by the
    /// day-count formulas. Identity for year-zero calendars; otherwise
    /// −n maps to −n + 1.
    pub(crate) fn arithmetic_year(&self, year: Year) -> i64 {
        if !self.has_year_zero && year < 0 {
            (year + 1) as i64
        } else {
            year as i64
        }
    }

    /// Inverse of [`CalendarConfig::arithmetic_year`].
    pub(crate) fn external_year(&self, year: i64) -> Year {
        if !self.has_year_zero && year <= 0 {
            (year - 1) as Year
        } else {
            year as Year
        }
    }

    /// The year preceding `year` in this calendar's year sequence.
    pub(crate) fn prev_year(&self, year: Year) -> Year {
        if !self.has_year_zero && year == 1 {
            -1
        } else {
            year - 1
        }
    }

    /// The year following `year` in this calendar's year sequence.
    pub(crate) fn next_year(&self, year: Year) -> Year {
        if !self.has_year_zero && year == -1 {
            1
        } else {
            year + 1
        }
    }
}

/// Common-year month lengths shared by the Gregorian and Julian presets.
pub(crate) const GREGORIAN_MONTH_LENGTHS: [u8; 12] =
    [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
