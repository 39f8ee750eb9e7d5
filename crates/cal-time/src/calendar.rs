//! The `Calendar` variant type and its built-in instances.
//!
//! A calendar is one immutable value (a name plus a [`CalendarConfig`]),
//! and every query is a pure function of that config
//! and the numeric arguments, so a constructed calendar is freely shared
//! across threads. Built-ins (Gregorian, Julian, ISO week) are lazily
//! initialized statics; further variants are synthesized at runtime by
//! [`factory::new_calendar`][crate::factory::new_calendar].

use std::sync::LazyLock;

use cal_core::{ensure, fail, Day, Error, IsoDays, Month, Quarter, Result, Week, Year};

use crate::arithmetic;
use crate::config::{CalendarConfig, Cycle, MAX_YEAR, MIN_YEAR};
use crate::date::{CalendarDate, EraYear};
use crate::iso_days;
use crate::range::{self, DateInterval};
use crate::time_unit::TimeUnit;
use crate::week::{self, YearWeek};
use crate::weekday::Weekday;

/// The CLDR calendar-type tag consumed by an external formatting
/// collaborator to select display rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CldrCalendarType {
    /// Render with Gregorian display rules.
    Gregorian,
    /// Render with generic display rules.
    Other,
}

impl CldrCalendarType {
    /// The tag as its CLDR identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            CldrCalendarType::Gregorian => "gregorian",
            CldrCalendarType::Other => "other",
        }
    }
}

/// A calendar variant: a named, immutable configuration exposing the
/// shared operation set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    name: String,
    config: CalendarConfig,
    calendar_type: CldrCalendarType,
}

static GREGORIAN: LazyLock<Calendar> = LazyLock::new(|| Calendar {
    name: "gregorian".into(),
    config: CalendarConfig::gregorian(),
    calendar_type: CldrCalendarType::Gregorian,
});

static JULIAN: LazyLock<Calendar> = LazyLock::new(|| Calendar {
    name: "julian".into(),
    config: CalendarConfig::julian(),
    calendar_type: CldrCalendarType::Other,
});

static ISO_WEEK: LazyLock<Calendar> = LazyLock::new(|| Calendar {
    name: "iso_week".into(),
    config: CalendarConfig::iso_week(),
    calendar_type: CldrCalendarType::Other,
});

impl Calendar {
    /// The proleptic Gregorian calendar with ISO week numbering.
    pub fn gregorian() -> &'static Calendar {
        &GREGORIAN
    }

    /// The proleptic Julian calendar. No year zero, no week rule.
    pub fn julian() -> &'static Calendar {
        &JULIAN
    }

    /// The ISO-8601 week calendar: 4-4-5 weeks per quarter.
    pub fn iso_week() -> &'static Calendar {
        &ISO_WEEK
    }

    /// Assemble a runtime-synthesized variant from an already validated
    /// config. Only the factory calls this.
    pub(crate) fn generated(name: impl Into<String>, config: CalendarConfig) -> Calendar {
        Calendar {
            name: name.into(),
            config,
            calendar_type: CldrCalendarType::Other,
        }
    }

    /// The variant's registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The variant's immutable configuration.
    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// The display-rule tag for the external formatting collaborator.
    pub fn cldr_calendar_type(&self) -> CldrCalendarType {
        self.calendar_type
    }

    // ── Validity ─────────────────────────────────────────────────────────────

    fn check_year(&self, year: Year) -> Result<()> {
        ensure!(
            (MIN_YEAR..=MAX_YEAR).contains(&year),
            "year {year} outside supported span [{MIN_YEAR}, {MAX_YEAR}]"
        );
        if year == 0 && !self.config.has_year_zero {
            fail!("calendar {} has no year 0", self.name);
        }
        Ok(())
    }

    /// Construct a date validated against this calendar's rules.
    pub fn date(&self, year: Year, month: Month, day: Day) -> Result<CalendarDate> {
        self.check_year(year)?;
        let months = self.config.months_in_year(year);
        ensure!(
            (1..=months).contains(&month),
            "month {month} out of range [1, {months}] in calendar {}",
            self.name
        );
        let len = iso_days::days_in_month(&self.config, year, month);
        ensure!(
            (1..=len).contains(&day),
            "day {day} out of range [1, {len}] for {year}-{month:02} in calendar {}",
            self.name
        );
        Ok(CalendarDate::new(year, month, day))
    }

    /// `true` if `(year, month, day)` is a valid date of this calendar.
    pub fn valid_date(&self, year: Year, month: Month, day: Day) -> bool {
        self.date(year, month, day).is_ok()
    }

    // ── Structure queries ────────────────────────────────────────────────────

    /// Number of months in `year`.
    pub fn months_in_year(&self, year: Year) -> u8 {
        self.config.months_in_year(year)
    }

    /// Days in the given month.
    pub fn days_in_month(&self, year: Year, month: Month) -> Result<u8> {
        self.check_year(year)?;
        let months = self.config.months_in_year(year);
        ensure!(
            (1..=months).contains(&month),
            "month {month} out of range [1, {months}] in calendar {}",
            self.name
        );
        Ok(iso_days::days_in_month(&self.config, year, month))
    }

    /// Days in `year`.
    pub fn days_in_year(&self, year: Year) -> Result<u16> {
        self.check_year(year)?;
        Ok(iso_days::days_in_year(&self.config, year))
    }

    /// Leap-year predicate. For month cycles this is the configured leap
    /// rule; for week cycles a year is "leap" when it is a long (53-week)
    /// year. Invalid years are simply not leap.
    pub fn is_leap_year(&self, year: Year) -> bool {
        if self.check_year(year).is_err() {
            return false;
        }
        match &self.config.cycle {
            Cycle::Month { leap_rule, .. } => {
                iso_days::is_leap_arithmetic(*leap_rule, self.config.arithmetic_year(year))
            }
            Cycle::Week { .. } => iso_days::weeks_in_year(&self.config, year) == 53,
        }
    }

    /// `true` if `year` spans 53 weeks under the variant's week rule.
    pub fn long_year(&self, year: Year) -> Result<bool> {
        self.check_year(year)?;
        match &self.config.cycle {
            Cycle::Week { .. } => Ok(iso_days::weeks_in_year(&self.config, year) == 53),
            Cycle::Month { .. } => {
                let rule = self.week_rule_or_not_defined("long_year")?;
                Ok(week::long_year(&self.config, rule, year))
            }
        }
    }

    // ── Per-date queries ─────────────────────────────────────────────────────

    /// Weekday of a date.
    pub fn day_of_week(&self, date: CalendarDate) -> Result<Weekday> {
        let days = self.date_to_iso_days(date)?;
        Ok(Weekday::from_iso_days(days))
    }

    /// 1-based ordinal day within the date's year.
    pub fn day_of_year(&self, date: CalendarDate) -> Result<u16> {
        let days = self.date_to_iso_days(date)?;
        let start = iso_days::date_to_iso_days(&self.config, date.year, 1, 1);
        Ok((days - start + 1) as u16)
    }

    fn months_per_quarter(&self, year: Year, query: &'static str) -> Result<u8> {
        let months = self.config.months_in_year(year);
        if months % 4 != 0 {
            return Err(Error::not_defined(self.name.clone(), query));
        }
        Ok(months / 4)
    }

    /// Quarter of a date's year.
    pub fn quarter_of_year(&self, date: CalendarDate) -> Result<Quarter> {
        self.date(date.year, date.month, date.day)?;
        let per_quarter = self.months_per_quarter(date.year, "quarter_of_year")?;
        Ok((date.month - 1) / per_quarter + 1)
    }

    fn week_rule_or_not_defined(&self, query: &'static str) -> Result<crate::config::WeekRule> {
        self.config
            .week_rule
            .ok_or_else(|| Error::not_defined(self.name.clone(), query))
    }

    /// Week of year under the variant's own week rule. The returned year
    /// may be the adjacent one near year boundaries.
    pub fn week_of_year(&self, date: CalendarDate) -> Result<YearWeek> {
        let rule = self.week_rule_or_not_defined("week_of_year")?;
        let days = self.date_to_iso_days(date)?;
        match &self.config.cycle {
            Cycle::Month { .. } => Ok(week::week_of_year(&self.config, rule, date.year, days)),
            Cycle::Week { .. } => {
                let doy = days - iso_days::week_year_start(&self.config, date.year);
                Ok(YearWeek {
                    year: date.year,
                    week: (doy / 7 + 1) as Week,
                })
            }
        }
    }

    /// ISO-8601 week of the date: Gregorian year structure, `(Monday, 4)`
    /// rule. Defined for every variant.
    pub fn iso_week_of_year(&self, date: CalendarDate) -> Result<YearWeek> {
        let days = self.date_to_iso_days(date)?;
        Ok(week::iso_week_of_year(days))
    }

    // ── Era ──────────────────────────────────────────────────────────────────

    /// The date's year as an era tag plus positive year-of-era.
    pub fn year_of_era(&self, year: Year) -> Result<EraYear> {
        self.check_year(year)?;
        if year >= 1 {
            Ok(EraYear { era: 1, year })
        } else if self.config.has_year_zero {
            Ok(EraYear { era: 0, year: 1 - year })
        } else {
            Ok(EraYear { era: 0, year: -year })
        }
    }

    // ── Conversion ───────────────────────────────────────────────────────────

    /// Iso-day count of a valid date.
    pub fn date_to_iso_days(&self, date: CalendarDate) -> Result<IsoDays> {
        self.date(date.year, date.month, date.day)?;
        Ok(iso_days::date_to_iso_days(
            &self.config,
            date.year,
            date.month,
            date.day,
        ))
    }

    fn iso_bounds(&self) -> (IsoDays, IsoDays) {
        let lo = iso_days::date_to_iso_days(&self.config, MIN_YEAR, 1, 1);
        let months = self.config.months_in_year(MAX_YEAR);
        let last = iso_days::days_in_month(&self.config, MAX_YEAR, months);
        let hi = iso_days::date_to_iso_days(&self.config, MAX_YEAR, months, last);
        (lo, hi)
    }

    /// The date of an iso-day count in this calendar.
    pub fn date_from_iso_days(&self, days: IsoDays) -> Result<CalendarDate> {
        let (lo, hi) = self.iso_bounds();
        if !(lo..=hi).contains(&days) {
            return Err(Error::Range(format!(
                "iso day {days} outside supported span [{lo}, {hi}]"
            )));
        }
        let (year, month, day) = iso_days::date_from_iso_days(&self.config, days);
        Ok(CalendarDate::new(year, month, day))
    }

    // ── Arithmetic ───────────────────────────────────────────────────────────

    /// Add `amount` of `unit` to a valid date.
    ///
    /// For month, quarter, and year units the day component is clamped to
    /// the destination month only when `coerce` is true; otherwise it is
    /// preserved verbatim, and the result may be an invalid date whose
    /// validity is the caller's to check. Day and week units always land
    /// on valid dates.
    pub fn plus(
        &self,
        date: CalendarDate,
        unit: TimeUnit,
        amount: i64,
        coerce: bool,
    ) -> Result<CalendarDate> {
        self.date(date.year, date.month, date.day)?;
        match unit {
            TimeUnit::Days => arithmetic::plus_days(&self.config, date, amount),
            TimeUnit::Weeks => arithmetic::plus_days(&self.config, date, amount * 7),
            TimeUnit::Months => arithmetic::plus_months(&self.config, date, amount, coerce),
            TimeUnit::Quarters => {
                let per_quarter = self.months_per_quarter(date.year, "quarters")?;
                arithmetic::plus_months(&self.config, date, amount * per_quarter as i64, coerce)
            }
            TimeUnit::Years => arithmetic::plus_years(&self.config, date, amount, coerce),
        }
    }

    // ── Ranges ───────────────────────────────────────────────────────────────

    /// Inclusive range of the whole year.
    pub fn year_range(&self, year: Year) -> Result<DateInterval> {
        self.check_year(year)?;
        Ok(range::year(&self.config, year))
    }

    /// Inclusive range of a quarter.
    pub fn quarter_range(&self, year: Year, quarter: Quarter) -> Result<DateInterval> {
        self.check_year(year)?;
        let per_quarter = self.months_per_quarter(year, "quarter_range")?;
        ensure!(
            (1..=4).contains(&quarter),
            "quarter {quarter} out of range [1, 4]"
        );
        Ok(range::quarter(&self.config, year, quarter, per_quarter))
    }

    /// Inclusive range of a month.
    pub fn month_range(&self, year: Year, month: Month) -> Result<DateInterval> {
        self.check_year(year)?;
        let months = self.config.months_in_year(year);
        ensure!(
            (1..=months).contains(&month),
            "month {month} out of range [1, {months}] in calendar {}",
            self.name
        );
        Ok(range::month(&self.config, year, month))
    }

    /// Inclusive range of a week of the year. The endpoints may spill
    /// into the adjacent calendar year.
    pub fn week_range(&self, year: Year, week_number: Week) -> Result<DateInterval> {
        self.check_year(year)?;
        let rule = self.week_rule_or_not_defined("week_range")?;
        let weeks: Week = match &self.config.cycle {
            Cycle::Week { .. } => iso_days::weeks_in_year(&self.config, year),
            Cycle::Month { .. } => {
                if week::long_year(&self.config, rule, year) {
                    53
                } else {
                    52
                }
            }
        };
        ensure!(
            (1..=weeks).contains(&week_number),
            "week {week_number} out of range [1, {weeks}] for year {year}"
        );
        Ok(range::week_range(&self.config, rule, year, week_number))
    }

    /// First date of `year`.
    pub fn first_day_of_year(&self, year: Year) -> Result<CalendarDate> {
        Ok(self.year_range(year)?.start)
    }

    /// Last date of `year`.
    pub fn last_day_of_year(&self, year: Year) -> Result<CalendarDate> {
        Ok(self.year_range(year)?.end)
    }
}

impl std::fmt::Display for Calendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
