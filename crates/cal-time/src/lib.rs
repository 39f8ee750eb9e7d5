//! # cal-time
//!
//! Calendar variants over one shared day-counting algebra: a proleptic
//! Gregorian calendar, a Julian calendar, an ISO-8601 week calendar, and
//! configuration-defined week- or month-based calendars created at runtime
//! through [`factory::new_calendar`].
//!
//! Every variant exposes the same query surface (validity, month/year
//! lengths, weekday, week-of-year, quarter, ranges, calendar-unit
//! arithmetic, iso-day conversion); all of it is computed from an immutable
//! [`config::CalendarConfig`] with closed-form day arithmetic.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Calendar-unit date arithmetic with opt-in day coercion.
pub mod arithmetic;

/// The `Calendar` variant type and its built-in instances.
pub mod calendar;

/// Immutable calendar configuration values.
pub mod config;

/// `CalendarDate` and era/year pairs.
pub mod date;

/// The runtime calendar factory.
pub mod factory;

/// Closed-form conversion between dates and iso-day counts.
pub mod iso_days;

/// `DateInterval` and year/quarter/month/week range construction.
pub mod range;

/// The process-wide name → calendar registry.
pub mod registry;

/// `TimeUnit` — units accepted by date arithmetic.
pub mod time_unit;

/// Week-of-year numbering from a `(first_day, min_days)` rule.
pub mod week;

/// `Weekday` — day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use calendar::{Calendar, CldrCalendarType};
pub use config::{CalendarConfig, Cycle, LeapRule, WeekRule};
pub use date::{CalendarDate, EraYear};
pub use factory::{new_calendar, CycleKind, OptionValue};
pub use range::DateInterval;
pub use registry::CalendarHandle;
pub use time_unit::TimeUnit;
pub use week::YearWeek;
pub use weekday::Weekday;
