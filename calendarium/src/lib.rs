//! # calendarium
//!
//! Calendar dates across multiple calendar systems: proleptic Gregorian,
//! Julian, the ISO-8601 week calendar, and week- or month-based calendars
//! defined at runtime from a configuration, all sharing one signed
//! day-counting algebra.
//!
//! This crate is a **façade** that re-exports the public items of the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `cal-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use calendarium::time::{Calendar, TimeUnit};
//!
//! let cal = Calendar::gregorian();
//! let date = cal.date(2016, 1, 1).unwrap();
//!
//! // Jan 1 2016 is a Friday in the final ISO week of 2015.
//! let week = cal.iso_week_of_year(date).unwrap();
//! assert_eq!((week.year, week.week), (2015, 53));
//!
//! // Month arithmetic clamps only when asked to.
//! let d = cal.date(2021, 1, 31).unwrap();
//! let clamped = cal.plus(d, TimeUnit::Months, 1, true).unwrap();
//! assert_eq!((clamped.month, clamped.day), (2, 28));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use cal_core as core;

/// Calendars, dates, week numbering, arithmetic, ranges, and the factory.
pub use cal_time as time;
