//! Error types for calendarium.
//!
//! The library reports three kinds of failure, each its own variant of a
//! single `thiserror`-derived enum:
//!
//! * [`Error::Validation`]: a calendar configuration was rejected at
//!   construction time. The payload names *every* offending key, not just
//!   the first one found.
//! * [`Error::Domain`]: a date component outside the calendar's valid
//!   range, reported when a date is constructed or checked. Nothing is
//!   clamped unless the caller asked for coercion.
//! * [`Error::NotDefined`]: a query the calendar does not model (for
//!   example a week range on a calendar with no week rule). Returned as
//!   data, never a panic.
//!
//! [`Error::Range`] covers iso-day arithmetic that leaves the supported
//! year span.

use thiserror::Error;

/// The top-level error type used throughout calendarium.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid calendar configuration, rejected before anything is
    /// registered.
    #[error("invalid calendar configuration: {0}")]
    Validation(ValidationError),

    /// A date component outside the calendar's valid range.
    #[error("date error: {0}")]
    Domain(String),

    /// A query that is meaningless for the calendar it was asked of.
    #[error("{query} is not defined for calendar {calendar}")]
    NotDefined {
        /// Name of the calendar the query was asked of.
        calendar: String,
        /// The query that is not modeled.
        query: &'static str,
    },

    /// An iso-day value or arithmetic result outside the supported span.
    #[error("out of range: {0}")]
    Range(String),
}

impl Error {
    /// Build a [`Error::NotDefined`] for `query` on the named calendar.
    pub fn not_defined(calendar: impl Into<String>, query: &'static str) -> Self {
        Error::NotDefined {
            calendar: calendar.into(),
            query,
        }
    }
}

/// Shorthand `Result` type used throughout calendarium.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A rejected configuration, carrying one entry per offending key.
///
/// Produced by the calendar factory. A configuration with several problems
/// reports all of them in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationError {
    /// Every offending key with its reason, in the order encountered.
    pub issues: Vec<ValidationIssue>,
}

/// One offending configuration key and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The configuration key at fault.
    pub key: String,
    /// Why the key or its value was rejected.
    pub message: String,
}

impl ValidationError {
    /// Create an empty issue list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem with `key`.
    pub fn push(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            key: key.into(),
            message: message.into(),
        });
    }

    /// `true` if no issues were recorded.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// The offending keys, in the order encountered.
    pub fn keys(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.key.as_str()).collect()
    }

    /// Convert into `Err(Error::Validation(..))` if any issue was recorded,
    /// `Ok(())` otherwise.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", issue.key, issue.message)?;
        }
        Ok(())
    }
}

/// Return `Err(Error::Domain(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use cal_core::{ensure, errors::Error};
/// fn month(m: u8) -> cal_core::errors::Result<u8> {
///     ensure!((1..=12).contains(&m), "month {m} out of range [1, 12]");
///     Ok(m)
/// }
/// assert!(month(6).is_ok());
/// assert!(month(13).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Domain(format!($($msg)*)));
        }
    };
}

/// Return `Err(Error::Domain(...))` immediately.
///
/// # Example
/// ```
/// use cal_core::{fail, errors::Error};
/// fn always_err() -> cal_core::errors::Result<()> {
///     fail!("no such date");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Domain(format!($($msg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_collects_all_issues() {
        let mut v = ValidationError::new();
        v.push("first_day", "must be in 1..=7, got 9");
        v.push("bogus", "unknown option");
        assert_eq!(v.keys(), vec!["first_day", "bogus"]);
        let err = v.clone().into_result().unwrap_err();
        let text = err.to_string();
        assert!(text.contains("first_day"));
        assert!(text.contains("bogus"));
    }

    #[test]
    fn empty_validation_is_ok() {
        assert!(ValidationError::new().into_result().is_ok());
    }

    #[test]
    fn not_defined_names_calendar_and_query() {
        let err = Error::not_defined("julian", "week_of_year");
        assert_eq!(
            err.to_string(),
            "week_of_year is not defined for calendar julian"
        );
    }
}
