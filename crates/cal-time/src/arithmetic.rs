//! Calendar-unit date arithmetic.
//!
//! Month (and month-derived) addition computes the target year and month
//! by adjusted modulo over the 1-based month index and the variant's
//! `months_in_year`. Day handling is the caller's choice: with coercion
//! the day clamps to the destination month's length; without it the
//! original day is preserved even when the result is not a valid date,
//! and validity is then the caller's to check. Nothing clamps silently.

use cal_core::{Error, IsoDays, Result, Year};

use crate::config::{CalendarConfig, MAX_YEAR, MIN_YEAR};
use crate::date::CalendarDate;
use crate::iso_days;

/// `year + amount` along the calendar's year sequence, skipping year 0
/// where the calendar has none.
pub(crate) fn add_years(cfg: &CalendarConfig, year: Year, amount: i64) -> Result<Year> {
    let shifted = cfg.arithmetic_year(year) + amount;
    let external = cfg.external_year(shifted);
    if !(MIN_YEAR..=MAX_YEAR).contains(&external) {
        return Err(Error::Range(format!(
            "year {external} outside supported span [{MIN_YEAR}, {MAX_YEAR}]"
        )));
    }
    Ok(external)
}

/// Add `amount` months to `date`.
pub(crate) fn plus_months(
    cfg: &CalendarConfig,
    date: CalendarDate,
    amount: i64,
    coerce: bool,
) -> Result<CalendarDate> {
    let months = cfg.months_in_year(date.year) as i64;
    let total = (date.month as i64 - 1) + amount;
    let carry = total.div_euclid(months);
    let month = (total.rem_euclid(months) + 1) as u8;
    let year = add_years(cfg, date.year, carry)?;
    let day = if coerce {
        date.day.min(iso_days::days_in_month(cfg, year, month))
    } else {
        date.day
    };
    Ok(CalendarDate::new(year, month, day))
}

/// Add `amount` years to `date`, keeping the month.
pub(crate) fn plus_years(
    cfg: &CalendarConfig,
    date: CalendarDate,
    amount: i64,
    coerce: bool,
) -> Result<CalendarDate> {
    let year = add_years(cfg, date.year, amount)?;
    let day = if coerce {
        date.day.min(iso_days::days_in_month(cfg, year, date.month))
    } else {
        date.day
    };
    Ok(CalendarDate::new(year, date.month, day))
}

/// Add `amount` days to a valid `date` by way of its iso-day count.
/// Always lands on a valid date of the same calendar.
pub(crate) fn plus_days(
    cfg: &CalendarConfig,
    date: CalendarDate,
    amount: i64,
) -> Result<CalendarDate> {
    let days: IsoDays = iso_days::date_to_iso_days(cfg, date.year, date.month, date.day)
        .checked_add(amount)
        .ok_or_else(|| Error::Range("day arithmetic overflow".into()))?;
    let (year, month, day) = iso_days::date_from_iso_days(cfg, days);
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(Error::Range(format!(
            "year {year} outside supported span [{MIN_YEAR}, {MAX_YEAR}]"
        )));
    }
    Ok(CalendarDate::new(year, month, day))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_addition_with_coercion() {
        let cfg = CalendarConfig::gregorian();
        let jan31 = CalendarDate::new(2021, 1, 31);
        assert_eq!(
            plus_months(&cfg, jan31, 1, true).unwrap(),
            CalendarDate::new(2021, 2, 28)
        );
    }

    #[test]
    fn month_addition_without_coercion_keeps_the_day() {
        // The result is deliberately not a valid date; the caller owns
        // the validity check.
        let cfg = CalendarConfig::gregorian();
        let jan31 = CalendarDate::new(2021, 1, 31);
        assert_eq!(
            plus_months(&cfg, jan31, 1, false).unwrap(),
            CalendarDate::new(2021, 2, 31)
        );
    }

    #[test]
    fn month_addition_carries_years() {
        let cfg = CalendarConfig::gregorian();
        let d = CalendarDate::new(2021, 11, 15);
        assert_eq!(
            plus_months(&cfg, d, 3, true).unwrap(),
            CalendarDate::new(2022, 2, 15)
        );
        assert_eq!(
            plus_months(&cfg, d, -11, true).unwrap(),
            CalendarDate::new(2020, 12, 15)
        );
        assert_eq!(
            plus_months(&cfg, d, -23, true).unwrap(),
            CalendarDate::new(2019, 12, 15)
        );
    }

    #[test]
    fn year_addition_coerces_leap_day() {
        let cfg = CalendarConfig::gregorian();
        let leap = CalendarDate::new(2024, 2, 29);
        assert_eq!(
            plus_years(&cfg, leap, 1, true).unwrap(),
            CalendarDate::new(2025, 2, 28)
        );
        assert_eq!(
            plus_years(&cfg, leap, 1, false).unwrap(),
            CalendarDate::new(2025, 2, 29)
        );
    }

    #[test]
    fn year_addition_skips_julian_year_zero() {
        let cfg = CalendarConfig::julian();
        let d = CalendarDate::new(1, 6, 15);
        assert_eq!(plus_years(&cfg, d, -1, true).unwrap().year, -1);
        let d = CalendarDate::new(-2, 6, 15);
        assert_eq!(plus_years(&cfg, d, 2, true).unwrap().year, 1);
    }

    #[test]
    fn day_addition_crosses_year_boundary() {
        let cfg = CalendarConfig::gregorian();
        let d = CalendarDate::new(2015, 12, 30);
        assert_eq!(
            plus_days(&cfg, d, 3).unwrap(),
            CalendarDate::new(2016, 1, 2)
        );
        assert_eq!(
            plus_days(&cfg, d, -364).unwrap(),
            CalendarDate::new(2014, 12, 31)
        );
    }

    #[test]
    fn range_exhaustion_is_an_error() {
        let cfg = CalendarConfig::gregorian();
        let d = CalendarDate::new(99_999, 12, 1);
        assert!(matches!(
            plus_months(&cfg, d, 1, true),
            Err(Error::Range(_))
        ));
    }
}
