//! `DateInterval` and year/quarter/month/week range construction.
//!
//! Every range is an inclusive start/end pair of dates in the calendar
//! that produced it. Units a variant does not model are refused by the
//! calendar surface with a not-defined error rather than fabricated here.

use cal_core::{IsoDays, Month, Quarter, Week, Year};

use crate::config::CalendarConfig;
use crate::date::CalendarDate;
use crate::iso_days;
use crate::week;

/// An inclusive pair of dates in one calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateInterval {
    /// First date of the interval.
    pub start: CalendarDate,
    /// Last date of the interval.
    pub end: CalendarDate,
}

impl DateInterval {
    /// Assemble an interval from its endpoints.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Self {
        DateInterval { start, end }
    }

    /// `true` if `date` lies within the interval. Lexicographic
    /// comparison; meaningful for dates of the interval's own calendar.
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl std::fmt::Display for DateInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Inclusive range of the whole year `y`.
pub(crate) fn year(cfg: &CalendarConfig, y: Year) -> DateInterval {
    let months = cfg.months_in_year(y);
    DateInterval::new(
        CalendarDate::new(y, 1, 1),
        CalendarDate::new(y, months, iso_days::days_in_month(cfg, y, months)),
    )
}

/// Inclusive range of quarter `q` of year `y`; `months_per_quarter` is the
/// caller-computed `months_in_year / 4`.
pub(crate) fn quarter(
    cfg: &CalendarConfig,
    y: Year,
    q: Quarter,
    months_per_quarter: u8,
) -> DateInterval {
    let first = (q - 1) * months_per_quarter + 1;
    let last = q * months_per_quarter;
    DateInterval::new(
        CalendarDate::new(y, first, 1),
        CalendarDate::new(y, last, iso_days::days_in_month(cfg, y, last)),
    )
}

/// Inclusive range of month `m` of year `y`.
pub(crate) fn month(cfg: &CalendarConfig, y: Year, m: Month) -> DateInterval {
    DateInterval::new(
        CalendarDate::new(y, m, 1),
        CalendarDate::new(y, m, iso_days::days_in_month(cfg, y, m)),
    )
}

/// Inclusive range of week `w` of year `y` under `rule`. The endpoints are
/// dates of the host calendar and may spill into the adjacent calendar
/// year.
pub(crate) fn week_range(
    cfg: &CalendarConfig,
    rule: crate::config::WeekRule,
    y: Year,
    w: Week,
) -> DateInterval {
    let start: IsoDays = week::first_week_start(cfg, rule, y) + 7 * (w as IsoDays - 1);
    let (sy, sm, sd) = iso_days::date_from_iso_days(cfg, start);
    let (ey, em, ed) = iso_days::date_from_iso_days(cfg, start + 6);
    DateInterval::new(
        CalendarDate::new(sy, sm, sd),
        CalendarDate::new(ey, em, ed),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeekRule;

    #[test]
    fn year_and_month_ranges() {
        let cfg = CalendarConfig::gregorian();
        let r = year(&cfg, 2024);
        assert_eq!(r.start, CalendarDate::new(2024, 1, 1));
        assert_eq!(r.end, CalendarDate::new(2024, 12, 31));

        let feb = month(&cfg, 2024, 2);
        assert_eq!(feb.end, CalendarDate::new(2024, 2, 29));
        assert!(feb.contains(CalendarDate::new(2024, 2, 15)));
        assert!(!feb.contains(CalendarDate::new(2024, 3, 1)));
    }

    #[test]
    fn quarter_ranges_use_quarter_width() {
        let cfg = CalendarConfig::gregorian();
        let q2 = quarter(&cfg, 2023, 2, 3);
        assert_eq!(q2.start, CalendarDate::new(2023, 4, 1));
        assert_eq!(q2.end, CalendarDate::new(2023, 6, 30));
    }

    #[test]
    fn week_ranges_cross_calendar_years() {
        let cfg = CalendarConfig::gregorian();
        // ISO week 1 of 2015 runs Monday Dec 29 2014 .. Sunday Jan 4 2015.
        let w1 = week_range(&cfg, WeekRule::ISO, 2015, 1);
        assert_eq!(w1.start, CalendarDate::new(2014, 12, 29));
        assert_eq!(w1.end, CalendarDate::new(2015, 1, 4));
        // Week 53 of long year 2015 ends Sunday Jan 3 2016.
        let w53 = week_range(&cfg, WeekRule::ISO, 2015, 53);
        assert_eq!(w53.end, CalendarDate::new(2016, 1, 3));
    }

    #[test]
    fn week_cycle_weeks_stay_inside_the_year() {
        let cfg = CalendarConfig::iso_week();
        let w5 = week_range(&cfg, WeekRule::ISO, 2021, 5);
        assert_eq!(w5.start, CalendarDate::new(2021, 2, 1));
        assert_eq!(w5.end, CalendarDate::new(2021, 2, 7));
    }
}
