//! `Weekday` — day-of-week enum.

use cal_core::IsoDays;

/// Day of the week.
///
/// Variants are numbered 1–7 (Monday = 1, Sunday = 7), the same numbering
/// the week-rule parameters `first_day` and `min_days` use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Weekday {
    /// Monday (1).
    Monday = 1,
    /// Tuesday (2).
    Tuesday = 2,
    /// Wednesday (3).
    Wednesday = 3,
    /// Thursday (4).
    Thursday = 4,
    /// Friday (5).
    Friday = 5,
    /// Saturday (6).
    Saturday = 6,
    /// Sunday (7).
    Sunday = 7,
}

impl Weekday {
    /// Construct from the ordinal (1 = Monday … 7 = Sunday).
    ///
    /// Returns `None` if the value is out of range.
    pub fn from_ordinal(n: u8) -> Option<Self> {
        match n {
            1 => Some(Weekday::Monday),
            2 => Some(Weekday::Tuesday),
            3 => Some(Weekday::Wednesday),
            4 => Some(Weekday::Thursday),
            5 => Some(Weekday::Friday),
            6 => Some(Weekday::Saturday),
            7 => Some(Weekday::Sunday),
            _ => None,
        }
    }

    /// Return the ordinal (1 = Monday … 7 = Sunday).
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// The weekday of an iso-day count.
    ///
    /// Day 0 (proleptic Gregorian 0000-01-01) is a Saturday, so day 2 is
    /// the first Monday.
    pub fn from_iso_days(days: IsoDays) -> Self {
        let ord = ((days - 2).rem_euclid(7) + 1) as u8;
        Weekday::from_ordinal(ord).expect("rem_euclid always in 1..=7")
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_round_trip() {
        for n in 1..=7 {
            assert_eq!(Weekday::from_ordinal(n).unwrap().ordinal(), n);
        }
        assert!(Weekday::from_ordinal(0).is_none());
        assert!(Weekday::from_ordinal(8).is_none());
    }

    #[test]
    fn epoch_weekday() {
        // Day 0 = 0000-01-01 proleptic Gregorian, a Saturday.
        assert_eq!(Weekday::from_iso_days(0), Weekday::Saturday);
        assert_eq!(Weekday::from_iso_days(2), Weekday::Monday);
        // 1970-01-01 (iso day 719528) was a Thursday.
        assert_eq!(Weekday::from_iso_days(719_528), Weekday::Thursday);
        // Negative days wrap the same way: -1 = Friday.
        assert_eq!(Weekday::from_iso_days(-1), Weekday::Friday);
    }
}
