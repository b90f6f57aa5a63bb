//! Lunar and lunisolar calendar converters.
//!
//! These map a `(year, month, day)` in another calendar to a Gregorian
//! [`Date`].  Only the Islamic converter follows a real calendar rule (the
//! tabular 30-year cycle with its month-length table).  The Chinese, Hebrew
//! and Persian converters are **approximations**: a fixed anchor date plus a
//! mean year length and a mean (or fixed) month length.  They ignore leap
//! months and true lunar phases, so results can be off by days or, around
//! leap months, by a month.
//!
//! Year numbering per calendar:
//! * Islamic – Anno Hegirae (1445 AH began in July 2023).
//! * Chinese – aligned with the Gregorian year in which the lunar new year
//!   falls (2024 = the year beginning February 2024).
//! * Hebrew – Anno Mundi; months are counted from Tishrei = 1.
//! * Persian – Solar Hijri; months are counted from Farvardin = 1.

use crate::date::Date;
use hd_core::errors::{Error, Result};
use serde::{Deserialize, Serialize};

/// Mean synodic month in days.
const SYNODIC_MONTH: f64 = 29.530_588;

/// Mean tropical year in days.
const TROPICAL_YEAR: f64 = 365.242_2;

/// Mean Hebrew calendar year in days.
const HEBREW_YEAR: f64 = 365.246_8;

/// Serial of 1 Muharram 1 AH (July 16, 622 Julian).
const ISLAMIC_EPOCH: i32 = 227_015;

/// Days in one 30-year Islamic cycle.
const ISLAMIC_CYCLE_DAYS: i32 = 10_631;

/// Chinese new year 2000 (2000-02-05).
const CHINESE_ANCHOR: (i32, i32) = (2000, 730_155);

/// 1 Tishrei 5784 (2023-09-16).
const HEBREW_ANCHOR: (i32, i32) = (5784, 738_779);

/// 1 Farvardin 1403 (2024-03-20).
const PERSIAN_ANCHOR: (i32, i32) = (1403, 738_965);

/// A calendar with a converter to the Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LunarCalendar {
    /// Tabular Islamic (Hijri) calendar.
    Islamic,
    /// Chinese lunisolar calendar (approximate).
    Chinese,
    /// Hebrew lunisolar calendar (approximate).
    Hebrew,
    /// Persian solar calendar (approximate).
    Persian,
}

impl LunarCalendar {
    /// Tag used in rule payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            LunarCalendar::Islamic => "islamic",
            LunarCalendar::Chinese => "chinese",
            LunarCalendar::Hebrew => "hebrew",
            LunarCalendar::Persian => "persian",
        }
    }

    /// Highest month number a rule may use.
    pub fn max_month(&self) -> u8 {
        match self {
            LunarCalendar::Hebrew => 13,
            _ => 12,
        }
    }

    /// Highest day number a rule may use.
    pub fn max_day(&self) -> u8 {
        match self {
            LunarCalendar::Persian => 31,
            _ => 30,
        }
    }

    /// Convert a date in this calendar to the Gregorian calendar.
    pub fn to_gregorian(&self, year: i32, month: u8, day: u8) -> Result<Date> {
        if !(1..=self.max_month()).contains(&month) || !(1..=self.max_day()).contains(&day) {
            return Err(Error::Date(format!(
                "{}: {year}-{month:02}-{day:02} is not a valid date",
                self.as_str()
            )));
        }
        let serial = match self {
            LunarCalendar::Islamic => islamic_serial(year, month, day)?,
            LunarCalendar::Chinese => {
                let months = ((month - 1) as f64 * SYNODIC_MONTH).round() as i32;
                mean_year_serial(CHINESE_ANCHOR, TROPICAL_YEAR, year) + months + day as i32 - 1
            }
            LunarCalendar::Hebrew => {
                let months = ((month - 1) as f64 * SYNODIC_MONTH).round() as i32;
                mean_year_serial(HEBREW_ANCHOR, HEBREW_YEAR, year) + months + day as i32 - 1
            }
            LunarCalendar::Persian => {
                mean_year_serial(PERSIAN_ANCHOR, TROPICAL_YEAR, year)
                    + persian_month_offset(month)
                    + day as i32
                    - 1
            }
        };
        Date::from_serial(serial)
    }

    /// Every Gregorian date in `gregorian_year` on which `month`/`day` of this
    /// calendar falls, ascending.
    ///
    /// A calendar year shorter than the Gregorian one can produce the same
    /// date twice in one Gregorian year; a day missing from a particular
    /// calendar year is skipped.
    pub fn occurrences_in(&self, gregorian_year: i32, month: u8, day: u8) -> Vec<Date> {
        let candidates = match self {
            LunarCalendar::Islamic => {
                let (Ok(first), Ok(last)) = (
                    Date::from_ymd(gregorian_year, 1, 1),
                    Date::from_ymd(gregorian_year, 12, 31),
                ) else {
                    return Vec::new();
                };
                (islamic_year_near(first.serial()) - 1)..=(islamic_year_near(last.serial()) + 1)
            }
            LunarCalendar::Chinese => (gregorian_year - 1)..=(gregorian_year + 1),
            LunarCalendar::Hebrew => (gregorian_year + 3759)..=(gregorian_year + 3761),
            LunarCalendar::Persian => (gregorian_year - 622)..=(gregorian_year - 621),
        };
        let mut dates: Vec<Date> = candidates
            .filter(|y| *y >= 1)
            .filter_map(|y| self.to_gregorian(y, month, day).ok())
            .filter(|d| d.year() == gregorian_year)
            .collect();
        dates.sort();
        dates.dedup();
        dates
    }
}

impl std::fmt::Display for LunarCalendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LunarCalendar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "islamic" => Ok(LunarCalendar::Islamic),
            "chinese" => Ok(LunarCalendar::Chinese),
            "hebrew" => Ok(LunarCalendar::Hebrew),
            "persian" => Ok(LunarCalendar::Persian),
            other => Err(Error::UnknownLunarCalendar(other.to_string())),
        }
    }
}

// ── Islamic ──────────────────────────────────────────────────────────────────

/// Whether `year` AH is a leap year of the tabular cycle.
pub fn is_islamic_leap_year(year: i32) -> bool {
    (year * 11 + 14).rem_euclid(30) < 11
}

/// Days in `month` of `year` AH: odd months 30, even months 29, and the last
/// month 30 in leap years.
pub fn islamic_month_length(year: i32, month: u8) -> u8 {
    if (month == 12 && is_islamic_leap_year(year)) || month % 2 == 1 {
        30
    } else {
        29
    }
}

fn islamic_year_length(year: i32) -> i32 {
    if is_islamic_leap_year(year) {
        355
    } else {
        354
    }
}

/// The AH year containing `serial` by mean cycle length; off by at most one.
fn islamic_year_near(serial: i32) -> i32 {
    ((serial - ISLAMIC_EPOCH) * 30).div_euclid(ISLAMIC_CYCLE_DAYS) + 1
}

fn islamic_serial(year: i32, month: u8, day: u8) -> Result<i32> {
    if year < 1 {
        return Err(Error::Date(format!("islamic year {year} precedes the epoch")));
    }
    if day > islamic_month_length(year, month) {
        return Err(Error::Date(format!(
            "islamic month {month} of {year} has only {} days",
            islamic_month_length(year, month)
        )));
    }
    let elapsed = year - 1;
    let cycles = elapsed / 30;
    let mut days = cycles * ISLAMIC_CYCLE_DAYS;
    days += (cycles * 30 + 1..=elapsed).map(islamic_year_length).sum::<i32>();
    days += (1..month).map(|m| islamic_month_length(year, m) as i32).sum::<i32>();
    Ok(ISLAMIC_EPOCH + days + day as i32 - 1)
}

// ── Approximate calendars ────────────────────────────────────────────────────

fn mean_year_serial(anchor: (i32, i32), year_length: f64, year: i32) -> i32 {
    let (anchor_year, anchor_serial) = anchor;
    anchor_serial + ((year - anchor_year) as f64 * year_length).round() as i32
}

fn persian_month_offset(month: u8) -> i32 {
    let m = month as i32 - 1;
    if m <= 6 {
        m * 31
    } else {
        6 * 31 + (m - 6) * 30
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn islamic_leap_cycle() {
        let leaps: Vec<i32> = (1..=30).filter(|y| is_islamic_leap_year(*y)).collect();
        assert_eq!(leaps, vec![2, 5, 7, 10, 13, 16, 18, 21, 24, 26, 29]);
        let cycle: i32 = (1..=30).map(islamic_year_length).sum();
        assert_eq!(cycle, ISLAMIC_CYCLE_DAYS);
    }

    #[test]
    fn islamic_epoch() {
        let d = LunarCalendar::Islamic.to_gregorian(1, 1, 1).unwrap();
        assert_eq!(d, Date::from_julian_ymd(622, 7, 16).unwrap());
    }

    #[test]
    fn islamic_known_dates() {
        let cal = LunarCalendar::Islamic;
        // 1 Ramadan 1445 and 1 Shawwal 1445 (Eid al-Fitr)
        assert_eq!(cal.to_gregorian(1445, 9, 1).unwrap(), date(2024, 3, 11));
        assert_eq!(cal.to_gregorian(1445, 10, 1).unwrap(), date(2024, 4, 10));
    }

    #[test]
    fn islamic_day_beyond_month_is_error() {
        // Month 2 always has 29 days
        assert!(LunarCalendar::Islamic.to_gregorian(1445, 2, 30).is_err());
    }

    #[test]
    fn islamic_date_twice_in_one_year() {
        // 10 Dhu al-Hijjah fell in both January and December 2006.
        let dates = LunarCalendar::Islamic.occurrences_in(2006, 12, 10);
        assert_eq!(dates.len(), 2);
        assert_eq!(dates[0].month(), 1);
        assert_eq!(dates[1].month(), 12);
    }

    #[test]
    fn muharram_falls_in_every_year_up_to_9999() {
        for y in (700..=9999).step_by(7) {
            let d = LunarCalendar::Islamic.occurrences_in(y, 1, 1);
            assert!(!d.is_empty(), "1 Muharram missing from {y}");
        }
        // 1 Muharram 9666 AH is the last one before 10000
        assert!(!LunarCalendar::Islamic.occurrences_in(9999, 1, 1).is_empty());
    }

    #[test]
    fn approximations_stay_in_season() {
        // Chinese new year lands between January 21 and February 20.
        for y in 1990..2060 {
            let d = LunarCalendar::Chinese.occurrences_in(y, 1, 1);
            assert_eq!(d.len(), 1, "chinese new year {y}");
            assert!(d[0].month() == 1 || d[0].month() == 2);
        }
        // Nowruz is close to March 20.
        let nowruz = LunarCalendar::Persian.occurrences_in(2030, 1, 1);
        assert_eq!(nowruz.len(), 1);
        assert_eq!(nowruz[0].month(), 3);
        // Rosh Hashanah is in September or early October.
        let rh = LunarCalendar::Hebrew.occurrences_in(2030, 1, 1);
        assert_eq!(rh.len(), 1);
        assert!(rh[0].month() == 9 || rh[0].month() == 10);
    }

    #[test]
    fn anchors_convert_exactly() {
        assert_eq!(LunarCalendar::Chinese.to_gregorian(2000, 1, 1).unwrap(), date(2000, 2, 5));
        assert_eq!(LunarCalendar::Hebrew.to_gregorian(5784, 1, 1).unwrap(), date(2023, 9, 16));
        assert_eq!(LunarCalendar::Persian.to_gregorian(1403, 1, 1).unwrap(), date(2024, 3, 20));
        // Mehr 1 (month 7) follows six 31-day months
        assert_eq!(LunarCalendar::Persian.to_gregorian(1403, 7, 1).unwrap(), date(2024, 9, 22));
    }

    #[test]
    fn unknown_calendar() {
        assert_eq!(
            "mayan".parse::<LunarCalendar>(),
            Err(Error::UnknownLunarCalendar("mayan".into()))
        );
        assert_eq!("hebrew".parse::<LunarCalendar>().unwrap(), LunarCalendar::Hebrew);
    }

    #[test]
    fn invalid_components() {
        assert!(LunarCalendar::Chinese.to_gregorian(2024, 13, 1).is_err());
        assert!(LunarCalendar::Hebrew.to_gregorian(5784, 13, 1).is_ok());
        assert!(LunarCalendar::Persian.to_gregorian(1403, 1, 31).is_ok());
        assert!(LunarCalendar::Islamic.to_gregorian(1445, 1, 31).is_err());
    }
}
