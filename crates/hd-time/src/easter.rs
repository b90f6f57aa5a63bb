//! Easter computus.
//!
//! * [`easter_sunday`]: Western Easter.  From 1583 on it uses the anonymous
//!   Gregorian (Meeus/Jones/Butcher) algorithm; for earlier years the Julian
//!   Easter is computed and converted to the proleptic Gregorian calendar
//!   through the Julian Day Number.
//! * [`orthodox_easter`]: Julian Easter shifted by the Julian/Gregorian
//!   calendar difference of that year.

use crate::date::Date;
use hd_core::errors::Result;

/// First year of the Gregorian computus.
pub const GREGORIAN_REFORM_YEAR: i32 = 1583;

/// Month and day of Western Easter Sunday in the Gregorian calendar.
fn gregorian_easter_md(year: i32) -> (u8, u8) {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let n = h + l - 7 * m + 114;
    ((n / 31) as u8, (n % 31 + 1) as u8)
}

/// Month and day of Easter Sunday in the Julian calendar.
pub fn julian_easter_md(year: i32) -> (u8, u8) {
    let a = year % 4;
    let b = year % 7;
    let c = year % 19;
    let d = (19 * c + 15) % 30;
    let e = (2 * a + 4 * b - d + 34) % 7;
    let n = d + e + 114;
    ((n / 31) as u8, (n % 31 + 1) as u8)
}

/// Western Easter Sunday for `year`.
pub fn easter_sunday(year: i32) -> Result<Date> {
    if year >= GREGORIAN_REFORM_YEAR {
        let (m, d) = gregorian_easter_md(year);
        Date::from_ymd(year, m, d)
    } else {
        let (m, d) = julian_easter_md(year);
        Date::from_julian_ymd(year, m, d)
    }
}

/// Days the Gregorian calendar runs ahead of the Julian one in `year`.
///
/// Zero before the reform; otherwise `centuries − ⌊centuries / 4⌋ − 2`.
pub fn julian_gregorian_difference(year: i32) -> i32 {
    if year < GREGORIAN_REFORM_YEAR {
        return 0;
    }
    let centuries = year / 100;
    centuries - centuries / 4 - 2
}

/// Orthodox Easter Sunday for `year`.
pub fn orthodox_easter(year: i32) -> Result<Date> {
    let (m, d) = julian_easter_md(year);
    Date::from_ymd(year, m, d)?.add_days(julian_gregorian_difference(year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weekday::Weekday;

    fn date(y: i32, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn western_easter_known_years() {
        assert_eq!(easter_sunday(2000).unwrap(), date(2000, 4, 23));
        assert_eq!(easter_sunday(2023).unwrap(), date(2023, 4, 9));
        assert_eq!(easter_sunday(2024).unwrap(), date(2024, 3, 31));
        assert_eq!(easter_sunday(2025).unwrap(), date(2025, 4, 20));
        assert_eq!(easter_sunday(1583).unwrap(), date(1583, 4, 10));
    }

    #[test]
    fn pre_reform_easter_is_converted_julian() {
        // Julian Easter 1500 is April 19, i.e. Gregorian April 29.
        let e = easter_sunday(1500).unwrap();
        assert_eq!(e, date(1500, 4, 29));
        assert_eq!(e.weekday(), Weekday::Sunday);
        assert_eq!(easter_sunday(1000).unwrap(), date(1000, 4, 6));
    }

    #[test]
    fn orthodox_easter_known_years() {
        assert_eq!(orthodox_easter(2023).unwrap(), date(2023, 4, 16));
        assert_eq!(orthodox_easter(2024).unwrap(), date(2024, 5, 5));
        // 2025: both churches celebrate on the same day
        assert_eq!(orthodox_easter(2025).unwrap(), easter_sunday(2025).unwrap());
    }

    #[test]
    fn calendar_difference() {
        assert_eq!(julian_gregorian_difference(1500), 0);
        assert_eq!(julian_gregorian_difference(1600), 10);
        assert_eq!(julian_gregorian_difference(1900), 13);
        assert_eq!(julian_gregorian_difference(2024), 13);
        assert_eq!(julian_gregorian_difference(2100), 14);
    }
}
