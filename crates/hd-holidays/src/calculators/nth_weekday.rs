//! The n-th (or n-th last) weekday of a month.

use hd_core::errors::{Error, Result};
use hd_time::date::days_in_month;
use hd_time::{Date, Weekday};

/// The `nth` `weekday` (0 = Sunday) of `month` in `year`.
///
/// Positive `nth` counts from the first of the month, negative from the
/// last day.
///
/// # Errors
/// [`Error::NoSuchOccurrence`] when the month has fewer than `|nth|` such
/// weekdays.
pub fn dates(rule: &str, year: i32, month: u8, weekday: u8, nth: i8) -> Result<Vec<Date>> {
    let target = Weekday::from_index(weekday)?;
    let last_day = i32::from(days_in_month(year, month));
    let n = i32::from(nth);

    let day = if n > 0 {
        let first = Date::from_ymd(year, month, 1)?;
        1 + i32::from(first.weekday().days_until(target)) + 7 * (n - 1)
    } else {
        let last = Date::from_ymd(year, month, last_day as u8)?;
        last_day - i32::from(target.days_until(last.weekday())) - 7 * (-n - 1)
    };

    if n == 0 || day < 1 || day > last_day {
        return Err(Error::NoSuchOccurrence {
            rule: rule.to_string(),
            detail: format!("{} {target} of {year}-{month:02}", ordinal(nth)),
        });
    }
    Ok(vec![Date::from_ymd(year, month, day as u8)?])
}

fn ordinal(nth: i8) -> String {
    match nth {
        -1 => "last".to_string(),
        n if n < 0 => format!("{}-to-last", ordinal(-n)),
        1 => "1st".to_string(),
        2 => "2nd".to_string(),
        3 => "3rd".to_string(),
        n => format!("{n}th"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn third_monday_of_january() {
        assert_eq!(dates("MLK", 2024, 1, 1, 3).unwrap(), vec![date(2024, 1, 15)]);
    }

    #[test]
    fn last_monday_of_may() {
        assert_eq!(dates("Memorial", 2024, 5, 1, -1).unwrap(), vec![date(2024, 5, 27)]);
    }

    #[test]
    fn first_day_matches() {
        // 2024-01-01 is a Monday
        assert_eq!(dates("x", 2024, 1, 1, 1).unwrap(), vec![date(2024, 1, 1)]);
        // 2024-03-31 is a Sunday
        assert_eq!(dates("x", 2024, 3, 0, -1).unwrap(), vec![date(2024, 3, 31)]);
    }

    #[test]
    fn fifth_occurrences() {
        assert_eq!(dates("x", 2024, 1, 1, 5).unwrap(), vec![date(2024, 1, 29)]);
        assert_eq!(dates("x", 2024, 1, 1, -5).unwrap(), vec![date(2024, 1, 1)]);
    }

    #[test]
    fn missing_occurrence_fails() {
        let err = dates("Fifth Wednesday", 2024, 2, 3, 5).unwrap_err();
        assert_eq!(
            err,
            Error::NoSuchOccurrence {
                rule: "Fifth Wednesday".into(),
                detail: "5th Wednesday of 2024-02".into(),
            }
        );
        assert!(matches!(
            dates("x", 2024, 2, 3, -5),
            Err(Error::NoSuchOccurrence { .. })
        ));
    }
}
