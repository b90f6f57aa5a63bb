//! Dates from the approximate lunar calendar converters.

use hd_time::{Date, LunarCalendar};

/// Every Gregorian date in `year` on which `month`/`day` of `calendar`
/// falls.  May be empty, and for the Islamic calendar may hold two dates.
pub fn dates(calendar: LunarCalendar, year: i32, month: u8, day: u8) -> Vec<Date> {
    calendar.occurrences_in(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn eid_al_fitr_2024() {
        assert_eq!(dates(LunarCalendar::Islamic, 2024, 10, 1), vec![date(2024, 4, 10)]);
    }

    #[test]
    fn islamic_date_twice_in_one_year() {
        assert_eq!(
            dates(LunarCalendar::Islamic, 2006, 12, 10),
            vec![date(2006, 1, 10), date(2006, 12, 31)]
        );
    }

    #[test]
    fn approximate_calendars_produce_one_date() {
        for calendar in [LunarCalendar::Chinese, LunarCalendar::Hebrew, LunarCalendar::Persian] {
            assert_eq!(dates(calendar, 2030, 1, 1).len(), 1, "{calendar}");
        }
    }
}
