//! Same month and day every year.

use hd_core::errors::Result;
use hd_time::date::days_in_month;
use hd_time::Date;

/// `month`/`day` of `year`, or nothing when that day does not exist in
/// `year` (February 29 outside leap years, or a day past the month's end).
pub fn dates(year: i32, month: u8, day: u8) -> Result<Vec<Date>> {
    if day == 0 || day > days_in_month(year, month) {
        return Ok(Vec::new());
    }
    Ok(vec![Date::from_ymd(year, month, day)?])
}
