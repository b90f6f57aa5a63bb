//! Offsets from Easter Sunday.

use hd_core::errors::Result;
use hd_time::{easter_sunday, orthodox_easter, Date};

/// Easter Sunday of `year` (Orthodox when `orthodox`) plus `offset_days`.
pub fn dates(year: i32, offset_days: i32, orthodox: bool) -> Result<Vec<Date>> {
    let easter = if orthodox {
        orthodox_easter(year)?
    } else {
        easter_sunday(year)?
    };
    Ok(vec![easter.add_days(offset_days)?])
}
