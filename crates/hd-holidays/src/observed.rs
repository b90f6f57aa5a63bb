//! Weekend observance.
//!
//! Raw dates not on a configured weekend day pass through unchanged; the
//! rest are moved (or doubled) according to the rule's [`ObservedType`].

use crate::rule::{Direction, ObservedRule, ObservedType};
use hd_core::errors::{Error, Result};
use hd_time::{Date, Weekday};

impl ObservedRule {
    /// The observed date(s) of a holiday falling on `date`.
    ///
    /// # Errors
    /// Fails if a substitute walk cannot leave the weekend (every weekday
    /// configured as weekend) or runs off the supported date range.
    pub fn apply(&self, date: Date) -> Result<Vec<Date>> {
        if !self.weekends.is_weekend(date) {
            return Ok(vec![date]);
        }
        match self.kind {
            ObservedType::Substitute => {
                let step = match self.direction {
                    Direction::Forward => 1,
                    Direction::Backward => -1,
                };
                let mut d = date;
                for _ in 0..7 {
                    d = d.add_days(step)?;
                    if !self.weekends.is_weekend(d) {
                        return Ok(vec![d]);
                    }
                }
                Err(Error::InvalidArgument(format!(
                    "no substitute day for {date}: every weekday is a weekend day"
                )))
            }
            ObservedType::NearestWeekday => match date.weekday() {
                Weekday::Sunday => Ok(vec![date.succ()?]),
                Weekday::Saturday => Ok(vec![date.pred()?]),
                _ => Ok(vec![date]),
            },
            ObservedType::Bridge => Ok(vec![date, date.succ()?]),
        }
    }

    /// Apply [`ObservedRule::apply`] to each of `dates`, in order.
    pub fn apply_all(&self, dates: &[Date]) -> Result<Vec<Date>> {
        let mut out = Vec::with_capacity(dates.len());
        for &d in dates {
            out.extend(self.apply(d)?);
        }
        Ok(out)
    }
}
