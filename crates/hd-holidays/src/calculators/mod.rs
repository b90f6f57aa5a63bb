//! Per-type date calculators.
//!
//! Each calculator turns one rule payload and a year into the rule's raw
//! dates, before weekend observance and duration expansion.  [`raw_dates`]
//! selects the calculator by matching on [`RuleKind`].

use crate::rule::{HolidayRule, RuleKind};
use hd_core::errors::Result;
use hd_time::Date;

pub mod custom;
pub mod easter_based;
pub mod fixed;
pub mod lunar;
pub mod nth_weekday;
pub mod relative;

/// Raw dates of `rule` in `year`, ascending.
///
/// `rules` is the set relative rules resolve their base against, and `chain`
/// the names already visited on the way to `rule` (empty at the top level).
pub fn raw_dates(rule: &HolidayRule, year: i32, rules: &[HolidayRule], chain: &[String]) -> Result<Vec<Date>> {
    let mut dates = match &rule.kind {
        RuleKind::Fixed { month, day } => fixed::dates(year, *month, *day)?,
        RuleKind::NthWeekday { month, weekday, nth } => {
            nth_weekday::dates(&rule.name, year, *month, *weekday, *nth)?
        }
        RuleKind::Relative {
            relative_to,
            offset_days,
        } => relative::dates(rule, relative_to, *offset_days, year, rules, chain)?,
        RuleKind::Lunar {
            calendar,
            month,
            day,
        } => lunar::dates(*calendar, year, *month, *day),
        RuleKind::EasterBased {
            offset_days,
            orthodox,
        } => easter_based::dates(year, *offset_days, *orthodox)?,
        RuleKind::Custom(callback) => custom::dates(rule, callback, year, rules)?,
    };
    dates.sort();
    dates.dedup();
    Ok(dates)
}
