//! Rule schema validation.
//!
//! Every check runs; the violations are reported together in a single
//! [`Error::InvalidRule`].

use crate::rule::{HolidayRule, RuleKind};
use hd_core::errors::{Error, Result};

/// Longest multi-day holiday a rule may declare.
pub const MAX_DURATION: u32 = 366;

/// Violations in the fields shared by every kind of rule.
pub fn common_violations(name: &str, id: Option<&str>, duration: u32) -> Vec<String> {
    let mut out = Vec::new();
    if name.trim().is_empty() {
        out.push("name is required".to_string());
    }
    if matches!(id, Some(id) if id.trim().is_empty()) {
        out.push("id must not be empty when present".to_string());
    }
    if duration == 0 {
        out.push("duration must be at least 1 day".to_string());
    } else if duration > MAX_DURATION {
        out.push(format!("duration {duration} exceeds {MAX_DURATION} days"));
    }
    out
}

/// Collect every violation in `rule`, in check order.
pub fn violations(rule: &HolidayRule) -> Vec<String> {
    let mut out = common_violations(&rule.name, rule.id.as_deref(), rule.duration);

    match &rule.kind {
        RuleKind::Fixed { month, day } => {
            check_month(*month, &mut out);
            if !(1..=31).contains(day) {
                out.push(format!("day {day} out of range [1, 31]"));
            }
        }
        RuleKind::NthWeekday { month, weekday, nth } => {
            check_month(*month, &mut out);
            if *weekday > 6 {
                out.push(format!("weekday {weekday} out of range [0, 6]"));
            }
            if !(1..=5).contains(nth) && !(-5..=-1).contains(nth) {
                out.push(format!("nth {nth} must be 1-5 or -1 to -5"));
            }
        }
        RuleKind::Relative { relative_to, .. } => {
            if relative_to.trim().is_empty() {
                out.push("relativeTo is required".to_string());
            }
        }
        RuleKind::Lunar {
            calendar,
            month,
            day,
        } => {
            if !(1..=calendar.max_month()).contains(month) {
                out.push(format!(
                    "{calendar} month {month} out of range [1, {}]",
                    calendar.max_month()
                ));
            }
            if !(1..=calendar.max_day()).contains(day) {
                out.push(format!(
                    "{calendar} day {day} out of range [1, {}]",
                    calendar.max_day()
                ));
            }
        }
        RuleKind::EasterBased { .. } | RuleKind::Custom(_) => {}
    }

    out
}

/// Fail with [`Error::InvalidRule`] listing every violation, if any.
pub fn validate(rule: &HolidayRule) -> Result<()> {
    let violations = violations(rule);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidRule {
            rule: rule.name.clone(),
            violations,
        })
    }
}

fn check_month(month: u8, out: &mut Vec<String>) {
    if !(1..=12).contains(&month) {
        out.push(format!("month {month} out of range [1, 12]"));
    }
}
