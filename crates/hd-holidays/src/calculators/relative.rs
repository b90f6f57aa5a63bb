//! Offsets from another rule in the same rule set.
//!
//! The base is looked up by exact name, then by id, then by name ignoring
//! ASCII case.  Its raw dates (before its own observance and duration) are
//! shifted by the offset.  Bases that are themselves relative resolve
//! recursively; the names visited so far travel down as `chain` and each
//! level works on its own copy.

use crate::rule::{HolidayRule, RuleKind};
use hd_core::errors::{Error, Result};
use hd_time::Date;
use tracing::{trace, warn};

/// Dates of `rule` in `year`: the dates of the rule named `relative_to`
/// shifted by `offset_days`.
///
/// # Errors
/// * [`Error::CircularDependency`] if `rule` is already in `chain`.
/// * [`Error::BaseHolidayNotFound`] if no rule in `rules` matches.
/// * [`Error::UnsupportedBaseType`] if the base is lunar or custom.
pub fn dates(
    rule: &HolidayRule,
    relative_to: &str,
    offset_days: i32,
    year: i32,
    rules: &[HolidayRule],
    chain: &[String],
) -> Result<Vec<Date>> {
    let mut visited = chain.to_vec();
    let cyclic = visited.contains(&rule.name);
    visited.push(rule.name.clone());
    if cyclic {
        warn!(chain = %visited.join(" -> "), "circular holiday dependency");
        return Err(Error::CircularDependency { chain: visited });
    }

    let base = find_base(relative_to, rules).ok_or_else(|| Error::BaseHolidayNotFound {
        rule: rule.name.clone(),
        base: relative_to.to_string(),
    })?;
    trace!(rule = %rule.name, base = %base.name, offset_days, year, "resolving relative rule");

    let base_dates = match &base.kind {
        RuleKind::Fixed { .. }
        | RuleKind::NthWeekday { .. }
        | RuleKind::EasterBased { .. }
        | RuleKind::Relative { .. } => super::raw_dates(base, year, rules, &visited)?,
        RuleKind::Lunar { .. } | RuleKind::Custom(_) => {
            return Err(Error::UnsupportedBaseType {
                rule: rule.name.clone(),
                base: base.name.clone(),
                base_type: base.rule_type().to_string(),
            })
        }
    };
    base_dates.into_iter().map(|d| d.add_days(offset_days)).collect()
}

/// Look `reference` up in `rules`: exact name, then id, then case-insensitive
/// name.
pub fn find_base<'r>(reference: &str, rules: &'r [HolidayRule]) -> Option<&'r HolidayRule> {
    rules
        .iter()
        .find(|r| r.name == reference)
        .or_else(|| rules.iter().find(|r| r.id.as_deref() == Some(reference)))
        .or_else(|| rules.iter().find(|r| r.name.eq_ignore_ascii_case(reference)))
}
