//! Caller-supplied calculations.

use crate::rule::{CustomContext, CustomOutput, CustomRule, HolidayRule};
use hd_core::errors::{Error, Result};
use hd_time::Date;

/// Run `callback` for `year`.
///
/// # Errors
/// * [`Error::InvalidCustomResult`] if the callback produced no date.
/// * [`Error::CustomCalculation`] wrapping any error the callback returned.
pub fn dates(rule: &HolidayRule, callback: &CustomRule, year: i32, rules: &[HolidayRule]) -> Result<Vec<Date>> {
    let context = CustomContext { rule, rules };
    match callback.call(year, &context) {
        Ok(CustomOutput::Date(d)) => Ok(vec![d]),
        Ok(CustomOutput::Dates(ds)) => Ok(ds),
        Ok(CustomOutput::Nothing) => Err(Error::InvalidCustomResult {
            rule: rule.name.clone(),
        }),
        Err(e) => Err(Error::CustomCalculation {
            rule: rule.name.clone(),
            message: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleKind;

    fn run(rule: &HolidayRule, year: i32) -> Result<Vec<Date>> {
        let RuleKind::Custom(callback) = &rule.kind else {
            panic!("not a custom rule");
        };
        dates(rule, callback, year, &[])
    }

    #[test]
    fn single_and_multiple_dates() {
        let single = HolidayRule::custom("Midsummer", |y, _| Ok(Date::from_ymd(y, 6, 21)?.into()));
        assert_eq!(run(&single, 2024).unwrap(), vec![Date::from_ymd(2024, 6, 21).unwrap()]);

        let both = HolidayRule::custom("Solstices", |y, _| {
            Ok(vec![Date::from_ymd(y, 6, 21)?, Date::from_ymd(y, 12, 21)?].into())
        });
        assert_eq!(run(&both, 2024).unwrap().len(), 2);
    }

    #[test]
    fn nothing_is_invalid() {
        let rule = HolidayRule::custom("Void", |_, _| Ok(CustomOutput::Nothing));
        assert_eq!(
            run(&rule, 2024).unwrap_err(),
            Error::InvalidCustomResult { rule: "Void".into() }
        );
    }

    #[test]
    fn callback_error_carries_rule_name() {
        let rule = HolidayRule::custom("Broken", |_, _| Err("no data for year".into()));
        assert_eq!(
            run(&rule, 2024).unwrap_err(),
            Error::CustomCalculation {
                rule: "Broken".into(),
                message: "no data for year".into()
            }
        );
    }

    #[test]
    fn context_exposes_the_rule() {
        let rule = HolidayRule::custom("Named", |y, ctx| {
            let day = if ctx.rule.name == "Named" { 2 } else { 3 };
            Ok(Date::from_ymd(y, 1, day)?.into())
        });
        assert_eq!(run(&rule, 2024).unwrap(), vec![Date::from_ymd(2024, 1, 2).unwrap()]);
    }
}
