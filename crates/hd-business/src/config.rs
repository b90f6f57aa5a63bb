//! `BusinessDayConfig`: what makes a day a non-working day.

use hd_holidays::HolidayRule;
use hd_time::{Date, WeekendSet};
use std::sync::Arc;

/// A predicate consulted for every candidate day; returning `false` makes
/// the day a non-business day.
pub type DayPredicate = Arc<dyn Fn(Date) -> bool + Send + Sync>;

/// Weekend days, holiday rules, and extra predicates.
#[derive(Clone, Default)]
pub struct BusinessDayConfig {
    /// Weekdays that are never business days.  Defaults to Saturday and
    /// Sunday.
    pub weekends: WeekendSet,
    /// Holiday rules evaluated through the engine, in priority order.
    pub holidays: Vec<HolidayRule>,
    /// Extra predicates; all must accept a day for it to be a business day.
    pub custom_rules: Vec<DayPredicate>,
}

impl BusinessDayConfig {
    /// Saturday/Sunday weekends, no holidays, no predicates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the weekend set.
    pub fn with_weekends(mut self, weekends: WeekendSet) -> Self {
        self.weekends = weekends;
        self
    }

    /// Replace the holiday rules.
    pub fn with_holidays(mut self, holidays: Vec<HolidayRule>) -> Self {
        self.holidays = holidays;
        self
    }

    /// Append one holiday rule.
    pub fn with_holiday(mut self, rule: HolidayRule) -> Self {
        self.holidays.push(rule);
        self
    }

    /// Append a predicate.
    pub fn with_custom_rule<F>(mut self, predicate: F) -> Self
    where
        F: Fn(Date) -> bool + Send + Sync + 'static,
    {
        self.custom_rules.push(Arc::new(predicate));
        self
    }
}

impl std::fmt::Debug for BusinessDayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusinessDayConfig")
            .field("weekends", &self.weekends)
            .field("holidays", &self.holidays.iter().map(|r| &r.name).collect::<Vec<_>>())
            .field("custom_rules", &self.custom_rules.len())
            .finish()
    }
}
