//! `BusinessDayCalculator`: bounded, holiday-aware date walking.
//!
//! A day is a business day when it is not a configured weekend day, no
//! active holiday rule falls on it, and every custom predicate accepts it.
//! Walks that could loop forever on a pathological configuration are capped
//! by [`Settings::max_step_iterations`] and [`Settings::max_add_iterations`]
//! and fail with [`Error::NoBusinessDayFound`].

use crate::config::BusinessDayConfig;
use hd_core::errors::{Error, Result};
use hd_core::{ensure, CacheStats, LruCache, Settings};
use hd_holidays::HolidayEngine;
use hd_time::date::days_in_month;
use hd_time::{BusinessDayConvention, Date};
use std::cell::RefCell;
use tracing::{debug, trace, warn};

/// Business days between trade and settlement when none is given.
pub const DEFAULT_SETTLEMENT_LAG: u32 = 2;

/// Answers business-day questions for one [`BusinessDayConfig`].
///
/// Holiday membership is delegated to a borrowed [`HolidayEngine`]; per-day
/// answers are cached until the configuration changes.
#[derive(Debug)]
pub struct BusinessDayCalculator<'e> {
    engine: &'e HolidayEngine,
    config: BusinessDayConfig,
    settings: Settings,
    cache: RefCell<LruCache<Date, bool>>,
}

impl<'e> BusinessDayCalculator<'e> {
    /// A calculator using the engine's settings.
    pub fn new(engine: &'e HolidayEngine, config: BusinessDayConfig) -> Self {
        let settings = *engine.settings();
        Self {
            engine,
            config,
            cache: RefCell::new(LruCache::new(settings.business_day_cache_capacity)),
            settings,
        }
    }

    /// A calculator with its own settings.
    pub fn with_settings(engine: &'e HolidayEngine, config: BusinessDayConfig, settings: Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            engine,
            config,
            cache: RefCell::new(LruCache::new(settings.business_day_cache_capacity)),
            settings,
        })
    }

    /// The current configuration.
    pub fn config(&self) -> &BusinessDayConfig {
        &self.config
    }

    /// Replace the configuration and drop every cached answer, including the
    /// engine's holiday dates, so redefined rules take effect.
    pub fn update_config(&mut self, config: BusinessDayConfig) {
        debug!(holidays = config.holidays.len(), custom_rules = config.custom_rules.len(), "business day config updated");
        self.config = config;
        self.cache.get_mut().clear();
        self.engine.clear_cache();
    }

    /// Drop every cached answer.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }

    /// Counters of the per-day cache.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.borrow().stats()
    }

    // ── Membership ───────────────────────────────────────────────────────────

    /// Whether `date` is a business day.
    pub fn is_business_day(&self, date: Date) -> Result<bool> {
        if let Some(&cached) = self.cache.borrow_mut().get(&date) {
            return Ok(cached);
        }
        let business = !self.config.weekends.is_weekend(date)
            && (self.config.holidays.is_empty() || !self.engine.is_holiday(date, &self.config.holidays)?)
            && self.config.custom_rules.iter().all(|accepts| accepts(date));
        self.cache.borrow_mut().insert(date, business);
        Ok(business)
    }

    /// Whether `date` is the last business day of its month.
    pub fn is_last_business_day_of_month(&self, date: Date) -> Result<bool> {
        Ok(self.last_business_day(date.year(), date.month())? == Some(date))
    }

    // ── Walking ──────────────────────────────────────────────────────────────

    /// The first business day strictly after `date`.
    pub fn next_business_day(&self, date: Date) -> Result<Date> {
        self.step(date, 1)
    }

    /// The last business day strictly before `date`.
    pub fn previous_business_day(&self, date: Date) -> Result<Date> {
        self.step(date, -1)
    }

    fn step(&self, from: Date, direction: i32) -> Result<Date> {
        let bound = self.settings.max_step_iterations;
        let mut d = from;
        for _ in 0..bound {
            d = d.add_days(direction)?;
            if self.is_business_day(d)? {
                return Ok(d);
            }
        }
        warn!(from = %from, iterations = bound, "business day walk exhausted");
        Err(Error::NoBusinessDayFound {
            from: from.to_string(),
            iterations: bound,
        })
    }

    /// Move `n` business days from `date`, forwards for positive `n` and
    /// backwards for negative.  `n = 0` returns `date` unchanged, business day
    /// or not.
    pub fn add_business_days(&self, date: Date, n: i32) -> Result<Date> {
        let step = n.signum();
        let mut remaining = n.unsigned_abs();
        let bound = self.settings.max_add_iterations;
        let mut d = date;
        let mut iterations = 0;
        while remaining > 0 {
            if iterations == bound {
                warn!(from = %date, n, iterations = bound, "add_business_days walk exhausted");
                return Err(Error::NoBusinessDayFound {
                    from: date.to_string(),
                    iterations: bound,
                });
            }
            iterations += 1;
            d = d.add_days(step)?;
            if self.is_business_day(d)? {
                remaining -= 1;
            }
        }
        trace!(from = %date, n, to = %d, iterations, "added business days");
        Ok(d)
    }

    /// Signed count of business days from `start` to `end`, excluding
    /// `start` and including `end` in the direction of travel.
    pub fn business_days_between(&self, start: Date, end: Date) -> Result<i32> {
        if start == end {
            return Ok(0);
        }
        let (sign, first, last) = if end > start {
            (1, start.add_days(1)?, end)
        } else {
            (-1, end, start.add_days(-1)?)
        };
        let mut count = 0;
        if first <= last {
            for serial in first.serial()..=last.serial() {
                if self.is_business_day(Date::from_serial(serial)?)? {
                    count += 1;
                }
            }
        }
        Ok(sign * count)
    }

    /// Adjust `date` to a business day according to `convention`.
    pub fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Result<Date> {
        if convention == BusinessDayConvention::Unadjusted || self.is_business_day(date)? {
            return Ok(date);
        }
        match convention {
            BusinessDayConvention::Unadjusted => Ok(date),
            BusinessDayConvention::Following => self.next_business_day(date),
            BusinessDayConvention::Preceding => self.previous_business_day(date),
            BusinessDayConvention::ModifiedFollowing => {
                let adjusted = self.next_business_day(date)?;
                if adjusted.month() != date.month() {
                    self.previous_business_day(date)
                } else {
                    Ok(adjusted)
                }
            }
            BusinessDayConvention::ModifiedPreceding => {
                let adjusted = self.previous_business_day(date)?;
                if adjusted.month() != date.month() {
                    self.next_business_day(date)
                } else {
                    Ok(adjusted)
                }
            }
            BusinessDayConvention::Nearest => {
                let fwd = self.next_business_day(date)?;
                let bwd = self.previous_business_day(date)?;
                if fwd - date <= date - bwd {
                    Ok(fwd)
                } else {
                    Ok(bwd)
                }
            }
        }
    }

    /// The date `lag` business days after `trade_date`.
    pub fn settlement_date(&self, trade_date: Date, lag: u32) -> Result<Date> {
        let lag = i32::try_from(lag).map_err(|_| Error::InvalidArgument(format!("settlement lag {lag} is too large")))?;
        self.add_business_days(trade_date, lag)
    }

    // ── Scans ────────────────────────────────────────────────────────────────

    /// Every business day in `[start, end]`, ascending.
    pub fn business_days_in_range(&self, start: Date, end: Date) -> Result<Vec<Date>> {
        ensure!(start <= end, "range start {start} is after end {end}");
        let mut out = Vec::new();
        for serial in start.serial()..=end.serial() {
            let d = Date::from_serial(serial)?;
            if self.is_business_day(d)? {
                out.push(d);
            }
        }
        Ok(out)
    }

    /// Number of business days in `month` of `year`.
    pub fn business_days_in_month(&self, year: i32, month: u8) -> Result<usize> {
        Ok(self.month_business_days(year, month)?.len())
    }

    /// Number of business days in `year`.
    pub fn business_days_in_year(&self, year: i32) -> Result<usize> {
        let start = Date::from_ymd(year, 1, 1)?;
        let end = Date::from_ymd(year, 12, 31)?;
        Ok(self.business_days_in_range(start, end)?.len())
    }

    /// The `n`-th business day of the month (`n = 1` is the first, `n = -1`
    /// the last), or `None` if the month has fewer than `|n|`.
    pub fn nth_business_day(&self, year: i32, month: u8, n: i32) -> Result<Option<Date>> {
        ensure!(n != 0, "n must be non-zero");
        let days = self.month_business_days(year, month)?;
        let index = if n > 0 {
            usize::try_from(n - 1).ok()
        } else {
            usize::try_from(-n).ok().and_then(|k| days.len().checked_sub(k))
        };
        Ok(index.and_then(|i| days.get(i).copied()))
    }

    /// The last business day of the month, or `None` if it has none.
    pub fn last_business_day(&self, year: i32, month: u8) -> Result<Option<Date>> {
        self.nth_business_day(year, month, -1)
    }

    fn month_business_days(&self, year: i32, month: u8) -> Result<Vec<Date>> {
        let start = Date::from_ymd(year, month, 1)?;
        let end = Date::from_ymd(year, month, days_in_month(year, month))?;
        self.business_days_in_range(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hd_holidays::{HolidayRule, ObservedRule};
    use hd_time::WeekendSet;

    fn date(y: i32, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn us_config() -> BusinessDayConfig {
        BusinessDayConfig::new()
            .with_holiday(HolidayRule::fixed("New Year", 1, 1).with_observed(ObservedRule::nearest_weekday()))
            .with_holiday(HolidayRule::nth_weekday("Memorial Day", 5, 1, -1))
            .with_holiday(HolidayRule::fixed("Independence Day", 7, 4).with_observed(ObservedRule::nearest_weekday()))
            .with_holiday(HolidayRule::fixed("Christmas", 12, 25).with_observed(ObservedRule::nearest_weekday()))
    }

    #[test]
    fn weekends_and_holidays() {
        let engine = HolidayEngine::new();
        let cal = BusinessDayCalculator::new(&engine, us_config());
        assert!(!cal.is_business_day(date(2024, 7, 6)).unwrap()); // Saturday
        assert!(!cal.is_business_day(date(2024, 7, 4)).unwrap());
        assert!(cal.is_business_day(date(2024, 7, 5)).unwrap());
        assert!(!cal.is_business_day(date(2024, 5, 27)).unwrap());
    }

    #[test]
    fn custom_predicates_exclude_days() {
        let engine = HolidayEngine::new();
        let config = BusinessDayConfig::new().with_custom_rule(|d| d.day_of_month() != 15);
        let cal = BusinessDayCalculator::new(&engine, config);
        assert!(!cal.is_business_day(date(2024, 1, 15)).unwrap());
        assert!(cal.is_business_day(date(2024, 1, 16)).unwrap());
    }

    #[test]
    fn following_and_preceding_walks() {
        let engine = HolidayEngine::new();
        let cal = BusinessDayCalculator::new(&engine, us_config());
        // Wed 2024-07-03 → Fri 07-05 (Thu is Independence Day)
        assert_eq!(cal.next_business_day(date(2024, 7, 3)).unwrap(), date(2024, 7, 5));
        // Tue 2024-05-28 → Fri 05-24 (Mon is Memorial Day)
        assert_eq!(cal.previous_business_day(date(2024, 5, 28)).unwrap(), date(2024, 5, 24));
    }

    #[test]
    fn adjust_conventions() {
        let engine = HolidayEngine::new();
        let cal = BusinessDayCalculator::new(&engine, BusinessDayConfig::new());
        // 2023-09-02 is a Saturday
        let sat = date(2023, 9, 2);
        assert_eq!(cal.adjust(sat, BusinessDayConvention::Following).unwrap(), date(2023, 9, 4));
        assert_eq!(cal.adjust(sat, BusinessDayConvention::Preceding).unwrap(), date(2023, 9, 1));
        assert_eq!(cal.adjust(sat, BusinessDayConvention::Unadjusted).unwrap(), sat);
        // Saturday is one day after Friday and two before Monday
        assert_eq!(cal.adjust(sat, BusinessDayConvention::Nearest).unwrap(), date(2023, 9, 1));
        assert_eq!(cal.adjust(date(2023, 9, 3), BusinessDayConvention::Nearest).unwrap(), date(2023, 9, 4));
        // 2023-09-30 is a Saturday: following leaves the month
        let month_end = date(2023, 9, 30);
        assert_eq!(
            cal.adjust(month_end, BusinessDayConvention::ModifiedFollowing).unwrap(),
            date(2023, 9, 29)
        );
        // 2023-10-01 is a Sunday: preceding leaves the month
        assert_eq!(
            cal.adjust(date(2023, 10, 1), BusinessDayConvention::ModifiedPreceding).unwrap(),
            date(2023, 10, 2)
        );
    }

    #[test]
    fn unbounded_walk_fails() {
        let engine = HolidayEngine::new();
        let config = BusinessDayConfig::new().with_custom_rule(|_| false);
        let settings = Settings::default().with_max_step_iterations(10).with_max_add_iterations(20);
        let cal = BusinessDayCalculator::with_settings(&engine, config, settings).unwrap();
        let d = date(2024, 1, 1);
        assert_eq!(
            cal.next_business_day(d).unwrap_err(),
            Error::NoBusinessDayFound {
                from: "2024-01-01".into(),
                iterations: 10
            }
        );
        assert!(matches!(
            cal.add_business_days(d, -1),
            Err(Error::NoBusinessDayFound { iterations: 20, .. })
        ));
        assert_eq!(cal.add_business_days(d, 0).unwrap(), d);
    }

    #[test]
    fn between_counts_in_direction_of_travel() {
        let engine = HolidayEngine::new();
        let cal = BusinessDayCalculator::new(&engine, BusinessDayConfig::new());
        let mon = date(2023, 9, 4);
        let fri = date(2023, 9, 8);
        assert_eq!(cal.business_days_between(mon, fri).unwrap(), 4);
        assert_eq!(cal.business_days_between(fri, mon).unwrap(), -4);
        assert_eq!(cal.business_days_between(fri, fri).unwrap(), 0);
        // Saturday to Monday: only Monday counts
        assert_eq!(cal.business_days_between(date(2023, 9, 2), mon).unwrap(), 1);
    }

    #[test]
    fn month_scans() {
        let engine = HolidayEngine::new();
        let cal = BusinessDayCalculator::new(&engine, us_config());
        // July 2024: 23 weekdays, minus Independence Day
        assert_eq!(cal.business_days_in_month(2024, 7).unwrap(), 22);
        assert_eq!(cal.nth_business_day(2024, 7, 1).unwrap(), Some(date(2024, 7, 1)));
        assert_eq!(cal.nth_business_day(2024, 7, 4).unwrap(), Some(date(2024, 7, 5)));
        assert_eq!(cal.nth_business_day(2024, 7, -2).unwrap(), Some(date(2024, 7, 30)));
        assert_eq!(cal.nth_business_day(2024, 7, 23).unwrap(), None);
        assert_eq!(cal.nth_business_day(2024, 7, -23).unwrap(), None);
        assert!(cal.nth_business_day(2024, 7, 0).is_err());
        assert_eq!(cal.last_business_day(2024, 8).unwrap(), Some(date(2024, 8, 30)));
        assert!(cal.is_last_business_day_of_month(date(2024, 8, 30)).unwrap());
        assert!(!cal.is_last_business_day_of_month(date(2024, 8, 31)).unwrap());
    }

    #[test]
    fn year_count() {
        let engine = HolidayEngine::new();
        let cal = BusinessDayCalculator::new(&engine, BusinessDayConfig::new());
        // 2024 has 262 weekdays
        assert_eq!(cal.business_days_in_year(2024).unwrap(), 262);
        let fri_sat = BusinessDayCalculator::new(&engine, BusinessDayConfig::new().with_weekends(WeekendSet::FRIDAY_SATURDAY));
        assert_eq!(fri_sat.business_days_in_year(2024).unwrap(), 262);
    }

    #[test]
    fn update_config_invalidates_cache() {
        let engine = HolidayEngine::new();
        let mut cal = BusinessDayCalculator::new(&engine, BusinessDayConfig::new());
        let d = date(2024, 3, 15);
        assert!(cal.is_business_day(d).unwrap());
        cal.update_config(BusinessDayConfig::new().with_holiday(HolidayRule::fixed("Ides", 3, 15)));
        assert!(!cal.is_business_day(d).unwrap());
        assert_eq!(cal.cache_stats().size, 1);
    }

    #[test]
    fn update_config_applies_redefined_rule() {
        let engine = HolidayEngine::new();
        let mut cal = BusinessDayCalculator::new(
            &engine,
            BusinessDayConfig::new().with_holiday(HolidayRule::fixed("National Day", 3, 15)),
        );
        assert!(!cal.is_business_day(date(2024, 3, 15)).unwrap());
        cal.update_config(BusinessDayConfig::new().with_holiday(HolidayRule::fixed("National Day", 3, 18)));
        assert!(cal.is_business_day(date(2024, 3, 15)).unwrap());
        assert!(!cal.is_business_day(date(2024, 3, 18)).unwrap());
    }

    #[test]
    fn settlement() {
        let engine = HolidayEngine::new();
        let cal = BusinessDayCalculator::new(&engine, us_config());
        // Tue 2024-07-02 + 2 skips Independence Day
        assert_eq!(
            cal.settlement_date(date(2024, 7, 2), DEFAULT_SETTLEMENT_LAG).unwrap(),
            date(2024, 7, 5)
        );
    }
}
