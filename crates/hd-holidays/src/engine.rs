//! The holiday rule engine.
//!
//! [`HolidayEngine`] validates rules, dispatches them to their calculator,
//! applies weekend observance and duration expansion, and caches the result
//! per rule and year.  Rule sets are supplied by the caller on every query;
//! the engine itself owns only its cache and [`Settings`].

use crate::calculators;
use crate::rule::{HolidayOccurrence, HolidayRule};
use crate::validation;
use hd_core::errors::{Error, Result};
use hd_core::{ensure, fail, CacheStats, LruCache, Settings};
use hd_time::Date;
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::{debug, instrument, trace};

type YearDates = HashMap<i32, Vec<Date>>;

/// Computes and caches holiday dates.
///
/// The cache lives behind a `RefCell`, so an engine is used from one thread
/// at a time; share it by reference.
///
/// Cached dates are keyed by rule name alone, so one engine serves one rule
/// set.  Calculators that share an engine must share its rules too; rule
/// sets that reuse a name with a different definition (a US and a Canadian
/// "Thanksgiving") each need their own engine.
#[derive(Debug)]
pub struct HolidayEngine {
    settings: Settings,
    cache: RefCell<LruCache<String, YearDates>>,
}

impl Default for HolidayEngine {
    fn default() -> Self {
        Self::from_valid_settings(Settings::default())
    }
}

impl HolidayEngine {
    /// An engine with default [`Settings`].
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine with the given settings.
    pub fn with_settings(settings: Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::from_valid_settings(settings))
    }

    fn from_valid_settings(settings: Settings) -> Self {
        Self {
            cache: RefCell::new(LruCache::new(settings.rule_cache_capacity)),
            settings,
        }
    }

    /// The engine's settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Per-rule calculation ─────────────────────────────────────────────────

    /// Dates of `rule` in `year`, sorted ascending.
    ///
    /// Equivalent to [`calculate_with_context`](Self::calculate_with_context)
    /// with an empty rule set, so relative rules fail to find their base.
    pub fn calculate(&self, rule: &HolidayRule, year: i32) -> Result<Vec<Date>> {
        self.calculate_with_context(rule, year, &[])
    }

    /// Dates of `rule` in `year`, sorted ascending, resolving relative rules
    /// against `rules`.
    ///
    /// Results are cached under the rule's [`cache_key`](HolidayRule::cache_key)
    /// and returned unchanged on later calls until [`clear_cache`](Self::clear_cache).
    #[instrument(level = "trace", skip(self, rule, rules), fields(rule = %rule.name))]
    pub fn calculate_with_context(&self, rule: &HolidayRule, year: i32, rules: &[HolidayRule]) -> Result<Vec<Date>> {
        validation::validate(rule)?;
        if !(Date::MIN.year()..=Date::MAX.year()).contains(&year) {
            fail!("year {year} out of range [{}, {}]", Date::MIN.year(), Date::MAX.year());
        }

        let key = rule.cache_key().to_string();
        if let Some(dates) = self.cache.borrow_mut().get(&key).and_then(|years| years.get(&year)) {
            trace!(rule = %key, year, "holiday cache hit");
            return Ok(dates.clone());
        }

        let raw = calculators::raw_dates(rule, year, rules, &[])?;
        let mut dates = match &rule.observed {
            Some(observed) => observed.apply_all(&raw)?,
            None => raw,
        };
        if rule.duration > 1 {
            dates = expand_duration(&dates, rule.duration)?;
        }
        dates.sort();
        dates.dedup();
        debug!(rule = %key, year, count = dates.len(), "computed holiday dates");

        let mut cache = self.cache.borrow_mut();
        let mut years = cache.remove(&key).unwrap_or_default();
        years.insert(year, dates.clone());
        if let Some((evicted, _)) = cache.insert(key, years) {
            trace!(evicted = %evicted, "holiday cache eviction");
        }
        Ok(dates)
    }

    // ── Queries over a rule set ──────────────────────────────────────────────

    /// Whether any active rule in `rules` falls on `date`.
    ///
    /// Only rules evaluated for `date.year()` are consulted.  An observed date
    /// pushed into the neighbouring year (a Saturday January 1 observed on
    /// December 31) belongs to the year that produced it and is not found here.
    pub fn is_holiday(&self, date: Date, rules: &[HolidayRule]) -> Result<bool> {
        Ok(self.holiday_info(date, rules)?.is_some())
    }

    /// The occurrence of the first active rule in `rules` that falls on
    /// `date`.  Rule order decides between coinciding holidays.  Like
    /// [`is_holiday`](Self::is_holiday), only `date.year()` is evaluated.
    pub fn holiday_info(&self, date: Date, rules: &[HolidayRule]) -> Result<Option<HolidayOccurrence>> {
        for rule in rules.iter().filter(|r| r.active) {
            let dates = self.calculate_with_context(rule, date.year(), rules)?;
            if dates.binary_search(&date).is_ok() {
                return Ok(Some(HolidayOccurrence::new(rule, date)));
            }
        }
        Ok(None)
    }

    /// Every occurrence of the active rules in `year`, sorted by date.
    /// Occurrences on the same day keep rule order.
    pub fn holidays_for_year(&self, year: i32, rules: &[HolidayRule]) -> Result<Vec<HolidayOccurrence>> {
        self.occurrences(year, rules, |_| true)
    }

    /// [`holidays_for_year`](Self::holidays_for_year) restricted to rules
    /// that apply to `region`.  Relative rules still resolve against all of
    /// `rules`.
    pub fn holidays_for_region(
        &self,
        year: i32,
        region: &str,
        rules: &[HolidayRule],
    ) -> Result<Vec<HolidayOccurrence>> {
        self.occurrences(year, rules, |r| r.applies_to(region))
    }

    /// Every occurrence in `[start, end]`, sorted by date.
    ///
    /// Each year from `start.year()` to `end.year()` is evaluated and its
    /// occurrences are filtered to the range, so an observed date produced by
    /// a year outside that span is left out.
    pub fn holidays_in_range(&self, start: Date, end: Date, rules: &[HolidayRule]) -> Result<Vec<HolidayOccurrence>> {
        ensure!(start <= end, "range start {start} is after end {end}");
        let mut out = Vec::new();
        for year in start.year()..=end.year() {
            out.extend(
                self.holidays_for_year(year, rules)?
                    .into_iter()
                    .filter(|o| o.date >= start && o.date <= end),
            );
        }
        out.sort_by_key(|o| o.date);
        Ok(out)
    }

    /// The first occurrence strictly after `after`, looking into the
    /// following year if needed.
    pub fn next_holiday(&self, after: Date, rules: &[HolidayRule]) -> Result<Option<HolidayOccurrence>> {
        let year = after.year();
        for y in [year, year + 1] {
            if y > Date::MAX.year() {
                break;
            }
            if let Some(o) = self.holidays_for_year(y, rules)?.into_iter().find(|o| o.date > after) {
                return Ok(Some(o));
            }
        }
        Ok(None)
    }

    /// The last occurrence strictly before `before`, looking into the
    /// preceding year if needed.
    pub fn previous_holiday(&self, before: Date, rules: &[HolidayRule]) -> Result<Option<HolidayOccurrence>> {
        let year = before.year();
        for y in [year, year - 1] {
            if y < Date::MIN.year() {
                break;
            }
            if let Some(o) = self.holidays_for_year(y, rules)?.into_iter().rev().find(|o| o.date < before) {
                return Ok(Some(o));
            }
        }
        Ok(None)
    }

    fn occurrences<F>(&self, year: i32, rules: &[HolidayRule], include: F) -> Result<Vec<HolidayOccurrence>>
    where
        F: Fn(&HolidayRule) -> bool,
    {
        let mut out = Vec::new();
        for rule in rules.iter().filter(|r| r.active && include(r)) {
            for date in self.calculate_with_context(rule, year, rules)? {
                out.push(HolidayOccurrence::new(rule, date));
            }
        }
        // stable: same-day occurrences stay in rule order
        out.sort_by_key(|o| o.date);
        Ok(out)
    }

    // ── Cache control ────────────────────────────────────────────────────────

    /// Drop every cached result.
    pub fn clear_cache(&self) {
        let mut cache = self.cache.borrow_mut();
        debug!(entries = cache.len(), "clearing holiday cache");
        cache.clear();
    }

    /// Counters of the rule cache.  A lookup counts as a hit when the rule
    /// has any cached year.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.borrow().stats()
    }
}

/// Each date followed by the next `duration - 1` days.
fn expand_duration(dates: &[Date], duration: u32) -> Result<Vec<Date>> {
    let days = i32::try_from(duration)
        .map_err(|_| Error::InvalidArgument(format!("duration {duration} is too long")))?;
    let mut out = Vec::new();
    for &d in dates {
        for i in 0..days {
            out.push(d.add_days(i)?);
        }
    }
    Ok(out)
}
