//! Library settings.
//!
//! [`Settings`] carries the cache capacities and the iteration bounds that
//! keep business-day walking finite.  It is an ordinary value: build one at
//! the composition root and hand it to the holiday engine and the
//! business-day calculator.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Cache capacities and walking bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Maximum number of rules whose per-year results the engine keeps.
    pub rule_cache_capacity: usize,
    /// Maximum number of calendar days whose business-day status is kept.
    pub business_day_cache_capacity: usize,
    /// Bound on single-step walks (next/previous business day).
    pub max_step_iterations: usize,
    /// Bound on multi-day walks (`add_business_days`).
    pub max_add_iterations: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rule_cache_capacity: 512,
            business_day_cache_capacity: 4096,
            max_step_iterations: 1000,
            max_add_iterations: 10_000,
        }
    }
}

impl Settings {
    /// Set the engine's rule cache capacity.
    pub fn with_rule_cache_capacity(mut self, capacity: usize) -> Self {
        self.rule_cache_capacity = capacity;
        self
    }

    /// Set the per-day business-day cache capacity.
    pub fn with_business_day_cache_capacity(mut self, capacity: usize) -> Self {
        self.business_day_cache_capacity = capacity;
        self
    }

    /// Set the bound for next/previous business-day walks.
    pub fn with_max_step_iterations(mut self, n: usize) -> Self {
        self.max_step_iterations = n;
        self
    }

    /// Set the bound for `add_business_days` walks.
    pub fn with_max_add_iterations(mut self, n: usize) -> Self {
        self.max_add_iterations = n;
        self
    }

    /// Check that every capacity and bound is positive.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("ruleCacheCapacity", self.rule_cache_capacity),
            ("businessDayCacheCapacity", self.business_day_cache_capacity),
            ("maxStepIterations", self.max_step_iterations),
            ("maxAddIterations", self.max_add_iterations),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(Error::Config(format!("{name} must be greater than zero")));
            }
        }
        Ok(())
    }

    /// Parse settings from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        debug!("loading settings from JSON");
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.max_step_iterations, 1000);
        assert_eq!(s.max_add_iterations, 10_000);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "maxStepIterations": 30 }"#).unwrap();
        assert_eq!(s.max_step_iterations, 30);
        assert_eq!(s.max_add_iterations, 10_000);
    }

    #[test]
    fn zero_bound_rejected() {
        let err = Settings::from_json(r#"{ "maxAddIterations": 0 }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(Settings::default().with_rule_cache_capacity(0).validate().is_err());
    }

    #[test]
    fn malformed_json_is_config_error() {
        assert!(matches!(Settings::from_json("{"), Err(Error::Config(_))));
    }
}
