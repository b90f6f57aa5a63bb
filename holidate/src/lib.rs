//! # holidate
//!
//! Holiday calendars computed from declarative rules, and business-day
//! arithmetic on top of them.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on this crate rather than the individual
//! `hd-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! holidate = "0.1"
//! ```
//!
//! ```rust
//! use holidate::business::{BusinessDayCalculator, BusinessDayConfig};
//! use holidate::holidays::{rules_from_json, HolidayEngine};
//! use holidate::time::Date;
//!
//! let rules = rules_from_json(r#"[
//!     { "name": "Thanksgiving", "type": "nth-weekday", "rule": { "month": 11, "weekday": 4, "nth": 4 } },
//!     { "name": "Black Friday", "type": "relative", "rule": { "relativeTo": "Thanksgiving", "offsetDays": 1 } }
//! ]"#)?;
//!
//! let engine = HolidayEngine::new();
//! let calendar = BusinessDayCalculator::new(&engine, BusinessDayConfig::new().with_holidays(rules));
//! let wednesday = Date::from_ymd(2024, 11, 27)?;
//! assert_eq!(calendar.next_business_day(wednesday)?, Date::from_ymd(2024, 12, 2)?);
//! # Ok::<(), holidate::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Errors, the LRU cache, and settings.
pub use hd_core as core;

/// Dates, weekdays, weekend sets, Easter, and lunar calendars.
pub use hd_time as time;

/// Holiday rules and the rule engine.
pub use hd_holidays as holidays;

/// Business-day calculator.
pub use hd_business as business;
