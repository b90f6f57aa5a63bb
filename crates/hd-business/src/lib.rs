//! # hd-business
//!
//! Business-day arithmetic on top of the holiday engine.
//!
//! ```
//! use hd_business::{BusinessDayCalculator, BusinessDayConfig};
//! use hd_holidays::{HolidayEngine, HolidayRule};
//! use hd_time::Date;
//!
//! let engine = HolidayEngine::new();
//! let config = BusinessDayConfig::new().with_holiday(HolidayRule::fixed("Independence Day", 7, 4));
//! let calendar = BusinessDayCalculator::new(&engine, config);
//! let wednesday = Date::from_ymd(2024, 7, 3).unwrap();
//! assert_eq!(calendar.next_business_day(wednesday).unwrap(), Date::from_ymd(2024, 7, 5).unwrap());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `BusinessDayCalculator`.
pub mod calculator;

/// `BusinessDayConfig`.
pub mod config;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use calculator::{BusinessDayCalculator, DEFAULT_SETTLEMENT_LAG};
pub use config::{BusinessDayConfig, DayPredicate};
