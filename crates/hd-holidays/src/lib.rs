//! # hd-holidays
//!
//! Declarative holiday rules and the engine that turns them into dates.
//!
//! ```
//! use hd_holidays::{HolidayEngine, HolidayRule};
//! use hd_time::Date;
//!
//! let rules = vec![
//!     HolidayRule::nth_weekday("Thanksgiving", 11, 4, 4),
//!     HolidayRule::relative("Black Friday", "Thanksgiving", 1),
//! ];
//! let engine = HolidayEngine::new();
//! let black_friday = Date::from_ymd(2024, 11, 29).unwrap();
//! let info = engine.holiday_info(black_friday, &rules).unwrap().unwrap();
//! assert_eq!(info.name, "Black Friday");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Per-type date calculators.
pub mod calculators;

/// `HolidayEngine`.
pub mod engine;

/// Loading rules from JSON.
pub mod json;

/// Weekend observance.
pub mod observed;

/// Rule data model.
pub mod rule;

/// Rule validation.
pub mod validation;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use engine::HolidayEngine;
pub use json::rules_from_json;
pub use rule::{
    CustomContext, CustomOutput, Direction, HolidayOccurrence, HolidayRule, ObservedRule, ObservedType, RuleKind,
    RuleType,
};
