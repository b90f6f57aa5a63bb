//! # hd-time
//!
//! Date, weekday, weekend-set, and business-day-convention types, plus the
//! Easter computus and the lunar calendar converters the holiday calculators
//! build on.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Business-day adjustment conventions.
pub mod business_day_convention;

/// `Date` type.
pub mod date;

/// Western and Orthodox Easter.
pub mod easter;

/// Islamic, Chinese, Hebrew, and Persian calendar converters.
pub mod lunar;

/// `WeekendSet`: weekdays treated as non-working days.
pub mod weekend;

/// `Weekday`.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use business_day_convention::BusinessDayConvention;
pub use date::Date;
pub use easter::{easter_sunday, orthodox_easter};
pub use lunar::LunarCalendar;
pub use weekday::Weekday;
pub use weekend::WeekendSet;
