//! Error types for holidate.
//!
//! Every failure the rule engine and the business-day calculator can report
//! is a variant of the single `thiserror`-derived [`Error`] enum.  Rule
//! validation is the only non-fail-fast path: it gathers every violation into
//! [`Error::InvalidRule`] before returning.

use thiserror::Error;

/// The top-level error type used throughout holidate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A holiday rule failed schema validation.
    #[error("invalid holiday rule '{rule}': {}", .violations.join("; "))]
    InvalidRule {
        /// Name of the offending rule (may be empty).
        rule: String,
        /// Every violation found, in the order they were checked.
        violations: Vec<String>,
    },

    /// A rule's `type` tag does not name a known calculator.
    #[error("unknown holiday type '{0}'")]
    UnknownHolidayType(String),

    /// A lunar rule names a calendar without a converter.
    #[error("unknown lunar calendar '{0}'")]
    UnknownLunarCalendar(String),

    /// An observed rule's `type` tag is not a known policy.
    #[error("unknown observed rule type '{0}'")]
    UnknownObservedType(String),

    /// The requested nth-weekday does not exist in that month.
    #[error("no such occurrence for '{rule}': {detail}")]
    NoSuchOccurrence {
        /// Rule name.
        rule: String,
        /// Human-readable description of the missing occurrence.
        detail: String,
    },

    /// A relative rule references a rule absent from the rule set.
    #[error("base holiday '{base}' referenced by '{rule}' not found")]
    BaseHolidayNotFound {
        /// The relative rule.
        rule: String,
        /// The unresolved reference.
        base: String,
    },

    /// A relative rule references a rule that cannot be computed directly.
    #[error("'{rule}' cannot be relative to '{base}' of type {base_type}")]
    UnsupportedBaseType {
        /// The relative rule.
        rule: String,
        /// The base rule's name.
        base: String,
        /// The base rule's type tag.
        base_type: String,
    },

    /// Relative rules reference each other in a loop.
    #[error("circular holiday dependency: {}", .chain.join(" -> "))]
    CircularDependency {
        /// Names visited, ending with the name that closed the cycle.
        chain: Vec<String>,
    },

    /// A custom callback returned neither a date nor a list of dates.
    #[error("custom rule '{rule}' returned neither a date nor a list of dates")]
    InvalidCustomResult {
        /// Rule name.
        rule: String,
    },

    /// A custom callback failed.
    #[error("custom rule '{rule}' failed: {message}")]
    CustomCalculation {
        /// Rule name.
        rule: String,
        /// The callback's error message.
        message: String,
    },

    /// A business-day walk exceeded its iteration bound.
    #[error("no business day found from {from} within {iterations} days")]
    NoBusinessDayFound {
        /// The starting date, formatted.
        from: String,
        /// The bound that was exhausted.
        iterations: usize,
    },

    /// Date-related error (out of range, invalid components).
    #[error("date error: {0}")]
    Date(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid settings.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand `Result` type used throughout holidate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::InvalidArgument(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use hd_core::{ensure, errors::Error};
/// fn positive(x: i32) -> hd_core::errors::Result<i32> {
///     ensure!(x > 0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1).is_ok());
/// assert!(matches!(positive(-1), Err(Error::InvalidArgument(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidArgument(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::Date(...))` immediately.
///
/// # Example
/// ```
/// use hd_core::{fail, errors::Error};
/// fn always_err() -> hd_core::errors::Result<()> {
///     fail!("year {} out of range", 0);
/// }
/// assert_eq!(always_err(), Err(Error::Date("year 0 out of range".into())));
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Date(format!($($msg)*)))
    };
}
