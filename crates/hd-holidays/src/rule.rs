//! Holiday rule data model.
//!
//! A [`HolidayRule`] declares how to compute a recurring holiday for any
//! given year.  The calculation itself is selected by the [`RuleKind`]
//! variant; post-processing (weekend observance, multi-day duration) is
//! described by the remaining fields.

use hd_core::errors::Error;
use hd_time::{Date, LunarCalendar, WeekendSet};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ── Rule type tag ─────────────────────────────────────────────────────────────

/// The type tag of a rule, as written in rule data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleType {
    /// Same month and day every year.
    Fixed,
    /// The n-th (or n-th last) weekday of a month.
    NthWeekday,
    /// An offset from another rule's date.
    Relative,
    /// A date in a lunar or lunisolar calendar.
    Lunar,
    /// An offset from Easter Sunday.
    EasterBased,
    /// Computed by caller-supplied code.
    Custom,
}

impl RuleType {
    /// The tag string (`"fixed"`, `"nth-weekday"`, …).
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::Fixed => "fixed",
            RuleType::NthWeekday => "nth-weekday",
            RuleType::Relative => "relative",
            RuleType::Lunar => "lunar",
            RuleType::EasterBased => "easter-based",
            RuleType::Custom => "custom",
        }
    }
}

impl std::fmt::Display for RuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RuleType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "fixed" => Ok(RuleType::Fixed),
            "nth-weekday" => Ok(RuleType::NthWeekday),
            "relative" => Ok(RuleType::Relative),
            "lunar" => Ok(RuleType::Lunar),
            "easter-based" => Ok(RuleType::EasterBased),
            "custom" => Ok(RuleType::Custom),
            other => Err(Error::UnknownHolidayType(other.to_string())),
        }
    }
}

// ── Custom rules ──────────────────────────────────────────────────────────────

/// What a custom callback produced for one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomOutput {
    /// A single date.
    Date(Date),
    /// Any number of dates (possibly none).
    Dates(Vec<Date>),
    /// No usable value; reported as an invalid custom result.
    Nothing,
}

impl From<Date> for CustomOutput {
    fn from(d: Date) -> Self {
        CustomOutput::Date(d)
    }
}

impl From<Vec<Date>> for CustomOutput {
    fn from(v: Vec<Date>) -> Self {
        CustomOutput::Dates(v)
    }
}

impl From<Option<Date>> for CustomOutput {
    fn from(d: Option<Date>) -> Self {
        d.map_or(CustomOutput::Nothing, CustomOutput::Date)
    }
}

/// Everything a custom callback may consult besides the year.
#[derive(Debug, Clone, Copy)]
pub struct CustomContext<'a> {
    /// The rule being calculated.
    pub rule: &'a HolidayRule,
    /// The rule set the calculation was requested against (may be empty).
    pub rules: &'a [HolidayRule],
}

/// Error type custom callbacks may return.
pub type CustomError = Box<dyn std::error::Error + Send + Sync>;

/// Signature of a custom date callback.
pub type CustomFn =
    dyn Fn(i32, &CustomContext<'_>) -> Result<CustomOutput, CustomError> + Send + Sync;

/// A caller-supplied date calculation.
#[derive(Clone)]
pub struct CustomRule(Arc<CustomFn>);

impl CustomRule {
    /// Wrap a callback.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(i32, &CustomContext<'_>) -> Result<CustomOutput, CustomError> + Send + Sync + 'static,
    {
        CustomRule(Arc::new(f))
    }

    /// Invoke the callback.
    pub fn call(&self, year: i32, context: &CustomContext<'_>) -> Result<CustomOutput, CustomError> {
        (self.0)(year, context)
    }
}

impl std::fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CustomRule(..)")
    }
}

// ── Rule payloads ─────────────────────────────────────────────────────────────

/// Type-specific payload of a rule.
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// `month`/`day` every year.
    Fixed {
        /// Month (1–12).
        month: u8,
        /// Day of month (1–31).
        day: u8,
    },
    /// The `nth` `weekday` of `month`; negative `nth` counts from the end.
    NthWeekday {
        /// Month (1–12).
        month: u8,
        /// Weekday index, 0 = Sunday … 6 = Saturday.
        weekday: u8,
        /// 1–5, or −1 (last) … −5.
        nth: i8,
    },
    /// `offset_days` from the rule named (or identified) by `relative_to`.
    Relative {
        /// Name or id of the base rule.
        relative_to: String,
        /// Signed day offset.
        offset_days: i32,
    },
    /// `month`/`day` of a lunar calendar.
    Lunar {
        /// Source calendar.
        calendar: LunarCalendar,
        /// Month in that calendar.
        month: u8,
        /// Day in that calendar.
        day: u8,
    },
    /// `offset_days` from Easter Sunday.
    EasterBased {
        /// Signed day offset.
        offset_days: i32,
        /// Use Orthodox rather than Western Easter.
        orthodox: bool,
    },
    /// Caller-supplied calculation.
    Custom(CustomRule),
}

impl RuleKind {
    /// The type tag of this payload.
    pub fn rule_type(&self) -> RuleType {
        match self {
            RuleKind::Fixed { .. } => RuleType::Fixed,
            RuleKind::NthWeekday { .. } => RuleType::NthWeekday,
            RuleKind::Relative { .. } => RuleType::Relative,
            RuleKind::Lunar { .. } => RuleType::Lunar,
            RuleKind::EasterBased { .. } => RuleType::EasterBased,
            RuleKind::Custom(_) => RuleType::Custom,
        }
    }
}

// ── Observed rules ────────────────────────────────────────────────────────────

/// How a weekend occurrence is observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObservedType {
    /// Move to the next (or previous) non-weekend day.
    Substitute,
    /// Saturday → Friday, Sunday → Monday.
    NearestWeekday,
    /// Keep the date and add the following day.
    Bridge,
}

impl std::str::FromStr for ObservedType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "substitute" => Ok(ObservedType::Substitute),
            "nearest-weekday" => Ok(ObservedType::NearestWeekday),
            "bridge" => Ok(ObservedType::Bridge),
            other => Err(Error::UnknownObservedType(other.to_string())),
        }
    }
}

/// Direction a substitute walk takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards later dates.
    #[default]
    Forward,
    /// Towards earlier dates.
    Backward,
}

/// Weekend observance policy attached to a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservedRule {
    /// The policy.
    pub kind: ObservedType,
    /// Days that trigger the policy.
    pub weekends: WeekendSet,
    /// Walk direction for [`ObservedType::Substitute`].
    pub direction: Direction,
}

impl ObservedRule {
    /// A policy with the default weekend (Saturday, Sunday) and direction.
    pub fn new(kind: ObservedType) -> Self {
        Self {
            kind,
            weekends: WeekendSet::default(),
            direction: Direction::Forward,
        }
    }

    /// Move weekend dates to the next non-weekend day.
    pub fn substitute() -> Self {
        Self::new(ObservedType::Substitute)
    }

    /// Saturday → Friday, Sunday → Monday.
    pub fn nearest_weekday() -> Self {
        Self::new(ObservedType::NearestWeekday)
    }

    /// Keep weekend dates and add the following day.
    pub fn bridge() -> Self {
        Self::new(ObservedType::Bridge)
    }

    /// Replace the weekend set.
    pub fn with_weekends(mut self, weekends: WeekendSet) -> Self {
        self.weekends = weekends;
        self
    }

    /// Replace the walk direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

// ── Rule ──────────────────────────────────────────────────────────────────────

/// A declarative recurring holiday.
///
/// `name` must be unique within a rule set: the engine caches results under
/// it and relative rules look bases up by it.
#[derive(Debug, Clone)]
pub struct HolidayRule {
    /// Optional identifier; relative rules may reference it.
    pub id: Option<String>,
    /// Unique name.
    pub name: String,
    /// How to compute the raw date(s).
    pub kind: RuleKind,
    /// Weekend observance policy.
    pub observed: Option<ObservedRule>,
    /// Number of consecutive days each occurrence lasts.
    pub duration: u32,
    /// Region tags.
    pub regions: Vec<String>,
    /// Inactive rules are skipped by set-wide queries.
    pub active: bool,
}

impl HolidayRule {
    /// Create an active one-day rule with no id, regions, or observance.
    pub fn new(name: impl Into<String>, kind: RuleKind) -> Self {
        Self {
            id: None,
            name: name.into(),
            kind,
            observed: None,
            duration: 1,
            regions: Vec::new(),
            active: true,
        }
    }

    /// Same `month`/`day` every year.
    pub fn fixed(name: impl Into<String>, month: u8, day: u8) -> Self {
        Self::new(name, RuleKind::Fixed { month, day })
    }

    /// The `nth` weekday (0 = Sunday) of `month`; `nth = -1` is the last.
    pub fn nth_weekday(name: impl Into<String>, month: u8, weekday: u8, nth: i8) -> Self {
        Self::new(name, RuleKind::NthWeekday { month, weekday, nth })
    }

    /// `offset_days` from another rule.
    pub fn relative(name: impl Into<String>, relative_to: impl Into<String>, offset_days: i32) -> Self {
        Self::new(
            name,
            RuleKind::Relative {
                relative_to: relative_to.into(),
                offset_days,
            },
        )
    }

    /// A lunar calendar date.
    pub fn lunar(name: impl Into<String>, calendar: LunarCalendar, month: u8, day: u8) -> Self {
        Self::new(name, RuleKind::Lunar { calendar, month, day })
    }

    /// `offset_days` from Western Easter Sunday.
    pub fn easter(name: impl Into<String>, offset_days: i32) -> Self {
        Self::new(
            name,
            RuleKind::EasterBased {
                offset_days,
                orthodox: false,
            },
        )
    }

    /// `offset_days` from Orthodox Easter Sunday.
    pub fn orthodox_easter(name: impl Into<String>, offset_days: i32) -> Self {
        Self::new(
            name,
            RuleKind::EasterBased {
                offset_days,
                orthodox: true,
            },
        )
    }

    /// A caller-computed rule.
    pub fn custom<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(i32, &CustomContext<'_>) -> Result<CustomOutput, CustomError> + Send + Sync + 'static,
    {
        Self::new(name, RuleKind::Custom(CustomRule::new(f)))
    }

    /// Set the id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach a weekend observance policy.
    pub fn with_observed(mut self, observed: ObservedRule) -> Self {
        self.observed = Some(observed);
        self
    }

    /// Set the number of days each occurrence lasts.
    pub fn with_duration(mut self, days: u32) -> Self {
        self.duration = days;
        self
    }

    /// Set the region tags.
    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = regions.into_iter().map(Into::into).collect();
        self
    }

    /// Mark the rule inactive.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// The rule's type tag.
    pub fn rule_type(&self) -> RuleType {
        self.kind.rule_type()
    }

    /// Key under which the engine caches this rule's results.  Rules are
    /// validated first, so the name is never empty here.
    pub fn cache_key(&self) -> &str {
        &self.name
    }

    /// The id reported in occurrences: the explicit id, else the name.
    pub fn occurrence_id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    /// Whether the rule applies to `region` (rules without regions apply
    /// everywhere).
    pub fn applies_to(&self, region: &str) -> bool {
        self.regions.is_empty() || self.regions.iter().any(|r| r.eq_ignore_ascii_case(region))
    }
}

// ── Occurrence ────────────────────────────────────────────────────────────────

/// A concrete holiday date produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayOccurrence {
    /// Rule id (or name when the rule has no id).
    pub id: String,
    /// Rule name.
    pub name: String,
    /// Rule type.
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    /// The date.
    pub date: Date,
    /// Rule regions.
    pub regions: Vec<String>,
}

impl HolidayOccurrence {
    /// Occurrence of `rule` on `date`.
    pub fn new(rule: &HolidayRule, date: Date) -> Self {
        Self {
            id: rule.occurrence_id().to_string(),
            name: rule.name.clone(),
            rule_type: rule.rule_type(),
            date,
            regions: rule.regions.clone(),
        }
    }
}
