//! The weekdays treated as non-working days.

use crate::date::Date;
use crate::weekday::Weekday;
use hd_core::ensure;
use hd_core::errors::Result;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A set of weekdays, stored as a bitmask over rule indices (bit 0 = Sunday).
///
/// Serializes as a sorted list of rule indices, e.g. `[0, 6]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekendSet(u8);

impl Default for WeekendSet {
    /// Saturday and Sunday.
    fn default() -> Self {
        WeekendSet::SATURDAY_SUNDAY
    }
}

impl WeekendSet {
    /// No weekend days.
    pub const EMPTY: WeekendSet = WeekendSet(0);

    /// Saturday and Sunday.
    pub const SATURDAY_SUNDAY: WeekendSet = WeekendSet(0b100_0001);

    /// Friday and Saturday.
    pub const FRIDAY_SATURDAY: WeekendSet = WeekendSet(0b110_0000);

    /// Build from rule indices (0 = Sunday … 6 = Saturday).
    ///
    /// Every index must be in range and at least one weekday must remain a
    /// working day.
    pub fn from_indices(indices: &[u8]) -> Result<Self> {
        let mut set = WeekendSet::EMPTY;
        for &i in indices {
            set = set.with(Weekday::from_index(i)?);
        }
        ensure!(!set.is_full(), "a weekend cannot span all seven days");
        Ok(set)
    }

    /// Return a copy with `day` added.
    pub fn with(self, day: Weekday) -> Self {
        WeekendSet(self.0 | (1 << day.index()))
    }

    /// Whether `day` is a weekend day.
    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.index()) != 0
    }

    /// Whether `date` falls on a weekend day.
    pub fn is_weekend(&self, date: Date) -> bool {
        self.contains(date.weekday())
    }

    /// Whether every day of the week is a weekend day.
    pub fn is_full(&self) -> bool {
        self.0 == 0b111_1111
    }

    /// Weekend days in index order.
    pub fn days(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::ALL.into_iter().filter(move |d| self.contains(*d))
    }

    /// Rule indices in ascending order.
    pub fn indices(&self) -> Vec<u8> {
        self.days().map(|d| d.index()).collect()
    }
}

impl std::fmt::Debug for WeekendSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.days()).finish()
    }
}

impl Serialize for WeekendSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.indices().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WeekendSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let indices = Vec::<u8>::deserialize(deserializer)?;
        WeekendSet::from_indices(&indices).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_saturday_sunday() {
        let set = WeekendSet::default();
        assert!(set.contains(Weekday::Saturday));
        assert!(set.contains(Weekday::Sunday));
        assert!(!set.contains(Weekday::Friday));
        assert_eq!(set.indices(), vec![0, 6]);
    }

    #[test]
    fn from_indices() {
        let set = WeekendSet::from_indices(&[5, 6]).unwrap();
        assert_eq!(set, WeekendSet::FRIDAY_SATURDAY);
        assert!(WeekendSet::from_indices(&[9]).is_err());
        assert!(WeekendSet::from_indices(&[0, 1, 2, 3, 4, 5, 6]).is_err());
        assert_eq!(WeekendSet::from_indices(&[]).unwrap(), WeekendSet::EMPTY);
    }

    #[test]
    fn weekend_dates() {
        let set = WeekendSet::default();
        // 2024-01-06 is a Saturday, 2024-01-08 a Monday
        assert!(set.is_weekend(Date::from_ymd(2024, 1, 6).unwrap()));
        assert!(!set.is_weekend(Date::from_ymd(2024, 1, 8).unwrap()));
    }
}
