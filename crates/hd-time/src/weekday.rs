//! Day-of-week enum.

use hd_core::errors::{Error, Result};

/// Day of the week.
///
/// Variants are numbered 1–7 (Monday = 1, Sunday = 7).  Holiday rule payloads
/// use a second numbering, 0–6 with Sunday = 0; see [`Weekday::from_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Weekday {
    /// Monday (1).
    Monday = 1,
    /// Tuesday (2).
    Tuesday = 2,
    /// Wednesday (3).
    Wednesday = 3,
    /// Thursday (4).
    Thursday = 4,
    /// Friday (5).
    Friday = 5,
    /// Saturday (6).
    Saturday = 6,
    /// Sunday (7).
    Sunday = 7,
}

impl Weekday {
    /// All weekdays, Sunday first (index order).
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Construct from the ISO ordinal (1 = Monday … 7 = Sunday).
    ///
    /// Returns `None` if the value is out of range.
    pub fn from_ordinal(n: u8) -> Option<Self> {
        match n {
            7 => Some(Weekday::Sunday),
            1..=6 => Self::from_index(n).ok(),
            _ => None,
        }
    }

    /// Construct from a rule index (0 = Sunday … 6 = Saturday).
    pub fn from_index(index: u8) -> Result<Self> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| Error::InvalidArgument(format!("weekday index {index} out of range [0, 6]")))
    }

    /// Return the ISO ordinal (1 = Monday … 7 = Sunday).
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// Return the rule index (0 = Sunday … 6 = Saturday).
    pub fn index(&self) -> u8 {
        self.ordinal() % 7
    }

    /// Number of days from `self` forward to the next `other` (0–6).
    pub fn days_until(&self, other: Weekday) -> u8 {
        (other.index() + 7 - self.index()) % 7
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrip() {
        for i in 0..7u8 {
            assert_eq!(Weekday::from_index(i).unwrap().index(), i);
        }
        assert_eq!(Weekday::from_index(0).unwrap(), Weekday::Sunday);
        assert_eq!(Weekday::from_index(6).unwrap(), Weekday::Saturday);
        assert!(Weekday::from_index(7).is_err());
    }

    #[test]
    fn ordinal_roundtrip() {
        for n in 1..=7u8 {
            assert_eq!(Weekday::from_ordinal(n).unwrap().ordinal(), n);
        }
        assert!(Weekday::from_ordinal(0).is_none());
        assert!(Weekday::from_ordinal(8).is_none());
    }

    #[test]
    fn days_until_wraps() {
        assert_eq!(Weekday::Thursday.days_until(Weekday::Thursday), 0);
        assert_eq!(Weekday::Saturday.days_until(Weekday::Monday), 2);
        assert_eq!(Weekday::Monday.days_until(Weekday::Sunday), 6);
    }
}
