//! Business-day convention.

use hd_core::errors::Error;
use serde::{Deserialize, Serialize};

/// How to move a date that falls on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusinessDayConvention {
    /// Choose the first business day after the given day.
    Following,
    /// Like `Following`, unless that crosses into the next month; then use
    /// `Preceding`.
    ModifiedFollowing,
    /// Choose the first business day before the given day.
    Preceding,
    /// Like `Preceding`, unless that crosses into the previous month; then use
    /// `Following`.
    ModifiedPreceding,
    /// Do not adjust.
    Unadjusted,
    /// Choose the nearest business day; ties go forward.
    Nearest,
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BusinessDayConvention::Following => "following",
            BusinessDayConvention::ModifiedFollowing => "modified-following",
            BusinessDayConvention::Preceding => "preceding",
            BusinessDayConvention::ModifiedPreceding => "modified-preceding",
            BusinessDayConvention::Unadjusted => "unadjusted",
            BusinessDayConvention::Nearest => "nearest",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for BusinessDayConvention {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "following" => Ok(BusinessDayConvention::Following),
            "modified-following" | "modifiedfollowing" => Ok(BusinessDayConvention::ModifiedFollowing),
            "preceding" => Ok(BusinessDayConvention::Preceding),
            "modified-preceding" | "modifiedpreceding" => Ok(BusinessDayConvention::ModifiedPreceding),
            "unadjusted" => Ok(BusinessDayConvention::Unadjusted),
            "nearest" => Ok(BusinessDayConvention::Nearest),
            other => Err(Error::InvalidArgument(format!(
                "unknown business day convention '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_matches_display() {
        for c in [
            BusinessDayConvention::Following,
            BusinessDayConvention::ModifiedFollowing,
            BusinessDayConvention::Preceding,
            BusinessDayConvention::ModifiedPreceding,
            BusinessDayConvention::Unadjusted,
            BusinessDayConvention::Nearest,
        ] {
            assert_eq!(c.to_string().parse::<BusinessDayConvention>().unwrap(), c);
        }
        assert!("sideways".parse::<BusinessDayConvention>().is_err());
    }
}
