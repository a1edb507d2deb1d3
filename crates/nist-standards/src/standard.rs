use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StandardsError;

/// One dated revision of the ANSI/NIST-ITL specification.
///
/// Variants are declared in release order, so the derived `Ord` is the
/// release ordering that drives interval gating.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Standard {
    /// ANSI/NIST-ITL 1-2000.
    AnsiNist2000,
    /// ANSI/NIST-ITL 1-2007.
    AnsiNist2007,
    /// ANSI/NIST-ITL 1-2011.
    AnsiNist2011,
    /// ANSI/NIST-ITL 1-2011 Update: 2013.
    AnsiNist2013,
    /// ANSI/NIST-ITL 1-2011 Update: 2015.
    AnsiNist2015,
}

impl Standard {
    /// All revisions in release order.
    pub const ALL: [Standard; 5] = [
        Standard::AnsiNist2000,
        Standard::AnsiNist2007,
        Standard::AnsiNist2011,
        Standard::AnsiNist2013,
        Standard::AnsiNist2015,
    ];

    /// The four-character machine-readable code carried in field 1.002 VER.
    pub fn code(&self) -> &'static str {
        match self {
            Standard::AnsiNist2000 => "0300",
            Standard::AnsiNist2007 => "0400",
            Standard::AnsiNist2011 => "0500",
            Standard::AnsiNist2013 => "0501",
            Standard::AnsiNist2015 => "0502",
        }
    }

    /// Resolve a VER code to a revision.
    ///
    /// An unknown code is a recognized-but-unsupported condition and yields
    /// an error; callers model an absent code separately.
    pub fn from_code(code: &str) -> Result<Standard, StandardsError> {
        Standard::ALL
            .iter()
            .copied()
            .find(|s| s.code() == code)
            .ok_or_else(|| StandardsError::UnknownCode {
                code: code.to_string(),
            })
    }

    /// Publication year of the revision.
    pub fn year(&self) -> u16 {
        match self {
            Standard::AnsiNist2000 => 2000,
            Standard::AnsiNist2007 => 2007,
            Standard::AnsiNist2011 => 2011,
            Standard::AnsiNist2013 => 2013,
            Standard::AnsiNist2015 => 2015,
        }
    }

    /// Interval membership: `lower <= self` and, when an upper bound exists,
    /// `self < upper`. `None` means "never deprecated".
    pub fn is_between(&self, lower: Standard, upper_exclusive: Option<Standard>) -> bool {
        *self >= lower && upper_exclusive.is_none_or(|upper| *self < upper)
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Standard::AnsiNist2013 => write!(f, "ANSI/NIST-ITL 1-2011:2013"),
            Standard::AnsiNist2015 => write!(f, "ANSI/NIST-ITL 1-2011:2015"),
            other => write!(f, "ANSI/NIST-ITL 1-{}", other.year()),
        }
    }
}

impl FromStr for Standard {
    type Err = StandardsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Standard::from_code(s.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for standard in Standard::ALL {
            assert_eq!(Standard::from_code(standard.code()).unwrap(), standard);
        }
    }

    #[test]
    fn unknown_code_is_an_error() {
        let err = Standard::from_code("0600").unwrap_err();
        assert!(matches!(err, StandardsError::UnknownCode { .. }));
    }

    #[test]
    fn ordering_follows_release() {
        assert!(Standard::AnsiNist2000 < Standard::AnsiNist2007);
        assert!(Standard::AnsiNist2013 < Standard::AnsiNist2015);
    }

    #[test]
    fn revisions_round_trip_through_json() {
        for standard in Standard::ALL {
            let json = serde_json::to_string(&standard).unwrap();
            let back: Standard = serde_json::from_str(&json).unwrap();
            assert_eq!(back, standard);
        }
        assert_eq!(
            serde_json::to_string(&Standard::AnsiNist2011).unwrap(),
            "\"ANSI_NIST2011\""
        );
    }

    #[test]
    fn interval_membership() {
        let s = Standard::AnsiNist2011;
        assert!(s.is_between(Standard::AnsiNist2000, None));
        assert!(s.is_between(Standard::AnsiNist2011, Some(Standard::AnsiNist2013)));
        assert!(!s.is_between(Standard::AnsiNist2013, None));
        assert!(!s.is_between(Standard::AnsiNist2000, Some(Standard::AnsiNist2011)));
    }
}
