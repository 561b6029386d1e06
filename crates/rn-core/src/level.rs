//! Facility level tiers.
//!
//! Levels arrive as free text ("I-1", "II-2", "III-E", ...). Only the leading
//! roman numeral matters for analysis, and because "III" and "II" both start
//! with "I" the prefixes must be tested longest first.

use core::fmt;
use core::str::FromStr;

/// Care complexity tier, ordered from primary (I) to highest (III).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LevelTier {
    I,
    II,
    III,
}

impl LevelTier {
    /// Classify a raw level string by its leading numeral.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Returns `None` for empty or unrecognised text.
    pub fn classify(level: &str) -> Option<Self> {
        let upper = level.trim().to_ascii_uppercase();
        if upper.starts_with("III") {
            Some(Self::III)
        } else if upper.starts_with("II") {
            Some(Self::II)
        } else if upper.starts_with('I') {
            Some(Self::I)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::I => "I",
            Self::II => "II",
            Self::III => "III",
        }
    }
}

impl fmt::Display for LevelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LevelTier {
    type Err = crate::RnError;

    /// Parse an exact tier name ("i", "II", "iii").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "I" => Ok(Self::I),
            "II" => Ok(Self::II),
            "III" => Ok(Self::III),
            _ => Err(crate::RnError::InvalidArg {
                what: "level tier must be I, II or III",
            }),
        }
    }
}
