//! Membership tier types

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Membership tier levels, ordered `free < silver < gold < platinum`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Default tier for users without a stored tier
    #[default]
    Free,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    /// Every tier in ascending rank order
    pub const ALL: [Tier; 4] = [Self::Free, Self::Silver, Self::Gold, Self::Platinum];

    /// Fixed position of this tier in the ordering
    pub const fn rank(self) -> u8 {
        match self {
            Self::Free => 0,
            Self::Silver => 1,
            Self::Gold => 2,
            Self::Platinum => 3,
        }
    }

    /// Tier at the given rank, if any
    pub const fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            0 => Some(Self::Free),
            1 => Some(Self::Silver),
            2 => Some(Self::Gold),
            3 => Some(Self::Platinum),
            _ => None,
        }
    }

    /// Lowercase name used on the wire and in the database
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }

    /// Human-readable tier name
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
        }
    }

    /// Lowest tier
    pub const fn lowest() -> Self {
        Self::Free
    }

    /// Highest tier
    pub const fn highest() -> Self {
        Self::Platinum
    }
}

impl PartialOrd for Tier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = TierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "silver" => Ok(Self::Silver),
            "gold" => Ok(Self::Gold),
            "platinum" => Ok(Self::Platinum),
            _ => Err(TierParseError(s.to_string())),
        }
    }
}

/// Error parsing a tier string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierParseError(pub String);

impl std::fmt::Display for TierParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid tier: {}", self.0)
    }
}

impl std::error::Error for TierParseError {}
