//! Tier transitions
//!
//! Tiers form a line `free -> silver -> gold -> platinum`. Upgrades and
//! downgrades move exactly one step; there is nothing past either end.

use serde::{Deserialize, Serialize};
use showcase_types::Tier;

/// Direction of a one-step tier transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Upgrade,
    Downgrade,
}

impl Direction {
    /// Tier reached by moving one step from `from`, if any
    pub fn target(self, from: Tier) -> Option<Tier> {
        match self {
            Self::Upgrade => next_tier(from),
            Self::Downgrade => previous_tier(from),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upgrade => "upgrade",
            Self::Downgrade => "downgrade",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tier one rank above `current`, or `None` at platinum
pub fn next_tier(current: Tier) -> Option<Tier> {
    current.rank().checked_add(1).and_then(Tier::from_rank)
}

/// Tier one rank below `current`, or `None` at free
pub fn previous_tier(current: Tier) -> Option<Tier> {
    current.rank().checked_sub(1).and_then(Tier::from_rank)
}

/// Whether `to` is exactly one step away from `from`
pub fn is_adjacent(from: Tier, to: Tier) -> bool {
    from.rank().abs_diff(to.rank()) == 1
}
