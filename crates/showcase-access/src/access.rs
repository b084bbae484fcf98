//! Access evaluation
//!
//! Cumulative access: a tier sees its own content and everything below it.
//! All functions here are pure and take the user's tier explicitly.

use serde::Serialize;
use showcase_types::{Event, Tier};

/// Anything gated by a minimum tier
pub trait Tiered {
    /// Minimum tier required to view this item
    fn tier(&self) -> Tier;
}

impl Tiered for Tier {
    fn tier(&self) -> Tier {
        *self
    }
}

impl Tiered for Event {
    fn tier(&self) -> Tier {
        self.tier
    }
}

impl<T: Tiered + ?Sized> Tiered for &T {
    fn tier(&self) -> Tier {
        (**self).tier()
    }
}

/// Whether a user at `user_tier` may view content gated at `event_tier`
pub fn can_access(user_tier: Tier, event_tier: Tier) -> bool {
    user_tier.rank() >= event_tier.rank()
}

/// Every tier visible to `user_tier`, in ascending rank order
///
/// Suitable for building a `tier IN (...)` store filter.
pub fn accessible_tiers(user_tier: Tier) -> Vec<Tier> {
    Tier::ALL
        .into_iter()
        .filter(|tier| tier.rank() <= user_tier.rank())
        .collect()
}

/// Tier a user must reach to unlock content gated at `event_tier`
///
/// `None` when the content is already accessible.
pub fn required_tier(user_tier: Tier, event_tier: Tier) -> Option<Tier> {
    (!can_access(user_tier, event_tier)).then_some(event_tier)
}

/// Ordered split of a collection into accessible and locked items
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition<T> {
    pub accessible: Vec<T>,
    pub locked: Vec<T>,
}

impl<T> Partition<T> {
    /// Total number of items across both sides
    pub fn len(&self) -> usize {
        self.accessible.len() + self.locked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessible.is_empty() && self.locked.is_empty()
    }
}

impl<T> Default for Partition<T> {
    fn default() -> Self {
        Self {
            accessible: Vec::new(),
            locked: Vec::new(),
        }
    }
}

/// Stable-partition `items` by whether `user_tier` can access each one
///
/// Relative order is preserved on both sides, so sorted input yields
/// sorted output.
pub fn partition<T, I>(user_tier: Tier, items: I) -> Partition<T>
where
    T: Tiered,
    I: IntoIterator<Item = T>,
{
    let (accessible, locked): (Vec<T>, Vec<T>) = items
        .into_iter()
        .partition(|item| can_access(user_tier, item.tier()));

    Partition { accessible, locked }
}
