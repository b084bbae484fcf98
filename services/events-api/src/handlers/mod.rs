//! HTTP handlers

mod admin;
mod events;
mod health;
mod shared;
mod tier;

pub use admin::seed_events;
pub use events::{get_event, list_accessible_events, list_events};
pub use health::{health, ready};
pub use tier::{downgrade_my_tier, get_my_tier, update_user_tier, upgrade_my_tier};
