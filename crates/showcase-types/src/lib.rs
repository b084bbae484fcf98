//! Showcase Types - Shared domain types
//!
//! This crate contains domain types used across the showcase services:
//! - Membership tiers and their fixed ordering
//! - User identity as issued by the identity provider
//! - Event records owned by the event store

pub mod event;
pub mod tier;
pub mod user;

pub use event::*;
pub use tier::*;
pub use user::*;
