//! Showcase Access - Tier-based access control
//!
//! The pure access model (tier comparison, event partitioning, tier
//! transitions) plus the service that connects it to the identity
//! provider and the event store.

pub mod access;
pub mod config;
pub mod error;
pub mod service;
pub mod token;
pub mod transition;

pub use access::*;
pub use config::*;
pub use error::*;
pub use service::*;
pub use token::*;
pub use transition::*;
