//! Common test utilities for showcase-access integration tests

pub mod mock_repos;

#[allow(unused_imports)]
pub use mock_repos::{event, MockEventRepository, MockUserRepository};
