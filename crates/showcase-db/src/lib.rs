//! Showcase DB - Database abstractions
//!
//! SQLx-based event store and user tier store.
//!
//! # Example
//!
//! ```rust,ignore
//! use showcase_db::{create_pool, run_migrations, EventRepository, Repositories};
//!
//! let pool = create_pool("postgres://localhost/showcase").await?;
//! run_migrations(&pool).await?;
//! let repos = Repositories::new(pool);
//!
//! let events = repos.events.list().await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;
pub mod seed;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool, create_pool_with_options, run_migrations, DbPool, PoolOptions};
pub use repo::*;
