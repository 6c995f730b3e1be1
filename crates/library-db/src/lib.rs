//! # library-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `library-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model to entity mappers
//! - Repository implementations
//!
//! Every stateful table references `states(id)`. Writes resolve the id by
//! state name in a subselect; reads join the name back.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use library_db::{create_pool, run_migrations, PoolSettings, PgMemberRepository};
//!
//! async fn example(config: &library_common::DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolSettings::from(config)).await?;
//!     run_migrations(&pool, None).await?;
//!     let members = PgMemberRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{bundled_migrations_dir, create_pool, run_migrations, PgPool, PoolSettings};
pub use repositories::{
    PgAuthorRepository, PgBookRepository, PgCategoryRepository, PgLoanRepository,
    PgMemberRepository, PgStateRepository, PgTransactionRepository,
};
