//! # account-db
//!
//! Storage layer implementing the account repository trait.
//!
//! ## Overview
//!
//! - Connection pool management and table bootstrap for PostgreSQL
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - `PgAccountRepository`, and `MemoryAccountRepository` for local mode and tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use account_common::AppConfig;
//! use account_db::{create_pool, ensure_schema, PgAccountRepository};
//!
//! async fn example(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let database = config.database.as_ref().ok_or("DATABASE_URL not set")?;
//!     let pool = create_pool(database).await?;
//!     ensure_schema(&pool).await?;
//!     let accounts = PgAccountRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, ensure_schema, PgPool};
pub use repositories::{MemoryAccountRepository, PgAccountRepository};
