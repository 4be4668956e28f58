//! PostgreSQL persistence adapters using Diesel.
//!
//! Concrete implementations of the driven repository ports, backed by
//! `diesel-async` over a `bb8` pool.
//!
//! - Adapters only translate between rows and domain types. Ownership
//!   predicates live in the SQL itself.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) never
//!   leave this module.
//! - Numeric and vector columns go through parameterised `sql_query` with
//!   explicit casts.
//!
//! # Example
//!
//! ```no_run
//! use credx_backend::outbound::persistence::{DbPool, DieselContentRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/credx")).await?;
//! let _content = DieselContentRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_content_repository;
mod diesel_promotion_repository;
mod diesel_wallet_repository;
mod diesel_widget_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_content_repository::DieselContentRepository;
pub use diesel_promotion_repository::DieselPromotionRepository;
pub use diesel_wallet_repository::DieselWalletRepository;
pub use diesel_widget_repository::DieselWidgetRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
