//! Database operations for storefront `PostgreSQL`.
//!
//! # Schema: `storefront`
//!
//! The schema is owned and migrated by an external collaborator; this crate
//! only reads from it.
//!
//! ## Tables read here
//!
//! - `shipping_method` - Shipping methods offered by a stall
//! - `shipping_zone` - Region/country coverage rows per method (NULL code =
//!   wildcard)

pub mod shipping;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors that can occur during repository operations.
///
/// This layer is read-only and defines no taxonomy of its own: store
/// faults pass through unmodified. Empty result sets are not errors.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
