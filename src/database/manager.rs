use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the user store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Database operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Builds the connection pool backing the user store
pub struct DatabaseManager;

impl DatabaseManager {
    /// Create a lazily-connecting pool.
    ///
    /// No connection is opened here, so a store that is down at startup only
    /// fails the requests that need it.
    pub fn connect_lazy(url: &str, config: &DatabaseConfig) -> Result<PgPool, StoreError> {
        let redacted = Self::redacted_url(url)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_lazy(url)?;

        info!("Created database pool for: {}", redacted);
        Ok(pool)
    }

    /// Connection string with the password removed, for log output
    pub fn redacted_url(url: &str) -> Result<String, StoreError> {
        let mut parsed = url::Url::parse(url).map_err(|_| StoreError::InvalidDatabaseUrl)?;
        if parsed.password().is_some() {
            parsed
                .set_password(Some("***"))
                .map_err(|_| StoreError::InvalidDatabaseUrl)?;
        }
        Ok(parsed.into())
    }
}
