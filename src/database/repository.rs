use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

use super::manager::StoreError;
use super::models::UserRecord;

const INSERT_USER_SQL: &str = r#"INSERT INTO "SecondUsers" ("name", "email", "age") VALUES ($1, $2, $3)"#;

/// Persistence seam for registered users
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a single row. One statement, autocommit, no retry.
    async fn insert_user(&self, record: &UserRecord) -> Result<(), StoreError>;

    /// Round-trip to the backend, used by the health endpoint
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Postgres-backed [`UserStore`]
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert_user(&self, record: &UserRecord) -> Result<(), StoreError> {
        // Returned to the pool when dropped, on every exit path
        let mut conn = self.pool.acquire().await?;
        info!("Database connection successful");

        debug!("Executing SQL command: {}", INSERT_USER_SQL);
        let result = sqlx::query(INSERT_USER_SQL)
            .bind(&record.name)
            .bind(&record.email)
            .bind(record.age)
            .execute(&mut *conn)
            .await?;

        debug!("Inserted {} row(s) into SecondUsers", result.rows_affected());
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
