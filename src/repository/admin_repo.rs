use sqlx::SqlitePool;

use super::StoreError;
use crate::models::Admin;

#[derive(Clone)]
pub struct AdminRepository {
    pool: SqlitePool,
}

impl AdminRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, StoreError> {
        sqlx::query_as::<_, Admin>("SELECT id, username, password FROM admins WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::storage("find admin"))
    }

    /// Stores an already-hashed password. Does nothing when the username is
    /// taken.
    pub async fn create_if_absent(&self, username: &str, password_hash: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "INSERT INTO admins (username, password) VALUES (?, ?) ON CONFLICT(username) DO NOTHING",
        )
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(StoreError::storage("create admin"))?;
        Ok(result.rows_affected() > 0)
    }
}
