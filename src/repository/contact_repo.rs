use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::StoreError;
use crate::constants::CONTACT_STATUS_NEW;
use crate::models::{Contact, NewContact, StatusUpdate};

#[derive(Clone)]
pub struct ContactRepository {
    pool: SqlitePool,
}

impl ContactRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, contact: &NewContact, now: DateTime<Utc>) -> Result<i64, StoreError> {
        let result = sqlx::query(
            "INSERT INTO contacts (name, email, message, status, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.message)
        .bind(CONTACT_STATUS_NEW)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(StoreError::storage("create contact"))?;
        Ok(result.last_insert_rowid())
    }

    pub async fn list(&self) -> Result<Vec<Contact>, StoreError> {
        sqlx::query_as::<_, Contact>(
            "SELECT id, name, email, message, status, notes, created_at
             FROM contacts ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::storage("list contacts"))
    }

    pub async fn update_status(&self, id: i64, update: &StatusUpdate) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE contacts SET status = COALESCE(?, status), notes = ? WHERE id = ?",
        )
        .bind(update.status.as_deref())
        .bind(update.notes.as_deref())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(StoreError::storage("update contact"))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("contact", id));
        }
        Ok(())
    }

    pub async fn count_new(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contacts WHERE status = ?")
            .bind(CONTACT_STATUS_NEW)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::storage("count new contacts"))
    }
}
