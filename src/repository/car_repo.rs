use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::StoreError;
use crate::constants::STATUS_ACTIVE;
use crate::models::{CarRecord, CarRow, Scope};

const CAR_COLUMNS: &str = "id, brand, model, year, price, mileage, fuel, transmission, color, \
                           images, specs, status, created_at, updated_at";

/// Keyed storage for car listings, one row per id.
#[derive(Clone)]
pub struct CarRepository {
    pool: SqlitePool,
}

impl CarRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the row, or overwrite every column but `id` and `created_at`.
    ///
    /// A single `INSERT .. ON CONFLICT` statement, so readers never observe a
    /// half-written row and concurrent writers to the same id resolve as
    /// last-writer-wins.
    pub async fn upsert(&self, record: &CarRecord, now: DateTime<Utc>) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO cars (id, brand, model, year, price, mileage, fuel, transmission, color,
                               images, specs, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, COALESCE(?, ?), ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                 brand = excluded.brand,
                 model = excluded.model,
                 year = excluded.year,
                 price = excluded.price,
                 mileage = excluded.mileage,
                 fuel = excluded.fuel,
                 transmission = excluded.transmission,
                 color = excluded.color,
                 images = excluded.images,
                 specs = excluded.specs,
                 status = COALESCE(?, cars.status),
                 updated_at = excluded.updated_at",
        )
        .bind(&record.id)
        .bind(&record.brand)
        .bind(&record.model)
        .bind(record.year)
        .bind(record.price)
        .bind(record.mileage)
        .bind(&record.fuel)
        .bind(&record.transmission)
        .bind(&record.color)
        .bind(&record.images)
        .bind(&record.specs)
        .bind(record.status.as_deref())
        .bind(STATUS_ACTIVE)
        .bind(now)
        .bind(now)
        .bind(record.status.as_deref())
        .execute(&self.pool)
        .await
        .map_err(StoreError::storage("upsert car"))?;
        Ok(())
    }

    pub async fn get_all(&self, scope: Scope) -> Result<Vec<CarRow>, StoreError> {
        // rowid breaks ties between rows written within the same timestamp
        let rows = match scope {
            Scope::Public => {
                let sql = format!(
                    "SELECT {CAR_COLUMNS} FROM cars WHERE status = ? ORDER BY created_at DESC, rowid DESC"
                );
                sqlx::query_as::<_, CarRow>(&sql)
                    .bind(STATUS_ACTIVE)
                    .fetch_all(&self.pool)
                    .await
            }
            Scope::Admin => {
                let sql = format!("SELECT {CAR_COLUMNS} FROM cars ORDER BY created_at DESC, rowid DESC");
                sqlx::query_as::<_, CarRow>(&sql).fetch_all(&self.pool).await
            }
        };

        rows.map_err(StoreError::storage("list cars"))
    }

    pub async fn get(&self, id: &str) -> Result<CarRow, StoreError> {
        sqlx::query_as::<_, CarRow>(&format!("SELECT {CAR_COLUMNS} FROM cars WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::storage("get car"))?
            .ok_or_else(|| StoreError::not_found("car", id))
    }

    /// Hard delete. Returns whether a row was removed; an absent id is not an
    /// error.
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM cars WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::storage("delete car"))?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_active(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cars WHERE status = ?")
            .bind(STATUS_ACTIVE)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::storage("count active cars"))
    }
}
