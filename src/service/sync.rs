use std::path::Path;

use anyhow::anyhow;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use super::codec;
use crate::constants::{API_NAME, STATUS_ACTIVE};
use crate::error::AppError;
use crate::models::{CarDraft, SyncRecord};
use crate::repository::CarRepository;

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub synced: usize,
    pub failed: usize,
}

/// Reconciles a JSON snapshot of cars into the store.
///
/// Each entry is upserted on its own: a bad entry is logged and counted, the
/// rest still go through. Rows missing from the snapshot are left alone.
#[derive(Clone)]
pub struct CatalogSync {
    cars: CarRepository,
}

impl CatalogSync {
    pub fn new(cars: CarRepository) -> Self {
        Self { cars }
    }

    pub async fn sync_file(&self, path: &Path) -> Result<SyncReport, AppError> {
        tracing::info!("{} Syncing cars from {}", API_NAME, path.display());
        let raw = tokio::fs::read_to_string(path).await?;
        self.sync_str(&raw).await
    }

    pub async fn sync_str(&self, raw: &str) -> Result<SyncReport, AppError> {
        let snapshot: Value = serde_json::from_str(raw)
            .map_err(|e| AppError::Internal(anyhow!("cars snapshot is not valid JSON: {}", e)))?;
        match snapshot {
            Value::Array(entries) => Ok(self.sync_entries(entries).await),
            _ => Err(AppError::Validation(
                "cars snapshot must be a JSON array".to_string(),
            )),
        }
    }

    pub async fn sync_entries(&self, entries: Vec<Value>) -> SyncReport {
        let mut report = SyncReport::default();
        let total = entries.len();

        for (index, entry) in entries.into_iter().enumerate() {
            match self.sync_entry(entry).await {
                Ok(id) => {
                    tracing::debug!("{} Synced car: {}", API_NAME, id);
                    report.synced += 1;
                }
                Err(e) => {
                    tracing::warn!("{} Skipping snapshot entry {}: {}", API_NAME, index, e);
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            "{} Synced {} of {} cars ({} failed)",
            API_NAME,
            report.synced,
            total,
            report.failed
        );
        report
    }

    async fn sync_entry(&self, entry: Value) -> Result<String, AppError> {
        let record: SyncRecord = serde_json::from_value(entry)?;
        let draft = draft_from_snapshot(record)?;
        let id = draft.id.clone();

        let encoded = codec::encode_draft(draft)?;
        self.cars.upsert(&encoded, Utc::now()).await?;
        Ok(id)
    }
}

fn draft_from_snapshot(record: SyncRecord) -> Result<CarDraft, AppError> {
    let missing = |field: &str| {
        AppError::Validation(format!("car '{}' has no {}", record.id, field))
    };
    let brand = record.brand.clone().ok_or_else(|| missing("brand"))?;
    let model = record.model.clone().ok_or_else(|| missing("model"))?;

    Ok(CarDraft {
        id: record.id,
        brand,
        model,
        year: record.year.unwrap_or_default(),
        price: record.price.unwrap_or_default(),
        mileage: record.mileage.unwrap_or_default(),
        fuel: record.fuel.unwrap_or_default(),
        transmission: record.transmission.unwrap_or_default(),
        color: record.color.unwrap_or_default(),
        images: record.images.unwrap_or_default(),
        specs: record.specs,
        status: Some(record.status.unwrap_or_else(|| STATUS_ACTIVE.to_string())),
    })
}
