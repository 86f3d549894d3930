use chrono::Utc;
use validator::Validate;

use super::codec;
use crate::constants::API_NAME;
use crate::error::{validation_messages, AppError};
use crate::models::{CarDraft, CarListing, CarPayload, Scope};
use crate::repository::CarRepository;

/// Public/admin reads plus admin writes over the car table.
#[derive(Clone)]
pub struct CatalogService {
    cars: CarRepository,
}

impl CatalogService {
    pub fn new(cars: CarRepository) -> Self {
        Self { cars }
    }

    pub async fn list_cars(&self, scope: Scope) -> Result<Vec<CarListing>, AppError> {
        let rows = self.cars.get_all(scope).await?;
        let listings = rows
            .into_iter()
            .map(codec::decode_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("{} Listed {} cars for {:?} scope", API_NAME, listings.len(), scope);
        Ok(listings)
    }

    pub async fn get_car(&self, id: &str) -> Result<CarListing, AppError> {
        let row = self.cars.get(id).await?;
        Ok(codec::decode_row(row)?)
    }

    /// Create or fully overwrite a car. Returns its id.
    pub async fn save_car(&self, payload: CarPayload) -> Result<String, AppError> {
        let draft = validate_payload(payload)?;
        let id = draft.id.clone();

        let record = codec::encode_draft(draft)?;
        self.cars.upsert(&record, Utc::now()).await?;

        tracing::info!("{} Saved car: {}", API_NAME, id);
        Ok(id)
    }

    pub async fn delete_car(&self, id: &str) -> Result<(), AppError> {
        if self.cars.delete(id).await? {
            tracing::info!("{} Deleted car: {}", API_NAME, id);
        } else {
            tracing::info!("{} Delete requested for unknown car: {}", API_NAME, id);
        }
        Ok(())
    }
}

/// Presence check for the admin form. Every missing field is reported at once
/// and nothing is defaulted, except `status`, which may be left out.
pub fn validate_payload(payload: CarPayload) -> Result<CarDraft, AppError> {
    payload.validate().map_err(|errors| {
        AppError::Validation(format!(
            "missing required fields: {}",
            validation_messages(&errors).join(", ")
        ))
    })?;
    Ok(payload.into_draft())
}
