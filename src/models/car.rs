use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// Named attributes shown on the detail page (engine, power, drivetrain, mpg).
pub type Specs = BTreeMap<String, String>;

/// Visibility filter applied to a catalog read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Only `status = 'active'` rows.
    Public,
    /// Every row regardless of status.
    Admin,
}

/// A car as exposed to callers: nested fields in structured form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarListing {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: i64,
    pub price: i64,
    pub mileage: i64,
    pub fuel: String,
    pub transmission: String,
    pub color: String,
    pub images: Vec<String>,
    pub specs: Specs,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stored shape of the `cars` table; `images` and `specs` are JSON text.
#[derive(Debug, Clone, FromRow)]
pub struct CarRow {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: i64,
    pub price: i64,
    pub mileage: i64,
    pub fuel: String,
    pub transmission: String,
    pub color: String,
    pub images: String,
    pub specs: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Write-side shape handed to the store. `status: None` means "active" on
/// insert and "leave as is" on update.
#[derive(Debug, Clone, PartialEq)]
pub struct CarRecord {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: i64,
    pub price: i64,
    pub mileage: i64,
    pub fuel: String,
    pub transmission: String,
    pub color: String,
    pub images: String,
    pub specs: String,
    pub status: Option<String>,
}

/// A fully-populated car before encoding, produced by either the admin
/// payload or a snapshot entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CarDraft {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: i64,
    pub price: i64,
    pub mileage: i64,
    pub fuel: String,
    pub transmission: String,
    pub color: String,
    pub images: Vec<String>,
    pub specs: Specs,
    pub status: Option<String>,
}

/// Admin create/update body. Everything is optional at the serde level so
/// that missing fields can be reported together; a blank string counts as
/// missing. Each rule's message is the field name.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CarPayload {
    #[validate(required(message = "id"), custom(function = "not_blank", message = "id"))]
    pub id: Option<String>,
    #[validate(required(message = "brand"), custom(function = "not_blank", message = "brand"))]
    pub brand: Option<String>,
    #[validate(required(message = "model"), custom(function = "not_blank", message = "model"))]
    pub model: Option<String>,
    #[validate(required(message = "year"))]
    pub year: Option<i64>,
    #[validate(required(message = "price"))]
    pub price: Option<i64>,
    #[validate(required(message = "mileage"))]
    pub mileage: Option<i64>,
    #[validate(required(message = "fuel"), custom(function = "not_blank", message = "fuel"))]
    pub fuel: Option<String>,
    #[validate(
        required(message = "transmission"),
        custom(function = "not_blank", message = "transmission")
    )]
    pub transmission: Option<String>,
    #[validate(required(message = "color"), custom(function = "not_blank", message = "color"))]
    pub color: Option<String>,
    #[validate(required(message = "images"))]
    pub images: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_specs_option")]
    #[validate(required(message = "specs"))]
    pub specs: Option<Specs>,
    pub status: Option<String>,
}

impl CarPayload {
    /// Call after `validate()` has passed; absent fields would become empty.
    pub fn into_draft(self) -> CarDraft {
        CarDraft {
            id: self.id.unwrap_or_default(),
            brand: self.brand.unwrap_or_default(),
            model: self.model.unwrap_or_default(),
            year: self.year.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            mileage: self.mileage.unwrap_or_default(),
            fuel: self.fuel.unwrap_or_default(),
            transmission: self.transmission.unwrap_or_default(),
            color: self.color.unwrap_or_default(),
            images: self.images.unwrap_or_default(),
            specs: self.specs.unwrap_or_default(),
            status: self.status.filter(|s| !s.trim().is_empty()),
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// One entry of the cars JSON snapshot. Absent or `null` fields take the seed
/// defaults, except `brand` and `model` which have none.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncRecord {
    pub id: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub mileage: Option<i64>,
    #[serde(default)]
    pub fuel: Option<String>,
    #[serde(default)]
    pub transmission: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_specs")]
    pub specs: Specs,
    #[serde(default)]
    pub status: Option<String>,
}

// Snapshot files written by hand often carry numeric spec values ("mpg": 40);
// scalars are accepted and stored in their textual form.
fn deserialize_specs<'de, D>(deserializer: D) -> Result<Specs, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw: Option<BTreeMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;
    let mut specs = Specs::new();
    for (key, value) in raw.unwrap_or_default() {
        let text = match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Null => continue,
            other => {
                return Err(D::Error::custom(format!(
                    "spec '{}' must be a scalar, got {}",
                    key, other
                )))
            }
        };
        specs.insert(key, text);
    }
    Ok(specs)
}

fn deserialize_specs_option<'de, D>(deserializer: D) -> Result<Option<Specs>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(v) => deserialize_specs(v).map(Some).map_err(D::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sync_record_treats_null_as_absent() {
        let record: SyncRecord = serde_json::from_value(json!({
            "id": "c1",
            "brand": "Ford",
            "model": "Focus",
            "year": null,
            "images": null,
            "status": null
        }))
        .unwrap();

        assert_eq!(record.year, None);
        assert_eq!(record.price, None);
        assert_eq!(record.images, None);
        assert_eq!(record.status, None);
        assert!(record.specs.is_empty());
    }

    #[test]
    fn test_sync_record_requires_id() {
        let result = serde_json::from_value::<SyncRecord>(json!({"brand": "Ford"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_specs_accept_numeric_values() {
        let record: SyncRecord = serde_json::from_value(json!({
            "id": "c2",
            "specs": {"engine": "2.5L", "mpg": 40, "awd": true, "trim": null}
        }))
        .unwrap();

        assert_eq!(record.specs.get("mpg").map(String::as_str), Some("40"));
        assert_eq!(record.specs.get("awd").map(String::as_str), Some("true"));
        assert!(!record.specs.contains_key("trim"));
    }

    #[test]
    fn test_specs_reject_nested_values() {
        let result = serde_json::from_value::<SyncRecord>(json!({
            "id": "c3",
            "specs": {"engine": {"size": "2.0L"}}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_payload_missing_specs_is_none() {
        let payload: CarPayload = serde_json::from_value(json!({"id": "c1"})).unwrap();
        assert!(payload.specs.is_none());
        assert!(payload.images.is_none());
    }

    #[test]
    fn test_payload_blank_text_fails_validation() {
        let payload: CarPayload = serde_json::from_value(json!({
            "id": "c1",
            "brand": "  ",
            "model": "Focus",
            "year": 2020,
            "price": 15000,
            "mileage": 30000,
            "fuel": "Gas",
            "transmission": "Manual",
            "color": "Red",
            "images": [],
            "specs": {}
        }))
        .unwrap();

        let errors = payload.validate().unwrap_err();
        let fields: Vec<_> = errors.field_errors().into_keys().collect();
        assert_eq!(fields, vec!["brand"]);
    }
}
