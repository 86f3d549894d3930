use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub car_id: Option<String>,
    pub car_name: Option<String>,
    pub date: String,
    pub time: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Test-drive request submitted from the public site.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewBooking {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[serde(rename = "carId")]
    pub car_id: Option<String>,
    #[serde(rename = "carName")]
    pub car_name: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "time is required"))]
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewContact {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
}

/// Admin follow-up on a booking or contact. An absent status keeps the
/// current one; notes are always overwritten.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}
