use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::models::{AdminClaims, Booking, Contact, ListQuery, NewBooking, NewContact, StatusUpdate};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/booking", post(submit_booking))
        .route("/bookings", get(list_bookings))
        .route("/bookings/:id", put(update_booking))
        .route("/contact", post(submit_contact))
        .route("/contacts", get(list_contacts))
        .route("/contacts/:id", put(update_contact))
}

async fn submit_booking(
    State(state): State<AppState>,
    Json(booking): Json<NewBooking>,
) -> Result<Json<Value>, AppError> {
    let id = state.inquiries.submit_booking(booking).await?;
    Ok(Json(json!({ "success": true, "id": id })))
}

async fn list_bookings(
    _admin: AdminClaims,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(state.inquiries.list_bookings(query.limit).await?))
}

async fn update_booking(
    _admin: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<Value>, AppError> {
    state.inquiries.update_booking(id, update).await?;
    Ok(Json(json!({ "success": true })))
}

async fn submit_contact(
    State(state): State<AppState>,
    Json(contact): Json<NewContact>,
) -> Result<Json<Value>, AppError> {
    let id = state.inquiries.submit_contact(contact).await?;
    Ok(Json(json!({ "success": true, "id": id })))
}

async fn list_contacts(
    _admin: AdminClaims,
    State(state): State<AppState>,
) -> Result<Json<Vec<Contact>>, AppError> {
    Ok(Json(state.inquiries.list_contacts().await?))
}

async fn update_contact(
    _admin: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<Value>, AppError> {
    state.inquiries.update_contact(id, update).await?;
    Ok(Json(json!({ "success": true })))
}
