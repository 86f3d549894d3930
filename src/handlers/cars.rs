use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{AdminClaims, CarListing, CarPayload, Scope};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cars/public", get(list_public_cars))
        .route("/cars", get(list_all_cars).post(save_car))
        .route("/cars/sync", post(sync_cars))
        .route("/cars/:id", get(get_car).delete(delete_car))
}

async fn list_public_cars(State(state): State<AppState>) -> Result<Json<Vec<CarListing>>, AppError> {
    Ok(Json(state.catalog.list_cars(Scope::Public).await?))
}

async fn list_all_cars(
    _admin: AdminClaims,
    State(state): State<AppState>,
) -> Result<Json<Vec<CarListing>>, AppError> {
    Ok(Json(state.catalog.list_cars(Scope::Admin).await?))
}

async fn get_car(
    _admin: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CarListing>, AppError> {
    Ok(Json(state.catalog.get_car(&id).await?))
}

async fn save_car(
    admin: AdminClaims,
    State(state): State<AppState>,
    Json(payload): Json<CarPayload>,
) -> Result<Json<Value>, AppError> {
    tracing::info!("{} {} saving car {:?}", API_NAME, admin.username, payload.id);
    let id = state.catalog.save_car(payload).await?;

    Ok(Json(json!({
        "success": true,
        "id": id
    })))
}

async fn delete_car(
    admin: AdminClaims,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    tracing::info!("{} {} deleting car {}", API_NAME, admin.username, id);
    state.catalog.delete_car(&id).await?;

    Ok(Json(json!({ "success": true })))
}

async fn sync_cars(admin: AdminClaims, State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    tracing::info!("{} {} triggered catalog sync", API_NAME, admin.username);
    let report = state.sync.sync_file(&state.config.cars_json_path).await?;

    Ok(Json(json!({
        "success": true,
        "synced": report.synced,
        "failed": report.failed
    })))
}
