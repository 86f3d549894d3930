use axum::{extract::State, response::Json, routing::{get, post}, Router};

use crate::error::AppError;
use crate::models::{AdminClaims, DashboardStats, LoginRequest, LoginResponse};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(login))
        .route("/dashboard/stats", get(dashboard_stats))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    Ok(Json(state.auth.login(&request.username, &request.password).await?))
}

async fn dashboard_stats(
    _admin: AdminClaims,
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(state.dashboard.stats().await?))
}
