use axum::Router;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::handlers::{admin, cars, health, inquiry, upload};
use crate::state::AppState;

/// JSON API under `/api`, everything else served from the static site dir.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(cars::router())
        .merge(admin::router())
        .merge(inquiry::router())
        .merge(upload::router())
        .merge(health::router());

    let site = ServeDir::new(&state.config.static_dir);

    Router::new()
        .nest("/api", api)
        .fallback_service(site)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
