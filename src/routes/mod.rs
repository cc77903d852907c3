//! Routers de la API
//!
//! Un router por entidad más búsqueda, colgados bajo los mismos prefijos que
//! el servicio original.

pub mod company_routes;
pub mod driver_routes;
pub mod file_routes;
pub mod search_routes;
pub mod vehicle_routes;

use axum::{extract::DefaultBodyLimit, response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

/// Construir la aplicación completa con middlewares y estado compartido
pub fn app(state: AppState) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    Router::new()
        .route("/health", get(health))
        .nest("/api/companies", company_routes::router())
        .nest("/api/vehicles", vehicle_routes::router())
        .nest("/api/drivers", driver_routes::router())
        .nest("/api/files", file_routes::router())
        .nest("/api/search", search_routes::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .with_state(state)
}

/// Health check simple
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "fleet-records",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
