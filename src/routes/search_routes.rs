use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::controllers::search_controller::SearchController;
use crate::dto::company_dto::CompanyResponse;
use crate::dto::driver_dto::DriverResponse;
use crate::dto::vehicle_dto::VehicleResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/companies", get(search_companies))
        .route("/vehicles", get(search_vehicles))
        .route("/drivers", get(search_drivers))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: Option<String>,
    company_id: Option<i64>,
    car_type: Option<String>,
}

async fn search_companies(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<CompanyResponse>>, AppError> {
    let response = SearchController::new(state.pool.clone())
        .companies(query.q.as_deref())
        .await?;
    Ok(Json(response))
}

async fn search_vehicles(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let response = SearchController::new(state.pool.clone())
        .vehicles(
            query.q.as_deref(),
            query.company_id,
            query.car_type.as_deref(),
        )
        .await?;
    Ok(Json(response))
}

async fn search_drivers(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<DriverResponse>>, AppError> {
    let response = SearchController::new(state.pool.clone())
        .drivers(query.q.as_deref(), query.company_id)
        .await?;
    Ok(Json(response))
}
