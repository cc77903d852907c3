use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::file_controller::FileController;
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::company_dto::ApiResponse;
use crate::dto::driver_dto::DriverResponse;
use crate::dto::file_dto::FileResponse;
use crate::dto::vehicle_dto::{
    AssignDriverRequest, CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse,
};
use crate::models::file::OwnerKind;
use crate::routes::file_routes::extract_upload;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route("/:id/assign", put(assign_driver))
        .route("/:id/driver", get(get_vehicle_driver))
        .route("/:id/files", post(upload_vehicle_file))
}

fn controller(state: &AppState) -> VehicleController {
    VehicleController::new(state.pool.clone(), state.storage.clone())
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleResponse>>), AppError> {
    let response = controller(&state).create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            response,
            "Vehicle created successfully".to_string(),
        )),
    ))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let response = controller(&state).list().await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VehicleResponse>, AppError> {
    let response = controller(&state).get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let response = controller(&state).update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Vehicle updated successfully".to_string(),
    )))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    controller(&state).delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Vehicle deleted successfully"
    })))
}

async fn assign_driver(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<AssignDriverRequest>,
) -> Result<Json<VehicleResponse>, AppError> {
    let response = controller(&state)
        .assign_driver(id, request.effective_driver_id())
        .await?;
    Ok(Json(response))
}

async fn get_vehicle_driver(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DriverResponse>, AppError> {
    let response = controller(&state).assigned_driver(id).await?;
    Ok(Json(response))
}

async fn upload_vehicle_file(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<FileResponse>), AppError> {
    let payload = extract_upload(multipart).await?;
    let response = FileController::new(state.pool.clone(), state.storage.clone())
        .attach(OwnerKind::Vehicle, id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}
