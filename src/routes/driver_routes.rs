use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::driver_controller::DriverController;
use crate::controllers::file_controller::FileController;
use crate::dto::company_dto::ApiResponse;
use crate::dto::driver_dto::{CreateDriverRequest, DriverResponse, UpdateDriverRequest};
use crate::dto::file_dto::FileResponse;
use crate::models::file::OwnerKind;
use crate::routes::file_routes::extract_upload;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_drivers).post(create_driver))
        .route(
            "/:id",
            get(get_driver).put(update_driver).delete(delete_driver),
        )
        .route("/:id/files", post(upload_driver_file))
}

fn controller(state: &AppState) -> DriverController {
    DriverController::new(state.pool.clone(), state.storage.clone())
}

async fn create_driver(
    State(state): State<AppState>,
    Json(request): Json<CreateDriverRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DriverResponse>>), AppError> {
    let response = controller(&state).create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            response,
            "Driver created successfully".to_string(),
        )),
    ))
}

async fn list_drivers(
    State(state): State<AppState>,
) -> Result<Json<Vec<DriverResponse>>, AppError> {
    let response = controller(&state).list().await?;
    Ok(Json(response))
}

async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DriverResponse>, AppError> {
    let response = controller(&state).get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_driver(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateDriverRequest>,
) -> Result<Json<ApiResponse<DriverResponse>>, AppError> {
    let response = controller(&state).update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Driver updated successfully".to_string(),
    )))
}

async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    controller(&state).delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Driver deleted successfully"
    })))
}

async fn upload_driver_file(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<FileResponse>), AppError> {
    let payload = extract_upload(multipart).await?;
    let response = FileController::new(state.pool.clone(), state.storage.clone())
        .attach(OwnerKind::Driver, id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}
