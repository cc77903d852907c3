use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::company_controller::CompanyController;
use crate::controllers::file_controller::FileController;
use crate::dto::company_dto::{
    ApiResponse, CompanyResponse, CreateCompanyRequest, UpdateCompanyRequest,
};
use crate::dto::driver_dto::DriverResponse;
use crate::dto::file_dto::FileResponse;
use crate::dto::vehicle_dto::VehicleResponse;
use crate::models::file::OwnerKind;
use crate::routes::file_routes::extract_upload;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_companies).post(create_company))
        .route(
            "/:id",
            get(get_company).put(update_company).delete(delete_company),
        )
        .route("/:id/vehicles", get(list_company_vehicles))
        .route("/:id/drivers", get(list_company_drivers))
        .route("/:id/files", post(upload_company_file))
}

fn controller(state: &AppState) -> CompanyController {
    CompanyController::new(state.pool.clone(), state.storage.clone())
}

async fn create_company(
    State(state): State<AppState>,
    Json(request): Json<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CompanyResponse>>), AppError> {
    let response = controller(&state).create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            response,
            "Company created successfully".to_string(),
        )),
    ))
}

async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompanyResponse>>, AppError> {
    let response = controller(&state).list().await?;
    Ok(Json(response))
}

async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CompanyResponse>, AppError> {
    let response = controller(&state).get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateCompanyRequest>,
) -> Result<Json<ApiResponse<CompanyResponse>>, AppError> {
    let response = controller(&state).update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Company updated successfully".to_string(),
    )))
}

async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    controller(&state).delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Company deleted successfully"
    })))
}

async fn list_company_vehicles(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let response = controller(&state).list_vehicles(id).await?;
    Ok(Json(response))
}

async fn list_company_drivers(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<DriverResponse>>, AppError> {
    let response = controller(&state).list_drivers(id).await?;
    Ok(Json(response))
}

async fn upload_company_file(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<FileResponse>), AppError> {
    let payload = extract_upload(multipart).await?;
    let response = FileController::new(state.pool.clone(), state.storage.clone())
        .attach(OwnerKind::Company, id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}
