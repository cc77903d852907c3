use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::controllers::file_controller::{FileController, UploadPayload};
use crate::dto::file_dto::FileResponse;
use crate::models::file::OwnerKind;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_files))
        .route("/:id", get(get_file).delete(delete_file))
        .route("/:id/download", get(download_file))
        .route("/companies/:company_id", get(list_company_files))
        .route("/vehicles/:vehicle_id", get(list_vehicle_files))
        .route("/drivers/:driver_id", get(list_driver_files))
}

fn controller(state: &AppState) -> FileController {
    FileController::new(state.pool.clone(), state.storage.clone())
}

/// Extraer las partes `file` (con su nombre original) y `notes` de un
/// formulario multipart de subida.
pub(crate) async fn extract_upload(mut multipart: Multipart) -> Result<UploadPayload, AppError> {
    let mut payload = UploadPayload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        match field.name() {
            Some("file") => {
                payload.filename = field.file_name().map(|name| name.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid file part: {}", e)))?;
                payload.bytes = Some(bytes.to_vec());
            }
            Some("notes") => {
                let notes = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid notes part: {}", e)))?;
                payload.notes = Some(notes);
            }
            _ => {}
        }
    }

    Ok(payload)
}

async fn list_files(State(state): State<AppState>) -> Result<Json<Vec<FileResponse>>, AppError> {
    let response = controller(&state).list().await?;
    Ok(Json(response))
}

async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<FileResponse>, AppError> {
    let response = controller(&state).get_by_id(id).await?;
    Ok(Json(response))
}

async fn download_file(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let (filename, bytes) = controller(&state).download(id).await?;
    let headers = [
        (
            header::CONTENT_TYPE,
            "application/octet-stream".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];
    Ok((headers, bytes).into_response())
}

async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    controller(&state).delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "File deleted successfully"
    })))
}

async fn list_company_files(
    State(state): State<AppState>,
    Path(company_id): Path<i64>,
) -> Result<Json<Vec<FileResponse>>, AppError> {
    let response = controller(&state)
        .list_by_owner(OwnerKind::Company, company_id)
        .await?;
    Ok(Json(response))
}

async fn list_vehicle_files(
    State(state): State<AppState>,
    Path(vehicle_id): Path<i64>,
) -> Result<Json<Vec<FileResponse>>, AppError> {
    let response = controller(&state)
        .list_by_owner(OwnerKind::Vehicle, vehicle_id)
        .await?;
    Ok(Json(response))
}

async fn list_driver_files(
    State(state): State<AppState>,
    Path(driver_id): Path<i64>,
) -> Result<Json<Vec<FileResponse>>, AppError> {
    let response = controller(&state)
        .list_by_owner(OwnerKind::Driver, driver_id)
        .await?;
    Ok(Json(response))
}
