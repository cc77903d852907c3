//! DTOs de File

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::file::FileRecord;

// Response de archivo
#[derive(Debug, Serialize)]
pub struct FileResponse {
    pub id: i64,
    pub filename: Option<String>,
    pub file_type: Option<String>,
    pub file_url: String,
    pub uploaded_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub company_id: Option<i64>,
    pub vehicle_id: Option<i64>,
    pub driver_id: Option<i64>,
}

impl From<FileRecord> for FileResponse {
    fn from(record: FileRecord) -> Self {
        Self {
            id: record.id,
            filename: record.filename,
            file_type: record.file_type,
            file_url: record.file_url,
            uploaded_at: record.uploaded_at,
            notes: record.notes,
            company_id: record.company_id,
            vehicle_id: record.vehicle_id,
            driver_id: record.driver_id,
        }
    }
}
