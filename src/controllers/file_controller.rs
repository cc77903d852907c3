//! Controller de Files
//!
//! Registro de documentos adjuntos: cada archivo pertenece exactamente a un
//! dueño (empresa, vehículo o conductor). Los bytes van al backend de
//! almacenamiento; aquí solo viven los metadatos y la validación del dueño.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::warn;

use crate::dto::file_dto::FileResponse;
use crate::models::file::{NewFileRecord, OwnerKind};
use crate::repositories::file_repository::FileRepository;
use crate::services::relations;
use crate::storage::StorageBackend;
use crate::utils::errors::{AppError, AppResult};

/// Extensiones aceptadas en las subidas
pub const ALLOWED_EXTENSIONS: [&str; 10] = [
    "pdf", "png", "jpg", "jpeg", "gif", "doc", "docx", "xls", "xlsx", "txt",
];

/// Partes ya extraídas de un formulario multipart de subida
#[derive(Debug, Default)]
pub struct UploadPayload {
    pub filename: Option<String>,
    pub bytes: Option<Vec<u8>>,
    pub notes: Option<String>,
}

/// Versión segura del nombre original para guardarlo en metadatos
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub struct FileController {
    pool: PgPool,
    storage: Arc<dyn StorageBackend>,
}

impl FileController {
    pub fn new(pool: PgPool, storage: Arc<dyn StorageBackend>) -> Self {
        Self { pool, storage }
    }

    /// Adjuntar un documento a su dueño: valida el dueño, persiste los bytes
    /// y registra los metadatos con el localizador devuelto.
    pub async fn attach(
        &self,
        owner: OwnerKind,
        owner_id: i64,
        payload: UploadPayload,
    ) -> AppResult<FileResponse> {
        let bytes = payload
            .bytes
            .ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
        let original = payload.filename.unwrap_or_default();
        if original.is_empty() {
            return Err(AppError::BadRequest("No file selected".to_string()));
        }

        let extension = original
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .ok_or_else(|| AppError::BadRequest("Invalid file".to_string()))?;
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AppError::BadRequest("File type not allowed".to_string()));
        }

        let mut tx = self.pool.begin().await?;
        relations::validate_owner_ref(&mut tx, owner, owner_id).await?;

        let locator = self.storage.store(owner.folder(), &extension, &bytes).await?;
        let record = NewFileRecord {
            filename: Some(sanitize_filename(&original)),
            file_type: Some(extension),
            file_url: locator.clone(),
            notes: payload.notes,
        };

        // Si los metadatos no llegan a confirmarse, los bytes recién escritos
        // no deben quedar huérfanos
        let created = match FileRepository::insert(&mut tx, owner, owner_id, &record).await {
            Ok(created) => created,
            Err(e) => {
                let _ = self.storage.remove(&locator).await;
                return Err(e);
            }
        };
        if let Err(e) = tx.commit().await {
            let _ = self.storage.remove(&locator).await;
            return Err(e.into());
        }

        Ok(created.into())
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<FileResponse> {
        let mut conn = self.pool.acquire().await?;
        let record = FileRepository::find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;
        Ok(record.into())
    }

    pub async fn list(&self) -> AppResult<Vec<FileResponse>> {
        let mut conn = self.pool.acquire().await?;
        let records = FileRepository::list_all(&mut conn).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    pub async fn list_by_owner(
        &self,
        owner: OwnerKind,
        owner_id: i64,
    ) -> AppResult<Vec<FileResponse>> {
        let mut conn = self.pool.acquire().await?;
        relations::validate_owner_ref(&mut conn, owner, owner_id).await?;
        let records = FileRepository::list_by_owner(&mut conn, owner, owner_id).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Descargar los bytes de un archivo; devuelve el nombre para el
    /// Content-Disposition junto con el contenido.
    pub async fn download(&self, id: i64) -> AppResult<(String, Vec<u8>)> {
        let mut conn = self.pool.acquire().await?;
        let record = FileRepository::find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

        let bytes = self.storage.read(&record.file_url).await?;
        let filename = record.filename.unwrap_or_else(|| {
            record
                .file_url
                .rsplit('/')
                .next()
                .unwrap_or("download")
                .to_string()
        });
        Ok((filename, bytes))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        let record = FileRepository::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

        // Los bytes primero; que ya no existan no impide borrar los metadatos
        if let Err(e) = self.storage.remove(&record.file_url).await {
            warn!("bytes de '{}' no retirados: {}", record.file_url, e);
        }

        FileRepository::delete(&mut tx, id).await?;
        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("report 2024.pdf"), "report_2024.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_filename("señal.png"), "se_al.png");
        assert_eq!(sanitize_filename("plain-name_1.txt"), "plain-name_1.txt");
    }

    #[test]
    fn test_allowed_extensions_are_lowercase() {
        assert!(ALLOWED_EXTENSIONS.iter().all(|e| e.chars().all(|c| c.is_ascii_lowercase())));
    }
}
