//! Almacenamiento local en disco

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use super::{StorageBackend, UPLOADS_PREFIX};
use crate::utils::errors::AppError;

/// Backend que guarda los archivos bajo un directorio raíz configurable,
/// con una subcarpeta por tipo de dueño.
#[derive(Debug)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, AppError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|e| AppError::Storage(format!("cannot create upload dir: {}", e)))?;
        Ok(Self { root })
    }
}

#[async_trait]
impl StorageBackend for LocalStorage {
    async fn store(
        &self,
        folder: &str,
        extension: &str,
        bytes: &[u8],
    ) -> Result<String, AppError> {
        // Nombre fresco por subida; el original del cliente solo queda en metadatos
        let name = format!("{}.{}", Uuid::new_v4(), extension);
        let dir = self.root.join(folder);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::Storage(format!("cannot create folder '{}': {}", folder, e)))?;
        fs::write(dir.join(&name), bytes)
            .await
            .map_err(|e| AppError::Storage(format!("cannot write file: {}", e)))?;

        Ok(format!("{}{}/{}", UPLOADS_PREFIX, folder, name))
    }

    async fn read(&self, locator: &str) -> Result<Vec<u8>, AppError> {
        let path = self.resolve(locator)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::ResourceMissing(
                "File not found on server".to_string(),
            )),
            Err(e) => Err(AppError::Storage(format!("cannot read file: {}", e))),
        }
    }

    async fn remove(&self, locator: &str) -> Result<(), AppError> {
        let path = self.resolve(locator)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // Que ya no exista es justamente el estado buscado
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!("cannot remove file: {}", e))),
        }
    }

    fn resolve(&self, locator: &str) -> Result<PathBuf, AppError> {
        let relative = locator
            .strip_prefix(UPLOADS_PREFIX)
            .ok_or_else(|| AppError::BadRequest("Invalid file locator".to_string()))?;

        // Sin segmentos vacíos ni '..' que escapen del directorio raíz
        if relative.is_empty()
            || relative
                .split('/')
                .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(AppError::BadRequest("Invalid file locator".to_string()));
        }

        Ok(self.root.join(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_storage() -> LocalStorage {
        let root = std::env::temp_dir().join(format!("fleet-records-test-{}", Uuid::new_v4()));
        LocalStorage::new(root).await.unwrap()
    }

    #[tokio::test]
    async fn test_store_read_roundtrip() {
        let storage = temp_storage().await;
        let locator = storage.store("vehicles", "pdf", b"contents").await.unwrap();
        assert!(locator.starts_with("/uploads/vehicles/"));
        assert!(locator.ends_with(".pdf"));

        let bytes = storage.read(&locator).await.unwrap();
        assert_eq!(bytes, b"contents");
    }

    #[tokio::test]
    async fn test_fresh_name_per_store() {
        let storage = temp_storage().await;
        let first = storage.store("drivers", "txt", b"a").await.unwrap();
        let second = storage.store("drivers", "txt", b"b").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_read_missing_is_resource_missing() {
        let storage = temp_storage().await;
        let err = storage
            .read("/uploads/vehicles/does-not-exist.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ResourceMissing(_)));
    }

    #[tokio::test]
    async fn test_remove_tolerates_missing() {
        let storage = temp_storage().await;
        storage
            .remove("/uploads/vehicles/already-gone.pdf")
            .await
            .unwrap();

        let locator = storage.store("vehicles", "txt", b"x").await.unwrap();
        storage.remove(&locator).await.unwrap();
        storage.remove(&locator).await.unwrap();
        assert!(matches!(
            storage.read(&locator).await.unwrap_err(),
            AppError::ResourceMissing(_)
        ));
    }

    #[tokio::test]
    async fn test_resolve_rejects_traversal() {
        let storage = temp_storage().await;
        assert!(storage.resolve("/uploads/../etc/passwd").is_err());
        assert!(storage.resolve("/uploads/vehicles//x.pdf").is_err());
        assert!(storage.resolve("relative/path.pdf").is_err());
        assert!(storage.resolve("/uploads/").is_err());
    }
}
