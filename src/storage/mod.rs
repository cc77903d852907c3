//! Almacenamiento de bytes de archivos
//!
//! Los metadatos guardan un localizador opaco (`/uploads/<carpeta>/<nombre>`);
//! el backend resuelve ese localizador a un recurso real. Los nombres físicos
//! se generan frescos en cada subida, así que dos subidas concurrentes nunca
//! escriben sobre el mismo destino.

mod local;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::utils::errors::AppError;

pub use self::local::LocalStorage;

/// Prefijo de todos los localizadores que entrega este backend
pub const UPLOADS_PREFIX: &str = "/uploads/";

/// Backend de almacenamiento de bytes.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Guardar los bytes bajo una carpeta lógica; devuelve el localizador.
    async fn store(&self, folder: &str, extension: &str, bytes: &[u8])
        -> Result<String, AppError>;

    /// Leer los bytes de un localizador. Falla con `ResourceMissing` si el
    /// recurso físico no existe, con independencia de los metadatos.
    async fn read(&self, locator: &str) -> Result<Vec<u8>, AppError>;

    /// Retirar los bytes de un localizador. Un recurso ya ausente no es error.
    async fn remove(&self, locator: &str) -> Result<(), AppError>;

    /// Mapear el localizador a la ruta física, sin tocar el disco.
    fn resolve(&self, locator: &str) -> Result<PathBuf, AppError>;
}

/// Retirar los bytes de un lote de localizadores tras confirmar un borrado.
/// Un fallo aquí no puede deshacer las filas ya eliminadas: se registra y se
/// continúa con el resto.
pub async fn remove_stored_bytes(storage: &dyn StorageBackend, locators: &[String]) {
    for locator in locators {
        if let Err(e) = storage.remove(locator).await {
            tracing::warn!("no se pudieron retirar los bytes de '{}': {}", locator, e);
        }
    }
}
