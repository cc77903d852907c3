//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. No hay estado mutable en memoria: las filas
//! del almacén son el único recurso compartido entre requests.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::storage::StorageBackend;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub storage: Arc<dyn StorageBackend>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            pool,
            config,
            storage,
        }
    }
}
