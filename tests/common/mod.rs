//! Utilidades compartidas de los tests de integración
//!
//! Las suites que tocan la base de datos usan `try_pool`: sin
//! `TEST_DATABASE_URL` configurada cada test se salta silenciosamente, de
//! modo que `cargo test` pasa en máquinas sin PostgreSQL.

#![allow(dead_code)]

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use fleet_records::controllers::company_controller::CompanyController;
use fleet_records::controllers::driver_controller::DriverController;
use fleet_records::controllers::file_controller::{FileController, UploadPayload};
use fleet_records::controllers::vehicle_controller::VehicleController;
use fleet_records::dto::company_dto::CompanyResponse;
use fleet_records::dto::driver_dto::DriverResponse;
use fleet_records::dto::vehicle_dto::VehicleResponse;
use fleet_records::storage::{LocalStorage, StorageBackend};

pub async fn try_pool() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .ok()?;
    sqlx::migrate!().run(&pool).await.ok()?;
    Some(pool)
}

pub async fn temp_storage() -> Arc<dyn StorageBackend> {
    let root = std::env::temp_dir().join(format!("fleet-records-it-{}", Uuid::new_v4()));
    Arc::new(LocalStorage::new(root).await.unwrap())
}

/// Clave natural única por test para poder correr en paralelo contra la
/// misma base de datos
pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

pub fn companies(pool: &PgPool, storage: &Arc<dyn StorageBackend>) -> CompanyController {
    CompanyController::new(pool.clone(), storage.clone())
}

pub fn vehicles(pool: &PgPool, storage: &Arc<dyn StorageBackend>) -> VehicleController {
    VehicleController::new(pool.clone(), storage.clone())
}

pub fn drivers(pool: &PgPool, storage: &Arc<dyn StorageBackend>) -> DriverController {
    DriverController::new(pool.clone(), storage.clone())
}

pub fn files(pool: &PgPool, storage: &Arc<dyn StorageBackend>) -> FileController {
    FileController::new(pool.clone(), storage.clone())
}

pub async fn create_company(
    pool: &PgPool,
    storage: &Arc<dyn StorageBackend>,
    body: serde_json::Value,
) -> CompanyResponse {
    companies(pool, storage)
        .create(serde_json::from_value(body).unwrap())
        .await
        .unwrap()
}

pub async fn create_vehicle(
    pool: &PgPool,
    storage: &Arc<dyn StorageBackend>,
    body: serde_json::Value,
) -> VehicleResponse {
    vehicles(pool, storage)
        .create(serde_json::from_value(body).unwrap())
        .await
        .unwrap()
}

pub async fn create_driver(
    pool: &PgPool,
    storage: &Arc<dyn StorageBackend>,
    body: serde_json::Value,
) -> DriverResponse {
    drivers(pool, storage)
        .create(serde_json::from_value(body).unwrap())
        .await
        .unwrap()
}

pub fn upload(filename: &str, bytes: &[u8], notes: Option<&str>) -> UploadPayload {
    UploadPayload {
        filename: Some(filename.to_string()),
        bytes: Some(bytes.to_vec()),
        notes: notes.map(String::from),
    }
}
