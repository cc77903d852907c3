//! Controller de Vehicle
//!
//! Además del CRUD, este controller es el punto de entrada de la relación
//! vehículo↔conductor: la asignación, la reasignación y la liberación pasan
//! todas por la misma lógica de reclamo dentro de una transacción.

use std::sync::Arc;

use sqlx::PgPool;
use validator::Validate;

use crate::dto::driver_dto::DriverResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::{cascade, relations};
use crate::storage::{self, StorageBackend};
use crate::utils::errors::{AppError, AppResult};

pub struct VehicleController {
    pool: PgPool,
    storage: Arc<dyn StorageBackend>,
}

impl VehicleController {
    pub fn new(pool: PgPool, storage: Arc<dyn StorageBackend>) -> Self {
        Self { pool, storage }
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<VehicleResponse> {
        request.validate()?;
        if request.license_plate.trim().is_empty() {
            return Err(AppError::BadRequest("license_plate is required".to_string()));
        }

        let mut tx = self.pool.begin().await?;

        // Verificar que la matrícula no exista
        if VehicleRepository::find_by_license_plate(&mut tx, &request.license_plate)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateKey(
                "License plate already exists".to_string(),
            ));
        }

        relations::validate_company_ref(&mut tx, request.company_id).await?;

        // Un alta con conductor ya asignado reclama al conductor igual que el
        // endpoint de asignación
        if let Some(driver_id) = request.assigned_driver_id {
            relations::claim_driver(&mut tx, driver_id, None).await?;
        }

        let created = VehicleRepository::insert(&mut tx, &request.into_new_vehicle()).await?;
        let detail = VehicleRepository::find_detail(&mut tx, created.id)
            .await?
            .ok_or_else(|| AppError::Internal("vehicle missing after insert".to_string()))?;
        tx.commit().await?;

        Ok(detail.into())
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<VehicleResponse> {
        let mut conn = self.pool.acquire().await?;
        let detail = VehicleRepository::find_detail(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;
        Ok(detail.into())
    }

    pub async fn list(&self) -> AppResult<Vec<VehicleResponse>> {
        let mut conn = self.pool.acquire().await?;
        let details = VehicleRepository::list_details(&mut conn).await?;
        Ok(details.into_iter().map(Into::into).collect())
    }

    pub async fn update(&self, id: i64, request: UpdateVehicleRequest) -> AppResult<VehicleResponse> {
        let mut tx = self.pool.begin().await?;

        let current = VehicleRepository::find_by_id_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if let Some(license_plate) = &request.license_plate {
            if license_plate.trim().is_empty() {
                return Err(AppError::BadRequest("license_plate is required".to_string()));
            }
            if let Some(existing) =
                VehicleRepository::find_by_license_plate(&mut tx, license_plate).await?
            {
                if existing.id != id {
                    return Err(AppError::DuplicateKey(
                        "License plate already exists".to_string(),
                    ));
                }
            }
        }

        if let Some(Some(company_id)) = request.company_id {
            relations::validate_company_ref(&mut tx, Some(company_id)).await?;
        }

        // Cambiar el conductor por PUT pasa por el mismo reclamo que /assign
        if let Some(Some(driver_id)) = request.assigned_driver_id {
            relations::claim_driver(&mut tx, driver_id, Some(id)).await?;
        }

        let merged = request.merge_into(&current);
        VehicleRepository::update(&mut tx, id, &merged).await?;
        let detail = VehicleRepository::find_detail(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::Internal("vehicle missing after update".to_string()))?;
        tx.commit().await?;

        Ok(detail.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        if VehicleRepository::find_by_id_for_update(&mut tx, id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Vehicle not found".to_string()));
        }

        let locators = cascade::delete_vehicle(&mut tx, id).await?;
        tx.commit().await?;

        storage::remove_stored_bytes(self.storage.as_ref(), &locators).await;
        Ok(())
    }

    /// Asignar o liberar el conductor de un vehículo. Con `Some(driver_id)` el
    /// conductor se reclama (si otro vehículo lo tenía, se suelta primero);
    /// con `None` se limpia el puntero. Repetir la misma asignación no cambia
    /// el estado.
    pub async fn assign_driver(
        &self,
        id: i64,
        driver_id: Option<i64>,
    ) -> AppResult<VehicleResponse> {
        let mut tx = self.pool.begin().await?;

        VehicleRepository::find_by_id_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if let Some(driver_id) = driver_id {
            relations::claim_driver(&mut tx, driver_id, Some(id)).await?;
        }
        VehicleRepository::set_assigned_driver(&mut tx, id, driver_id).await?;

        let detail = VehicleRepository::find_detail(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::Internal("vehicle missing after assign".to_string()))?;
        tx.commit().await?;

        Ok(detail.into())
    }

    /// Conductor actualmente asignado al vehículo (lado derivado de la relación)
    pub async fn assigned_driver(&self, id: i64) -> AppResult<DriverResponse> {
        let mut conn = self.pool.acquire().await?;
        let vehicle = VehicleRepository::find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        let driver_id = vehicle
            .assigned_driver_id
            .ok_or_else(|| AppError::NotFound("No driver assigned".to_string()))?;

        let detail = DriverRepository::find_detail(&mut conn, driver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("No driver assigned".to_string()))?;
        Ok(detail.into())
    }
}
