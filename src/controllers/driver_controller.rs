//! Controller de Driver

use std::sync::Arc;

use sqlx::PgPool;
use validator::Validate;

use crate::dto::driver_dto::{CreateDriverRequest, DriverResponse, UpdateDriverRequest};
use crate::repositories::driver_repository::DriverRepository;
use crate::services::{cascade, relations};
use crate::storage::{self, StorageBackend};
use crate::utils::errors::{AppError, AppResult};

pub struct DriverController {
    pool: PgPool,
    storage: Arc<dyn StorageBackend>,
}

impl DriverController {
    pub fn new(pool: PgPool, storage: Arc<dyn StorageBackend>) -> Self {
        Self { pool, storage }
    }

    pub async fn create(&self, request: CreateDriverRequest) -> AppResult<DriverResponse> {
        request.validate()?;
        if request.identity_card.trim().is_empty() {
            return Err(AppError::BadRequest("identity_card is required".to_string()));
        }

        let mut tx = self.pool.begin().await?;

        // Verificar que el identity_card no exista
        if DriverRepository::find_by_identity_card(&mut tx, &request.identity_card)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateKey(
                "Identity card already exists".to_string(),
            ));
        }

        relations::validate_company_ref(&mut tx, request.company_id).await?;

        let created = DriverRepository::insert(&mut tx, &request.into_new_driver()).await?;
        let detail = DriverRepository::find_detail(&mut tx, created.id)
            .await?
            .ok_or_else(|| AppError::Internal("driver missing after insert".to_string()))?;
        tx.commit().await?;

        Ok(detail.into())
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<DriverResponse> {
        let mut conn = self.pool.acquire().await?;
        let detail = DriverRepository::find_detail(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Driver not found".to_string()))?;
        Ok(detail.into())
    }

    pub async fn list(&self) -> AppResult<Vec<DriverResponse>> {
        let mut conn = self.pool.acquire().await?;
        let details = DriverRepository::list_details(&mut conn).await?;
        Ok(details.into_iter().map(Into::into).collect())
    }

    pub async fn update(&self, id: i64, request: UpdateDriverRequest) -> AppResult<DriverResponse> {
        let mut tx = self.pool.begin().await?;

        let current = DriverRepository::find_by_id_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Driver not found".to_string()))?;

        if let Some(identity_card) = &request.identity_card {
            if identity_card.trim().is_empty() {
                return Err(AppError::BadRequest("identity_card is required".to_string()));
            }
            if let Some(existing) =
                DriverRepository::find_by_identity_card(&mut tx, identity_card).await?
            {
                if existing.id != id {
                    return Err(AppError::DuplicateKey(
                        "Identity card already exists".to_string(),
                    ));
                }
            }
        }

        if let Some(Some(company_id)) = request.company_id {
            relations::validate_company_ref(&mut tx, Some(company_id)).await?;
        }

        let merged = request.merge_into(&current);
        DriverRepository::update(&mut tx, id, &merged).await?;
        let detail = DriverRepository::find_detail(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::Internal("driver missing after update".to_string()))?;
        tx.commit().await?;

        Ok(detail.into())
    }

    /// Borrar un conductor. Si algún vehículo lo tiene asignado, el puntero se
    /// limpia en la misma transacción que elimina la fila.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        if DriverRepository::find_by_id_for_update(&mut tx, id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Driver not found".to_string()));
        }

        let locators = cascade::delete_driver(&mut tx, id).await?;
        tx.commit().await?;

        storage::remove_stored_bytes(self.storage.as_ref(), &locators).await;
        Ok(())
    }
}
