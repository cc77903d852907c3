//! Controller de Company
//!
//! Cada operación de escritura abre una única transacción: la comprobación de
//! unicidad y la mutación posterior quedan serializadas por el almacén, con
//! los índices UNIQUE del schema como respaldo.

use std::sync::Arc;

use sqlx::PgPool;
use validator::Validate;

use crate::dto::company_dto::{CompanyResponse, CreateCompanyRequest, UpdateCompanyRequest};
use crate::dto::driver_dto::DriverResponse;
use crate::dto::vehicle_dto::VehicleResponse;
use crate::repositories::company_repository::CompanyRepository;
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::cascade;
use crate::storage::{self, StorageBackend};
use crate::utils::errors::{AppError, AppResult};

pub struct CompanyController {
    pool: PgPool,
    storage: Arc<dyn StorageBackend>,
}

impl CompanyController {
    pub fn new(pool: PgPool, storage: Arc<dyn StorageBackend>) -> Self {
        Self { pool, storage }
    }

    pub async fn create(&self, request: CreateCompanyRequest) -> AppResult<CompanyResponse> {
        request.validate()?;
        if request.identity_card.trim().is_empty() {
            return Err(AppError::BadRequest("identity_card is required".to_string()));
        }

        let mut tx = self.pool.begin().await?;

        // Verificar que el identity_card no exista
        if CompanyRepository::find_by_identity_card(&mut tx, &request.identity_card)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateKey(
                "Identity card already exists".to_string(),
            ));
        }

        let created = CompanyRepository::insert(&mut tx, &request.into_new_company()).await?;
        let detail = CompanyRepository::find_detail(&mut tx, created.id)
            .await?
            .ok_or_else(|| AppError::Internal("company missing after insert".to_string()))?;
        tx.commit().await?;

        Ok(detail.into())
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<CompanyResponse> {
        let mut conn = self.pool.acquire().await?;
        let detail = CompanyRepository::find_detail(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;
        Ok(detail.into())
    }

    pub async fn list(&self) -> AppResult<Vec<CompanyResponse>> {
        let mut conn = self.pool.acquire().await?;
        let details = CompanyRepository::list_details(&mut conn).await?;
        Ok(details.into_iter().map(Into::into).collect())
    }

    pub async fn update(&self, id: i64, request: UpdateCompanyRequest) -> AppResult<CompanyResponse> {
        let mut tx = self.pool.begin().await?;

        let current = CompanyRepository::find_by_id_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

        // El cambio de identity_card repite la comprobación de unicidad,
        // excluyendo la propia fila para aceptar reescrituras del mismo valor
        if let Some(identity_card) = &request.identity_card {
            if identity_card.trim().is_empty() {
                return Err(AppError::BadRequest("identity_card is required".to_string()));
            }
            if let Some(existing) =
                CompanyRepository::find_by_identity_card(&mut tx, identity_card).await?
            {
                if existing.id != id {
                    return Err(AppError::DuplicateKey(
                        "Identity card already exists".to_string(),
                    ));
                }
            }
        }

        let merged = request.merge_into(&current);
        CompanyRepository::update(&mut tx, id, &merged).await?;
        let detail = CompanyRepository::find_detail(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::Internal("company missing after update".to_string()))?;
        tx.commit().await?;

        Ok(detail.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        if CompanyRepository::find_by_id_for_update(&mut tx, id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Company not found".to_string()));
        }

        let locators = cascade::delete_company(&mut tx, id).await?;
        tx.commit().await?;

        // Las filas ya no existen; los bytes se retiran fuera de la transacción
        storage::remove_stored_bytes(self.storage.as_ref(), &locators).await;
        Ok(())
    }

    pub async fn list_vehicles(&self, id: i64) -> AppResult<Vec<VehicleResponse>> {
        let mut conn = self.pool.acquire().await?;
        if !CompanyRepository::exists(&mut conn, id).await? {
            return Err(AppError::NotFound("Company not found".to_string()));
        }
        let details = VehicleRepository::list_details_by_company(&mut conn, id).await?;
        Ok(details.into_iter().map(Into::into).collect())
    }

    pub async fn list_drivers(&self, id: i64) -> AppResult<Vec<DriverResponse>> {
        let mut conn = self.pool.acquire().await?;
        if !CompanyRepository::exists(&mut conn, id).await? {
            return Err(AppError::NotFound("Company not found".to_string()));
        }
        let details = DriverRepository::list_details_by_company(&mut conn, id).await?;
        Ok(details.into_iter().map(Into::into).collect())
    }
}
