//! Integridad referencial entre entidades
//!
//! Valida las referencias declaradas (empresa, conductor, dueño de archivo) y
//! mantiene la relación 1:1 vehículo↔conductor. Todas las funciones operan
//! sobre la conexión del caso de uso en curso, de modo que la comprobación y
//! la escritura posterior quedan dentro de la misma transacción.

use sqlx::PgConnection;
use tracing::debug;

use crate::models::file::OwnerKind;
use crate::repositories::company_repository::CompanyRepository;
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

/// La empresa referenciada debe existir; sin referencia no hay nada que validar.
pub async fn validate_company_ref(
    conn: &mut PgConnection,
    company_id: Option<i64>,
) -> Result<(), AppError> {
    if let Some(id) = company_id {
        if !CompanyRepository::exists(conn, id).await? {
            return Err(AppError::CompanyNotFound("Company not found".to_string()));
        }
    }
    Ok(())
}

/// El conductor referenciado debe existir; sin referencia no hay nada que validar.
pub async fn validate_driver_ref(
    conn: &mut PgConnection,
    driver_id: Option<i64>,
) -> Result<(), AppError> {
    if let Some(id) = driver_id {
        if !DriverRepository::exists(conn, id).await? {
            return Err(AppError::DriverNotFound("Driver not found".to_string()));
        }
    }
    Ok(())
}

/// El dueño de un archivo debe existir.
pub async fn validate_owner_ref(
    conn: &mut PgConnection,
    owner: OwnerKind,
    owner_id: i64,
) -> Result<(), AppError> {
    let exists = match owner {
        OwnerKind::Company => CompanyRepository::exists(conn, owner_id).await?,
        OwnerKind::Vehicle => VehicleRepository::exists(conn, owner_id).await?,
        OwnerKind::Driver => DriverRepository::exists(conn, owner_id).await?,
    };
    if !exists {
        return Err(AppError::OwnerNotFound(format!(
            "{} not found",
            owner.label()
        )));
    }
    Ok(())
}

/// Reclamar un conductor para un vehículo: el conductor debe existir y, si
/// otro vehículo lo tiene asignado, se suelta primero (detach antes de
/// attach). `keep_vehicle` es el vehículo que va a quedarse con el conductor;
/// `None` cuando ese vehículo aún no existe (alta). Reclamar un conductor que
/// ya pertenece al mismo vehículo no cambia nada.
pub async fn claim_driver(
    conn: &mut PgConnection,
    driver_id: i64,
    keep_vehicle: Option<i64>,
) -> Result<(), AppError> {
    validate_driver_ref(conn, Some(driver_id)).await?;

    if let Some(holder) = VehicleRepository::find_by_assigned_driver(conn, driver_id).await? {
        if Some(holder.id) != keep_vehicle {
            debug!(
                vehicle_id = holder.id,
                driver_id, "soltando conductor de su vehículo anterior"
            );
            VehicleRepository::set_assigned_driver(conn, holder.id, None).await?;
        }
    }

    Ok(())
}

/// Al borrar un conductor, limpiar el puntero de cualquier vehículo que lo
/// tenga asignado, dentro de la misma transacción que elimina la fila.
pub async fn detach_driver(conn: &mut PgConnection, driver_id: i64) -> Result<(), AppError> {
    let cleared = VehicleRepository::clear_assignments_for_driver(conn, driver_id).await?;
    if cleared > 0 {
        debug!(driver_id, cleared, "asignaciones limpiadas antes del borrado");
    }
    Ok(())
}
