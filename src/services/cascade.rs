//! Borrados en cascada
//!
//! Cada flujo elimina las filas dependientes dentro de la transacción del
//! caso de uso y devuelve los localizadores de archivos cuyos bytes deben
//! retirarse una vez confirmado el commit. El orden de los DELETE respeta las
//! claves foráneas del schema.

use sqlx::PgConnection;
use tracing::debug;

use crate::models::file::OwnerKind;
use crate::repositories::company_repository::CompanyRepository;
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::file_repository::FileRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::relations;
use crate::utils::errors::AppError;

/// Borrar una empresa con toda su flota: vehículos (y sus archivos),
/// conductores (soltados de cualquier vehículo, con sus archivos), los
/// archivos propios de la empresa y por último la fila de la empresa.
pub async fn delete_company(
    conn: &mut PgConnection,
    company_id: i64,
) -> Result<Vec<String>, AppError> {
    let mut locators = Vec::new();

    let vehicle_ids = VehicleRepository::lock_ids_by_company(conn, company_id).await?;
    for vehicle_id in vehicle_ids {
        locators.extend(FileRepository::delete_by_owner(conn, OwnerKind::Vehicle, vehicle_id).await?);
        VehicleRepository::delete(conn, vehicle_id).await?;
    }

    let driver_ids = DriverRepository::lock_ids_by_company(conn, company_id).await?;
    for driver_id in driver_ids {
        // Un conductor de esta empresa puede seguir asignado a un vehículo ajeno
        relations::detach_driver(conn, driver_id).await?;
        locators.extend(FileRepository::delete_by_owner(conn, OwnerKind::Driver, driver_id).await?);
        DriverRepository::delete(conn, driver_id).await?;
    }

    locators.extend(FileRepository::delete_by_owner(conn, OwnerKind::Company, company_id).await?);
    CompanyRepository::delete(conn, company_id).await?;

    debug!(company_id, files = locators.len(), "empresa eliminada en cascada");
    Ok(locators)
}

/// Borrar un vehículo y sus archivos. El conductor asignado no se toca: el
/// puntero vive en la fila del vehículo y desaparece con ella.
pub async fn delete_vehicle(
    conn: &mut PgConnection,
    vehicle_id: i64,
) -> Result<Vec<String>, AppError> {
    let locators = FileRepository::delete_by_owner(conn, OwnerKind::Vehicle, vehicle_id).await?;
    VehicleRepository::delete(conn, vehicle_id).await?;
    Ok(locators)
}

/// Borrar un conductor: primero soltar cualquier vehículo que lo tenga
/// asignado, después sus archivos y por último la fila.
pub async fn delete_driver(
    conn: &mut PgConnection,
    driver_id: i64,
) -> Result<Vec<String>, AppError> {
    relations::detach_driver(conn, driver_id).await?;
    let locators = FileRepository::delete_by_owner(conn, OwnerKind::Driver, driver_id).await?;
    DriverRepository::delete(conn, driver_id).await?;
    Ok(locators)
}
