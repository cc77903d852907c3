//! Modelo de Driver
//!
//! Mapea exactamente a la tabla `driver` del schema. El vehículo asignado no
//! se guarda en esta tabla: se deriva de `vehicle.assigned_driver_id`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Driver principal - mapea exactamente a la tabla `driver`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: i64,
    pub identity_card: String,
    pub company_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub license_class: Option<String>,
    pub license_expiry_date: Option<NaiveDate>,
    pub traffic_info_expiry_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub phone_mobile: Option<String>,
    pub phone_home: Option<String>,
    pub job_title: Option<String>,
    pub work_location: Option<String>,
    pub marital_status: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub employment_start_date: Option<NaiveDate>,
    pub education: Option<String>,
    pub was_license_revoked: Option<bool>,
    pub has_hazardous_materials_permit: Option<bool>,
    pub has_crane_operation_permit: Option<bool>,
    pub personal_number_in_company: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

/// Campos de un conductor sin id, listos para INSERT o UPDATE completo
#[derive(Debug, Clone)]
pub struct NewDriver {
    pub identity_card: String,
    pub company_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub license_class: Option<String>,
    pub license_expiry_date: Option<NaiveDate>,
    pub traffic_info_expiry_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub phone_mobile: Option<String>,
    pub phone_home: Option<String>,
    pub job_title: Option<String>,
    pub work_location: Option<String>,
    pub marital_status: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub employment_start_date: Option<NaiveDate>,
    pub education: Option<String>,
    pub was_license_revoked: Option<bool>,
    pub has_hazardous_materials_permit: Option<bool>,
    pub has_crane_operation_permit: Option<bool>,
    pub personal_number_in_company: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

/// Fila enriquecida para lecturas: conductor más el nombre de su empresa y el
/// vehículo que lo tiene asignado (búsqueda inversa)
#[derive(Debug, Clone, FromRow)]
pub struct DriverDetail {
    #[sqlx(flatten)]
    pub driver: Driver,
    pub company_name: Option<String>,
    pub vehicle_id: Option<i64>,
    pub vehicle_plate: Option<String>,
}
