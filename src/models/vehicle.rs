//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD
//! operations. Mapea exactamente a la tabla `vehicle` del schema.
//!
//! `assigned_driver_id` es el único puntero de la relación vehículo↔conductor;
//! el lado del conductor se deriva siempre por búsqueda inversa.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Vehicle principal - mapea exactamente a la tabla `vehicle`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub license_plate: String,
    pub company_id: Option<i64>,
    pub assigned_driver_id: Option<i64>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub weight: Option<i32>,
    pub department: Option<String>,
    pub car_type: Option<String>,
    pub carrier_license_expiry_date: Option<NaiveDate>,
    pub internal_number: Option<i32>,
    pub chassis_number: Option<String>,
    pub odometer_reading: Option<i32>,
    pub production_year: Option<i32>,
    pub license_expiry_date: Option<NaiveDate>,
    pub last_safety_inspection: Option<NaiveDate>,
    pub next_safety_inspection: Option<NaiveDate>,
    pub hova_insurance_expiry_date: Option<NaiveDate>,
    pub mekif_insurance_expiry_date: Option<NaiveDate>,
    pub special_equipment_expiry_date: Option<NaiveDate>,
    pub hazardous_license_expiry_date: Option<NaiveDate>,
    pub tachograph_expiry_date: Option<NaiveDate>,
    pub winter_inspection_expiry_date: Option<NaiveDate>,
    pub brake_inspection_expiry_date: Option<NaiveDate>,
    pub equipment: Option<String>,
    pub has_tow_hook: Option<bool>,
    pub is_operational: Option<bool>,
    pub notes: Option<String>,
}

/// Campos de un vehículo sin id, listos para INSERT o UPDATE completo
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub license_plate: String,
    pub company_id: Option<i64>,
    pub assigned_driver_id: Option<i64>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub weight: Option<i32>,
    pub department: Option<String>,
    pub car_type: Option<String>,
    pub carrier_license_expiry_date: Option<NaiveDate>,
    pub internal_number: Option<i32>,
    pub chassis_number: Option<String>,
    pub odometer_reading: Option<i32>,
    pub production_year: Option<i32>,
    pub license_expiry_date: Option<NaiveDate>,
    pub last_safety_inspection: Option<NaiveDate>,
    pub next_safety_inspection: Option<NaiveDate>,
    pub hova_insurance_expiry_date: Option<NaiveDate>,
    pub mekif_insurance_expiry_date: Option<NaiveDate>,
    pub special_equipment_expiry_date: Option<NaiveDate>,
    pub hazardous_license_expiry_date: Option<NaiveDate>,
    pub tachograph_expiry_date: Option<NaiveDate>,
    pub winter_inspection_expiry_date: Option<NaiveDate>,
    pub brake_inspection_expiry_date: Option<NaiveDate>,
    pub equipment: Option<String>,
    pub has_tow_hook: Option<bool>,
    pub is_operational: Option<bool>,
    pub notes: Option<String>,
}

/// Fila enriquecida para lecturas: vehículo más los nombres resueltos de la
/// empresa y del conductor asignado
#[derive(Debug, Clone, FromRow)]
pub struct VehicleDetail {
    #[sqlx(flatten)]
    pub vehicle: Vehicle,
    pub company_name: Option<String>,
    pub driver_first_name: Option<String>,
    pub driver_last_name: Option<String>,
}
