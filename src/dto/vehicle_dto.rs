//! DTOs de Vehicle

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::{NewVehicle, Vehicle, VehicleDetail};
use crate::utils::{dates, patch};

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 20))]
    pub license_plate: String,
    pub company_id: Option<i64>,
    pub assigned_driver_id: Option<i64>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub weight: Option<i32>,
    pub department: Option<String>,
    pub car_type: Option<String>,
    pub carrier_license_expiry_date: Option<String>,
    pub internal_number: Option<i32>,
    pub chassis_number: Option<String>,
    pub odometer_reading: Option<i32>,
    pub production_year: Option<i32>,
    pub license_expiry_date: Option<String>,
    pub last_safety_inspection: Option<String>,
    pub next_safety_inspection: Option<String>,
    pub hova_insurance_expiry_date: Option<String>,
    pub mekif_insurance_expiry_date: Option<String>,
    pub special_equipment_expiry_date: Option<String>,
    pub hazardous_license_expiry_date: Option<String>,
    pub tachograph_expiry_date: Option<String>,
    pub winter_inspection_expiry_date: Option<String>,
    pub brake_inspection_expiry_date: Option<String>,
    pub equipment: Option<String>,
    pub has_tow_hook: Option<bool>,
    pub is_operational: Option<bool>,
    pub notes: Option<String>,
}

impl CreateVehicleRequest {
    pub fn into_new_vehicle(self) -> NewVehicle {
        NewVehicle {
            carrier_license_expiry_date: dates::parse_opt_date(&self.carrier_license_expiry_date),
            license_expiry_date: dates::parse_opt_date(&self.license_expiry_date),
            last_safety_inspection: dates::parse_opt_date(&self.last_safety_inspection),
            next_safety_inspection: dates::parse_opt_date(&self.next_safety_inspection),
            hova_insurance_expiry_date: dates::parse_opt_date(&self.hova_insurance_expiry_date),
            mekif_insurance_expiry_date: dates::parse_opt_date(&self.mekif_insurance_expiry_date),
            special_equipment_expiry_date: dates::parse_opt_date(
                &self.special_equipment_expiry_date,
            ),
            hazardous_license_expiry_date: dates::parse_opt_date(
                &self.hazardous_license_expiry_date,
            ),
            tachograph_expiry_date: dates::parse_opt_date(&self.tachograph_expiry_date),
            winter_inspection_expiry_date: dates::parse_opt_date(
                &self.winter_inspection_expiry_date,
            ),
            brake_inspection_expiry_date: dates::parse_opt_date(&self.brake_inspection_expiry_date),
            license_plate: self.license_plate,
            company_id: self.company_id,
            assigned_driver_id: self.assigned_driver_id,
            manufacturer: self.manufacturer,
            model: self.model,
            weight: self.weight,
            department: self.department,
            car_type: self.car_type,
            internal_number: self.internal_number,
            chassis_number: self.chassis_number,
            odometer_reading: self.odometer_reading,
            production_year: self.production_year,
            equipment: self.equipment,
            has_tow_hook: self.has_tow_hook,
            // Los vehículos nuevos quedan operativos salvo indicación contraria
            is_operational: Some(self.is_operational.unwrap_or(true)),
            notes: self.notes,
        }
    }
}

// Request de actualización parcial
#[derive(Debug, Default, Deserialize)]
pub struct UpdateVehicleRequest {
    pub license_plate: Option<String>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub company_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub assigned_driver_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub manufacturer: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub model: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub weight: Option<Option<i32>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub department: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub car_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub carrier_license_expiry_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub internal_number: Option<Option<i32>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub chassis_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub odometer_reading: Option<Option<i32>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub production_year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub license_expiry_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub last_safety_inspection: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub next_safety_inspection: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub hova_insurance_expiry_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub mekif_insurance_expiry_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub special_equipment_expiry_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub hazardous_license_expiry_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub tachograph_expiry_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub winter_inspection_expiry_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub brake_inspection_expiry_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub equipment: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub has_tow_hook: Option<Option<bool>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub is_operational: Option<Option<bool>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub notes: Option<Option<String>>,
}

impl UpdateVehicleRequest {
    /// Combinar el patch con la fila actual en un juego completo de columnas.
    /// Las referencias (empresa y conductor) ya deben venir validadas.
    pub fn merge_into(self, current: &Vehicle) -> NewVehicle {
        NewVehicle {
            license_plate: self
                .license_plate
                .unwrap_or_else(|| current.license_plate.clone()),
            company_id: patch::apply(self.company_id, current.company_id),
            assigned_driver_id: patch::apply(self.assigned_driver_id, current.assigned_driver_id),
            manufacturer: patch::apply(self.manufacturer, current.manufacturer.clone()),
            model: patch::apply(self.model, current.model.clone()),
            weight: patch::apply(self.weight, current.weight),
            department: patch::apply(self.department, current.department.clone()),
            car_type: patch::apply(self.car_type, current.car_type.clone()),
            carrier_license_expiry_date: patch::apply_date(
                self.carrier_license_expiry_date,
                current.carrier_license_expiry_date,
            ),
            internal_number: patch::apply(self.internal_number, current.internal_number),
            chassis_number: patch::apply(self.chassis_number, current.chassis_number.clone()),
            odometer_reading: patch::apply(self.odometer_reading, current.odometer_reading),
            production_year: patch::apply(self.production_year, current.production_year),
            license_expiry_date: patch::apply_date(
                self.license_expiry_date,
                current.license_expiry_date,
            ),
            last_safety_inspection: patch::apply_date(
                self.last_safety_inspection,
                current.last_safety_inspection,
            ),
            next_safety_inspection: patch::apply_date(
                self.next_safety_inspection,
                current.next_safety_inspection,
            ),
            hova_insurance_expiry_date: patch::apply_date(
                self.hova_insurance_expiry_date,
                current.hova_insurance_expiry_date,
            ),
            mekif_insurance_expiry_date: patch::apply_date(
                self.mekif_insurance_expiry_date,
                current.mekif_insurance_expiry_date,
            ),
            special_equipment_expiry_date: patch::apply_date(
                self.special_equipment_expiry_date,
                current.special_equipment_expiry_date,
            ),
            hazardous_license_expiry_date: patch::apply_date(
                self.hazardous_license_expiry_date,
                current.hazardous_license_expiry_date,
            ),
            tachograph_expiry_date: patch::apply_date(
                self.tachograph_expiry_date,
                current.tachograph_expiry_date,
            ),
            winter_inspection_expiry_date: patch::apply_date(
                self.winter_inspection_expiry_date,
                current.winter_inspection_expiry_date,
            ),
            brake_inspection_expiry_date: patch::apply_date(
                self.brake_inspection_expiry_date,
                current.brake_inspection_expiry_date,
            ),
            equipment: patch::apply(self.equipment, current.equipment.clone()),
            has_tow_hook: patch::apply(self.has_tow_hook, current.has_tow_hook),
            is_operational: patch::apply(self.is_operational, current.is_operational),
            notes: patch::apply(self.notes, current.notes.clone()),
        }
    }
}

// Request del endpoint de asignación; acepta la clave histórica
// `assigned_driver_id` como alias de `driver_id`
#[derive(Debug, Default, Deserialize)]
pub struct AssignDriverRequest {
    pub driver_id: Option<i64>,
    pub assigned_driver_id: Option<i64>,
}

impl AssignDriverRequest {
    pub fn effective_driver_id(&self) -> Option<i64> {
        self.driver_id.or(self.assigned_driver_id)
    }
}

// Response de vehículo con nombres resueltos
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: i64,
    pub license_plate: String,
    pub company_id: Option<i64>,
    pub company_name: Option<String>,
    pub assigned_driver_id: Option<i64>,
    pub driver_name: Option<String>,
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

impl From<VehicleDetail> for VehicleResponse {
    fn from(detail: VehicleDetail) -> Self {
        let driver_name = match (detail.driver_first_name, detail.driver_last_name) {
            (None, None) => None,
            (first, last) => Some(
                [first, last]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
        };
        let vehicle = detail.vehicle;
        Self {
            id: vehicle.id,
            license_plate: vehicle.license_plate,
            company_id: vehicle.company_id,
            company_name: detail.company_name,
            assigned_driver_id: vehicle.assigned_driver_id,
            driver_name,
            manufacturer: vehicle.manufacturer,
            model: vehicle.model,
            weight: vehicle.weight,
            department: vehicle.department,
            car_type: vehicle.car_type,
            carrier_license_expiry_date: vehicle.carrier_license_expiry_date,
            internal_number: vehicle.internal_number,
            chassis_number: vehicle.chassis_number,
            odometer_reading: vehicle.odometer_reading,
            production_year: vehicle.production_year,
            license_expiry_date: vehicle.license_expiry_date,
            last_safety_inspection: vehicle.last_safety_inspection,
            next_safety_inspection: vehicle.next_safety_inspection,
            hova_insurance_expiry_date: vehicle.hova_insurance_expiry_date,
            mekif_insurance_expiry_date: vehicle.mekif_insurance_expiry_date,
            special_equipment_expiry_date: vehicle.special_equipment_expiry_date,
            hazardous_license_expiry_date: vehicle.hazardous_license_expiry_date,
            tachograph_expiry_date: vehicle.tachograph_expiry_date,
            winter_inspection_expiry_date: vehicle.winter_inspection_expiry_date,
            brake_inspection_expiry_date: vehicle.brake_inspection_expiry_date,
            equipment: vehicle.equipment,
            has_tow_hook: vehicle.has_tow_hook,
            is_operational: vehicle.is_operational,
            notes: vehicle.notes,
        }
    }
}
