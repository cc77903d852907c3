//! DTOs de Driver

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::driver::{Driver, DriverDetail, NewDriver};
use crate::utils::{dates, patch};

// Request para crear un conductor
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(length(min = 1, max = 100))]
    pub identity_card: String,
    pub company_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub license_class: Option<String>,
    pub license_expiry_date: Option<String>,
    pub traffic_info_expiry_date: Option<String>,
    pub address: Option<String>,
    pub phone_mobile: Option<String>,
    pub phone_home: Option<String>,
    pub job_title: Option<String>,
    pub work_location: Option<String>,
    pub marital_status: Option<String>,
    pub birth_date: Option<String>,
    pub employment_start_date: Option<String>,
    pub education: Option<String>,
    pub was_license_revoked: Option<bool>,
    pub has_hazardous_materials_permit: Option<bool>,
    pub has_crane_operation_permit: Option<bool>,
    pub personal_number_in_company: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

impl CreateDriverRequest {
    pub fn into_new_driver(self) -> NewDriver {
        NewDriver {
            license_expiry_date: dates::parse_opt_date(&self.license_expiry_date),
            traffic_info_expiry_date: dates::parse_opt_date(&self.traffic_info_expiry_date),
            birth_date: dates::parse_opt_date(&self.birth_date),
            employment_start_date: dates::parse_opt_date(&self.employment_start_date),
            identity_card: self.identity_card,
            company_id: self.company_id,
            first_name: self.first_name,
            last_name: self.last_name,
            license_class: self.license_class,
            address: self.address,
            phone_mobile: self.phone_mobile,
            phone_home: self.phone_home,
            job_title: self.job_title,
            work_location: self.work_location,
            marital_status: self.marital_status,
            education: self.education,
            was_license_revoked: Some(self.was_license_revoked.unwrap_or(false)),
            has_hazardous_materials_permit: Some(
                self.has_hazardous_materials_permit.unwrap_or(false),
            ),
            has_crane_operation_permit: Some(self.has_crane_operation_permit.unwrap_or(false)),
            personal_number_in_company: self.personal_number_in_company,
            email: self.email,
            notes: self.notes,
        }
    }
}

// Request de actualización parcial
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDriverRequest {
    pub identity_card: Option<String>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub company_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub license_class: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub license_expiry_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub traffic_info_expiry_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub phone_mobile: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub phone_home: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub job_title: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub work_location: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub marital_status: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub birth_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub employment_start_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub education: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub was_license_revoked: Option<Option<bool>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub has_hazardous_materials_permit: Option<Option<bool>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub has_crane_operation_permit: Option<Option<bool>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub personal_number_in_company: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub notes: Option<Option<String>>,
}

impl UpdateDriverRequest {
    /// Combinar el patch con la fila actual en un juego completo de columnas.
    /// La referencia a la empresa ya debe venir validada.
    pub fn merge_into(self, current: &Driver) -> NewDriver {
        NewDriver {
            identity_card: self
                .identity_card
                .unwrap_or_else(|| current.identity_card.clone()),
            company_id: patch::apply(self.company_id, current.company_id),
            first_name: patch::apply(self.first_name, current.first_name.clone()),
            last_name: patch::apply(self.last_name, current.last_name.clone()),
            license_class: patch::apply(self.license_class, current.license_class.clone()),
            license_expiry_date: patch::apply_date(
                self.license_expiry_date,
                current.license_expiry_date,
            ),
            traffic_info_expiry_date: patch::apply_date(
                self.traffic_info_expiry_date,
                current.traffic_info_expiry_date,
            ),
            address: patch::apply(self.address, current.address.clone()),
            phone_mobile: patch::apply(self.phone_mobile, current.phone_mobile.clone()),
            phone_home: patch::apply(self.phone_home, current.phone_home.clone()),
            job_title: patch::apply(self.job_title, current.job_title.clone()),
            work_location: patch::apply(self.work_location, current.work_location.clone()),
            marital_status: patch::apply(self.marital_status, current.marital_status.clone()),
            birth_date: patch::apply_date(self.birth_date, current.birth_date),
            employment_start_date: patch::apply_date(
                self.employment_start_date,
                current.employment_start_date,
            ),
            education: patch::apply(self.education, current.education.clone()),
            was_license_revoked: patch::apply(self.was_license_revoked, current.was_license_revoked),
            has_hazardous_materials_permit: patch::apply(
                self.has_hazardous_materials_permit,
                current.has_hazardous_materials_permit,
            ),
            has_crane_operation_permit: patch::apply(
                self.has_crane_operation_permit,
                current.has_crane_operation_permit,
            ),
            personal_number_in_company: patch::apply(
                self.personal_number_in_company,
                current.personal_number_in_company.clone(),
            ),
            email: patch::apply(self.email, current.email.clone()),
            notes: patch::apply(self.notes, current.notes.clone()),
        }
    }
}

// Response de conductor con empresa y vehículo asignado resueltos
#[derive(Debug, Serialize)]
pub struct DriverResponse {
    pub id: i64,
    pub identity_card: String,
    pub company_id: Option<i64>,
    pub company_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
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
    pub vehicle_id: Option<i64>,
    pub vehicle_plate: Option<String>,
}

impl From<DriverDetail> for DriverResponse {
    fn from(detail: DriverDetail) -> Self {
        let driver = detail.driver;
        let full_name = match (&driver.first_name, &driver.last_name) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            _ => None,
        };
        Self {
            id: driver.id,
            identity_card: driver.identity_card,
            company_id: driver.company_id,
            company_name: detail.company_name,
            first_name: driver.first_name,
            last_name: driver.last_name,
            full_name,
            license_class: driver.license_class,
            license_expiry_date: driver.license_expiry_date,
            traffic_info_expiry_date: driver.traffic_info_expiry_date,
            address: driver.address,
            phone_mobile: driver.phone_mobile,
            phone_home: driver.phone_home,
            job_title: driver.job_title,
            work_location: driver.work_location,
            marital_status: driver.marital_status,
            birth_date: driver.birth_date,
            employment_start_date: driver.employment_start_date,
            education: driver.education,
            was_license_revoked: driver.was_license_revoked,
            has_hazardous_materials_permit: driver.has_hazardous_materials_permit,
            has_crane_operation_permit: driver.has_crane_operation_permit,
            personal_number_in_company: driver.personal_number_in_company,
            email: driver.email,
            notes: driver.notes,
            vehicle_id: detail.vehicle_id,
            vehicle_plate: detail.vehicle_plate,
        }
    }
}
