//! DTOs de Company

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::company::{Company, CompanyDetail, NewCompany};
use crate::utils::{dates, patch};

// Request para crear una empresa
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    #[validate(length(min = 1, max = 100))]
    pub identity_card: String,
    pub name: Option<String>,
    pub address: Option<String>,
    pub po_box: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub contact_person: Option<String>,
    pub contact_phone: Option<String>,
    pub manager_name: Option<String>,
    pub manager_phone: Option<String>,
    pub manager_id: Option<String>,
    pub email: Option<String>,
    pub safety_officer: Option<String>,
    pub carrier_license_expiry: Option<String>,
    pub established_date: Option<String>,
    pub inspection_week: Option<i32>,
    pub notes: Option<String>,
}

impl CreateCompanyRequest {
    pub fn into_new_company(self) -> NewCompany {
        NewCompany {
            carrier_license_expiry: dates::parse_opt_date(&self.carrier_license_expiry),
            established_date: dates::parse_opt_date(&self.established_date),
            identity_card: self.identity_card,
            name: self.name,
            address: self.address,
            po_box: self.po_box,
            phone: self.phone,
            fax: self.fax,
            contact_person: self.contact_person,
            contact_phone: self.contact_phone,
            manager_name: self.manager_name,
            manager_phone: self.manager_phone,
            manager_id: self.manager_id,
            email: self.email,
            safety_officer: self.safety_officer,
            inspection_week: self.inspection_week,
            notes: self.notes,
        }
    }
}

// Request de actualización parcial: campo ausente = conservar,
// campo null = limpiar
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCompanyRequest {
    pub identity_card: Option<String>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub po_box: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub fax: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub contact_person: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub contact_phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub manager_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub manager_phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub manager_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub safety_officer: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub carrier_license_expiry: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub established_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub inspection_week: Option<Option<i32>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub notes: Option<Option<String>>,
}

impl UpdateCompanyRequest {
    /// Combinar el patch con la fila actual en un juego completo de columnas
    pub fn merge_into(self, current: &Company) -> NewCompany {
        NewCompany {
            identity_card: self
                .identity_card
                .unwrap_or_else(|| current.identity_card.clone()),
            name: patch::apply(self.name, current.name.clone()),
            address: patch::apply(self.address, current.address.clone()),
            po_box: patch::apply(self.po_box, current.po_box.clone()),
            phone: patch::apply(self.phone, current.phone.clone()),
            fax: patch::apply(self.fax, current.fax.clone()),
            contact_person: patch::apply(self.contact_person, current.contact_person.clone()),
            contact_phone: patch::apply(self.contact_phone, current.contact_phone.clone()),
            manager_name: patch::apply(self.manager_name, current.manager_name.clone()),
            manager_phone: patch::apply(self.manager_phone, current.manager_phone.clone()),
            manager_id: patch::apply(self.manager_id, current.manager_id.clone()),
            email: patch::apply(self.email, current.email.clone()),
            safety_officer: patch::apply(self.safety_officer, current.safety_officer.clone()),
            carrier_license_expiry: patch::apply_date(
                self.carrier_license_expiry,
                current.carrier_license_expiry,
            ),
            established_date: patch::apply_date(self.established_date, current.established_date),
            inspection_week: patch::apply(self.inspection_week, current.inspection_week),
            notes: patch::apply(self.notes, current.notes.clone()),
        }
    }
}

// Response de empresa con contadores de flota
#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub id: i64,
    pub identity_card: String,
    pub name: Option<String>,
    pub address: Option<String>,
    pub po_box: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub contact_person: Option<String>,
    pub contact_phone: Option<String>,
    pub manager_name: Option<String>,
    pub manager_phone: Option<String>,
    pub manager_id: Option<String>,
    pub email: Option<String>,
    pub safety_officer: Option<String>,
    pub carrier_license_expiry: Option<NaiveDate>,
    pub established_date: Option<NaiveDate>,
    pub inspection_week: Option<i32>,
    pub notes: Option<String>,
    pub vehicles_count: i64,
    pub drivers_count: i64,
}

impl From<CompanyDetail> for CompanyResponse {
    fn from(detail: CompanyDetail) -> Self {
        let company = detail.company;
        Self {
            id: company.id,
            identity_card: company.identity_card,
            name: company.name,
            address: company.address,
            po_box: company.po_box,
            phone: company.phone,
            fax: company.fax,
            contact_person: company.contact_person,
            contact_phone: company.contact_phone,
            manager_name: company.manager_name,
            manager_phone: company.manager_phone,
            manager_id: company.manager_id,
            email: company.email,
            safety_officer: company.safety_officer,
            carrier_license_expiry: company.carrier_license_expiry,
            established_date: company.established_date,
            inspection_week: company.inspection_week,
            notes: company.notes,
            vehicles_count: detail.vehicles_count,
            drivers_count: detail.drivers_count,
        }
    }
}

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}
