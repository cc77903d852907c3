//! Modelo de Company
//!
//! Este módulo contiene el struct Company y sus variantes para CRUD
//! operations. Mapea exactamente a la tabla `company` del schema.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Company principal - mapea exactamente a la tabla `company`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
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
}

/// Campos de una empresa sin id, listos para INSERT o UPDATE completo
#[derive(Debug, Clone)]
pub struct NewCompany {
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
}

/// Fila enriquecida para lecturas: empresa más los contadores de flota
#[derive(Debug, Clone, FromRow)]
pub struct CompanyDetail {
    #[sqlx(flatten)]
    pub company: Company,
    pub vehicles_count: i64,
    pub drivers_count: i64,
}
