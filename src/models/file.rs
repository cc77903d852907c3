//! Modelo de File
//!
//! Metadatos de documentos subidos. Cada fila pertenece exactamente a un
//! dueño: una empresa, un vehículo o un conductor (restricción CHECK en el
//! schema). `file_url` es el localizador opaco que entrega el backend de
//! almacenamiento.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Registro de archivo - mapea exactamente a la tabla `files`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileRecord {
    pub id: i64,
    pub filename: Option<String>,
    pub file_type: Option<String>,
    pub file_url: String,
    pub uploaded_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub company_id: Option<i64>,
    pub vehicle_id: Option<i64>,
    pub driver_id: Option<i64>,
}

/// Metadatos de un archivo nuevo; el dueño se indica aparte con [`OwnerKind`]
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    pub filename: Option<String>,
    pub file_type: Option<String>,
    pub file_url: String,
    pub notes: Option<String>,
}

/// Tipo de entidad dueña de un archivo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerKind {
    Company,
    Vehicle,
    Driver,
}

impl OwnerKind {
    /// Subcarpeta del almacenamiento para este tipo de dueño
    pub fn folder(self) -> &'static str {
        match self {
            OwnerKind::Company => "companies",
            OwnerKind::Vehicle => "vehicles",
            OwnerKind::Driver => "drivers",
        }
    }

    /// Columna de la tabla `files` que referencia a este tipo de dueño
    pub fn column(self) -> &'static str {
        match self {
            OwnerKind::Company => "company_id",
            OwnerKind::Vehicle => "vehicle_id",
            OwnerKind::Driver => "driver_id",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OwnerKind::Company => "Company",
            OwnerKind::Vehicle => "Vehicle",
            OwnerKind::Driver => "Driver",
        }
    }
}
