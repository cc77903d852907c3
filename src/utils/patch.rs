//! Campos de actualización parcial
//!
//! Los PUT del API distinguen tres estados por campo: ausente (se conserva el
//! valor actual), `null` (se limpia) y un valor nuevo. Serde colapsa `null` y
//! "ausente" para un `Option` simple, así que los requests de actualización
//! usan `Option<Option<T>>` con el deserializador de este módulo.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::utils::dates;

/// Deserializador para `Option<Option<T>>`: un campo presente (incluso como
/// `null`) produce `Some(...)`; la capa externa queda en `None` solo cuando el
/// campo no viene en el JSON (vía `#[serde(default)]`).
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Resolver un campo de tres estados contra el valor actual de la fila.
pub fn apply<T>(candidate: Option<Option<T>>, current: Option<T>) -> Option<T> {
    match candidate {
        Some(value) => value,
        None => current,
    }
}

/// Igual que [`apply`] pero para campos de fecha que llegan como texto: un
/// valor presente se parsea con la misma tolerancia que en el alta (texto no
/// parseable limpia el campo).
pub fn apply_date(candidate: Option<Option<String>>, current: Option<NaiveDate>) -> Option<NaiveDate> {
    match candidate {
        Some(value) => value.as_deref().and_then(dates::parse_date_lenient),
        None => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "double_option")]
        notes: Option<Option<String>>,
    }

    #[test]
    fn test_absent_field() {
        let probe: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(probe.notes, None);
        assert_eq!(apply(probe.notes, Some("kept".to_string())), Some("kept".to_string()));
    }

    #[test]
    fn test_null_field_clears() {
        let probe: Probe = serde_json::from_str(r#"{"notes": null}"#).unwrap();
        assert_eq!(probe.notes, Some(None));
        assert_eq!(apply(probe.notes, Some("old".to_string())), None);
    }

    #[test]
    fn test_value_field_replaces() {
        let probe: Probe = serde_json::from_str(r#"{"notes": "new"}"#).unwrap();
        assert_eq!(apply(probe.notes, Some("old".to_string())), Some("new".to_string()));
    }

    #[test]
    fn test_apply_date_unparseable_clears() {
        let current = NaiveDate::from_ymd_opt(2020, 1, 1);
        assert_eq!(apply_date(None, current), current);
        assert_eq!(apply_date(Some(None), current), None);
        assert_eq!(apply_date(Some(Some("garbage".to_string())), current), None);
        assert_eq!(
            apply_date(Some(Some("2021-06-30".to_string())), current),
            NaiveDate::from_ymd_opt(2021, 6, 30)
        );
    }
}
