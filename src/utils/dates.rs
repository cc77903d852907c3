//! Parseo de fechas ISO-8601
//!
//! El sistema original aceptaba fechas o fechas con hora (con sufijo `Z`) y
//! convertía cualquier valor no parseable en NULL en vez de rechazar la
//! petición. Ese comportamiento se conserva aquí, centralizado en un solo
//! punto.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parsear una fecha en formato ISO-8601 (`YYYY-MM-DD`), o una fecha con hora
/// con o sin offset (`...T10:30:00`, `...T10:30:00Z`, `...T10:30:00+02:00`).
/// Devuelve `None` para entradas vacías o no parseables.
pub fn parse_date_lenient(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }

    // Con offset o sufijo Z
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    // Sin offset
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }

    None
}

/// Variante para campos opcionales de los requests.
pub fn parse_opt_date(raw: &Option<String>) -> Option<NaiveDate> {
    raw.as_deref().and_then(parse_date_lenient)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_date() {
        assert_eq!(
            parse_date_lenient("2024-03-15"),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }

    #[test]
    fn test_datetime_with_zulu_suffix() {
        assert_eq!(
            parse_date_lenient("2024-03-15T08:30:00Z"),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }

    #[test]
    fn test_datetime_with_offset() {
        assert_eq!(
            parse_date_lenient("2024-03-15T23:59:00+02:00"),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }

    #[test]
    fn test_datetime_without_offset() {
        assert_eq!(
            parse_date_lenient("2024-03-15T08:30:00"),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        assert_eq!(
            parse_date_lenient("2024-03-15T08:30:00.250"),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }

    #[test]
    fn test_garbage_becomes_none() {
        assert_eq!(parse_date_lenient("not-a-date"), None);
        assert_eq!(parse_date_lenient("15/03/2024"), None);
        assert_eq!(parse_date_lenient(""), None);
        assert_eq!(parse_date_lenient("   "), None);
    }

    #[test]
    fn test_opt_variants() {
        assert_eq!(parse_opt_date(&None), None);
        assert_eq!(parse_opt_date(&Some("garbage".to_string())), None);
        assert_eq!(
            parse_opt_date(&Some("2020-01-01".to_string())),
            NaiveDate::from_ymd_opt(2020, 1, 1)
        );
    }
}
