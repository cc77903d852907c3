//! Controller de búsqueda
//!
//! Búsqueda por subcadena (ILIKE) sobre los campos identificativos de cada
//! entidad, con los filtros de igualdad del sistema original.

use sqlx::PgPool;

use crate::dto::company_dto::CompanyResponse;
use crate::dto::driver_dto::DriverResponse;
use crate::dto::vehicle_dto::VehicleResponse;
use crate::repositories::company_repository::CompanyRepository;
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppResult;

pub struct SearchController {
    pool: PgPool,
}

impl SearchController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn companies(&self, q: Option<&str>) -> AppResult<Vec<CompanyResponse>> {
        let mut conn = self.pool.acquire().await?;
        let details = match normalized(q) {
            Some(needle) => {
                CompanyRepository::search_details(&mut conn, &like_pattern(&needle)).await?
            }
            None => CompanyRepository::list_details(&mut conn).await?,
        };
        Ok(details.into_iter().map(Into::into).collect())
    }

    pub async fn vehicles(
        &self,
        q: Option<&str>,
        company_id: Option<i64>,
        car_type: Option<&str>,
    ) -> AppResult<Vec<VehicleResponse>> {
        let mut conn = self.pool.acquire().await?;
        let pattern = normalized(q).map(|needle| like_pattern(&needle));
        let details = VehicleRepository::search_details(
            &mut conn,
            pattern.as_deref(),
            company_id,
            car_type,
        )
        .await?;
        Ok(details.into_iter().map(Into::into).collect())
    }

    pub async fn drivers(
        &self,
        q: Option<&str>,
        company_id: Option<i64>,
    ) -> AppResult<Vec<DriverResponse>> {
        let mut conn = self.pool.acquire().await?;
        let pattern = normalized(q).map(|needle| like_pattern(&needle));
        let details =
            DriverRepository::search_details(&mut conn, pattern.as_deref(), company_id).await?;
        Ok(details.into_iter().map(Into::into).collect())
    }
}

fn normalized(q: Option<&str>) -> Option<String> {
    q.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Patrón `%...%` con los comodines de LIKE escapados, para que un `%` literal
/// en la búsqueda no case con todo
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("abc"), "%abc%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_normalized_discards_blank_queries() {
        assert_eq!(normalized(None), None);
        assert_eq!(normalized(Some("")), None);
        assert_eq!(normalized(Some("   ")), None);
        assert_eq!(normalized(Some("  x ")), Some("x".to_string()));
    }
}
