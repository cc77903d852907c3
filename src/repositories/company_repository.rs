//! Repositorio de Company
//!
//! Todas las funciones reciben la conexión explícitamente para que cada caso
//! de uso componga sus lecturas y escrituras dentro de una misma transacción.

use sqlx::PgConnection;

use crate::models::company::{Company, CompanyDetail, NewCompany};
use crate::utils::errors::{map_unique_violation, AppError};

const DETAIL_SELECT: &str = r#"
    SELECT c.*,
           (SELECT COUNT(*) FROM vehicle v WHERE v.company_id = c.id) AS vehicles_count,
           (SELECT COUNT(*) FROM driver d WHERE d.company_id = c.id) AS drivers_count
    FROM company c
"#;

pub struct CompanyRepository;

impl CompanyRepository {
    pub async fn find_by_id(conn: &mut PgConnection, id: i64) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM company WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(company)
    }

    /// Igual que `find_by_id` pero bloqueando la fila dentro de la transacción
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: i64,
    ) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM company WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(company)
    }

    pub async fn find_by_identity_card(
        conn: &mut PgConnection,
        identity_card: &str,
    ) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM company WHERE identity_card = $1")
            .bind(identity_card)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(company)
    }

    pub async fn exists(conn: &mut PgConnection, id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM company WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;
        Ok(exists)
    }

    pub async fn find_detail(
        conn: &mut PgConnection,
        id: i64,
    ) -> Result<Option<CompanyDetail>, AppError> {
        let detail =
            sqlx::query_as::<_, CompanyDetail>(&format!("{} WHERE c.id = $1", DETAIL_SELECT))
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;
        Ok(detail)
    }

    pub async fn list_details(conn: &mut PgConnection) -> Result<Vec<CompanyDetail>, AppError> {
        let details =
            sqlx::query_as::<_, CompanyDetail>(&format!("{} ORDER BY c.id", DETAIL_SELECT))
                .fetch_all(&mut *conn)
                .await?;
        Ok(details)
    }

    /// Búsqueda por nombre o identity_card (patrón ya escapado por el caller)
    pub async fn search_details(
        conn: &mut PgConnection,
        pattern: &str,
    ) -> Result<Vec<CompanyDetail>, AppError> {
        let details = sqlx::query_as::<_, CompanyDetail>(&format!(
            "{} WHERE c.name ILIKE $1 OR c.identity_card ILIKE $1 ORDER BY c.id",
            DETAIL_SELECT
        ))
        .bind(pattern)
        .fetch_all(&mut *conn)
        .await?;
        Ok(details)
    }

    pub async fn insert(
        conn: &mut PgConnection,
        company: &NewCompany,
    ) -> Result<Company, AppError> {
        let created = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO company (
                identity_card, name, address, po_box, phone, fax,
                contact_person, contact_phone, manager_name, manager_phone,
                manager_id, email, safety_officer, carrier_license_expiry,
                established_date, inspection_week, notes
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *
            "#,
        )
        .bind(&company.identity_card)
        .bind(&company.name)
        .bind(&company.address)
        .bind(&company.po_box)
        .bind(&company.phone)
        .bind(&company.fax)
        .bind(&company.contact_person)
        .bind(&company.contact_phone)
        .bind(&company.manager_name)
        .bind(&company.manager_phone)
        .bind(&company.manager_id)
        .bind(&company.email)
        .bind(&company.safety_officer)
        .bind(company.carrier_license_expiry)
        .bind(company.established_date)
        .bind(company.inspection_week)
        .bind(&company.notes)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_unique_violation(e, "Identity card already exists"))?;

        Ok(created)
    }

    pub async fn update(
        conn: &mut PgConnection,
        id: i64,
        company: &NewCompany,
    ) -> Result<Company, AppError> {
        let updated = sqlx::query_as::<_, Company>(
            r#"
            UPDATE company SET
                identity_card = $2, name = $3, address = $4, po_box = $5,
                phone = $6, fax = $7, contact_person = $8, contact_phone = $9,
                manager_name = $10, manager_phone = $11, manager_id = $12,
                email = $13, safety_officer = $14, carrier_license_expiry = $15,
                established_date = $16, inspection_week = $17, notes = $18
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&company.identity_card)
        .bind(&company.name)
        .bind(&company.address)
        .bind(&company.po_box)
        .bind(&company.phone)
        .bind(&company.fax)
        .bind(&company.contact_person)
        .bind(&company.contact_phone)
        .bind(&company.manager_name)
        .bind(&company.manager_phone)
        .bind(&company.manager_id)
        .bind(&company.email)
        .bind(&company.safety_officer)
        .bind(company.carrier_license_expiry)
        .bind(company.established_date)
        .bind(company.inspection_week)
        .bind(&company.notes)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_unique_violation(e, "Identity card already exists"))?;

        Ok(updated)
    }

    pub async fn delete(conn: &mut PgConnection, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM company WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
