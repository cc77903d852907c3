//! Repositorio de Driver

use sqlx::PgConnection;

use crate::models::driver::{Driver, DriverDetail, NewDriver};
use crate::utils::errors::{map_unique_violation, AppError};

const DETAIL_SELECT: &str = r#"
    SELECT d.*,
           c.name AS company_name,
           v.id AS vehicle_id,
           v.license_plate AS vehicle_plate
    FROM driver d
    LEFT JOIN company c ON c.id = d.company_id
    LEFT JOIN vehicle v ON v.assigned_driver_id = d.id
"#;

pub struct DriverRepository;

impl DriverRepository {
    pub async fn find_by_id(conn: &mut PgConnection, id: i64) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM driver WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(driver)
    }

    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: i64,
    ) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM driver WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(driver)
    }

    pub async fn find_by_identity_card(
        conn: &mut PgConnection,
        identity_card: &str,
    ) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM driver WHERE identity_card = $1")
            .bind(identity_card)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(driver)
    }

    pub async fn exists(conn: &mut PgConnection, id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM driver WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;
        Ok(exists)
    }

    pub async fn find_detail(
        conn: &mut PgConnection,
        id: i64,
    ) -> Result<Option<DriverDetail>, AppError> {
        let detail =
            sqlx::query_as::<_, DriverDetail>(&format!("{} WHERE d.id = $1", DETAIL_SELECT))
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;
        Ok(detail)
    }

    pub async fn list_details(conn: &mut PgConnection) -> Result<Vec<DriverDetail>, AppError> {
        let details = sqlx::query_as::<_, DriverDetail>(&format!("{} ORDER BY d.id", DETAIL_SELECT))
            .fetch_all(&mut *conn)
            .await?;
        Ok(details)
    }

    pub async fn list_details_by_company(
        conn: &mut PgConnection,
        company_id: i64,
    ) -> Result<Vec<DriverDetail>, AppError> {
        let details = sqlx::query_as::<_, DriverDetail>(&format!(
            "{} WHERE d.company_id = $1 ORDER BY d.id",
            DETAIL_SELECT
        ))
        .bind(company_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(details)
    }

    /// Ids de los conductores de una empresa, bloqueados para el borrado en cascada
    pub async fn lock_ids_by_company(
        conn: &mut PgConnection,
        company_id: i64,
    ) -> Result<Vec<i64>, AppError> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM driver WHERE company_id = $1 ORDER BY id FOR UPDATE",
        )
        .bind(company_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(ids)
    }

    /// Búsqueda por nombre o identity_card con filtro opcional de empresa
    pub async fn search_details(
        conn: &mut PgConnection,
        pattern: Option<&str>,
        company_id: Option<i64>,
    ) -> Result<Vec<DriverDetail>, AppError> {
        let details = sqlx::query_as::<_, DriverDetail>(&format!(
            r#"{}
            WHERE ($1::text IS NULL
                   OR d.first_name ILIKE $1
                   OR d.last_name ILIKE $1
                   OR d.identity_card ILIKE $1)
              AND ($2::bigint IS NULL OR d.company_id = $2)
            ORDER BY d.id
            "#,
            DETAIL_SELECT
        ))
        .bind(pattern)
        .bind(company_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(details)
    }

    pub async fn insert(conn: &mut PgConnection, driver: &NewDriver) -> Result<Driver, AppError> {
        let created = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO driver (
                identity_card, company_id, first_name, last_name, license_class,
                license_expiry_date, traffic_info_expiry_date, address,
                phone_mobile, phone_home, job_title, work_location,
                marital_status, birth_date, employment_start_date, education,
                was_license_revoked, has_hazardous_materials_permit,
                has_crane_operation_permit, personal_number_in_company, email, notes
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22
            )
            RETURNING *
            "#,
        )
        .bind(&driver.identity_card)
        .bind(driver.company_id)
        .bind(&driver.first_name)
        .bind(&driver.last_name)
        .bind(&driver.license_class)
        .bind(driver.license_expiry_date)
        .bind(driver.traffic_info_expiry_date)
        .bind(&driver.address)
        .bind(&driver.phone_mobile)
        .bind(&driver.phone_home)
        .bind(&driver.job_title)
        .bind(&driver.work_location)
        .bind(&driver.marital_status)
        .bind(driver.birth_date)
        .bind(driver.employment_start_date)
        .bind(&driver.education)
        .bind(driver.was_license_revoked)
        .bind(driver.has_hazardous_materials_permit)
        .bind(driver.has_crane_operation_permit)
        .bind(&driver.personal_number_in_company)
        .bind(&driver.email)
        .bind(&driver.notes)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_unique_violation(e, "Identity card already exists"))?;

        Ok(created)
    }

    pub async fn update(
        conn: &mut PgConnection,
        id: i64,
        driver: &NewDriver,
    ) -> Result<Driver, AppError> {
        let updated = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE driver SET
                identity_card = $2, company_id = $3, first_name = $4,
                last_name = $5, license_class = $6, license_expiry_date = $7,
                traffic_info_expiry_date = $8, address = $9, phone_mobile = $10,
                phone_home = $11, job_title = $12, work_location = $13,
                marital_status = $14, birth_date = $15, employment_start_date = $16,
                education = $17, was_license_revoked = $18,
                has_hazardous_materials_permit = $19, has_crane_operation_permit = $20,
                personal_number_in_company = $21, email = $22, notes = $23
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&driver.identity_card)
        .bind(driver.company_id)
        .bind(&driver.first_name)
        .bind(&driver.last_name)
        .bind(&driver.license_class)
        .bind(driver.license_expiry_date)
        .bind(driver.traffic_info_expiry_date)
        .bind(&driver.address)
        .bind(&driver.phone_mobile)
        .bind(&driver.phone_home)
        .bind(&driver.job_title)
        .bind(&driver.work_location)
        .bind(&driver.marital_status)
        .bind(driver.birth_date)
        .bind(driver.employment_start_date)
        .bind(&driver.education)
        .bind(driver.was_license_revoked)
        .bind(driver.has_hazardous_materials_permit)
        .bind(driver.has_crane_operation_permit)
        .bind(&driver.personal_number_in_company)
        .bind(&driver.email)
        .bind(&driver.notes)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_unique_violation(e, "Identity card already exists"))?;

        Ok(updated)
    }

    pub async fn delete(conn: &mut PgConnection, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM driver WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
