//! Repositorio de Vehicle

use sqlx::PgConnection;

use crate::models::vehicle::{NewVehicle, Vehicle, VehicleDetail};
use crate::utils::errors::{map_unique_violation, AppError};

const DETAIL_SELECT: &str = r#"
    SELECT v.*,
           c.name AS company_name,
           d.first_name AS driver_first_name,
           d.last_name AS driver_last_name
    FROM vehicle v
    LEFT JOIN company c ON c.id = v.company_id
    LEFT JOIN driver d ON d.id = v.assigned_driver_id
"#;

pub struct VehicleRepository;

impl VehicleRepository {
    pub async fn find_by_id(conn: &mut PgConnection, id: i64) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicle WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(vehicle)
    }

    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: i64,
    ) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicle WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(vehicle)
    }

    pub async fn exists(conn: &mut PgConnection, id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM vehicle WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;
        Ok(exists)
    }

    pub async fn find_by_license_plate(
        conn: &mut PgConnection,
        license_plate: &str,
    ) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicle WHERE license_plate = $1")
            .bind(license_plate)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(vehicle)
    }

    /// Vehículo que actualmente tiene asignado al conductor, bloqueado para
    /// poder soltarlo en la misma transacción
    pub async fn find_by_assigned_driver(
        conn: &mut PgConnection,
        driver_id: i64,
    ) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicle WHERE assigned_driver_id = $1 FOR UPDATE",
        )
        .bind(driver_id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(vehicle)
    }

    pub async fn find_detail(
        conn: &mut PgConnection,
        id: i64,
    ) -> Result<Option<VehicleDetail>, AppError> {
        let detail =
            sqlx::query_as::<_, VehicleDetail>(&format!("{} WHERE v.id = $1", DETAIL_SELECT))
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;
        Ok(detail)
    }

    pub async fn list_details(conn: &mut PgConnection) -> Result<Vec<VehicleDetail>, AppError> {
        let details =
            sqlx::query_as::<_, VehicleDetail>(&format!("{} ORDER BY v.id", DETAIL_SELECT))
                .fetch_all(&mut *conn)
                .await?;
        Ok(details)
    }

    pub async fn list_details_by_company(
        conn: &mut PgConnection,
        company_id: i64,
    ) -> Result<Vec<VehicleDetail>, AppError> {
        let details = sqlx::query_as::<_, VehicleDetail>(&format!(
            "{} WHERE v.company_id = $1 ORDER BY v.id",
            DETAIL_SELECT
        ))
        .bind(company_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(details)
    }

    /// Ids de los vehículos de una empresa, bloqueados para el borrado en cascada
    pub async fn lock_ids_by_company(
        conn: &mut PgConnection,
        company_id: i64,
    ) -> Result<Vec<i64>, AppError> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM vehicle WHERE company_id = $1 ORDER BY id FOR UPDATE",
        )
        .bind(company_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(ids)
    }

    /// Búsqueda por matrícula con filtros opcionales de empresa y tipo
    pub async fn search_details(
        conn: &mut PgConnection,
        pattern: Option<&str>,
        company_id: Option<i64>,
        car_type: Option<&str>,
    ) -> Result<Vec<VehicleDetail>, AppError> {
        let details = sqlx::query_as::<_, VehicleDetail>(&format!(
            r#"{}
            WHERE ($1::text IS NULL OR v.license_plate ILIKE $1)
              AND ($2::bigint IS NULL OR v.company_id = $2)
              AND ($3::text IS NULL OR v.car_type = $3)
            ORDER BY v.id
            "#,
            DETAIL_SELECT
        ))
        .bind(pattern)
        .bind(company_id)
        .bind(car_type)
        .fetch_all(&mut *conn)
        .await?;
        Ok(details)
    }

    pub async fn insert(
        conn: &mut PgConnection,
        vehicle: &NewVehicle,
    ) -> Result<Vehicle, AppError> {
        let created = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicle (
                license_plate, company_id, assigned_driver_id, manufacturer,
                model, weight, department, car_type, carrier_license_expiry_date,
                internal_number, chassis_number, odometer_reading, production_year,
                license_expiry_date, last_safety_inspection, next_safety_inspection,
                hova_insurance_expiry_date, mekif_insurance_expiry_date,
                special_equipment_expiry_date, hazardous_license_expiry_date,
                tachograph_expiry_date, winter_inspection_expiry_date,
                brake_inspection_expiry_date, equipment, has_tow_hook,
                is_operational, notes
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27
            )
            RETURNING *
            "#,
        )
        .bind(&vehicle.license_plate)
        .bind(vehicle.company_id)
        .bind(vehicle.assigned_driver_id)
        .bind(&vehicle.manufacturer)
        .bind(&vehicle.model)
        .bind(vehicle.weight)
        .bind(&vehicle.department)
        .bind(&vehicle.car_type)
        .bind(vehicle.carrier_license_expiry_date)
        .bind(vehicle.internal_number)
        .bind(&vehicle.chassis_number)
        .bind(vehicle.odometer_reading)
        .bind(vehicle.production_year)
        .bind(vehicle.license_expiry_date)
        .bind(vehicle.last_safety_inspection)
        .bind(vehicle.next_safety_inspection)
        .bind(vehicle.hova_insurance_expiry_date)
        .bind(vehicle.mekif_insurance_expiry_date)
        .bind(vehicle.special_equipment_expiry_date)
        .bind(vehicle.hazardous_license_expiry_date)
        .bind(vehicle.tachograph_expiry_date)
        .bind(vehicle.winter_inspection_expiry_date)
        .bind(vehicle.brake_inspection_expiry_date)
        .bind(&vehicle.equipment)
        .bind(vehicle.has_tow_hook)
        .bind(vehicle.is_operational)
        .bind(&vehicle.notes)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_unique_violation(e, "License plate already exists"))?;

        Ok(created)
    }

    pub async fn update(
        conn: &mut PgConnection,
        id: i64,
        vehicle: &NewVehicle,
    ) -> Result<Vehicle, AppError> {
        let updated = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicle SET
                license_plate = $2, company_id = $3, assigned_driver_id = $4,
                manufacturer = $5, model = $6, weight = $7, department = $8,
                car_type = $9, carrier_license_expiry_date = $10,
                internal_number = $11, chassis_number = $12,
                odometer_reading = $13, production_year = $14,
                license_expiry_date = $15, last_safety_inspection = $16,
                next_safety_inspection = $17, hova_insurance_expiry_date = $18,
                mekif_insurance_expiry_date = $19, special_equipment_expiry_date = $20,
                hazardous_license_expiry_date = $21, tachograph_expiry_date = $22,
                winter_inspection_expiry_date = $23, brake_inspection_expiry_date = $24,
                equipment = $25, has_tow_hook = $26, is_operational = $27, notes = $28
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&vehicle.license_plate)
        .bind(vehicle.company_id)
        .bind(vehicle.assigned_driver_id)
        .bind(&vehicle.manufacturer)
        .bind(&vehicle.model)
        .bind(vehicle.weight)
        .bind(&vehicle.department)
        .bind(&vehicle.car_type)
        .bind(vehicle.carrier_license_expiry_date)
        .bind(vehicle.internal_number)
        .bind(&vehicle.chassis_number)
        .bind(vehicle.odometer_reading)
        .bind(vehicle.production_year)
        .bind(vehicle.license_expiry_date)
        .bind(vehicle.last_safety_inspection)
        .bind(vehicle.next_safety_inspection)
        .bind(vehicle.hova_insurance_expiry_date)
        .bind(vehicle.mekif_insurance_expiry_date)
        .bind(vehicle.special_equipment_expiry_date)
        .bind(vehicle.hazardous_license_expiry_date)
        .bind(vehicle.tachograph_expiry_date)
        .bind(vehicle.winter_inspection_expiry_date)
        .bind(vehicle.brake_inspection_expiry_date)
        .bind(&vehicle.equipment)
        .bind(vehicle.has_tow_hook)
        .bind(vehicle.is_operational)
        .bind(&vehicle.notes)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_unique_violation(e, "License plate already exists"))?;

        Ok(updated)
    }

    /// Mover el puntero de asignación de un vehículo
    pub async fn set_assigned_driver(
        conn: &mut PgConnection,
        id: i64,
        driver_id: Option<i64>,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE vehicle SET assigned_driver_id = $2 WHERE id = $1")
            .bind(id)
            .bind(driver_id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Soltar al conductor de cualquier vehículo que lo tenga asignado
    pub async fn clear_assignments_for_driver(
        conn: &mut PgConnection,
        driver_id: i64,
    ) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE vehicle SET assigned_driver_id = NULL WHERE assigned_driver_id = $1")
            .bind(driver_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(conn: &mut PgConnection, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM vehicle WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
