//! Repositorio de File
//!
//! La columna del dueño se elige por [`OwnerKind`]; cada fila referencia
//! exactamente a uno (restricción CHECK en el schema).

use sqlx::PgConnection;

use crate::models::file::{FileRecord, NewFileRecord, OwnerKind};
use crate::utils::errors::AppError;

pub struct FileRepository;

impl FileRepository {
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: i64,
    ) -> Result<Option<FileRecord>, AppError> {
        let record = sqlx::query_as::<_, FileRecord>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(record)
    }

    pub async fn list_all(conn: &mut PgConnection) -> Result<Vec<FileRecord>, AppError> {
        let records = sqlx::query_as::<_, FileRecord>("SELECT * FROM files ORDER BY id")
            .fetch_all(&mut *conn)
            .await?;
        Ok(records)
    }

    pub async fn list_by_owner(
        conn: &mut PgConnection,
        owner: OwnerKind,
        owner_id: i64,
    ) -> Result<Vec<FileRecord>, AppError> {
        let sql = format!(
            "SELECT * FROM files WHERE {} = $1 ORDER BY id",
            owner.column()
        );
        let records = sqlx::query_as::<_, FileRecord>(&sql)
            .bind(owner_id)
            .fetch_all(&mut *conn)
            .await?;
        Ok(records)
    }

    pub async fn insert(
        conn: &mut PgConnection,
        owner: OwnerKind,
        owner_id: i64,
        record: &NewFileRecord,
    ) -> Result<FileRecord, AppError> {
        let sql = format!(
            r#"
            INSERT INTO files (filename, file_type, file_url, notes, {})
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
            owner.column()
        );

        let created = sqlx::query_as::<_, FileRecord>(&sql)
            .bind(&record.filename)
            .bind(&record.file_type)
            .bind(&record.file_url)
            .bind(&record.notes)
            .bind(owner_id)
            .fetch_one(&mut *conn)
            .await?;
        Ok(created)
    }

    pub async fn delete(conn: &mut PgConnection, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Borrar todos los archivos de un dueño; devuelve los localizadores para
    /// retirar los bytes después del commit
    pub async fn delete_by_owner(
        conn: &mut PgConnection,
        owner: OwnerKind,
        owner_id: i64,
    ) -> Result<Vec<String>, AppError> {
        let sql = format!(
            "DELETE FROM files WHERE {} = $1 RETURNING file_url",
            owner.column()
        );
        let locators = sqlx::query_scalar::<_, String>(&sql)
            .bind(owner_id)
            .fetch_all(&mut *conn)
            .await?;
        Ok(locators)
    }
}
