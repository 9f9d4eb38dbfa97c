//! Assignment records repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::assignment::{AssignmentDetails, AssignmentQuery, AssignmentRecord},
};

#[derive(Clone)]
pub struct AssignmentsRepository {
    pool: Pool<Postgres>,
}

impl AssignmentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List assignment records, newest first
    pub async fn list(&self, query: &AssignmentQuery) -> AppResult<Vec<AssignmentDetails>> {
        let records = sqlx::query_as::<_, AssignmentDetails>(
            r#"
            SELECT r.id, r.asset_id, a.name AS asset_name, a.serial_number,
                   r.employee_id, e.full_name AS employee_name,
                   r.assigned_date, r.returned_date, r.notes
            FROM assignment_records r
            JOIN assets a ON r.asset_id = a.id
            JOIN employees e ON r.employee_id = e.id
            WHERE ($1::int IS NULL OR r.asset_id = $1)
              AND ($2::int IS NULL OR r.employee_id = $2)
              AND ($3::bool IS NOT TRUE OR r.returned_date IS NULL)
            ORDER BY r.assigned_date DESC, r.id DESC
            "#,
        )
        .bind(query.asset_id)
        .bind(query.employee_id)
        .bind(query.open)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    /// Get assignment record with asset and employee names
    pub async fn get_details(&self, id: i32) -> AppResult<AssignmentDetails> {
        sqlx::query_as::<_, AssignmentDetails>(
            r#"
            SELECT r.id, r.asset_id, a.name AS asset_name, a.serial_number,
                   r.employee_id, e.full_name AS employee_name,
                   r.assigned_date, r.returned_date, r.notes
            FROM assignment_records r
            JOIN assets a ON r.asset_id = a.id
            JOIN employees e ON r.employee_id = e.id
            WHERE r.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Assignment {} not found", id)))
    }

    /// Load a record and lock its row until the transaction ends
    pub async fn lock(&self, conn: &mut PgConnection, id: i32) -> AppResult<AssignmentRecord> {
        sqlx::query_as::<_, AssignmentRecord>("SELECT * FROM assignment_records WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Assignment {} not found", id)))
    }

    /// The asset's unreturned record, locked until the transaction ends
    pub async fn lock_open_for_asset(
        &self,
        conn: &mut PgConnection,
        asset_id: i32,
    ) -> AppResult<Option<AssignmentRecord>> {
        let record = sqlx::query_as::<_, AssignmentRecord>(
            "SELECT * FROM assignment_records WHERE asset_id = $1 AND returned_date IS NULL FOR UPDATE",
        )
        .bind(asset_id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(record)
    }

    /// Any unreturned record of the employee, locking all of them
    pub async fn lock_open_for_employee(
        &self,
        conn: &mut PgConnection,
        employee_id: i32,
    ) -> AppResult<Option<AssignmentRecord>> {
        let records = sqlx::query_as::<_, AssignmentRecord>(
            r#"
            SELECT * FROM assignment_records
            WHERE employee_id = $1 AND returned_date IS NULL
            ORDER BY id
            FOR UPDATE
            "#,
        )
        .bind(employee_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(records.into_iter().next())
    }

    /// Insert a new record
    pub async fn create(
        &self,
        conn: &mut PgConnection,
        asset_id: i32,
        employee_id: i32,
        assigned_date: DateTime<Utc>,
        returned_date: Option<DateTime<Utc>>,
        notes: &str,
    ) -> AppResult<AssignmentRecord> {
        let record = sqlx::query_as::<_, AssignmentRecord>(
            r#"
            INSERT INTO assignment_records (asset_id, employee_id, assigned_date, returned_date, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(asset_id)
        .bind(employee_id)
        .bind(assigned_date)
        .bind(returned_date)
        .bind(notes)
        .fetch_one(&mut *conn)
        .await?;
        Ok(record)
    }

    /// Write back dates and notes of a record
    pub async fn update(&self, conn: &mut PgConnection, record: &AssignmentRecord) -> AppResult<AssignmentRecord> {
        sqlx::query_as::<_, AssignmentRecord>(
            r#"
            UPDATE assignment_records
            SET assigned_date = $2, returned_date = $3, notes = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(record.assigned_date)
        .bind(record.returned_date)
        .bind(&record.notes)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Assignment {} not found", record.id)))
    }

    /// Delete a record
    pub async fn delete(&self, conn: &mut PgConnection, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM assignment_records WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Assignment {} not found", id)));
        }
        Ok(())
    }

    /// Count all records
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assignment_records")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
