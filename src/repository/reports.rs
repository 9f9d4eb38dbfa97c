//! Read-only report queries

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::report::{AssetStatusRow, EmployeeUtilization, ExpiringAsset},
};

#[derive(Clone)]
pub struct ReportsRepository {
    pool: Pool<Postgres>,
}

impl ReportsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Every asset with its condition, status and warranty date
    pub async fn asset_statuses(&self) -> AppResult<Vec<AssetStatusRow>> {
        let rows = sqlx::query_as::<_, AssetStatusRow>(
            r#"
            SELECT id, name, serial_number, condition, status, warranty_expiry_date
            FROM assets
            ORDER BY status, name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Assets whose warranty expires within `days` days (expired ones included)
    pub async fn expiring_assets(&self, days: i32) -> AppResult<Vec<ExpiringAsset>> {
        let rows = sqlx::query_as::<_, ExpiringAsset>(
            r#"
            SELECT id, name, serial_number, warranty_expiry_date,
                   (warranty_expiry_date - CURRENT_DATE)::int AS days_remaining
            FROM assets
            WHERE warranty_expiry_date - CURRENT_DATE <= $1
            ORDER BY warranty_expiry_date, id
            "#,
        )
        .bind(days)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Open assignment count per employee, busiest first
    pub async fn employee_utilization(&self) -> AppResult<Vec<EmployeeUtilization>> {
        let rows = sqlx::query_as::<_, EmployeeUtilization>(
            r#"
            SELECT e.id AS employee_id, e.full_name, COUNT(r.id) AS assigned_assets
            FROM employees e
            LEFT JOIN assignment_records r
                   ON r.employee_id = e.id AND r.returned_date IS NULL
            GROUP BY e.id, e.full_name
            ORDER BY assigned_assets DESC, e.full_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
