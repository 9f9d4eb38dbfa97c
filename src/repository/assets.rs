//! Assets repository for database operations

use sqlx::{postgres::PgRow, FromRow, PgConnection, Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    lifecycle::AssetTransition,
    models::{
        asset::{Asset, AssetDetails, AssetShort, NewAsset},
        employee::EmployeeShort,
        enums::AssetStatus,
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT a.*,
           e.full_name AS employee_full_name,
           e.department AS employee_department,
           e.email AS employee_email
    FROM assets a
    LEFT JOIN employees e ON a.employee_id = e.id
"#;

#[derive(Clone)]
pub struct AssetsRepository {
    pool: Pool<Postgres>,
}

impl AssetsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn details_from_row(row: &PgRow) -> AppResult<AssetDetails> {
        let asset = Asset::from_row(row)?;
        let employee = match asset.employee_id {
            Some(id) => Some(EmployeeShort {
                id,
                full_name: row.try_get("employee_full_name")?,
                department: row.try_get("employee_department")?,
                email: row.try_get("employee_email")?,
            }),
            None => None,
        };
        Ok(AssetDetails { asset, employee })
    }

    /// List all assets with their current holder
    pub async fn list(&self) -> AppResult<Vec<AssetDetails>> {
        let rows = sqlx::query(&format!("{} ORDER BY a.name, a.id", DETAILS_SELECT))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::details_from_row).collect()
    }

    /// Get asset with holder by ID
    pub async fn get_details(&self, id: i32) -> AppResult<AssetDetails> {
        let row = sqlx::query(&format!("{} WHERE a.id = $1", DETAILS_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))?;

        Self::details_from_row(&row)
    }

    /// Get asset by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    /// Load an asset and lock its row until the transaction ends
    pub async fn lock(&self, conn: &mut PgConnection, id: i32) -> AppResult<Option<Asset>> {
        let asset = sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(asset)
    }

    /// Check if a serial number is already used by another asset
    pub async fn serial_number_exists(
        &self,
        conn: &mut PgConnection,
        serial_number: &str,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM assets WHERE serial_number = $1 AND ($2::int IS NULL OR id <> $2))",
        )
        .bind(serial_number)
        .bind(exclude_id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(exists)
    }

    /// Insert a new asset
    pub async fn create(&self, conn: &mut PgConnection, data: &NewAsset) -> AppResult<Asset> {
        let asset = sqlx::query_as::<_, Asset>(
            r#"
            INSERT INTO assets (
                name, asset_type, make_model, serial_number, purchase_date,
                warranty_expiry_date, condition, status, is_spare, specifications
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.asset_type)
        .bind(&data.make_model)
        .bind(&data.serial_number)
        .bind(data.purchase_date)
        .bind(data.warranty_expiry_date)
        .bind(data.condition)
        .bind(data.status)
        .bind(data.is_spare)
        .bind(&data.specifications)
        .fetch_one(&mut *conn)
        .await?;
        Ok(asset)
    }

    /// Write back every mutable field of an asset
    pub async fn update(&self, conn: &mut PgConnection, asset: &Asset) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>(
            r#"
            UPDATE assets SET
                name = $2, asset_type = $3, make_model = $4, serial_number = $5,
                purchase_date = $6, warranty_expiry_date = $7, condition = $8,
                status = $9, is_spare = $10, specifications = $11, employee_id = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(asset.id)
        .bind(&asset.name)
        .bind(&asset.asset_type)
        .bind(&asset.make_model)
        .bind(&asset.serial_number)
        .bind(asset.purchase_date)
        .bind(asset.warranty_expiry_date)
        .bind(asset.condition)
        .bind(asset.status)
        .bind(asset.is_spare)
        .bind(&asset.specifications)
        .bind(asset.employee_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", asset.id)))
    }

    /// Persist a status/holder transition computed by the lifecycle engine
    pub async fn apply_transition(
        &self,
        conn: &mut PgConnection,
        id: i32,
        transition: &AssetTransition,
    ) -> AppResult<()> {
        sqlx::query("UPDATE assets SET status = $2, employee_id = $3 WHERE id = $1")
            .bind(id)
            .bind(transition.status)
            .bind(transition.employee_id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Delete an asset
    pub async fn delete(&self, conn: &mut PgConnection, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Asset {} not found", id)));
        }
        Ok(())
    }

    /// Assets held by an employee
    pub async fn list_for_employee(&self, employee_id: i32) -> AppResult<Vec<AssetShort>> {
        let assets = sqlx::query_as::<_, AssetShort>(
            r#"
            SELECT id, name, asset_type, serial_number, condition, status
            FROM assets
            WHERE employee_id = $1
            ORDER BY name, id
            "#,
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(assets)
    }

    /// Every asset that currently has a holder
    pub async fn list_held(&self) -> AppResult<Vec<Asset>> {
        let assets = sqlx::query_as::<_, Asset>(
            "SELECT * FROM assets WHERE employee_id IS NOT NULL ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(assets)
    }

    /// Statuses of the assets held by an employee, locking those rows
    pub async fn lock_statuses_for_employee(
        &self,
        conn: &mut PgConnection,
        employee_id: i32,
    ) -> AppResult<Vec<AssetStatus>> {
        let statuses: Vec<AssetStatus> =
            sqlx::query_scalar("SELECT status FROM assets WHERE employee_id = $1 FOR UPDATE")
                .bind(employee_id)
                .fetch_all(&mut *conn)
                .await?;
        Ok(statuses)
    }

    /// Count all assets
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assets")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
