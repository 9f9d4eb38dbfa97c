//! Typed report projections

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::{AssetStatus, Condition};

/// One asset line of the status report
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssetStatusRow {
    pub id: i32,
    pub name: String,
    pub serial_number: String,
    pub condition: Condition,
    pub status: AssetStatus,
    pub warranty_expiry_date: NaiveDate,
}

/// Number of assets in a given status
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusCount {
    pub status: AssetStatus,
    pub count: i64,
}

/// Assets by status report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssetsByStatusReport {
    pub totals: Vec<StatusCount>,
    pub assets: Vec<AssetStatusRow>,
}

impl AssetsByStatusReport {
    /// Build the report, counting every status (including empty ones)
    pub fn from_rows(assets: Vec<AssetStatusRow>) -> Self {
        let totals = AssetStatus::ALL
            .iter()
            .map(|status| StatusCount {
                status: *status,
                count: assets.iter().filter(|a| a.status == *status).count() as i64,
            })
            .collect();
        Self { totals, assets }
    }
}

/// Asset whose warranty expires soon (or already has)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ExpiringAsset {
    pub id: i32,
    pub name: String,
    pub serial_number: String,
    pub warranty_expiry_date: NaiveDate,
    /// Negative when the warranty has already expired
    pub days_remaining: i32,
}

/// Open assignments per employee
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EmployeeUtilization {
    pub employee_id: i32,
    pub full_name: String,
    pub assigned_assets: i64,
}
