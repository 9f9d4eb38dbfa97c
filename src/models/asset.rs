//! Asset model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::employee::EmployeeShort;
use super::enums::{AssetStatus, Condition};

/// Asset record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Asset {
    pub id: i32,
    pub name: String,
    /// Kind of asset (Laptop, Printer, ...)
    pub asset_type: String,
    pub make_model: String,
    /// Globally unique serial number
    pub serial_number: String,
    pub purchase_date: NaiveDate,
    pub warranty_expiry_date: NaiveDate,
    pub condition: Condition,
    /// Derived from condition and assignment state, never set by clients
    pub status: AssetStatus,
    pub is_spare: bool,
    pub specifications: String,
    pub created_at: DateTime<Utc>,
    /// Employee currently holding the asset (set iff status is Assigned)
    pub employee_id: Option<i32>,
}

/// Asset with its current holder, for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssetDetails {
    #[serde(flatten)]
    pub asset: Asset,
    pub employee: Option<EmployeeShort>,
}

/// Short asset representation embedded in employee responses
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssetShort {
    pub id: i32,
    pub name: String,
    pub asset_type: String,
    pub serial_number: String,
    pub condition: Condition,
    pub status: AssetStatus,
}

impl From<&Asset> for AssetShort {
    fn from(asset: &Asset) -> Self {
        Self {
            id: asset.id,
            name: asset.name.clone(),
            asset_type: asset.asset_type.clone(),
            serial_number: asset.serial_number.clone(),
            condition: asset.condition,
            status: asset.status,
        }
    }
}

/// Create asset request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAsset {
    #[validate(length(min = 1, max = 100, message = "Name is required (max 100 characters)"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "Type is required (max 50 characters)"))]
    pub asset_type: String,
    #[validate(length(max = 100, message = "Make/model must be at most 100 characters"))]
    pub make_model: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Serial number is required (max 100 characters)"))]
    pub serial_number: String,
    /// Defaults to today
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry_date: NaiveDate,
    /// Defaults to New
    pub condition: Option<Condition>,
    pub is_spare: Option<bool>,
    #[validate(length(max = 500, message = "Specifications must be at most 500 characters"))]
    pub specifications: Option<String>,
}

/// Update asset request; absent fields keep their current value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAsset {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Type must be 1 to 50 characters"))]
    pub asset_type: Option<String>,
    #[validate(length(max = 100, message = "Make/model must be at most 100 characters"))]
    pub make_model: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Serial number must be 1 to 100 characters"))]
    pub serial_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry_date: Option<NaiveDate>,
    pub condition: Option<Condition>,
    pub is_spare: Option<bool>,
    #[validate(length(max = 500, message = "Specifications must be at most 500 characters"))]
    pub specifications: Option<String>,
}

impl UpdateAsset {
    /// Merge the request onto an existing asset. Status and holder are left
    /// untouched; the lifecycle engine recomputes them.
    pub fn apply_to(&self, asset: &mut Asset) {
        if let Some(ref name) = self.name {
            asset.name = name.clone();
        }
        if let Some(ref asset_type) = self.asset_type {
            asset.asset_type = asset_type.clone();
        }
        if let Some(ref make_model) = self.make_model {
            asset.make_model = make_model.clone();
        }
        if let Some(ref serial_number) = self.serial_number {
            asset.serial_number = serial_number.trim().to_string();
        }
        if let Some(purchase_date) = self.purchase_date {
            asset.purchase_date = purchase_date;
        }
        if let Some(warranty_expiry_date) = self.warranty_expiry_date {
            asset.warranty_expiry_date = warranty_expiry_date;
        }
        if let Some(condition) = self.condition {
            asset.condition = condition;
        }
        if let Some(is_spare) = self.is_spare {
            asset.is_spare = is_spare;
        }
        if let Some(ref specifications) = self.specifications {
            asset.specifications = specifications.clone();
        }
    }
}

/// Fully resolved asset ready for insertion
#[derive(Debug, Clone)]
pub struct NewAsset {
    pub name: String,
    pub asset_type: String,
    pub make_model: String,
    pub serial_number: String,
    pub purchase_date: NaiveDate,
    pub warranty_expiry_date: NaiveDate,
    pub condition: Condition,
    pub status: AssetStatus,
    pub is_spare: bool,
    pub specifications: String,
}
