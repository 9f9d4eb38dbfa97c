//! Assignment record (asset history) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Assignment record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssignmentRecord {
    pub id: i32,
    pub asset_id: i32,
    pub employee_id: i32,
    pub assigned_date: DateTime<Utc>,
    /// Set once the asset has been handed back
    pub returned_date: Option<DateTime<Utc>>,
    pub notes: String,
}

impl AssignmentRecord {
    /// An open record has not been returned yet
    pub fn is_open(&self) -> bool {
        self.returned_date.is_none()
    }
}

/// Assignment record with asset and employee names, for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssignmentDetails {
    pub id: i32,
    pub asset_id: i32,
    pub asset_name: String,
    pub serial_number: String,
    pub employee_id: i32,
    pub employee_name: String,
    pub assigned_date: DateTime<Utc>,
    pub returned_date: Option<DateTime<Utc>>,
    pub notes: String,
}

/// Assignment list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct AssignmentQuery {
    pub asset_id: Option<i32>,
    pub employee_id: Option<i32>,
    /// Only records that have not been returned
    pub open: Option<bool>,
}

/// Create assignment request (hand an asset to an employee)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAssignment {
    pub asset_id: i32,
    pub employee_id: i32,
    /// Defaults to now
    pub assigned_date: Option<DateTime<Utc>>,
    /// When given, the record is stored as closed history only
    pub returned_date: Option<DateTime<Utc>>,
    #[validate(length(max = 300, message = "Notes must be at most 300 characters"))]
    pub notes: Option<String>,
}

/// Update assignment request; setting `returned_date` on an open record
/// records the return
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAssignment {
    pub assigned_date: Option<DateTime<Utc>>,
    pub returned_date: Option<DateTime<Utc>>,
    #[validate(length(max = 300, message = "Notes must be at most 300 characters"))]
    pub notes: Option<String>,
}
