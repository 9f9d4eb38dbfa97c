//! Employee model and related types

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::asset::AssetShort;
use super::enums::EmployeeStatus;

/// Phone numbers: optional leading '+', digits, spaces, dashes and parentheses.
/// The empty string is accepted and means "no phone number".
pub static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+?[0-9][0-9 ()\-]{5,14})?$").unwrap());

/// Employee record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Employee {
    pub id: i32,
    pub full_name: String,
    pub department: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub designation: String,
    pub status: EmployeeStatus,
    pub created_at: DateTime<Utc>,
}

/// Employee with the assets they currently hold
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmployeeDetails {
    #[serde(flatten)]
    pub employee: Employee,
    pub assets: Vec<AssetShort>,
}

/// Short employee representation for lists and embedding
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EmployeeShort {
    pub id: i32,
    pub full_name: String,
    pub department: String,
    pub email: String,
}

/// Create employee request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEmployee {
    #[validate(length(min = 3, max = 100, message = "Full name must be 3 to 100 characters"))]
    pub full_name: String,
    #[validate(length(min = 1, max = 100, message = "Department is required (max 100 characters)"))]
    pub department: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(
        length(max = 15, message = "Phone number must be at most 15 characters"),
        regex(path = *PHONE_REGEX, message = "Invalid phone number format")
    )]
    pub phone_number: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Designation is required (max 100 characters)"))]
    pub designation: String,
    /// Defaults to Active
    pub status: Option<EmployeeStatus>,
}

/// Update employee request; absent fields keep their current value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployee {
    #[validate(length(min = 3, max = 100, message = "Full name must be 3 to 100 characters"))]
    pub full_name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Department must be 1 to 100 characters"))]
    pub department: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    /// An empty string removes the phone number
    #[validate(
        length(max = 15, message = "Phone number must be at most 15 characters"),
        regex(path = *PHONE_REGEX, message = "Invalid phone number format")
    )]
    pub phone_number: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Designation must be 1 to 100 characters"))]
    pub designation: Option<String>,
    pub status: Option<EmployeeStatus>,
}

impl UpdateEmployee {
    /// Merge the request onto an existing employee
    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(ref full_name) = self.full_name {
            employee.full_name = full_name.clone();
        }
        if let Some(ref department) = self.department {
            employee.department = department.clone();
        }
        if let Some(ref email) = self.email {
            employee.email = email.trim().to_string();
        }
        if let Some(ref phone_number) = self.phone_number {
            employee.phone_number = normalize_phone(Some(phone_number));
        }
        if let Some(ref designation) = self.designation {
            employee.designation = designation.clone();
        }
        if let Some(status) = self.status {
            employee.status = status;
        }
    }
}

/// Blank phone numbers are stored as NULL so they never collide
pub fn normalize_phone(phone: Option<&String>) -> Option<String> {
    phone
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(|p| p.to_string())
}
