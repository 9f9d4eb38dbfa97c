//! Data models for the asset tracker

pub mod asset;
pub mod assignment;
pub mod employee;
pub mod enums;
pub mod report;
pub mod user;

// Re-export commonly used types
pub use asset::{Asset, AssetDetails, AssetShort};
pub use assignment::{AssignmentDetails, AssignmentRecord};
pub use employee::{Employee, EmployeeDetails, EmployeeShort};
pub use enums::{AssetStatus, Condition, EmployeeStatus};
pub use user::{Session, User};
