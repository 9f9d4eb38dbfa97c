//! Closed domain enums shared by assets and employees
//!
//! Values are stored as their display strings (`"Needs Repair"`,
//! `"Under Repair"`, ...) in `TEXT` columns guarded by `CHECK` constraints.

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

/// Implements `Display`, `FromStr` and the SQLx text conversions for an enum
/// exposing `as_str()` and `ALL`.
macro_rules! text_enum {
    ($ty:ident, $what:literal) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| format!("Invalid {}: {}", $what, s))
            }
        }

        impl sqlx::Type<Postgres> for $ty {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<Postgres>>::compatible(ty)
            }
        }

        impl<'r> Decode<'r, Postgres> for $ty {
            fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <&str as Decode<Postgres>>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl Encode<'_, Postgres> for $ty {
            fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
                <&str as Encode<Postgres>>::encode(self.as_str(), buf)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

/// Physical state of an asset, set on intake or after inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Condition {
    New,
    Good,
    #[serde(rename = "Needs Repair")]
    NeedsRepair,
    Damaged,
}

impl Condition {
    pub const ALL: [Condition; 4] = [
        Condition::New,
        Condition::Good,
        Condition::NeedsRepair,
        Condition::Damaged,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::Good => "Good",
            Condition::NeedsRepair => "Needs Repair",
            Condition::Damaged => "Damaged",
        }
    }

    /// Whether an asset in this condition can be handed out
    pub fn is_serviceable(&self) -> bool {
        matches!(self, Condition::New | Condition::Good)
    }
}

impl Default for Condition {
    fn default() -> Self {
        Condition::New
    }
}

text_enum!(Condition, "condition");

// ---------------------------------------------------------------------------
// AssetStatus
// ---------------------------------------------------------------------------

/// Operational state of an asset, always derived from condition and
/// assignment activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum AssetStatus {
    Available,
    Assigned,
    #[serde(rename = "Under Repair")]
    UnderRepair,
    Retired,
}

impl AssetStatus {
    pub const ALL: [AssetStatus; 4] = [
        AssetStatus::Available,
        AssetStatus::Assigned,
        AssetStatus::UnderRepair,
        AssetStatus::Retired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Available => "Available",
            AssetStatus::Assigned => "Assigned",
            AssetStatus::UnderRepair => "Under Repair",
            AssetStatus::Retired => "Retired",
        }
    }
}

text_enum!(AssetStatus, "asset status");

// ---------------------------------------------------------------------------
// EmployeeStatus
// ---------------------------------------------------------------------------

/// Employment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub const ALL: [EmployeeStatus; 2] = [EmployeeStatus::Active, EmployeeStatus::Inactive];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::Inactive => "Inactive",
        }
    }
}

impl Default for EmployeeStatus {
    fn default() -> Self {
        EmployeeStatus::Active
    }
}

text_enum!(EmployeeStatus, "employee status");
