//! Asset lifecycle engine
//!
//! Derives asset status from condition and assignment state, and validates
//! the cross-field and cross-record invariants that must hold before a
//! mutation is persisted. Every function here is pure: callers load the
//! records, pass them in, and persist whatever comes back.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Asset, AssetStatus, AssignmentRecord, Condition, Employee};

/// Pairs of dates whose order is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePair {
    PurchaseWarranty,
    AssignedReturned,
}

impl DatePair {
    fn labels(&self) -> (&'static str, &'static str) {
        match self {
            DatePair::PurchaseWarranty => ("purchase date", "Warranty expiry date"),
            DatePair::AssignedReturned => ("assigned date", "Returned date"),
        }
    }
}

impl std::fmt::Display for DatePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (start, end) = self.labels();
        write!(f, "{} cannot be earlier than {}", end, start)
    }
}

/// Keys that must be unique across records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueKey {
    SerialNumber,
    Email,
    PhoneNumber,
}

impl UniqueKey {
    pub fn entity(&self) -> &'static str {
        match self {
            UniqueKey::SerialNumber => "Asset",
            UniqueKey::Email | UniqueKey::PhoneNumber => "Employee",
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            UniqueKey::SerialNumber => "serial number",
            UniqueKey::Email => "email",
            UniqueKey::PhoneNumber => "phone",
        }
    }
}

/// Lifecycle rule violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("{0}")]
    Validation(String),

    #[error("{} with {} '{value}' already exists", .key.entity(), .key.field())]
    DuplicateKey { key: UniqueKey, value: String },

    #[error("{0}")]
    InvalidDateOrder(DatePair),

    #[error("Purchase date {0} cannot be in the future")]
    FutureDate(NaiveDate),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("Cannot delete asset {0} while it is assigned")]
    AssetInUse(i32),

    #[error("Cannot delete employee {0} with assigned assets")]
    EmployeeHasAssignedAssets(i32),

    #[error("Asset {id} is in condition '{condition}' and cannot be assigned")]
    AssetNotServiceable { id: i32, condition: Condition },

    #[error("Asset {0} is already assigned")]
    AssetAlreadyAssigned(i32),

    #[error("Assignment {0} is still open, record the return first")]
    AssignmentOpen(i32),
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// What to do when an asset that is not New/Good is handed out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnserviceableAssignmentPolicy {
    /// Write the history record but leave the asset status as its condition
    /// dictates, without setting the holder
    RecordOnly,
    /// Refuse the assignment
    Reject,
}

impl Default for UnserviceableAssignmentPolicy {
    fn default() -> Self {
        UnserviceableAssignmentPolicy::RecordOnly
    }
}

/// New status and holder to persist on an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetTransition {
    pub status: AssetStatus,
    pub employee_id: Option<i32>,
}

impl AssetTransition {
    /// Apply the transition to an in-memory asset
    pub fn apply_to(&self, asset: &mut Asset) {
        asset.status = self.status;
        asset.employee_id = self.employee_id;
    }
}

// ---------------------------------------------------------------------------
// Status derivation
// ---------------------------------------------------------------------------

/// Status of a freshly created asset
pub fn derive_status_on_create(condition: Condition) -> AssetStatus {
    match condition {
        Condition::New | Condition::Good => AssetStatus::Available,
        Condition::NeedsRepair => AssetStatus::UnderRepair,
        Condition::Damaged => AssetStatus::Retired,
    }
}

/// Status after a condition edit. Assignment survives a New/Good condition,
/// repair and damage override it.
pub fn derive_status_on_update(condition: Condition, current: AssetStatus) -> AssetStatus {
    match condition {
        Condition::New | Condition::Good => {
            if current == AssetStatus::Assigned {
                AssetStatus::Assigned
            } else {
                AssetStatus::Available
            }
        }
        Condition::NeedsRepair => AssetStatus::UnderRepair,
        Condition::Damaged => AssetStatus::Retired,
    }
}

/// Transition for an asset whose condition is being edited to `condition`.
///
/// `open_holder` is the employee on the asset's open assignment record, if
/// any. An open record counts as assignment state even when an earlier
/// repair or damage edit dropped the holder, so a serviceable asset with an
/// open record is Assigned to that record's employee. The holder is dropped
/// as soon as the asset stops being Assigned.
pub fn on_update(asset: &Asset, condition: Condition, open_holder: Option<i32>) -> AssetTransition {
    let current = if open_holder.is_some() {
        AssetStatus::Assigned
    } else {
        asset.status
    };
    let status = derive_status_on_update(condition, current);
    AssetTransition {
        status,
        employee_id: if status == AssetStatus::Assigned {
            open_holder.or(asset.employee_id)
        } else {
            None
        },
    }
}

/// Transition for handing `asset` to `employee`
pub fn on_assign(
    asset: &Asset,
    employee: &Employee,
    policy: UnserviceableAssignmentPolicy,
) -> LifecycleResult<AssetTransition> {
    if asset.status == AssetStatus::Assigned {
        return Err(LifecycleError::AssetAlreadyAssigned(asset.id));
    }

    if asset.condition.is_serviceable() {
        return Ok(AssetTransition {
            status: AssetStatus::Assigned,
            employee_id: Some(employee.id),
        });
    }

    match policy {
        UnserviceableAssignmentPolicy::Reject => Err(LifecycleError::AssetNotServiceable {
            id: asset.id,
            condition: asset.condition,
        }),
        UnserviceableAssignmentPolicy::RecordOnly => Ok(AssetTransition {
            status: derive_status_on_create(asset.condition),
            employee_id: None,
        }),
    }
}

/// Transition for an asset coming back from its holder
pub fn on_return(asset: &Asset) -> AssetTransition {
    AssetTransition {
        status: derive_status_on_update(asset.condition, AssetStatus::Available),
        employee_id: None,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// `end` may equal `start` but never precede it
pub fn validate_date_order<T: PartialOrd>(pair: DatePair, start: T, end: Option<T>) -> LifecycleResult<()> {
    match end {
        Some(end) if end < start => Err(LifecycleError::InvalidDateOrder(pair)),
        _ => Ok(()),
    }
}

pub fn validate_purchase_date(date: NaiveDate, today: NaiveDate) -> LifecycleResult<()> {
    if date > today {
        return Err(LifecycleError::FutureDate(date));
    }
    Ok(())
}

/// Purchase date not in the future and warranty not before purchase
pub fn validate_asset_dates(purchase: NaiveDate, warranty_expiry: NaiveDate, today: NaiveDate) -> LifecycleResult<()> {
    validate_purchase_date(purchase, today)?;
    validate_date_order(DatePair::PurchaseWarranty, purchase, Some(warranty_expiry))
}

/// Returns the trimmed serial number, rejecting blank ones
pub fn ensure_serial_number_present(serial: &str) -> LifecycleResult<String> {
    let trimmed = serial.trim();
    if trimmed.is_empty() {
        return Err(LifecycleError::Validation("Serial number is required".to_string()));
    }
    Ok(trimmed.to_string())
}

/// `taken` is the persistence layer's answer to "does another record
/// already use this value"
pub fn ensure_unique(key: UniqueKey, value: &str, taken: bool) -> LifecycleResult<()> {
    if taken {
        return Err(LifecycleError::DuplicateKey {
            key,
            value: value.to_string(),
        });
    }
    Ok(())
}

pub fn ensure_asset_deletable(asset: &Asset) -> LifecycleResult<()> {
    if asset.status == AssetStatus::Assigned {
        return Err(LifecycleError::AssetInUse(asset.id));
    }
    Ok(())
}

/// Assignment history is never removed implicitly: an entity referenced by
/// an open record cannot be deleted until the return is recorded
pub fn ensure_no_open_assignment(open: Option<&AssignmentRecord>) -> LifecycleResult<()> {
    match open {
        Some(record) => Err(LifecycleError::AssignmentOpen(record.id)),
        None => Ok(()),
    }
}

/// `owned` are the statuses of every asset referencing the employee
pub fn ensure_employee_deletable<I>(employee_id: i32, owned: I) -> LifecycleResult<()>
where
    I: IntoIterator<Item = AssetStatus>,
{
    if owned.into_iter().any(|s| s == AssetStatus::Assigned) {
        return Err(LifecycleError::EmployeeHasAssignedAssets(employee_id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeStatus;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn asset(condition: Condition, status: AssetStatus, employee_id: Option<i32>) -> Asset {
        Asset {
            id: 10,
            name: "HP LaserJet Pro MFP".to_string(),
            asset_type: "Printer".to_string(),
            make_model: "HP M404dw".to_string(),
            serial_number: "HP-404-PRN".to_string(),
            purchase_date: date(2024, 1, 10),
            warranty_expiry_date: date(2025, 1, 10),
            condition,
            status,
            is_spare: false,
            specifications: String::new(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap(),
            employee_id,
        }
    }

    fn employee() -> Employee {
        Employee {
            id: 3,
            full_name: "John Doe".to_string(),
            department: "IT".to_string(),
            email: "john.doe@company.com".to_string(),
            phone_number: Some("9876543210".to_string()),
            designation: "System Admin".to_string(),
            status: EmployeeStatus::Active,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_status_on_create() {
        assert_eq!(derive_status_on_create(Condition::New), AssetStatus::Available);
        assert_eq!(derive_status_on_create(Condition::Good), AssetStatus::Available);
        assert_eq!(derive_status_on_create(Condition::NeedsRepair), AssetStatus::UnderRepair);
        assert_eq!(derive_status_on_create(Condition::Damaged), AssetStatus::Retired);
    }

    #[test]
    fn test_assignment_is_sticky_across_condition_edits() {
        assert_eq!(
            derive_status_on_update(Condition::Good, AssetStatus::Assigned),
            AssetStatus::Assigned
        );
        assert_eq!(
            derive_status_on_update(Condition::New, AssetStatus::Assigned),
            AssetStatus::Assigned
        );
    }

    #[test]
    fn test_damage_and_repair_override_assignment() {
        assert_eq!(
            derive_status_on_update(Condition::Damaged, AssetStatus::Assigned),
            AssetStatus::Retired
        );
        assert_eq!(
            derive_status_on_update(Condition::NeedsRepair, AssetStatus::Assigned),
            AssetStatus::UnderRepair
        );
    }

    #[test]
    fn test_repaired_asset_becomes_available() {
        for current in [AssetStatus::UnderRepair, AssetStatus::Retired, AssetStatus::Available] {
            assert_eq!(derive_status_on_update(Condition::Good, current), AssetStatus::Available);
        }
    }

    #[test]
    fn test_update_drops_holder_when_no_longer_assigned() {
        let held = asset(Condition::Good, AssetStatus::Assigned, Some(3));

        let kept = on_update(&held, Condition::New, Some(3));
        assert_eq!(kept, AssetTransition { status: AssetStatus::Assigned, employee_id: Some(3) });

        let broken = on_update(&held, Condition::Damaged, Some(3));
        assert_eq!(broken, AssetTransition { status: AssetStatus::Retired, employee_id: None });
    }

    #[test]
    fn test_repair_of_asset_with_open_record_restores_holder() {
        // Good -> Damaged -> Good while the assignment record stays open
        let mut a = asset(Condition::Good, AssetStatus::Assigned, Some(3));

        on_update(&a, Condition::Damaged, Some(3)).apply_to(&mut a);
        a.condition = Condition::Damaged;
        assert_eq!(a.status, AssetStatus::Retired);
        assert_eq!(a.employee_id, None);

        on_update(&a, Condition::Good, Some(3)).apply_to(&mut a);
        a.condition = Condition::Good;
        assert_eq!(a.status, AssetStatus::Assigned);
        assert_eq!(a.employee_id, Some(3));

        // Still held, so a new hand-out is refused until the return
        assert_eq!(
            on_assign(&a, &employee(), UnserviceableAssignmentPolicy::RecordOnly),
            Err(LifecycleError::AssetAlreadyAssigned(10))
        );
        let returned = on_return(&a);
        assert_eq!(returned.status, AssetStatus::Available);
    }

    #[test]
    fn test_repair_after_record_only_assignment_assigns_record_employee() {
        let mut a = asset(Condition::NeedsRepair, AssetStatus::UnderRepair, None);
        let transition = on_assign(&a, &employee(), UnserviceableAssignmentPolicy::RecordOnly).unwrap();
        transition.apply_to(&mut a);
        assert_eq!(a.employee_id, None);

        let repaired = on_update(&a, Condition::Good, Some(3));
        assert_eq!(repaired, AssetTransition { status: AssetStatus::Assigned, employee_id: Some(3) });
    }

    #[test]
    fn test_update_without_open_record_is_available() {
        let a = asset(Condition::Damaged, AssetStatus::Retired, None);
        assert_eq!(
            on_update(&a, Condition::Good, None),
            AssetTransition { status: AssetStatus::Available, employee_id: None }
        );
    }

    #[test]
    fn test_open_record_blocks_deletion() {
        let record = AssignmentRecord {
            id: 2,
            asset_id: 10,
            employee_id: 3,
            assigned_date: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            returned_date: None,
            notes: String::new(),
        };
        assert_eq!(ensure_no_open_assignment(Some(&record)), Err(LifecycleError::AssignmentOpen(2)));
        assert!(ensure_no_open_assignment(None).is_ok());
    }

    #[test]
    fn test_date_order_boundary_is_inclusive() {
        let d = date(2024, 1, 10);
        assert!(validate_date_order(DatePair::PurchaseWarranty, d, Some(d)).is_ok());
        assert!(validate_date_order(DatePair::PurchaseWarranty, d, None).is_ok());
    }

    #[test]
    fn test_date_order_rejects_end_before_start() {
        let err = validate_date_order(DatePair::PurchaseWarranty, date(2024, 1, 10), Some(date(2024, 1, 9)))
            .unwrap_err();
        assert_eq!(err, LifecycleError::InvalidDateOrder(DatePair::PurchaseWarranty));
        assert_eq!(err.to_string(), "Warranty expiry date cannot be earlier than purchase date");

        let assigned = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let returned = Utc.with_ymd_and_hms(2024, 3, 1, 11, 59, 59).unwrap();
        assert_eq!(
            validate_date_order(DatePair::AssignedReturned, assigned, Some(returned)),
            Err(LifecycleError::InvalidDateOrder(DatePair::AssignedReturned))
        );
    }

    #[test]
    fn test_purchase_date_in_future() {
        let today = date(2024, 6, 1);
        assert!(validate_purchase_date(today, today).is_ok());
        assert_eq!(
            validate_purchase_date(date(2024, 6, 2), today),
            Err(LifecycleError::FutureDate(date(2024, 6, 2)))
        );
    }

    #[test]
    fn test_asset_dates_combined() {
        let today = date(2024, 6, 1);
        assert!(validate_asset_dates(date(2024, 1, 1), date(2025, 1, 1), today).is_ok());
        assert!(matches!(
            validate_asset_dates(date(2024, 7, 1), date(2025, 1, 1), today),
            Err(LifecycleError::FutureDate(_))
        ));
        assert!(matches!(
            validate_asset_dates(date(2024, 1, 1), date(2023, 12, 31), today),
            Err(LifecycleError::InvalidDateOrder(DatePair::PurchaseWarranty))
        ));
    }

    #[test]
    fn test_assign_serviceable_asset() {
        let transition = on_assign(
            &asset(Condition::New, AssetStatus::Available, None),
            &employee(),
            UnserviceableAssignmentPolicy::Reject,
        )
        .unwrap();
        assert_eq!(transition.status, AssetStatus::Assigned);
        assert_eq!(transition.employee_id, Some(3));
    }

    #[test]
    fn test_assign_already_assigned_asset() {
        let result = on_assign(
            &asset(Condition::Good, AssetStatus::Assigned, Some(4)),
            &employee(),
            UnserviceableAssignmentPolicy::RecordOnly,
        );
        assert_eq!(result, Err(LifecycleError::AssetAlreadyAssigned(10)));
    }

    #[test]
    fn test_assign_unserviceable_asset_record_only() {
        let transition = on_assign(
            &asset(Condition::NeedsRepair, AssetStatus::UnderRepair, None),
            &employee(),
            UnserviceableAssignmentPolicy::RecordOnly,
        )
        .unwrap();
        assert_eq!(transition.status, AssetStatus::UnderRepair);
        assert_eq!(transition.employee_id, None);
    }

    #[test]
    fn test_assign_unserviceable_asset_rejected() {
        let result = on_assign(
            &asset(Condition::Damaged, AssetStatus::Retired, None),
            &employee(),
            UnserviceableAssignmentPolicy::Reject,
        );
        assert_eq!(
            result,
            Err(LifecycleError::AssetNotServiceable { id: 10, condition: Condition::Damaged })
        );
    }

    #[test]
    fn test_return_of_good_asset_is_always_available() {
        for status in AssetStatus::ALL {
            let transition = on_return(&asset(Condition::Good, status, Some(3)));
            assert_eq!(transition.status, AssetStatus::Available);
            assert_eq!(transition.employee_id, None);
        }
    }

    #[test]
    fn test_return_follows_condition() {
        let repair = on_return(&asset(Condition::NeedsRepair, AssetStatus::Assigned, Some(3)));
        assert_eq!(repair.status, AssetStatus::UnderRepair);
        let damaged = on_return(&asset(Condition::Damaged, AssetStatus::Assigned, Some(3)));
        assert_eq!(damaged.status, AssetStatus::Retired);
        assert_eq!(damaged.employee_id, None);
    }

    #[test]
    fn test_transition_applies_to_asset() {
        let mut a = asset(Condition::Good, AssetStatus::Available, None);
        AssetTransition { status: AssetStatus::Assigned, employee_id: Some(3) }.apply_to(&mut a);
        assert_eq!(a.status, AssetStatus::Assigned);
        assert_eq!(a.employee_id, Some(3));
    }

    #[test]
    fn test_asset_delete_guard() {
        assert_eq!(
            ensure_asset_deletable(&asset(Condition::Good, AssetStatus::Assigned, Some(3))),
            Err(LifecycleError::AssetInUse(10))
        );
        assert!(ensure_asset_deletable(&asset(Condition::Good, AssetStatus::Available, None)).is_ok());
        assert!(ensure_asset_deletable(&asset(Condition::Damaged, AssetStatus::Retired, None)).is_ok());
    }

    #[test]
    fn test_employee_delete_guard() {
        assert_eq!(
            ensure_employee_deletable(3, [AssetStatus::Assigned]),
            Err(LifecycleError::EmployeeHasAssignedAssets(3))
        );
        // Same employee once the asset has been handed back
        assert!(ensure_employee_deletable(3, [AssetStatus::Available]).is_ok());
        assert!(ensure_employee_deletable(3, Vec::new()).is_ok());
    }

    #[test]
    fn test_duplicate_serial_number() {
        let existing = [asset(Condition::New, AssetStatus::Available, None)];
        let taken = |serial: &str, exclude: Option<i32>| {
            existing
                .iter()
                .any(|a| a.serial_number == serial && Some(a.id) != exclude)
        };

        let err = ensure_unique(UniqueKey::SerialNumber, "HP-404-PRN", taken("HP-404-PRN", None)).unwrap_err();
        assert_eq!(err.to_string(), "Asset with serial number 'HP-404-PRN' already exists");

        // Renaming to a fresh serial, or keeping its own, is fine
        assert!(ensure_unique(UniqueKey::SerialNumber, "HP-405-PRN", taken("HP-405-PRN", Some(11))).is_ok());
        assert!(ensure_unique(UniqueKey::SerialNumber, "HP-404-PRN", taken("HP-404-PRN", Some(10))).is_ok());
    }

    #[test]
    fn test_serial_number_must_not_be_blank() {
        assert_eq!(ensure_serial_number_present("  SN-1 "), Ok("SN-1".to_string()));
        assert!(matches!(ensure_serial_number_present("   "), Err(LifecycleError::Validation(_))));
    }

    #[test]
    fn test_policy_from_config_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: UnserviceableAssignmentPolicy,
        }
        let w: Wrapper = serde_json::from_str(r#"{"policy":"reject"}"#).unwrap();
        assert_eq!(w.policy, UnserviceableAssignmentPolicy::Reject);
        assert_eq!(UnserviceableAssignmentPolicy::default(), UnserviceableAssignmentPolicy::RecordOnly);
    }
}
