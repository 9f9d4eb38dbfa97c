//! Asset assignment (hand-out and return) service

use chrono::Utc;
use sqlx::PgConnection;

use crate::{
    error::{AppError, AppResult},
    lifecycle::{self, DatePair, LifecycleError, UnserviceableAssignmentPolicy},
    models::{
        assignment::{AssignmentDetails, AssignmentQuery, CreateAssignment, UpdateAssignment},
        Asset, Employee,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AssignmentsService {
    repository: Repository,
    policy: UnserviceableAssignmentPolicy,
}

impl AssignmentsService {
    pub fn new(repository: Repository, policy: UnserviceableAssignmentPolicy) -> Self {
        Self { repository, policy }
    }

    pub async fn list(&self, query: &AssignmentQuery) -> AppResult<Vec<AssignmentDetails>> {
        self.repository.assignments.list(query).await
    }

    pub async fn get(&self, id: i32) -> AppResult<AssignmentDetails> {
        self.repository.assignments.get_details(id).await
    }

    /// Hand an asset to an employee.
    ///
    /// A request that already carries a returned date is a history-only entry:
    /// it is validated and stored, and the asset is left untouched.
    pub async fn create(&self, data: &CreateAssignment) -> AppResult<AssignmentDetails> {
        let assigned_date = data.assigned_date.unwrap_or_else(Utc::now);
        lifecycle::validate_date_order(DatePair::AssignedReturned, assigned_date, data.returned_date)?;
        let notes = data.notes.as_deref().unwrap_or_default().trim();

        let mut tx = self.repository.begin().await?;

        let asset = self.lock_asset(&mut tx, data.asset_id).await?;
        let employee = self.lock_employee(&mut tx, data.employee_id).await?;

        if data.returned_date.is_some() {
            let record = self
                .repository
                .assignments
                .create(&mut tx, asset.id, employee.id, assigned_date, data.returned_date, notes)
                .await?;
            tx.commit().await?;

            tracing::info!(assignment_id = record.id, asset_id = asset.id, "Historical assignment recorded");
            return self.get(record.id).await;
        }

        if self
            .repository
            .assignments
            .lock_open_for_asset(&mut tx, asset.id)
            .await?
            .is_some()
        {
            return Err(LifecycleError::AssetAlreadyAssigned(asset.id).into());
        }

        let transition = lifecycle::on_assign(&asset, &employee, self.policy)?;
        if !asset.condition.is_serviceable() {
            tracing::warn!(
                asset_id = asset.id,
                employee_id = employee.id,
                condition = %asset.condition,
                status = %transition.status,
                "Unserviceable asset handed out, recorded without setting the holder"
            );
        }

        let record = self
            .repository
            .assignments
            .create(&mut tx, asset.id, employee.id, assigned_date, None, notes)
            .await?;
        self.repository
            .assets
            .apply_transition(&mut tx, asset.id, &transition)
            .await?;
        tx.commit().await?;

        tracing::info!(
            assignment_id = record.id,
            asset_id = asset.id,
            employee_id = employee.id,
            status = %transition.status,
            "Asset assigned"
        );
        self.get(record.id).await
    }

    /// Edit dates or notes; closing an open record returns the asset
    pub async fn update(&self, id: i32, data: &UpdateAssignment) -> AppResult<AssignmentDetails> {
        let mut tx = self.repository.begin().await?;

        let mut record = self.repository.assignments.lock(&mut tx, id).await?;
        let was_open = record.is_open();

        if let Some(assigned_date) = data.assigned_date {
            record.assigned_date = assigned_date;
        }
        if let Some(returned_date) = data.returned_date {
            record.returned_date = Some(returned_date);
        }
        if let Some(ref notes) = data.notes {
            record.notes = notes.trim().to_string();
        }
        lifecycle::validate_date_order(DatePair::AssignedReturned, record.assigned_date, record.returned_date)?;

        self.repository.assignments.update(&mut tx, &record).await?;

        if was_open && !record.is_open() {
            self.release_asset(&mut tx, record.asset_id).await?;
        }
        tx.commit().await?;

        self.get(id).await
    }

    /// Close an open record as of now
    pub async fn return_now(&self, id: i32) -> AppResult<AssignmentDetails> {
        let mut tx = self.repository.begin().await?;

        let mut record = self.repository.assignments.lock(&mut tx, id).await?;
        if !record.is_open() {
            return Err(AppError::Conflict(format!("Assignment {} has already been returned", id)));
        }

        record.returned_date = Some(Utc::now());
        lifecycle::validate_date_order(DatePair::AssignedReturned, record.assigned_date, record.returned_date)?;

        self.repository.assignments.update(&mut tx, &record).await?;
        self.release_asset(&mut tx, record.asset_id).await?;
        tx.commit().await?;

        self.get(id).await
    }

    /// Delete a closed record; open ones must be returned first
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.repository.begin().await?;

        let record = self.repository.assignments.lock(&mut tx, id).await?;
        if record.is_open() {
            return Err(LifecycleError::AssignmentOpen(id).into());
        }

        self.repository.assignments.delete(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!(assignment_id = id, "Assignment deleted");
        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.repository.assignments.count().await
    }

    async fn release_asset(&self, conn: &mut PgConnection, asset_id: i32) -> AppResult<()> {
        let asset = self.lock_asset(conn, asset_id).await?;
        let transition = lifecycle::on_return(&asset);
        self.repository
            .assets
            .apply_transition(conn, asset_id, &transition)
            .await?;

        tracing::info!(asset_id, status = %transition.status, "Asset returned");
        Ok(())
    }

    async fn lock_asset(&self, conn: &mut PgConnection, id: i32) -> AppResult<Asset> {
        self.repository
            .assets
            .lock(conn, id)
            .await?
            .ok_or_else(|| LifecycleError::NotFound { entity: "Asset", id }.into())
    }

    async fn lock_employee(&self, conn: &mut PgConnection, id: i32) -> AppResult<Employee> {
        self.repository
            .employees
            .lock(conn, id)
            .await?
            .ok_or_else(|| LifecycleError::NotFound { entity: "Employee", id }.into())
    }
}

