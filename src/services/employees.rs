//! Employee management service

use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    lifecycle::{self, UniqueKey},
    models::{
        asset::AssetShort,
        employee::{normalize_phone, CreateEmployee, Employee, EmployeeDetails, UpdateEmployee},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EmployeesService {
    repository: Repository,
}

impl EmployeesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List employees with the assets they hold
    pub async fn list(&self) -> AppResult<Vec<EmployeeDetails>> {
        let employees = self.repository.employees.list().await?;

        let mut held: HashMap<i32, Vec<AssetShort>> = HashMap::new();
        for asset in self.repository.assets.list_held().await? {
            if let Some(employee_id) = asset.employee_id {
                held.entry(employee_id).or_default().push(AssetShort::from(&asset));
            }
        }

        Ok(employees
            .into_iter()
            .map(|employee| EmployeeDetails {
                assets: held.remove(&employee.id).unwrap_or_default(),
                employee,
            })
            .collect())
    }

    pub async fn get(&self, id: i32) -> AppResult<EmployeeDetails> {
        let employee = self.repository.employees.get_by_id(id).await?;
        let assets = self.repository.assets.list_for_employee(id).await?;
        Ok(EmployeeDetails { employee, assets })
    }

    /// Register a new employee; email and phone must be unused
    pub async fn create(&self, data: &CreateEmployee) -> AppResult<EmployeeDetails> {
        let phone_number = normalize_phone(data.phone_number.as_ref());

        let mut tx = self.repository.begin().await?;

        let taken = self.repository.employees.email_exists(&mut tx, &data.email, None).await?;
        lifecycle::ensure_unique(UniqueKey::Email, &data.email, taken)?;

        if let Some(ref phone) = phone_number {
            let taken = self.repository.employees.phone_exists(&mut tx, phone, None).await?;
            lifecycle::ensure_unique(UniqueKey::PhoneNumber, phone, taken)?;
        }

        let employee = self
            .repository
            .employees
            .create(&mut tx, data, phone_number.as_deref())
            .await?;
        tx.commit().await?;

        tracing::info!(employee_id = employee.id, "Employee created");
        Ok(EmployeeDetails {
            employee,
            assets: Vec::new(),
        })
    }

    pub async fn update(&self, id: i32, data: &UpdateEmployee) -> AppResult<EmployeeDetails> {
        let mut tx = self.repository.begin().await?;

        let mut employee = self.lock(&mut tx, id).await?;
        data.apply_to(&mut employee);

        let taken = self
            .repository
            .employees
            .email_exists(&mut tx, &employee.email, Some(id))
            .await?;
        lifecycle::ensure_unique(UniqueKey::Email, &employee.email, taken)?;

        if let Some(ref phone) = employee.phone_number {
            let taken = self.repository.employees.phone_exists(&mut tx, phone, Some(id)).await?;
            lifecycle::ensure_unique(UniqueKey::PhoneNumber, phone, taken)?;
        }

        self.repository.employees.update(&mut tx, &employee).await?;
        tx.commit().await?;

        self.get(id).await
    }

    /// Delete an employee that holds no assigned asset and no open record
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.repository.begin().await?;

        self.lock(&mut tx, id).await?;
        let statuses = self
            .repository
            .assets
            .lock_statuses_for_employee(&mut tx, id)
            .await?;
        lifecycle::ensure_employee_deletable(id, statuses)?;
        let open = self.repository.assignments.lock_open_for_employee(&mut tx, id).await?;
        lifecycle::ensure_no_open_assignment(open.as_ref())?;

        self.repository.employees.delete(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!(employee_id = id, "Employee deleted");
        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.repository.employees.count().await
    }

    async fn lock(&self, conn: &mut sqlx::PgConnection, id: i32) -> AppResult<Employee> {
        self.repository
            .employees
            .lock(conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))
    }
}
