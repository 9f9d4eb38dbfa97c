//! Employees repository for database operations

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::employee::{CreateEmployee, Employee},
};

#[derive(Clone)]
pub struct EmployeesRepository {
    pool: Pool<Postgres>,
}

impl EmployeesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all employees
    pub async fn list(&self) -> AppResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY full_name, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }

    /// Get employee by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Employee> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))
    }

    /// Load an employee and lock its row until the transaction ends
    pub async fn lock(&self, conn: &mut PgConnection, id: i32) -> AppResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(employee)
    }

    /// Check if email already exists (case-insensitive)
    pub async fn email_exists(
        &self,
        conn: &mut PgConnection,
        email: &str,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE LOWER(email) = LOWER($1) AND ($2::int IS NULL OR id <> $2))",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(exists)
    }

    /// Check if a (non-empty) phone number already exists
    pub async fn phone_exists(
        &self,
        conn: &mut PgConnection,
        phone_number: &str,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE phone_number = $1 AND ($2::int IS NULL OR id <> $2))",
        )
        .bind(phone_number)
        .bind(exclude_id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(exists)
    }

    /// Insert a new employee. `phone_number` must already be normalized.
    pub async fn create(
        &self,
        conn: &mut PgConnection,
        data: &CreateEmployee,
        phone_number: Option<&str>,
    ) -> AppResult<Employee> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (full_name, department, email, phone_number, designation, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&data.full_name)
        .bind(&data.department)
        .bind(data.email.trim())
        .bind(phone_number)
        .bind(&data.designation)
        .bind(data.status.unwrap_or_default())
        .fetch_one(&mut *conn)
        .await?;
        Ok(employee)
    }

    /// Write back every mutable field of an employee
    pub async fn update(&self, conn: &mut PgConnection, employee: &Employee) -> AppResult<Employee> {
        sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees SET
                full_name = $2, department = $3, email = $4,
                phone_number = $5, designation = $6, status = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(employee.id)
        .bind(&employee.full_name)
        .bind(&employee.department)
        .bind(&employee.email)
        .bind(&employee.phone_number)
        .bind(&employee.designation)
        .bind(employee.status)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", employee.id)))
    }

    /// Delete an employee (assignment history cascades)
    pub async fn delete(&self, conn: &mut PgConnection, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Employee {} not found", id)));
        }
        Ok(())
    }

    /// First active employee, by creation order
    pub async fn first_active(&self) -> AppResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees WHERE status = 'Active' ORDER BY id LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(employee)
    }

    /// Count all employees
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
