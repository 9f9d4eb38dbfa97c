//! Repository layer for database operations
//!
//! Read helpers run on the pool. Anything that takes a `&mut PgConnection`
//! is meant to be called inside the caller's transaction.

pub mod assets;
pub mod assignments;
pub mod employees;
pub mod reports;
pub mod users;

use sqlx::{Pool, Postgres, Transaction};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub assets: assets::AssetsRepository,
    pub employees: employees::EmployeesRepository,
    pub assignments: assignments::AssignmentsRepository,
    pub reports: reports::ReportsRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            assets: assets::AssetsRepository::new(pool.clone()),
            employees: employees::EmployeesRepository::new(pool.clone()),
            assignments: assignments::AssignmentsRepository::new(pool.clone()),
            reports: reports::ReportsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }

    /// Start a transaction; dropping it without `commit` rolls back
    pub async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        Ok(self.pool.begin().await?)
    }

    /// Database round-trip used by the readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
