//! Reporting service

use crate::{
    config::ReportsConfig,
    error::{AppError, AppResult},
    models::report::{AssetsByStatusReport, EmployeeUtilization, ExpiringAsset},
    repository::Repository,
};

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
    config: ReportsConfig,
}

impl ReportsService {
    pub fn new(repository: Repository, config: ReportsConfig) -> Self {
        Self { repository, config }
    }

    /// Every asset with its status, plus a count per status
    pub async fn assets_by_status(&self) -> AppResult<AssetsByStatusReport> {
        let rows = self.repository.reports.asset_statuses().await?;
        Ok(AssetsByStatusReport::from_rows(rows))
    }

    /// Assets whose warranty ends within `within_days` (configured default when absent)
    pub async fn expiring_assets(&self, within_days: Option<i32>) -> AppResult<Vec<ExpiringAsset>> {
        let days = within_days.unwrap_or(self.config.expiring_within_days);
        if days < 0 {
            return Err(AppError::BadRequest("within_days must not be negative".to_string()));
        }
        self.repository.reports.expiring_assets(days).await
    }

    pub async fn employee_utilization(&self) -> AppResult<Vec<EmployeeUtilization>> {
        self.repository.reports.employee_utilization().await
    }
}
