//! Business logic services

pub mod assets;
pub mod assignments;
pub mod auth;
pub mod employees;
pub mod redis;
pub mod reports;

use crate::{config::AppConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub assets: assets::AssetsService,
    pub employees: employees::EmployeesService,
    pub assignments: assignments::AssignmentsService,
    pub reports: reports::ReportsService,
    pub auth: auth::AuthService,
    pub redis: redis::RedisService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig, redis_service: redis::RedisService) -> Self {
        Self {
            assets: assets::AssetsService::new(repository.clone()),
            employees: employees::EmployeesService::new(repository.clone()),
            assignments: assignments::AssignmentsService::new(
                repository.clone(),
                config.lifecycle.unserviceable_assignment,
            ),
            reports: reports::ReportsService::new(repository.clone(), config.reports.clone()),
            auth: auth::AuthService::new(repository, config.auth.clone(), redis_service.clone()),
            redis: redis_service,
        }
    }
}
