//! Startup seeding: the admin account and a small demo data set

use chrono::{Duration, Months, Utc};

use crate::{
    config::AppConfig,
    error::AppResult,
    models::{
        asset::CreateAsset,
        assignment::CreateAssignment,
        employee::CreateEmployee,
        enums::{Condition, EmployeeStatus},
    },
    repository::Repository,
    services::Services,
};

/// Seed what is missing. Failures are logged and never abort startup.
pub async fn run(config: &AppConfig, repository: &Repository, services: &Services) {
    if let Err(e) = services.auth.ensure_admin().await {
        tracing::error!(error = %e, "Failed to seed admin user");
    }

    if !config.seed.sample_data {
        return;
    }

    if let Err(e) = seed_sample_data(repository, services).await {
        tracing::error!(error = %e, "Error during sample data seeding");
    }
}

async fn seed_sample_data(repository: &Repository, services: &Services) -> AppResult<()> {
    if services.employees.count().await? == 0 {
        for employee in sample_employees() {
            services.employees.create(&employee).await?;
        }
        tracing::info!("Seeded employees");
    }

    let mut printer_id = None;
    if services.assets.count().await? == 0 {
        for asset in sample_assets() {
            let created = services.assets.create(&asset).await?;
            if created.asset.serial_number == "HP-404-PRN" {
                printer_id = Some(created.asset.id);
            }
        }
        tracing::info!("Seeded assets");
    }

    if services.assignments.count().await? == 0 {
        let employee = repository.employees.first_active().await?;
        if let (Some(asset_id), Some(employee)) = (printer_id, employee) {
            services
                .assignments
                .create(&CreateAssignment {
                    asset_id,
                    employee_id: employee.id,
                    assigned_date: Some(Utc::now() - Duration::days(15)),
                    returned_date: None,
                    notes: Some("Assigned during onboarding".to_string()),
                })
                .await?;
            tracing::info!("Seeded assignment history");
        }
    }

    Ok(())
}

fn sample_employees() -> Vec<CreateEmployee> {
    let employee = |full_name: &str, department: &str, designation: &str, email: &str, phone: &str, status| {
        CreateEmployee {
            full_name: full_name.to_string(),
            department: department.to_string(),
            email: email.to_string(),
            phone_number: Some(phone.to_string()),
            designation: designation.to_string(),
            status: Some(status),
        }
    };

    vec![
        employee("John Doe", "IT", "System Admin", "john.doe@company.com", "9876543210", EmployeeStatus::Active),
        employee("Jane Smith", "Finance", "Accountant", "jane.smith@company.com", "9988776655", EmployeeStatus::Active),
        employee(
            "David Miller",
            "Operations",
            "Coordinator",
            "david.miller@company.com",
            "9123456780",
            EmployeeStatus::Inactive,
        ),
    ]
}

fn sample_assets() -> Vec<CreateAsset> {
    let today = Utc::now().date_naive();
    let asset = |name: &str, asset_type: &str, make_model: &str, serial: &str, condition, spare, years: u32| {
        CreateAsset {
            name: name.to_string(),
            asset_type: asset_type.to_string(),
            make_model: Some(make_model.to_string()),
            serial_number: serial.to_string(),
            purchase_date: Some(today),
            warranty_expiry_date: today + Months::new(12 * years),
            condition: Some(condition),
            is_spare: Some(spare),
            specifications: None,
        }
    };

    vec![
        asset("Dell Latitude 5420", "Laptop", "Dell 5420 i7", "DL-2023-001", Condition::Good, false, 2),
        asset("HP LaserJet Pro MFP", "Printer", "HP M404dw", "HP-404-PRN", Condition::New, false, 1),
        asset("MacBook Air M2", "Laptop", "Apple M2 Air", "MB-M2-0001", Condition::New, true, 3),
    ]
}
