//! OpenAPI documentation

use axum::Router;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{assets, assignments, auth, employees, health, reports};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Asset Tracker API",
        version = "1.0.0",
        description = "IT asset tracking REST API: assets, employees, assignments and reports",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::logout,
        auth::status,
        // Assets
        assets::list_assets,
        assets::get_asset,
        assets::get_asset_history,
        assets::create_asset,
        assets::update_asset,
        assets::delete_asset,
        // Employees
        employees::list_employees,
        employees::get_employee,
        employees::create_employee,
        employees::update_employee,
        employees::delete_employee,
        // Assignments
        assignments::list_assignments,
        assignments::get_assignment,
        assignments::create_assignment,
        assignments::update_assignment,
        assignments::return_assignment,
        assignments::delete_assignment,
        // Reports
        reports::assets_by_status,
        reports::expiring_assets,
        reports::employee_utilization,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::AuthStatus,
            // Assets
            crate::models::asset::Asset,
            crate::models::asset::AssetDetails,
            crate::models::asset::AssetShort,
            crate::models::asset::CreateAsset,
            crate::models::asset::UpdateAsset,
            crate::models::enums::Condition,
            crate::models::enums::AssetStatus,
            // Employees
            crate::models::employee::Employee,
            crate::models::employee::EmployeeDetails,
            crate::models::employee::EmployeeShort,
            crate::models::employee::CreateEmployee,
            crate::models::employee::UpdateEmployee,
            crate::models::enums::EmployeeStatus,
            // Assignments
            crate::models::assignment::AssignmentRecord,
            crate::models::assignment::AssignmentDetails,
            crate::models::assignment::CreateAssignment,
            crate::models::assignment::UpdateAssignment,
            // Reports
            crate::models::report::AssetStatusRow,
            crate::models::report::StatusCount,
            crate::models::report::AssetsByStatusReport,
            crate::models::report::ExpiringAsset,
            crate::models::report::EmployeeUtilization,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Cookie session authentication"),
        (name = "assets", description = "Asset management"),
        (name = "employees", description = "Employee management"),
        (name = "assignments", description = "Asset assignment and return"),
        (name = "reports", description = "Reports")
    )
)]
pub struct ApiDoc;

/// Session cookie security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "asset_tracker_session",
                    "Session cookie set by /auth/login",
                ))),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
