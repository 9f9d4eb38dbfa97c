//! Report endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::report::{AssetsByStatusReport, EmployeeUtilization, ExpiringAsset},
    AppState,
};

use super::AuthenticatedUser;

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ExpiringQuery {
    /// Window in days (server default when omitted)
    pub within_days: Option<i32>,
}

/// Assets grouped by status
#[utoipa::path(
    get,
    path = "/reports/assets-by-status",
    tag = "reports",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Assets by status", body = AssetsByStatusReport)
    )
)]
pub async fn assets_by_status(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<AssetsByStatusReport>> {
    let report = state.services.reports.assets_by_status().await?;
    Ok(Json(report))
}

/// Assets whose warranty expires soon
#[utoipa::path(
    get,
    path = "/reports/expiring-assets",
    tag = "reports",
    security(("session_cookie" = [])),
    params(ExpiringQuery),
    responses(
        (status = 200, description = "Expiring warranties, soonest first", body = Vec<ExpiringAsset>)
    )
)]
pub async fn expiring_assets(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<ExpiringQuery>,
) -> AppResult<Json<Vec<ExpiringAsset>>> {
    let assets = state.services.reports.expiring_assets(query.within_days).await?;
    Ok(Json(assets))
}

/// Open assignments per employee
#[utoipa::path(
    get,
    path = "/reports/employee-utilization",
    tag = "reports",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Employee utilization", body = Vec<EmployeeUtilization>)
    )
)]
pub async fn employee_utilization(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<EmployeeUtilization>>> {
    let rows = state.services.reports.employee_utilization().await?;
    Ok(Json(rows))
}
