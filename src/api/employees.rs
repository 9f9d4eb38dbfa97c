//! Employee API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::employee::{CreateEmployee, EmployeeDetails, UpdateEmployee},
    AppState,
};

use super::{AuthenticatedUser, ValidatedJson};

/// List employees with the assets they hold
#[utoipa::path(
    get,
    path = "/employees",
    tag = "employees",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Employee list", body = Vec<EmployeeDetails>)
    )
)]
pub async fn list_employees(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<EmployeeDetails>>> {
    let employees = state.services.employees.list().await?;
    Ok(Json(employees))
}

/// Get employee by ID
#[utoipa::path(
    get,
    path = "/employees/{id}",
    tag = "employees",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee details", body = EmployeeDetails),
        (status = 404, description = "Employee not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_employee(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<EmployeeDetails>> {
    let employee = state.services.employees.get(id).await?;
    Ok(Json(employee))
}

/// Create employee
#[utoipa::path(
    post,
    path = "/employees",
    tag = "employees",
    security(("session_cookie" = [])),
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = EmployeeDetails),
        (status = 400, description = "Invalid data", body = crate::error::ErrorResponse),
        (status = 409, description = "Email or phone already in use", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_employee(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<CreateEmployee>,
) -> AppResult<(StatusCode, Json<EmployeeDetails>)> {
    let employee = state.services.employees.create(&data).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Update employee
#[utoipa::path(
    put,
    path = "/employees/{id}",
    tag = "employees",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeDetails),
        (status = 404, description = "Employee not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Email or phone already in use", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_employee(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    ValidatedJson(data): ValidatedJson<UpdateEmployee>,
) -> AppResult<Json<EmployeeDetails>> {
    let employee = state.services.employees.update(id, &data).await?;
    Ok(Json(employee))
}

/// Delete employee
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    tag = "employees",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Employee not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Employee still holds assets", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.employees.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
