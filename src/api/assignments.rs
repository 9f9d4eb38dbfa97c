//! Assignment API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::assignment::{AssignmentDetails, AssignmentQuery, CreateAssignment, UpdateAssignment},
    AppState,
};

use super::{AuthenticatedUser, ValidatedJson};

/// List assignment records
#[utoipa::path(
    get,
    path = "/assignments",
    tag = "assignments",
    security(("session_cookie" = [])),
    params(AssignmentQuery),
    responses(
        (status = 200, description = "Assignment records, newest first", body = Vec<AssignmentDetails>)
    )
)]
pub async fn list_assignments(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<AssignmentQuery>,
) -> AppResult<Json<Vec<AssignmentDetails>>> {
    let records = state.services.assignments.list(&query).await?;
    Ok(Json(records))
}

/// Get assignment record by ID
#[utoipa::path(
    get,
    path = "/assignments/{id}",
    tag = "assignments",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment record", body = AssignmentDetails),
        (status = 404, description = "Assignment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_assignment(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<AssignmentDetails>> {
    let record = state.services.assignments.get(id).await?;
    Ok(Json(record))
}

/// Assign an asset to an employee
#[utoipa::path(
    post,
    path = "/assignments",
    tag = "assignments",
    security(("session_cookie" = [])),
    request_body = CreateAssignment,
    responses(
        (status = 201, description = "Assignment recorded", body = AssignmentDetails),
        (status = 400, description = "Invalid dates", body = crate::error::ErrorResponse),
        (status = 404, description = "Asset or employee not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Asset already assigned", body = crate::error::ErrorResponse),
        (status = 422, description = "Asset cannot be handed out in its condition", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_assignment(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<CreateAssignment>,
) -> AppResult<(StatusCode, Json<AssignmentDetails>)> {
    let record = state.services.assignments.create(&data).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Update an assignment record (setting a returned date records the return)
#[utoipa::path(
    put,
    path = "/assignments/{id}",
    tag = "assignments",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Assignment ID")),
    request_body = UpdateAssignment,
    responses(
        (status = 200, description = "Assignment updated", body = AssignmentDetails),
        (status = 400, description = "Invalid dates", body = crate::error::ErrorResponse),
        (status = 404, description = "Assignment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_assignment(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    ValidatedJson(data): ValidatedJson<UpdateAssignment>,
) -> AppResult<Json<AssignmentDetails>> {
    let record = state.services.assignments.update(id, &data).await?;
    Ok(Json(record))
}

/// Record the return of an asset now
#[utoipa::path(
    post,
    path = "/assignments/{id}/return",
    tag = "assignments",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Asset returned", body = AssignmentDetails),
        (status = 404, description = "Assignment not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Already returned", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_assignment(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<AssignmentDetails>> {
    let record = state.services.assignments.return_now(id).await?;
    Ok(Json(record))
}

/// Delete a closed assignment record
#[utoipa::path(
    delete,
    path = "/assignments/{id}",
    tag = "assignments",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Assignment ID")),
    responses(
        (status = 204, description = "Assignment deleted"),
        (status = 404, description = "Assignment not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Assignment still open", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_assignment(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.assignments.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
