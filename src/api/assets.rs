//! Asset API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        asset::{AssetDetails, CreateAsset, UpdateAsset},
        assignment::AssignmentDetails,
    },
    AppState,
};

use super::{AuthenticatedUser, ValidatedJson};

/// List all assets
#[utoipa::path(
    get,
    path = "/assets",
    tag = "assets",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Asset list", body = Vec<AssetDetails>)
    )
)]
pub async fn list_assets(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<AssetDetails>>> {
    let assets = state.services.assets.list().await?;
    Ok(Json(assets))
}

/// Get asset by ID
#[utoipa::path(
    get,
    path = "/assets/{id}",
    tag = "assets",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset details", body = AssetDetails),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_asset(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<AssetDetails>> {
    let asset = state.services.assets.get(id).await?;
    Ok(Json(asset))
}

/// Assignment history of an asset
#[utoipa::path(
    get,
    path = "/assets/{id}/history",
    tag = "assets",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Assignment records, newest first", body = Vec<AssignmentDetails>),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_asset_history(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<AssignmentDetails>>> {
    let history = state.services.assets.history(id).await?;
    Ok(Json(history))
}

/// Create asset
#[utoipa::path(
    post,
    path = "/assets",
    tag = "assets",
    security(("session_cookie" = [])),
    request_body = CreateAsset,
    responses(
        (status = 201, description = "Asset created", body = AssetDetails),
        (status = 400, description = "Invalid data", body = crate::error::ErrorResponse),
        (status = 409, description = "Serial number already in use", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_asset(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<CreateAsset>,
) -> AppResult<(StatusCode, Json<AssetDetails>)> {
    let asset = state.services.assets.create(&data).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

/// Update asset
#[utoipa::path(
    put,
    path = "/assets/{id}",
    tag = "assets",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Asset ID")),
    request_body = UpdateAsset,
    responses(
        (status = 200, description = "Asset updated", body = AssetDetails),
        (status = 400, description = "Invalid data", body = crate::error::ErrorResponse),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Serial number already in use", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_asset(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
    ValidatedJson(data): ValidatedJson<UpdateAsset>,
) -> AppResult<Json<AssetDetails>> {
    let asset = state.services.assets.update(id, &data).await?;
    Ok(Json(asset))
}

/// Delete asset
#[utoipa::path(
    delete,
    path = "/assets/{id}",
    tag = "assets",
    security(("session_cookie" = [])),
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 204, description = "Asset deleted"),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Asset is assigned", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_asset(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.assets.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
