//! Authentication endpoints (cookie sessions)

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{config::AuthConfig, error::AppResult, AppState};

use super::{AuthenticatedUser, ValidatedJson};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthStatus {
    pub is_authenticated: bool,
    pub username: Option<String>,
}

fn session_cookie(config: &AuthConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        // Cross-site cookies need None, which browsers only accept together with Secure
        .same_site(if config.cookie_secure { SameSite::None } else { SameSite::Lax })
        .build()
}

/// Log in and receive a session cookie
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in, session cookie set", body = AuthStatus),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<AuthStatus>)> {
    let session = state
        .services
        .auth
        .login(&request.username, &request.password)
        .await?;

    let jar = jar.add(session_cookie(&state.config.auth, session.token));
    Ok((
        jar,
        Json(AuthStatus {
            is_authenticated: true,
            username: Some(session.username),
        }),
    ))
}

/// Log out and clear the session cookie
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    security(("session_cookie" = [])),
    responses(
        (status = 204, description = "Logged out")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    jar: CookieJar,
) -> AppResult<(CookieJar, StatusCode)> {
    state.services.auth.logout(&session.token).await?;
    tracing::info!(username = %session.username, "User logged out");

    let jar = jar.remove(Cookie::build((state.config.auth.cookie_name.clone(), "")).path("/"));
    Ok((jar, StatusCode::NO_CONTENT))
}

/// Whether the caller holds a live session
#[utoipa::path(
    get,
    path = "/auth/status",
    tag = "auth",
    responses(
        (status = 200, description = "Session status", body = AuthStatus)
    )
)]
pub async fn status(user: Option<AuthenticatedUser>) -> Json<AuthStatus> {
    Json(match user {
        Some(AuthenticatedUser(session)) => AuthStatus {
            is_authenticated: true,
            username: Some(session.username),
        },
        None => AuthStatus {
            is_authenticated: false,
            username: None,
        },
    })
}
