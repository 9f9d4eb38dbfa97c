//! API handlers for the asset tracker REST endpoints

pub mod assets;
pub mod assignments;
pub mod auth;
pub mod employees;
pub mod health;
pub mod openapi;
pub mod reports;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    Json,
};
use axum_extra::extract::CookieJar;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{error::AppError, models::user::Session, AppState};

/// Extractor for the operator behind the session cookie
pub struct AuthenticatedUser(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(&state.config.auth.cookie_name)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::Authentication("Missing session cookie".to_string()))?;

        // Looking the session up also extends it
        let session = state
            .services
            .auth
            .session(&token)
            .await?
            .ok_or_else(|| AppError::Authentication("Session expired or invalid".to_string()))?;

        Ok(AuthenticatedUser(session))
    }
}

/// JSON body that has passed its `validator` rules
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::Validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employee::CreateEmployee;

    #[test]
    fn test_validation_messages_are_joined() {
        let request = CreateEmployee {
            full_name: "Al".to_string(),
            department: "IT".to_string(),
            email: "nope".to_string(),
            phone_number: None,
            designation: "Engineer".to_string(),
            status: None,
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            format_validation_errors(&errors),
            "Full name must be 3 to 100 characters, Invalid email format"
        );
    }
}
