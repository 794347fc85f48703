use std::sync::Arc;

use auth::AuthenticationError;
use auth::Claims;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::models::Username;
use crate::user::ports::UserServicePort;

/// Uniform login failure: unknown usernames and wrong passwords are not
/// distinguishable from the outside.
fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("Invalid username or password".to_string())
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let username = Username::new(body.username).map_err(|_| invalid_credentials())?;

    let user = state
        .user_service
        .get_user_by_username(&username)
        .await
        .map_err(|e| match e {
            UserError::NotFoundByUsername(_) => {
                tracing::warn!(reason = "unknown_username", "Login failed");
                invalid_credentials()
            }
            _ => ApiError::from(e),
        })?;

    // Password verification is CPU-bound; keep it off the async executor.
    let authenticator = Arc::clone(&state.authenticator);
    let password = body.password;
    let stored_hash = user.password_hash.clone();
    let claims = Claims::for_subject(user.id);

    let token = tokio::task::spawn_blocking(move || {
        authenticator.login(&password, &stored_hash, claims)
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("Login task failed: {}", e)))?
    .map_err(|e| match e {
        AuthenticationError::InvalidCredentials => {
            tracing::warn!(reason = "wrong_password", "Login failed");
            invalid_credentials()
        }
        other => ApiError::InternalServerError(other.to_string()),
    })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            access_token: token,
            token_type: "bearer".to_string(),
            user: (&user).into(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: String,
    pub user: UserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            username: user.username.as_str().to_string(),
            full_name: user.full_name.clone(),
        }
    }
}
