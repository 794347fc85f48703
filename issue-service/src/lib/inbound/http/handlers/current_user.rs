use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;

/// `GET /api/auth/me` - identity behind the presented token.
///
/// The middleware has already authenticated the request; this just projects
/// the identity it stored.
pub async fn current_user(
    Extension(current): Extension<CurrentUser>,
) -> Result<ApiSuccess<CurrentUserResponseData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        CurrentUserResponseData {
            id: current.identity.id,
            email: current.identity.email,
            username: current.identity.username,
            full_name: current.identity.full_name,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponseData {
    pub id: String,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
}
