use auth::AuthenticationError;
use auth::Identity;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Authenticated requester, stored in request extensions by the middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub identity: Identity,
}

/// Middleware guarding the protected routes.
///
/// Runs the full authentication flow (bearer extraction, token
/// verification, user lookup, active-account policy) and stashes the
/// resulting identity in request extensions. Every rejection is a uniform
/// 401 body; the precise cause only reaches the log.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let identity = state
        .authenticator
        .authenticate(req.headers(), state.user_repository.as_ref())
        .await
        .map_err(reject)?;

    // The subject was just matched against the store, so it parses.
    let user_id = UserId::from_string(&identity.id).map_err(|e| {
        tracing::error!(error = %e, "Authenticated subject is not a valid user id");
        internal_error()
    })?;

    req.extensions_mut()
        .insert(CurrentUser { user_id, identity });

    Ok(next.run(req).await)
}

fn reject(err: AuthenticationError) -> Response {
    match err {
        AuthenticationError::Store(_) => {
            // A store outage is a server fault, not a credential problem.
            tracing::error!(error = %err, "User store unavailable during authentication");
            internal_error()
        }
        _ => {
            tracing::warn!(reason = err.reason(), "Authentication failed");
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Not authenticated"
                })),
            )
                .into_response()
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Internal server error"
        })),
    )
        .into_response()
}
