use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_issue::create_issue;
use super::handlers::current_user::current_user;
use super::handlers::delete_issue::delete_issue;
use super::handlers::get_issue::get_issue;
use super::handlers::list_issues::list_issues;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_issue::update_issue;
use super::middleware::authenticate as auth_middleware;
use crate::domain::issue::service::IssueService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::issue::PostgresIssueRepository;
use crate::outbound::repositories::user::PostgresUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PostgresUserRepository>>,
    pub issue_service: Arc<IssueService<PostgresIssueRepository>>,
    pub user_repository: Arc<PostgresUserRepository>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    user_service: Arc<UserService<PostgresUserRepository>>,
    issue_service: Arc<IssueService<PostgresIssueRepository>>,
    user_repository: Arc<PostgresUserRepository>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        user_service,
        issue_service,
        user_repository,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login));

    let protected_routes = Router::new()
        .route("/api/auth/me", get(current_user))
        .route("/api/issues", post(create_issue))
        .route("/api/issues", get(list_issues))
        .route("/api/issues/:issue_id", get(get_issue))
        .route("/api/issues/:issue_id", put(update_issue))
        .route("/api/issues/:issue_id", delete(delete_issue))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
