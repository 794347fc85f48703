use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::issue::errors::IssueError;
use crate::issue::models::IssueId;
use crate::issue::ports::IssueServicePort;

pub async fn delete_issue(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(issue_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let issue_id = IssueId::from_string(&issue_id).map_err(IssueError::from)?;

    state
        .issue_service
        .delete_issue(current.user_id, &issue_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
