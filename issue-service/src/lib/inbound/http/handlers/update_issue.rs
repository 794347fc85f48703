use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::IssueData;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::issue::errors::IssueError;
use crate::issue::models::IssueId;
use crate::issue::models::IssuePriority;
use crate::issue::models::IssueStatus;
use crate::issue::models::IssueTitle;
use crate::issue::models::UpdateIssueCommand;
use crate::issue::ports::IssueServicePort;

pub async fn update_issue(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(issue_id): Path<String>,
    Json(body): Json<UpdateIssueRequest>,
) -> Result<ApiSuccess<IssueData>, ApiError> {
    let issue_id = IssueId::from_string(&issue_id).map_err(IssueError::from)?;
    let command = body.try_into_command().map_err(ApiError::from)?;

    state
        .issue_service
        .update_issue(current.user_id, &issue_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref issue| ApiSuccess::new(StatusCode::OK, issue.into()))
}

/// HTTP request body replacing an issue's mutable fields (PUT semantics:
/// all fields required except the assignee).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateIssueRequest {
    title: String,
    status: String,
    priority: String,
    #[serde(default)]
    assignee: Option<String>,
}

impl UpdateIssueRequest {
    fn try_into_command(self) -> Result<UpdateIssueCommand, IssueError> {
        Ok(UpdateIssueCommand {
            title: IssueTitle::new(self.title)?,
            status: self.status.parse::<IssueStatus>()?,
            priority: self.priority.parse::<IssuePriority>()?,
            assignee: self.assignee.filter(|a| !a.is_empty()),
        })
    }
}
