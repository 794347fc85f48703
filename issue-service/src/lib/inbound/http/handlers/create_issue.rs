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
use crate::issue::models::CreateIssueCommand;
use crate::issue::models::IssuePriority;
use crate::issue::models::IssueStatus;
use crate::issue::models::IssueTitle;
use crate::issue::ports::IssueServicePort;

pub async fn create_issue(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<CreateIssueRequest>,
) -> Result<ApiSuccess<IssueData>, ApiError> {
    let command = body.try_into_command().map_err(ApiError::from)?;

    state
        .issue_service
        .create_issue(current.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref issue| ApiSuccess::new(StatusCode::CREATED, issue.into()))
}

/// HTTP request body for creating an issue (raw JSON)
///
/// `status` and `priority` fall back to `open` / `medium` when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateIssueRequest {
    title: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    assignee: Option<String>,
}

impl CreateIssueRequest {
    fn try_into_command(self) -> Result<CreateIssueCommand, IssueError> {
        let title = IssueTitle::new(self.title)?;
        let status = match self.status.as_deref() {
            Some(raw) => raw.parse::<IssueStatus>()?,
            None => IssueStatus::default(),
        };
        let priority = match self.priority.as_deref() {
            Some(raw) => raw.parse::<IssuePriority>()?,
            None => IssuePriority::default(),
        };

        Ok(CreateIssueCommand {
            title,
            status,
            priority,
            assignee: self.assignee.filter(|a| !a.is_empty()),
        })
    }
}
