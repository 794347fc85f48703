use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::IssueData;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::issue::errors::IssueError;
use crate::issue::models::IssueFilter;
use crate::issue::models::IssuePage;
use crate::issue::models::IssuePriority;
use crate::issue::models::IssueSort;
use crate::issue::models::IssueStatus;
use crate::issue::models::Page;
use crate::issue::ports::IssueServicePort;

pub async fn list_issues(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(params): Query<ListIssuesParams>,
) -> Result<ApiSuccess<ListIssuesResponseData>, ApiError> {
    let filter = params.try_into_filter().map_err(ApiError::from)?;

    state
        .issue_service
        .list_issues(current.user_id, filter)
        .await
        .map_err(ApiError::from)
        .map(|ref page| ApiSuccess::new(StatusCode::OK, page.into()))
}

/// Listing query parameters (raw strings, camelCase like the rest of the
/// wire format). Blank values are treated as absent so a cleared filter
/// field in a client form does not over-constrain the query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListIssuesParams {
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    assignee: Option<String>,
    #[serde(default)]
    sort: Option<String>,
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    page_size: Option<u32>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ListIssuesParams {
    fn try_into_filter(self) -> Result<IssueFilter, IssueError> {
        let status = non_blank(self.status)
            .map(|raw| raw.parse::<IssueStatus>())
            .transpose()?;
        let priority = non_blank(self.priority)
            .map(|raw| raw.parse::<IssuePriority>())
            .transpose()?;
        let sort = non_blank(self.sort)
            .map(|raw| raw.parse::<IssueSort>())
            .transpose()?
            .unwrap_or_default();

        Ok(IssueFilter {
            search: non_blank(self.search),
            status,
            priority,
            assignee: non_blank(self.assignee),
            sort,
            page: Page::new(self.page, self.page_size),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListIssuesResponseData {
    pub items: Vec<IssueData>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
}

impl From<&IssuePage> for ListIssuesResponseData {
    fn from(page: &IssuePage) -> Self {
        Self {
            items: page.items.iter().map(IssueData::from).collect(),
            total: page.total,
            page: page.page.number,
            page_size: page.page.size,
        }
    }
}
