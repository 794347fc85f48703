use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::UserId;
use crate::issue::errors::IssueError;
use crate::issue::models::CreateIssueCommand;
use crate::issue::models::Issue;
use crate::issue::models::IssueFilter;
use crate::issue::models::IssueId;
use crate::issue::models::IssuePage;
use crate::issue::models::UpdateIssueCommand;
use crate::issue::ports::IssueRepository;
use crate::issue::ports::IssueServicePort;

/// Domain service implementation for issue operations.
///
/// Generic over the repository for testability.
pub struct IssueService<IR>
where
    IR: IssueRepository,
{
    repository: Arc<IR>,
}

impl<IR> IssueService<IR>
where
    IR: IssueRepository,
{
    pub fn new(repository: Arc<IR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<IR> IssueServicePort for IssueService<IR>
where
    IR: IssueRepository,
{
    async fn create_issue(
        &self,
        owner: UserId,
        command: CreateIssueCommand,
    ) -> Result<Issue, IssueError> {
        let now = Utc::now();
        let issue = Issue {
            id: IssueId::new(),
            owner_id: owner,
            title: command.title,
            status: command.status,
            priority: command.priority,
            assignee: command.assignee,
            created_at: now,
            updated_at: now,
        };

        self.repository.create(issue).await
    }

    async fn get_issue(&self, owner: UserId, id: &IssueId) -> Result<Issue, IssueError> {
        self.repository
            .find_by_id(owner, id)
            .await?
            .ok_or(IssueError::NotFound(id.to_string()))
    }

    async fn list_issues(
        &self,
        owner: UserId,
        filter: IssueFilter,
    ) -> Result<IssuePage, IssueError> {
        let page = filter.page;
        let (items, total) = self.repository.list(owner, &filter).await?;

        Ok(IssuePage { items, total, page })
    }

    async fn update_issue(
        &self,
        owner: UserId,
        id: &IssueId,
        command: UpdateIssueCommand,
    ) -> Result<Issue, IssueError> {
        let mut issue = self
            .repository
            .find_by_id(owner, id)
            .await?
            .ok_or(IssueError::NotFound(id.to_string()))?;

        issue.title = command.title;
        issue.status = command.status;
        issue.priority = command.priority;
        issue.assignee = command.assignee;
        issue.updated_at = Utc::now();

        self.repository.update(issue).await
    }

    async fn delete_issue(&self, owner: UserId, id: &IssueId) -> Result<(), IssueError> {
        self.repository.delete(owner, id).await
    }
}
