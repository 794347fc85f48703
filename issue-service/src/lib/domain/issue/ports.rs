use async_trait::async_trait;

use crate::domain::user::models::UserId;
use crate::issue::errors::IssueError;
use crate::issue::models::CreateIssueCommand;
use crate::issue::models::Issue;
use crate::issue::models::IssueFilter;
use crate::issue::models::IssueId;
use crate::issue::models::IssuePage;
use crate::issue::models::UpdateIssueCommand;

/// Port for issue domain service operations.
///
/// Every operation is scoped to the acting user: an issue owned by someone
/// else behaves exactly like one that does not exist.
#[async_trait]
pub trait IssueServicePort: Send + Sync + 'static {
    /// Create an issue owned by `owner`.
    ///
    /// # Errors
    /// * `DatabaseError` - Persistence failed
    async fn create_issue(
        &self,
        owner: UserId,
        command: CreateIssueCommand,
    ) -> Result<Issue, IssueError>;

    /// Retrieve one of `owner`'s issues.
    ///
    /// # Errors
    /// * `NotFound` - Absent, or owned by another user
    /// * `DatabaseError` - Database operation failed
    async fn get_issue(&self, owner: UserId, id: &IssueId) -> Result<Issue, IssueError>;

    /// List `owner`'s issues with filtering, sorting, and pagination.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_issues(&self, owner: UserId, filter: IssueFilter)
        -> Result<IssuePage, IssueError>;

    /// Replace an issue's mutable fields and bump `updated_at`.
    ///
    /// # Errors
    /// * `NotFound` - Absent, or owned by another user
    /// * `DatabaseError` - Database operation failed
    async fn update_issue(
        &self,
        owner: UserId,
        id: &IssueId,
        command: UpdateIssueCommand,
    ) -> Result<Issue, IssueError>;

    /// Delete one of `owner`'s issues.
    ///
    /// # Errors
    /// * `NotFound` - Absent, or owned by another user
    /// * `DatabaseError` - Database operation failed
    async fn delete_issue(&self, owner: UserId, id: &IssueId) -> Result<(), IssueError>;
}

/// Persistence operations for the issue aggregate.
#[async_trait]
pub trait IssueRepository: Send + Sync + 'static {
    /// Persist a new issue.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, issue: Issue) -> Result<Issue, IssueError>;

    /// Retrieve an issue by owner and id (`None` if either does not match).
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, owner: UserId, id: &IssueId) -> Result<Option<Issue>, IssueError>;

    /// List an owner's issues for `filter`, returning the page items and
    /// the unpaged total.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list(&self, owner: UserId, filter: &IssueFilter)
        -> Result<(Vec<Issue>, i64), IssueError>;

    /// Update an existing issue, matched by id and owner.
    ///
    /// # Errors
    /// * `NotFound` - No matching row
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, issue: Issue) -> Result<Issue, IssueError>;

    /// Delete an issue by owner and id.
    ///
    /// # Errors
    /// * `NotFound` - No matching row
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, owner: UserId, id: &IssueId) -> Result<(), IssueError>;
}
