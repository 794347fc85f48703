use thiserror::Error;

/// Error for IssueId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IssueIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for IssueTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IssueTitleError {
    #[error("Title must not be empty")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for IssueStatus parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IssueStatusError {
    #[error("Invalid status '{0}' (expected open, in_progress, or closed)")]
    InvalidValue(String),
}

/// Error for IssuePriority parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IssuePriorityError {
    #[error("Invalid priority '{0}' (expected low, medium, or high)")]
    InvalidValue(String),
}

/// Error for sort expression parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IssueSortError {
    #[error("Invalid sort field '{0}'")]
    InvalidField(String),

    #[error("Invalid sort direction '{0}' (expected asc or desc)")]
    InvalidDirection(String),
}

/// Top-level error for all issue-related operations
#[derive(Debug, Error)]
pub enum IssueError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid issue ID: {0}")]
    InvalidIssueId(#[from] IssueIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] IssueTitleError),

    #[error("Invalid status: {0}")]
    InvalidStatus(#[from] IssueStatusError),

    #[error("Invalid priority: {0}")]
    InvalidPriority(#[from] IssuePriorityError),

    #[error("Invalid sort: {0}")]
    InvalidSort(#[from] IssueSortError),

    // Domain-level errors
    #[error("Issue not found: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
