use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::models::UserId;
use crate::issue::errors::IssueIdError;
use crate::issue::errors::IssuePriorityError;
use crate::issue::errors::IssueSortError;
use crate::issue::errors::IssueStatusError;
use crate::issue::errors::IssueTitleError;

/// Issue aggregate entity.
///
/// Issues are owned by the user who created them; every operation is scoped
/// to the owner.
#[derive(Debug, Clone)]
pub struct Issue {
    pub id: IssueId,
    pub owner_id: UserId,
    pub title: IssueTitle,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    pub assignee: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Issue unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IssueId(pub Uuid);

impl IssueId {
    /// Generate a new random issue ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an issue ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IssueIdError> {
        Uuid::parse_str(s)
            .map(IssueId)
            .map_err(|e| IssueIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for IssueId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Issue title value type, 1-200 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueTitle(String);

impl IssueTitle {
    const MAX_LENGTH: usize = 200;

    /// Create a validated title.
    ///
    /// # Errors
    /// * `Empty` - Nothing but whitespace
    /// * `TooLong` - More than 200 characters
    pub fn new(title: String) -> Result<Self, IssueTitleError> {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(IssueTitleError::Empty);
        }
        if title.len() > Self::MAX_LENGTH {
            return Err(IssueTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: title.len(),
            });
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Issue workflow state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IssueStatus {
    #[default]
    Open,
    InProgress,
    Closed,
}

impl IssueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
        }
    }
}

impl FromStr for IssueStatus {
    type Err = IssueStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            other => Err(IssueStatusError::InvalidValue(other.to_string())),
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue priority level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IssuePriority {
    Low,
    #[default]
    Medium,
    High,
}

impl IssuePriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for IssuePriority {
    type Err = IssuePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(IssuePriorityError::InvalidValue(other.to_string())),
        }
    }
}

impl fmt::Display for IssuePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command to create a new issue with validated fields.
#[derive(Debug)]
pub struct CreateIssueCommand {
    pub title: IssueTitle,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    pub assignee: Option<String>,
}

/// Command to replace an issue's mutable fields (PUT semantics).
#[derive(Debug)]
pub struct UpdateIssueCommand {
    pub title: IssueTitle,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    pub assignee: Option<String>,
}

/// Sortable listing columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IssueSortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
    Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Listing sort order, parsed from `field` or `field:direction`
/// (e.g. `createdAt:desc`, `title:asc`). Newest-first by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueSort {
    pub field: IssueSortField,
    pub direction: SortDirection,
}

impl Default for IssueSort {
    fn default() -> Self {
        Self {
            field: IssueSortField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl FromStr for IssueSort {
    type Err = IssueSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(':') {
            Some((field, direction)) => (field, Some(direction)),
            None => (s, None),
        };

        let field = match field {
            "createdAt" => IssueSortField::CreatedAt,
            "updatedAt" => IssueSortField::UpdatedAt,
            "title" => IssueSortField::Title,
            "priority" => IssueSortField::Priority,
            other => return Err(IssueSortError::InvalidField(other.to_string())),
        };

        let direction = match direction {
            None => match field {
                // Timestamps default to newest-first, text to A-Z.
                IssueSortField::CreatedAt | IssueSortField::UpdatedAt => SortDirection::Desc,
                IssueSortField::Title | IssueSortField::Priority => SortDirection::Asc,
            },
            Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            Some(other) => return Err(IssueSortError::InvalidDirection(other.to_string())),
        };

        Ok(Self { field, direction })
    }
}

/// Filter, sort, and pagination for issue listings.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    /// Case-insensitive substring match on the title
    pub search: Option<String>,
    pub status: Option<IssueStatus>,
    pub priority: Option<IssuePriority>,
    pub assignee: Option<String>,
    pub sort: IssueSort,
    pub page: Page,
}

/// 1-based page selection with a bounded page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub size: u32,
}

impl Page {
    pub const DEFAULT_SIZE: u32 = 10;
    pub const MAX_SIZE: u32 = 100;

    /// Clamp raw query parameters into a valid page.
    pub fn new(number: Option<u32>, size: Option<u32>) -> Self {
        Self {
            number: number.unwrap_or(1).max(1),
            size: size
                .unwrap_or(Self::DEFAULT_SIZE)
                .clamp(1, Self::MAX_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.number - 1) * i64::from(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of listing results plus the unpaged total.
#[derive(Debug, Clone)]
pub struct IssuePage {
    pub items: Vec<Issue>,
    pub total: i64,
    pub page: Page,
}
