use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::UserId;
use crate::issue::errors::IssueError;
use crate::issue::models::Issue;
use crate::issue::models::IssueFilter;
use crate::issue::models::IssueId;
use crate::issue::models::IssueSortField;
use crate::issue::models::IssueTitle;
use crate::issue::models::SortDirection;
use crate::issue::ports::IssueRepository;

const ISSUE_COLUMNS: &str =
    "id, owner_id, title, status, priority, assignee, created_at, updated_at";

pub struct PostgresIssueRepository {
    pool: PgPool,
}

impl PostgresIssueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct IssueRow {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    status: String,
    priority: String,
    assignee: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<IssueRow> for Issue {
    type Error = IssueError;

    fn try_from(row: IssueRow) -> Result<Self, Self::Error> {
        Ok(Issue {
            id: IssueId(row.id),
            owner_id: UserId(row.owner_id),
            title: IssueTitle::new(row.title)?,
            status: row.status.parse()?,
            priority: row.priority.parse()?,
            assignee: row.assignee,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// ORDER BY expression for a sort field. Priority sorts by severity rank,
/// not alphabetically; `id` breaks ties so pagination stays stable.
fn order_by(filter: &IssueFilter) -> String {
    let column = match filter.sort.field {
        IssueSortField::CreatedAt => "created_at",
        IssueSortField::UpdatedAt => "updated_at",
        IssueSortField::Title => "title",
        IssueSortField::Priority => {
            "CASE priority WHEN 'low' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END"
        }
    };
    let direction = match filter.sort.direction {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    };
    format!("{} {}, id ASC", column, direction)
}

/// WHERE clause for an owner-scoped, filtered listing. `$1` is always the
/// owner; further placeholders are numbered in the order the binds are
/// applied below.
fn where_clause(filter: &IssueFilter) -> String {
    let mut conditions = String::from("owner_id = $1");
    let mut next_arg = 2;

    if filter.search.is_some() {
        conditions.push_str(&format!(" AND title ILIKE ${}", next_arg));
        next_arg += 1;
    }
    if filter.status.is_some() {
        conditions.push_str(&format!(" AND status = ${}", next_arg));
        next_arg += 1;
    }
    if filter.priority.is_some() {
        conditions.push_str(&format!(" AND priority = ${}", next_arg));
        next_arg += 1;
    }
    if filter.assignee.is_some() {
        conditions.push_str(&format!(" AND assignee = ${}", next_arg));
    }

    conditions
}

#[async_trait]
impl IssueRepository for PostgresIssueRepository {
    async fn create(&self, issue: Issue) -> Result<Issue, IssueError> {
        sqlx::query(
            "INSERT INTO issues (id, owner_id, title, status, priority, assignee, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(issue.id.0)
        .bind(issue.owner_id.0)
        .bind(issue.title.as_str())
        .bind(issue.status.as_str())
        .bind(issue.priority.as_str())
        .bind(issue.assignee.as_deref())
        .bind(issue.created_at)
        .bind(issue.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| IssueError::DatabaseError(e.to_string()))?;

        Ok(issue)
    }

    async fn find_by_id(&self, owner: UserId, id: &IssueId) -> Result<Option<Issue>, IssueError> {
        let row = sqlx::query_as::<_, IssueRow>(&format!(
            "SELECT {} FROM issues WHERE id = $1 AND owner_id = $2",
            ISSUE_COLUMNS
        ))
        .bind(id.0)
        .bind(owner.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IssueError::DatabaseError(e.to_string()))?;

        row.map(Issue::try_from).transpose()
    }

    async fn list(
        &self,
        owner: UserId,
        filter: &IssueFilter,
    ) -> Result<(Vec<Issue>, i64), IssueError> {
        let conditions = where_clause(filter);
        let search_pattern = filter.search.as_ref().map(|s| format!("%{}%", s));

        let count_sql = format!("SELECT COUNT(*) FROM issues WHERE {}", conditions);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql).bind(owner.0);

        if let Some(pattern) = &search_pattern {
            count_query = count_query.bind(pattern.as_str());
        }
        if let Some(status) = filter.status {
            count_query = count_query.bind(status.as_str());
        }
        if let Some(priority) = filter.priority {
            count_query = count_query.bind(priority.as_str());
        }
        if let Some(assignee) = &filter.assignee {
            count_query = count_query.bind(assignee.as_str());
        }

        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| IssueError::DatabaseError(e.to_string()))?;

        let items_sql = format!(
            "SELECT {} FROM issues WHERE {} ORDER BY {} LIMIT {} OFFSET {}",
            ISSUE_COLUMNS,
            conditions,
            order_by(filter),
            filter.page.limit(),
            filter.page.offset(),
        );
        let mut items_query = sqlx::query_as::<_, IssueRow>(&items_sql).bind(owner.0);

        if let Some(pattern) = &search_pattern {
            items_query = items_query.bind(pattern.as_str());
        }
        if let Some(status) = filter.status {
            items_query = items_query.bind(status.as_str());
        }
        if let Some(priority) = filter.priority {
            items_query = items_query.bind(priority.as_str());
        }
        if let Some(assignee) = &filter.assignee {
            items_query = items_query.bind(assignee.as_str());
        }

        let rows = items_query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| IssueError::DatabaseError(e.to_string()))?;

        let issues = rows
            .into_iter()
            .map(Issue::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((issues, total))
    }

    async fn update(&self, issue: Issue) -> Result<Issue, IssueError> {
        let result = sqlx::query(
            "UPDATE issues \
             SET title = $3, status = $4, priority = $5, assignee = $6, updated_at = $7 \
             WHERE id = $1 AND owner_id = $2",
        )
        .bind(issue.id.0)
        .bind(issue.owner_id.0)
        .bind(issue.title.as_str())
        .bind(issue.status.as_str())
        .bind(issue.priority.as_str())
        .bind(issue.assignee.as_deref())
        .bind(issue.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| IssueError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(IssueError::NotFound(issue.id.to_string()));
        }

        Ok(issue)
    }

    async fn delete(&self, owner: UserId, id: &IssueId) -> Result<(), IssueError> {
        let result = sqlx::query("DELETE FROM issues WHERE id = $1 AND owner_id = $2")
            .bind(id.0)
            .bind(owner.0)
            .execute(&self.pool)
            .await
            .map_err(|e| IssueError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(IssueError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::models::IssuePriority;
    use crate::issue::models::IssueSort;
    use crate::issue::models::IssueStatus;
    use crate::issue::models::Page;

    fn filter() -> IssueFilter {
        IssueFilter {
            search: None,
            status: None,
            priority: None,
            assignee: None,
            sort: IssueSort::default(),
            page: Page::default(),
        }
    }

    #[test]
    fn test_where_clause_owner_only() {
        assert_eq!(where_clause(&filter()), "owner_id = $1");
    }

    #[test]
    fn test_where_clause_numbers_placeholders_in_bind_order() {
        let filter = IssueFilter {
            search: Some("login".to_string()),
            status: Some(IssueStatus::Open),
            priority: None,
            assignee: Some("alice".to_string()),
            ..filter()
        };

        assert_eq!(
            where_clause(&filter),
            "owner_id = $1 AND title ILIKE $2 AND status = $3 AND assignee = $4"
        );
    }

    #[test]
    fn test_order_by_priority_ranks_severity() {
        let filter = IssueFilter {
            sort: "priority:desc".parse().unwrap(),
            ..filter()
        };

        let order = order_by(&filter);
        assert!(order.starts_with("CASE priority"));
        assert!(order.contains("DESC"));
    }

    #[test]
    fn test_order_by_default_is_newest_first() {
        assert_eq!(order_by(&filter()), "created_at DESC, id ASC");
    }

    #[test]
    fn test_priority_filter_placeholder() {
        let filter = IssueFilter {
            priority: Some(IssuePriority::High),
            ..filter()
        };

        assert_eq!(where_clause(&filter), "owner_id = $1 AND priority = $2");
    }
}
