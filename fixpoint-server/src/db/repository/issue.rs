//! Issue Repository
//!
//! Issues are keyed by snowflake id: `type::thing('issue', $id)`. The record
//! key is projected back into the wire model's `id` field via
//! `record::id(id)`.

use super::{BaseRepository, RepoError, RepoResult, content_without_id};
use shared::client::IssueStats;
use shared::issue::IssueStatus;
use shared::models::Issue;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Projection mapping a stored record to the wire [`Issue`] shape
const ISSUE_PROJECTION: &str = "record::id(id) AS id, reporter_email, reporter_name, title, \
     description, category, location, image_url, status, priority, upvotes, staff_assigned, \
     timeline, created_at";

#[derive(serde::Deserialize)]
struct StatusRow {
    status: IssueStatus,
}

#[derive(Clone)]
pub struct IssueRepository {
    base: BaseRepository,
}

impl IssueRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a freshly created issue
    pub async fn create(&self, issue: &Issue) -> RepoResult<Issue> {
        let content = content_without_id(issue)?;
        self.base
            .db()
            .query("CREATE type::thing('issue', $id) CONTENT $data")
            .bind(("id", issue.id))
            .bind(("data", content))
            .await?;

        self.find_by_id(issue.id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create issue".to_string()))
    }

    /// Find issue by id
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Issue>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {ISSUE_PROJECTION} FROM type::thing('issue', $id)"
            ))
            .bind(("id", id))
            .await?;
        let issues: Vec<Issue> = result.take(0)?;
        Ok(issues.into_iter().next())
    }

    /// List all issues, optionally filtered by status.
    ///
    /// `priority ASC` sorts "High" before "Normal", so boosted issues lead.
    pub async fn find_all(&self, status: Option<IssueStatus>) -> RepoResult<Vec<Issue>> {
        let mut result = match status {
            Some(status) => {
                self.base
                    .db()
                    .query(format!(
                        "SELECT {ISSUE_PROJECTION} FROM issue WHERE status = $status \
                         ORDER BY priority ASC, created_at DESC"
                    ))
                    .bind(("status", status))
                    .await?
            }
            None => {
                self.base
                    .db()
                    .query(format!(
                        "SELECT {ISSUE_PROJECTION} FROM issue \
                         ORDER BY priority ASC, created_at DESC"
                    ))
                    .await?
            }
        };
        let issues: Vec<Issue> = result.take(0)?;
        Ok(issues)
    }

    /// List one citizen's issues, newest first
    pub async fn find_by_reporter(&self, email: &str) -> RepoResult<Vec<Issue>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {ISSUE_PROJECTION} FROM issue WHERE reporter_email = $email \
                 ORDER BY created_at DESC"
            ))
            .bind(("email", email.to_string()))
            .await?;
        let issues: Vec<Issue> = result.take(0)?;
        Ok(issues)
    }

    /// List issues assigned to one staff member
    pub async fn find_by_staff(&self, email: &str) -> RepoResult<Vec<Issue>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {ISSUE_PROJECTION} FROM issue WHERE staff_assigned.email = $email \
                 ORDER BY priority ASC, created_at DESC"
            ))
            .bind(("email", email.to_string()))
            .await?;
        let issues: Vec<Issue> = result.take(0)?;
        Ok(issues)
    }

    /// Persist the full current state of an issue (last write wins)
    pub async fn save(&self, issue: &Issue) -> RepoResult<Issue> {
        let content = content_without_id(issue)?;
        self.base
            .db()
            .query("UPDATE type::thing('issue', $id) CONTENT $data")
            .bind(("id", issue.id))
            .bind(("data", content))
            .await?;

        self.find_by_id(issue.id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Issue {} not found", issue.id)))
    }

    /// Hard delete an issue
    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Issue {} not found", id)))?;

        self.base
            .db()
            .query("DELETE type::thing('issue', $id)")
            .bind(("id", id))
            .await?;
        Ok(true)
    }

    /// Status counts for one reporter
    pub async fn stats_for_reporter(&self, email: &str) -> RepoResult<IssueStats> {
        let mut result = self
            .base
            .db()
            .query("SELECT status FROM issue WHERE reporter_email = $email")
            .bind(("email", email.to_string()))
            .await?;
        let rows: Vec<StatusRow> = result.take(0)?;
        Ok(Self::fold_stats(rows))
    }

    /// Status counts for one staff member's assignments
    pub async fn stats_for_staff(&self, email: &str) -> RepoResult<IssueStats> {
        let mut result = self
            .base
            .db()
            .query("SELECT status FROM issue WHERE staff_assigned.email = $email")
            .bind(("email", email.to_string()))
            .await?;
        let rows: Vec<StatusRow> = result.take(0)?;
        Ok(Self::fold_stats(rows))
    }

    /// Status counts across the whole store
    pub async fn stats_all(&self) -> RepoResult<IssueStats> {
        let mut result = self.base.db().query("SELECT status FROM issue").await?;
        let rows: Vec<StatusRow> = result.take(0)?;
        Ok(Self::fold_stats(rows))
    }

    fn fold_stats(rows: Vec<StatusRow>) -> IssueStats {
        let mut stats = IssueStats::default();
        for row in rows {
            stats.record(row.status);
        }
        stats
    }
}
