//! Pull request repository

use chrono::{DateTime, Utc};
use roster_core::{PullRequest, PullRequestStatus};
use sqlx::SqlitePool;

use crate::error::{Error, Result};
use crate::models::PullRequestRow;
use crate::repos::reviewers::{insert_reviewer, ReviewerRepository};

/// Repository for pull request records
pub struct PullRequestRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PullRequestRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a pull request and its reviewer slots in one transaction
    pub async fn create(&self, pr: &PullRequest) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO pull_requests (
                pull_request_id, pull_request_name, author_id, status, created_at, merged_at
            )
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (pull_request_id) DO NOTHING
            "#,
        )
        .bind(&pr.pull_request_id)
        .bind(&pr.pull_request_name)
        .bind(&pr.author_id)
        .bind(pr.status.as_str())
        .bind(pr.created_at)
        .bind(pr.merged_at)
        .execute(&mut *tx)
        .await?;

        if inserted.rows_affected() == 0 {
            return Err(Error::PullRequestExists(pr.pull_request_id.clone()));
        }

        for reviewer_id in &pr.assigned_reviewers {
            insert_reviewer(&mut *tx, &pr.pull_request_id, reviewer_id).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Get a pull request with its reviewers
    pub async fn get(&self, pull_request_id: &str) -> Result<PullRequest> {
        let row = sqlx::query_as::<_, PullRequestRow>(
            r#"
            SELECT id, pull_request_id, pull_request_name, author_id, status, created_at, merged_at
            FROM pull_requests
            WHERE pull_request_id = ?
            "#,
        )
        .bind(pull_request_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Pull request {}", pull_request_id)))?;

        let reviewers = ReviewerRepository::new(self.pool)
            .list_for_pull_request(pull_request_id)
            .await?;
        row.into_pull_request(reviewers)
    }

    /// Set status to merged and stamp the merge time
    pub async fn merge(&self, pull_request_id: &str, merged_at: DateTime<Utc>) -> Result<PullRequest> {
        let result = sqlx::query(
            "UPDATE pull_requests SET status = ?, merged_at = ? WHERE pull_request_id = ?",
        )
        .bind(PullRequestStatus::Merged.as_str())
        .bind(merged_at)
        .bind(pull_request_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Pull request {}", pull_request_id)));
        }

        self.get(pull_request_id).await
    }
}
