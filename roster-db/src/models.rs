//! Row types and their mapping to domain records

use chrono::{DateTime, Utc};
use roster_core::{PullRequest, PullRequestStatus, TeamMember, User};

use crate::{Error, Result};

/// Row from the `users` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub user_id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            user_id: row.user_id,
            username: row.username,
            team_name: row.team_name,
            is_active: row.is_active,
        }
    }
}

impl From<UserRow> for TeamMember {
    fn from(row: UserRow) -> Self {
        TeamMember {
            user_id: row.user_id,
            username: row.username,
            is_active: row.is_active,
        }
    }
}

/// Row from the `pull_requests` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PullRequestRow {
    pub id: i64,
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequestRow {
    /// Combine with the reviewer slots loaded separately
    pub fn into_pull_request(self, assigned_reviewers: Vec<String>) -> Result<PullRequest> {
        let status: PullRequestStatus = self
            .status
            .parse()
            .map_err(|_| Error::InvalidData(format!("pull request status {:?}", self.status)))?;

        Ok(PullRequest {
            pull_request_id: self.pull_request_id,
            pull_request_name: self.pull_request_name,
            author_id: self.author_id,
            status,
            assigned_reviewers,
            created_at: self.created_at,
            merged_at: self.merged_at,
        })
    }
}
