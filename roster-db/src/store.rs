//! SQLite backend for the roster-core store contracts

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use roster_core::{PullRequest, PullRequestStore, ReviewerStore, Team, TeamStore, User};
use sqlx::SqlitePool;

use crate::repos::{PullRequestRepository, ReviewerRepository, TeamRepository, UserRepository};

/// Store backed by a SQLite pool
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn teams(&self) -> TeamRepository<'_> {
        TeamRepository::new(&self.pool)
    }

    fn users(&self) -> UserRepository<'_> {
        UserRepository::new(&self.pool)
    }

    fn pull_requests(&self) -> PullRequestRepository<'_> {
        PullRequestRepository::new(&self.pool)
    }

    fn reviewer_slots(&self) -> ReviewerRepository<'_> {
        ReviewerRepository::new(&self.pool)
    }
}

#[async_trait]
impl TeamStore for SqliteStore {
    async fn add_team(&self, team: &Team) -> roster_core::Result<()> {
        Ok(self.teams().create(team).await?)
    }

    async fn get_team(&self, team_name: &str) -> roster_core::Result<Team> {
        Ok(self.teams().get(team_name).await?)
    }

    async fn team_exists(&self, team_name: &str) -> roster_core::Result<bool> {
        Ok(self.teams().exists(team_name).await?)
    }

    async fn get_user(&self, user_id: &str) -> roster_core::Result<User> {
        Ok(self.users().get(user_id).await?)
    }

    async fn set_user_active(&self, user_id: &str, is_active: bool) -> roster_core::Result<User> {
        Ok(self.users().set_active(user_id, is_active).await?)
    }

    async fn active_teammates(&self, user_id: &str) -> roster_core::Result<Vec<String>> {
        Ok(self.users().active_teammates(user_id).await?)
    }

    async fn active_members(&self, team_name: &str) -> roster_core::Result<Vec<String>> {
        Ok(self.teams().active_members(team_name).await?)
    }
}

#[async_trait]
impl PullRequestStore for SqliteStore {
    async fn create_pull_request(&self, pr: &PullRequest) -> roster_core::Result<()> {
        Ok(self.pull_requests().create(pr).await?)
    }

    async fn get_pull_request(&self, pull_request_id: &str) -> roster_core::Result<PullRequest> {
        Ok(self.pull_requests().get(pull_request_id).await?)
    }

    async fn merge_pull_request(
        &self,
        pull_request_id: &str,
        merged_at: DateTime<Utc>,
    ) -> roster_core::Result<PullRequest> {
        Ok(self.pull_requests().merge(pull_request_id, merged_at).await?)
    }
}

#[async_trait]
impl ReviewerStore for SqliteStore {
    async fn reviewers(&self, pull_request_id: &str) -> roster_core::Result<Vec<String>> {
        Ok(self
            .reviewer_slots()
            .list_for_pull_request(pull_request_id)
            .await?)
    }

    async fn replace_reviewer(
        &self,
        pull_request_id: &str,
        old_reviewer_id: &str,
        new_reviewer_id: &str,
    ) -> roster_core::Result<()> {
        Ok(self
            .reviewer_slots()
            .replace(pull_request_id, old_reviewer_id, new_reviewer_id)
            .await?)
    }

    async fn pull_requests_by_reviewer(&self, user_id: &str) -> roster_core::Result<Vec<String>> {
        Ok(self.reviewer_slots().list_for_reviewer(user_id).await?)
    }

    async fn count_reviews_by_user(&self) -> roster_core::Result<Vec<(String, i64)>> {
        Ok(self.reviewer_slots().count_by_reviewer().await?)
    }

    async fn count_reviewers_by_pull_request(&self) -> roster_core::Result<Vec<(String, i64)>> {
        Ok(self.reviewer_slots().count_by_pull_request().await?)
    }
}
