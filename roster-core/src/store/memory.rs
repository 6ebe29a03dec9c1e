//! In-process store backed by vectors
//!
//! Keeps the same ordering guarantees as the SQL store: users, pull requests
//! and reviewer slots are kept in insertion order.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{PullRequestStore, ReviewerStore, TeamStore};
use crate::model::{PullRequest, PullRequestStatus, Team, TeamMember, User};
use crate::{Error, Result};

#[derive(Debug, Clone)]
struct Assignment {
    pull_request_id: String,
    reviewer_id: String,
}

#[derive(Debug, Default)]
struct Inner {
    teams: Vec<String>,
    users: Vec<User>,
    pull_requests: Vec<PullRequest>,
    assignments: Vec<Assignment>,
}

impl Inner {
    fn user(&self, user_id: &str) -> Result<&User> {
        self.users
            .iter()
            .find(|u| u.user_id == user_id)
            .ok_or_else(|| Error::NotFound(format!("User {}", user_id)))
    }

    fn reviewers_of(&self, pull_request_id: &str) -> Vec<String> {
        self.assignments
            .iter()
            .filter(|a| a.pull_request_id == pull_request_id)
            .map(|a| a.reviewer_id.clone())
            .collect()
    }

    fn pull_request(&self, pull_request_id: &str) -> Result<PullRequest> {
        let mut pr = self
            .pull_requests
            .iter()
            .find(|pr| pr.pull_request_id == pull_request_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Pull request {}", pull_request_id)))?;
        pr.assigned_reviewers = self.reviewers_of(pull_request_id);
        Ok(pr)
    }

    fn active_in_team(&self, team_name: &str) -> Vec<String> {
        self.users
            .iter()
            .filter(|u| u.team_name == team_name && u.is_active)
            .map(|u| u.user_id.clone())
            .collect()
    }
}

/// Store that lives entirely in memory, used by tests and dry runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Count occurrences of each key, keeping first-seen order
fn count_in_order<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(String, i64)> {
    let mut counts: Vec<(String, i64)> = Vec::new();
    for key in keys {
        match counts.iter_mut().find(|(k, _)| k == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key.to_string(), 1)),
        }
    }
    counts
}

#[async_trait]
impl TeamStore for MemoryStore {
    async fn add_team(&self, team: &Team) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.teams.iter().any(|t| t == &team.team_name) {
            return Err(Error::TeamExists(team.team_name.clone()));
        }
        inner.teams.push(team.team_name.clone());

        for member in &team.members {
            match inner.users.iter_mut().find(|u| u.user_id == member.user_id) {
                Some(existing) => existing.team_name = team.team_name.clone(),
                None => inner.users.push(User {
                    user_id: member.user_id.clone(),
                    username: member.username.clone(),
                    team_name: team.team_name.clone(),
                    is_active: member.is_active,
                }),
            }
        }
        Ok(())
    }

    async fn get_team(&self, team_name: &str) -> Result<Team> {
        let inner = self.inner.read().await;
        if !inner.teams.iter().any(|t| t == team_name) {
            return Err(Error::NotFound(format!("Team {}", team_name)));
        }
        let members = inner
            .users
            .iter()
            .filter(|u| u.team_name == team_name)
            .map(|u| TeamMember {
                user_id: u.user_id.clone(),
                username: u.username.clone(),
                is_active: u.is_active,
            })
            .collect();
        Ok(Team::new(team_name, members))
    }

    async fn team_exists(&self, team_name: &str) -> Result<bool> {
        Ok(self.inner.read().await.teams.iter().any(|t| t == team_name))
    }

    async fn get_user(&self, user_id: &str) -> Result<User> {
        self.inner.read().await.user(user_id).cloned()
    }

    async fn set_user_active(&self, user_id: &str, is_active: bool) -> Result<User> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.user_id == user_id)
            .ok_or_else(|| Error::NotFound(format!("User {}", user_id)))?;
        user.is_active = is_active;
        Ok(user.clone())
    }

    async fn active_teammates(&self, user_id: &str) -> Result<Vec<String>> {
        let inner = self.inner.read().await;
        let team_name = inner.user(user_id)?.team_name.clone();
        Ok(inner.active_in_team(&team_name))
    }

    async fn active_members(&self, team_name: &str) -> Result<Vec<String>> {
        let inner = self.inner.read().await;
        if !inner.teams.iter().any(|t| t == team_name) {
            return Err(Error::NotFound(format!("Team {}", team_name)));
        }
        Ok(inner.active_in_team(team_name))
    }
}

#[async_trait]
impl PullRequestStore for MemoryStore {
    async fn create_pull_request(&self, pr: &PullRequest) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner
            .pull_requests
            .iter()
            .any(|p| p.pull_request_id == pr.pull_request_id)
        {
            return Err(Error::PrExists(pr.pull_request_id.clone()));
        }

        let mut stored = pr.clone();
        stored.assigned_reviewers.clear();
        inner.pull_requests.push(stored);
        for reviewer_id in &pr.assigned_reviewers {
            inner.assignments.push(Assignment {
                pull_request_id: pr.pull_request_id.clone(),
                reviewer_id: reviewer_id.clone(),
            });
        }
        Ok(())
    }

    async fn get_pull_request(&self, pull_request_id: &str) -> Result<PullRequest> {
        self.inner.read().await.pull_request(pull_request_id)
    }

    async fn merge_pull_request(
        &self,
        pull_request_id: &str,
        merged_at: DateTime<Utc>,
    ) -> Result<PullRequest> {
        let mut inner = self.inner.write().await;
        let pr = inner
            .pull_requests
            .iter_mut()
            .find(|p| p.pull_request_id == pull_request_id)
            .ok_or_else(|| Error::NotFound(format!("Pull request {}", pull_request_id)))?;
        pr.status = PullRequestStatus::Merged;
        pr.merged_at = Some(merged_at);
        inner.pull_request(pull_request_id)
    }
}

#[async_trait]
impl ReviewerStore for MemoryStore {
    async fn reviewers(&self, pull_request_id: &str) -> Result<Vec<String>> {
        Ok(self.inner.read().await.reviewers_of(pull_request_id))
    }

    async fn replace_reviewer(
        &self,
        pull_request_id: &str,
        old_reviewer_id: &str,
        new_reviewer_id: &str,
    ) -> Result<()> {
        let mut inner = self.inner.write().await;
        for slot in inner.assignments.iter_mut().filter(|a| {
            a.pull_request_id == pull_request_id && a.reviewer_id == old_reviewer_id
        }) {
            slot.reviewer_id = new_reviewer_id.to_string();
        }
        Ok(())
    }

    async fn pull_requests_by_reviewer(&self, user_id: &str) -> Result<Vec<String>> {
        let inner = self.inner.read().await;
        Ok(inner
            .assignments
            .iter()
            .filter(|a| a.reviewer_id == user_id)
            .map(|a| a.pull_request_id.clone())
            .collect())
    }

    async fn count_reviews_by_user(&self) -> Result<Vec<(String, i64)>> {
        let inner = self.inner.read().await;
        Ok(count_in_order(
            inner.assignments.iter().map(|a| a.reviewer_id.as_str()),
        ))
    }

    async fn count_reviewers_by_pull_request(&self) -> Result<Vec<(String, i64)>> {
        let inner = self.inner.read().await;
        Ok(count_in_order(
            inner.assignments.iter().map(|a| a.pull_request_id.as_str()),
        ))
    }
}
