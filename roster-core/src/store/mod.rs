//! Store contracts the assignment engine runs against
//!
//! Every lookup keyed by an id fails with [`Error::NotFound`](crate::Error)
//! when the key is absent. Lists come back in insertion order so reviewer
//! selection is reproducible.

mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::model::{PullRequest, Team, User};
use crate::Result;

pub use memory::MemoryStore;

/// Teams and their members
#[async_trait]
pub trait TeamStore: Send + Sync {
    /// Insert a team and upsert its members; fails with `TeamExists` on a taken name
    async fn add_team(&self, team: &Team) -> Result<()>;

    async fn get_team(&self, team_name: &str) -> Result<Team>;

    async fn team_exists(&self, team_name: &str) -> Result<bool>;

    async fn get_user(&self, user_id: &str) -> Result<User>;

    /// Flip a user's active flag and return the updated record
    async fn set_user_active(&self, user_id: &str, is_active: bool) -> Result<User>;

    /// Active members of the user's team, the user included when active
    async fn active_teammates(&self, user_id: &str) -> Result<Vec<String>>;

    /// Active members of a team
    async fn active_members(&self, team_name: &str) -> Result<Vec<String>>;
}

/// Pull request records
#[async_trait]
pub trait PullRequestStore: Send + Sync {
    /// Persist a pull request together with its assigned reviewers as one unit
    ///
    /// Fails with `PrExists` and writes nothing when the id is taken.
    async fn create_pull_request(&self, pr: &PullRequest) -> Result<()>;

    /// Fetch a pull request with its reviewers in slot order
    async fn get_pull_request(&self, pull_request_id: &str) -> Result<PullRequest>;

    async fn merge_pull_request(
        &self,
        pull_request_id: &str,
        merged_at: DateTime<Utc>,
    ) -> Result<PullRequest>;
}

/// Reviewer slots on pull requests
#[async_trait]
pub trait ReviewerStore: Send + Sync {
    async fn reviewers(&self, pull_request_id: &str) -> Result<Vec<String>>;

    /// Put `new_reviewer_id` into the slot held by `old_reviewer_id`
    async fn replace_reviewer(
        &self,
        pull_request_id: &str,
        old_reviewer_id: &str,
        new_reviewer_id: &str,
    ) -> Result<()>;

    /// Ids of pull requests the user reviews
    async fn pull_requests_by_reviewer(&self, user_id: &str) -> Result<Vec<String>>;

    /// `(user_id, count)` per reviewer
    async fn count_reviews_by_user(&self) -> Result<Vec<(String, i64)>>;

    /// `(pull_request_id, count)` per pull request with reviewers
    async fn count_reviewers_by_pull_request(&self) -> Result<Vec<(String, i64)>>;
}

/// Everything the services need from a backend
pub trait Store: TeamStore + PullRequestStore + ReviewerStore {}

impl<T> Store for T where T: TeamStore + PullRequestStore + ReviewerStore {}
