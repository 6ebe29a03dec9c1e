//! Domain records for teams, users and pull requests

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A member as listed inside a team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

impl TeamMember {
    /// Create an active member
    pub fn new(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            is_active: true,
        }
    }

    /// Mark the member as inactive
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// A team with its members in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub team_name: String,
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

impl Team {
    pub fn new(team_name: impl Into<String>, members: Vec<TeamMember>) -> Self {
        Self {
            team_name: team_name.into(),
            members,
        }
    }

    /// Ids of members that are currently active, in team order
    pub fn active_member_ids(&self) -> Vec<String> {
        self.members
            .iter()
            .filter(|m| m.is_active)
            .map(|m| m.user_id.clone())
            .collect()
    }
}

/// A user together with the team it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

/// Pull request lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestStatus {
    Created,
    Merged,
}

impl PullRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PullRequestStatus::Created => "created",
            PullRequestStatus::Merged => "merged",
        }
    }
}

impl fmt::Display for PullRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PullRequestStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(PullRequestStatus::Created),
            "merged" => Ok(PullRequestStatus::Merged),
            other => Err(Error::InvalidInput(format!(
                "unknown pull request status: {}",
                other
            ))),
        }
    }
}

/// Data needed to open a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPullRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
}

impl NewPullRequest {
    pub fn new(
        pull_request_id: impl Into<String>,
        pull_request_name: impl Into<String>,
        author_id: impl Into<String>,
    ) -> Self {
        Self {
            pull_request_id: pull_request_id.into(),
            pull_request_name: pull_request_name.into(),
            author_id: author_id.into(),
        }
    }
}

/// Pull request without reviewers or timestamps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestShort {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
}

/// Full pull request record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
    /// Reviewers in slot order
    pub assigned_reviewers: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "mergedAt")]
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    /// Open a new pull request with no reviewers yet
    pub fn open(new: NewPullRequest) -> Self {
        Self {
            pull_request_id: new.pull_request_id,
            pull_request_name: new.pull_request_name,
            author_id: new.author_id,
            status: PullRequestStatus::Created,
            assigned_reviewers: Vec::new(),
            created_at: Utc::now(),
            merged_at: None,
        }
    }

    pub fn is_merged(&self) -> bool {
        self.status == PullRequestStatus::Merged
    }

    pub fn has_reviewer(&self, user_id: &str) -> bool {
        self.assigned_reviewers.iter().any(|r| r == user_id)
    }

    pub fn short(&self) -> PullRequestShort {
        PullRequestShort {
            pull_request_id: self.pull_request_id.clone(),
            pull_request_name: self.pull_request_name.clone(),
            author_id: self.author_id.clone(),
            status: self.status,
        }
    }
}

/// Outcome of swapping a reviewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reassignment {
    pub pull_request: PullRequest,
    /// Whoever holds the slot after the swap
    pub replaced_by: String,
}

impl Reassignment {
    /// The swap found no candidate and left the slot alone
    pub fn is_noop(&self, old_reviewer_id: &str) -> bool {
        self.replaced_by == old_reviewer_id
    }
}

/// Number of pull requests a user reviews
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReviewsCount {
    pub user: User,
    pub reviews_count: i64,
}

/// Number of reviewers on a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrReviewersCount {
    pub pull_request: PullRequestShort,
    pub count: i64,
}
