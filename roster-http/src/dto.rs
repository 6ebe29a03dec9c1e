//! Request and response bodies

use chrono::{DateTime, Utc};
use roster_core::{PullRequest, PullRequestShort, PullRequestStatus, User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct TeamNameQuery {
    pub team_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserIdQuery {
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KillTeamRequest {
    pub team_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetActiveRequest {
    pub user_id: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestIdRequest {
    pub pull_request_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReassignRequest {
    pub pull_request_id: String,
    #[serde(alias = "old_user_id")]
    pub old_reviewer_id: String,
}

/// Pull request summary plus its reviewers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrResponse {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
    pub assigned_reviewers: Vec<String>,
}

impl From<PullRequest> for PrResponse {
    fn from(pr: PullRequest) -> Self {
        Self {
            pull_request_id: pr.pull_request_id,
            pull_request_name: pr.pull_request_name,
            author_id: pr.author_id,
            status: pr.status,
            assigned_reviewers: pr.assigned_reviewers,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedPr {
    #[serde(flatten)]
    pub pr: PrResponse,
    pub merged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeResponse {
    pub pr: MergedPr,
}

impl From<PullRequest> for MergeResponse {
    fn from(pr: PullRequest) -> Self {
        let merged_at = pr.merged_at;
        Self {
            pr: MergedPr {
                pr: pr.into(),
                merged_at,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReassignResponse {
    pub pr: PrResponse,
    pub replaced_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserReviewsResponse {
    pub user_id: String,
    pub pull_requests: Vec<PullRequestShort>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
