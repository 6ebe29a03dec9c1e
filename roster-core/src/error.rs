//! Error types for Roster

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for Roster operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Roster operations
#[derive(Error, Debug)]
pub enum Error {
    /// A team with this name already exists
    #[error("Team {0} already exists")]
    TeamExists(String),

    /// A pull request with this id already exists
    #[error("Pull request {0} already exists")]
    PrExists(String),

    /// The pull request is merged and can no longer change reviewers
    #[error("Pull request {0} is already merged")]
    PrMerged(String),

    /// The reviewer is not assigned to the pull request
    #[error("Reviewer {reviewer_id} is not assigned to pull request {pull_request_id}")]
    NotAssigned {
        pull_request_id: String,
        reviewer_id: String,
    },

    /// No active teammate can take over the review
    #[error("No active replacement candidate for pull request {0}")]
    NoCandidate(String),

    /// Entity lookup failed
    #[error("{0} not found")]
    NotFound(String),

    /// Request data failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing store failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Client-facing code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::TeamExists(_) => ErrorCode::TeamExists,
            Error::PrExists(_) => ErrorCode::PrExists,
            Error::PrMerged(_) => ErrorCode::PrMerged,
            Error::NotAssigned { .. } => ErrorCode::NotAssigned,
            Error::NoCandidate(_) => ErrorCode::NoCandidate,
            Error::NotFound(_) => ErrorCode::NotFound,
            Error::InvalidInput(_) => ErrorCode::InvalidInput,
            Error::Config(_) | Error::Io(_) | Error::Storage(_) => ErrorCode::InternalError,
        }
    }

    /// Check if this error is a not-found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

/// Error codes reported to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    TeamExists,
    PrExists,
    PrMerged,
    NotAssigned,
    NoCandidate,
    NotFound,
    InvalidInput,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::TeamExists => "TEAM_EXISTS",
            ErrorCode::PrExists => "PR_EXISTS",
            ErrorCode::PrMerged => "PR_MERGED",
            ErrorCode::NotAssigned => "NOT_ASSIGNED",
            ErrorCode::NoCandidate => "NO_CANDIDATE",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Conflict codes describe a request that clashes with stored state
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            ErrorCode::TeamExists
                | ErrorCode::PrExists
                | ErrorCode::PrMerged
                | ErrorCode::NotAssigned
                | ErrorCode::NoCandidate
        )
    }
}
