//! Error types for database operations

use thiserror::Error;

/// Database error types
#[derive(Error, Debug)]
pub enum Error {
    /// SQLx database error
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value could not be mapped back to a model
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Not found error
    #[error("{0} not found")]
    NotFound(String),

    /// Team name already taken
    #[error("Team {0} already exists")]
    TeamExists(String),

    /// Pull request id already taken
    #[error("Pull request {0} already exists")]
    PullRequestExists(String),
}

/// Result type alias for database operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for roster_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(what) => roster_core::Error::NotFound(what),
            Error::TeamExists(name) => roster_core::Error::TeamExists(name),
            Error::PullRequestExists(id) => roster_core::Error::PrExists(id),
            other => roster_core::Error::Storage(other.to_string()),
        }
    }
}
