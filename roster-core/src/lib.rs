//! Roster Core - reviewer assignment for team pull requests
//!
//! This crate holds the domain model, the store contracts the assignment
//! engine runs against, and the engine itself: picking reviewers for new
//! pull requests, swapping them on request, and moving reviews away from
//! users that have been deactivated.

pub mod config;
pub mod error;
pub mod model;
pub mod review;
pub mod stats;
pub mod store;
pub mod team;

use std::sync::Arc;

pub use config::{AssignmentConfig, Config, DatabaseSettings, ServerConfig};
pub use error::{Error, ErrorCode, Result};
pub use model::{
    NewPullRequest, PrReviewersCount, PullRequest, PullRequestShort, PullRequestStatus,
    Reassignment, Team, TeamMember, User, UserReviewsCount,
};
pub use review::{is_allowed_to_review, select_reviewers, ReviewService};
pub use stats::StatsService;
pub use store::{MemoryStore, PullRequestStore, ReviewerStore, Store, TeamStore};
pub use team::TeamService;

/// The three services wired to one store
#[derive(Clone)]
pub struct Services {
    pub reviews: ReviewService,
    pub teams: TeamService,
    pub stats: StatsService,
}

impl Services {
    pub fn new(store: Arc<dyn Store>, config: AssignmentConfig) -> Self {
        let reviews = ReviewService::new(store.clone(), config);
        let teams = TeamService::new(store.clone(), reviews.clone());
        let stats = StatsService::new(store);
        Self {
            reviews,
            teams,
            stats,
        }
    }
}
