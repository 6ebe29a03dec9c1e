//! Team membership and user activity

use std::sync::Arc;

use crate::model::{Team, User};
use crate::review::ReviewService;
use crate::store::Store;
use crate::{Error, Result};

/// Team and user operations
///
/// Deactivating a user moves their open reviews through the owning
/// [`ReviewService`].
#[derive(Clone)]
pub struct TeamService {
    store: Arc<dyn Store>,
    reviews: ReviewService,
}

impl TeamService {
    pub fn new(store: Arc<dyn Store>, reviews: ReviewService) -> Self {
        Self { store, reviews }
    }

    /// Create a team; members already known elsewhere move into it
    pub async fn add_team(&self, team: Team) -> Result<Team> {
        if team.team_name.trim().is_empty() {
            return Err(Error::InvalidInput("team_name must not be empty".to_string()));
        }
        if let Some(member) = team.members.iter().find(|m| m.user_id.trim().is_empty()) {
            return Err(Error::InvalidInput(format!(
                "member {:?} has an empty user_id",
                member.username
            )));
        }

        if self.store.team_exists(&team.team_name).await? {
            return Err(Error::TeamExists(team.team_name));
        }

        self.store.add_team(&team).await?;
        tracing::info!(team = %team.team_name, members = team.members.len(), "Team added");
        self.store.get_team(&team.team_name).await
    }

    pub async fn get_team(&self, team_name: &str) -> Result<Team> {
        self.store.get_team(team_name).await
    }

    /// Deactivate every active member of a team
    ///
    /// All members are deactivated before any review moves, so none of them
    /// is picked as a replacement. Reviews they hold on other teams' pull
    /// requests still move; failures are logged per member.
    pub async fn kill_team(&self, team_name: &str) -> Result<Team> {
        let members = self.store.active_members(team_name).await?;
        for user_id in &members {
            self.store.set_user_active(user_id, false).await?;
        }

        for user_id in &members {
            self.reassign_after_deactivation(user_id).await;
        }

        tracing::info!(team = team_name, deactivated = members.len(), "Team deactivated");
        self.store.get_team(team_name).await
    }

    /// Set a user's active flag
    ///
    /// Deactivation triggers the reassignment cascade. A cascade failure is
    /// logged and does not fail the status change.
    pub async fn set_user_active(&self, user_id: &str, is_active: bool) -> Result<User> {
        let user = self.store.set_user_active(user_id, is_active).await?;
        tracing::info!(user_id, is_active, "User status updated");

        if !is_active {
            self.reassign_after_deactivation(user_id).await;
        }

        Ok(user)
    }

    async fn reassign_after_deactivation(&self, user_id: &str) {
        if let Err(e) = self.reviews.reassign_reviews_after_deactivation(user_id).await {
            tracing::warn!(user_id, error = %e, "Review reassignment stopped early");
        }
    }
}
