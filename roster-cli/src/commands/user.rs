//! User commands

use clap::{Args, Subcommand};
use roster_core::Config;
use serde_json::json;

use super::{open_services, print_json};

/// User management commands
#[derive(Args, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Activate or deactivate a user; deactivation moves their open reviews
    SetActive {
        /// User id
        user_id: String,

        /// New active flag
        #[arg(action = clap::ArgAction::Set)]
        is_active: bool,
    },

    /// List pull requests the user reviews
    Reviews {
        /// User id
        user_id: String,
    },
}

impl UserArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let (db, services) = open_services(config).await?;

        match &self.command {
            UserCommand::SetActive { user_id, is_active } => {
                let user = services.teams.set_user_active(user_id, *is_active).await?;
                print_json(&json!({ "user": user }))?;
            }
            UserCommand::Reviews { user_id } => {
                let pull_requests = services.reviews.reviews_for_user(user_id).await?;
                print_json(&json!({ "user_id": user_id, "pull_requests": pull_requests }))?;
            }
        }

        db.close().await;
        Ok(())
    }
}
