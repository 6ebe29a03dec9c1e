//! Statistics commands

use clap::{Args, Subcommand};
use roster_core::Config;

use super::{open_services, print_json};

/// Review statistics
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(subcommand)]
    pub command: StatsCommand,
}

#[derive(Subcommand, Debug)]
pub enum StatsCommand {
    /// Review count per user
    Users,

    /// Reviewer count per pull request
    PullRequests,
}

impl StatsArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let (db, services) = open_services(config).await?;

        match self.command {
            StatsCommand::Users => print_json(&services.stats.reviews_per_user().await?)?,
            StatsCommand::PullRequests => {
                print_json(&services.stats.reviewers_per_pull_request().await?)?
            }
        }

        db.close().await;
        Ok(())
    }
}
