//! Pull request commands

use clap::{Args, Subcommand};
use roster_core::{Config, NewPullRequest};
use roster_http::dto::{MergeResponse, PrResponse, ReassignResponse};

use super::{open_services, print_json};

/// Pull request commands
#[derive(Args, Debug)]
pub struct PrArgs {
    #[command(subcommand)]
    pub command: PrCommand,
}

#[derive(Subcommand, Debug)]
pub enum PrCommand {
    /// Open a pull request and assign reviewers
    Create {
        /// Pull request id
        pull_request_id: String,

        /// Pull request title
        #[arg(short, long)]
        name: String,

        /// Author user id
        #[arg(short, long)]
        author: String,
    },

    /// Mark a pull request merged
    Merge {
        /// Pull request id
        pull_request_id: String,
    },

    /// Replace a reviewer with another active teammate
    Reassign {
        /// Pull request id
        pull_request_id: String,

        /// Reviewer to replace
        old_reviewer_id: String,
    },
}

impl PrArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let (db, services) = open_services(config).await?;

        match &self.command {
            PrCommand::Create {
                pull_request_id,
                name,
                author,
            } => {
                let pr = services
                    .reviews
                    .create_pull_request(NewPullRequest::new(
                        pull_request_id.as_str(),
                        name.as_str(),
                        author.as_str(),
                    ))
                    .await?;
                print_json(&PrResponse::from(pr))?;
            }
            PrCommand::Merge { pull_request_id } => {
                let pr = services.reviews.merge_pull_request(pull_request_id).await?;
                print_json(&MergeResponse::from(pr))?;
            }
            PrCommand::Reassign {
                pull_request_id,
                old_reviewer_id,
            } => {
                let result = services
                    .reviews
                    .change_reviewer(pull_request_id, old_reviewer_id)
                    .await?;
                print_json(&ReassignResponse {
                    pr: result.pull_request.into(),
                    replaced_by: result.replaced_by,
                })?;
            }
        }

        db.close().await;
        Ok(())
    }
}
