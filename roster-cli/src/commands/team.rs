//! Team commands

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use roster_core::{Config, Team, TeamMember};

use super::{open_services, print_json};

/// Team management commands
#[derive(Args, Debug)]
pub struct TeamArgs {
    #[command(subcommand)]
    pub command: TeamCommand,
}

#[derive(Subcommand, Debug)]
pub enum TeamCommand {
    /// Create a team from members given on the command line
    Add {
        /// Team name
        team_name: String,

        /// Member as `user_id=username`; repeat for each member
        #[arg(short, long = "member", value_parser = parse_member)]
        members: Vec<TeamMember>,
    },

    /// Create a team from a JSON file shaped like the `/team/add` body
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },

    /// Show a team and its members
    Get {
        /// Team name
        team_name: String,
    },

    /// Deactivate every member of a team
    Kill {
        /// Team name
        team_name: String,
    },
}

impl TeamArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let (db, services) = open_services(config).await?;

        let team = match &self.command {
            TeamCommand::Add { team_name, members } => {
                services
                    .teams
                    .add_team(Team::new(team_name.clone(), members.clone()))
                    .await?
            }
            TeamCommand::Import { file } => {
                let content = fs::read_to_string(file)
                    .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file.display(), e))?;
                let team: Team = serde_json::from_str(&content)?;
                services.teams.add_team(team).await?
            }
            TeamCommand::Get { team_name } => services.teams.get_team(team_name).await?,
            TeamCommand::Kill { team_name } => services.teams.kill_team(team_name).await?,
        };

        print_json(&team)?;
        db.close().await;
        Ok(())
    }
}

/// Parse `user_id=username` into an active member
fn parse_member(raw: &str) -> Result<TeamMember, String> {
    match raw.split_once('=') {
        Some((id, name)) if !id.trim().is_empty() && !name.trim().is_empty() => {
            Ok(TeamMember::new(id.trim(), name.trim()))
        }
        _ => Err(format!("expected user_id=username, got {:?}", raw)),
    }
}
