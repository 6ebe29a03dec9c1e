//! Team repository

use roster_core::{Team, TeamMember};
use sqlx::SqlitePool;

use crate::error::{Error, Result};
use crate::models::UserRow;

/// Repository for teams and their membership
pub struct TeamRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TeamRepository<'a> {
    /// Create a new team repository
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a team and upsert its members in one transaction
    ///
    /// Members that already exist keep their name and status and move to
    /// this team.
    pub async fn create(&self, team: &Team) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO teams (team_name) VALUES (?) ON CONFLICT (team_name) DO NOTHING",
        )
        .bind(&team.team_name)
        .execute(&mut *tx)
        .await?;

        if inserted.rows_affected() == 0 {
            return Err(Error::TeamExists(team.team_name.clone()));
        }

        for member in &team.members {
            sqlx::query(
                r#"
                INSERT INTO users (user_id, username, team_name, is_active)
                VALUES (?, ?, ?, ?)
                ON CONFLICT (user_id) DO UPDATE
                SET team_name = excluded.team_name, updated_at = CURRENT_TIMESTAMP
                "#,
            )
            .bind(&member.user_id)
            .bind(&member.username)
            .bind(&team.team_name)
            .bind(member.is_active)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Check whether a team name is taken
    pub async fn exists(&self, team_name: &str) -> Result<bool> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM teams WHERE team_name = ?")
            .bind(team_name)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Get a team with members in insertion order
    pub async fn get(&self, team_name: &str) -> Result<Team> {
        if !self.exists(team_name).await? {
            return Err(Error::NotFound(format!("Team {}", team_name)));
        }

        let members = sqlx::query_as::<_, UserRow>(
            "SELECT id, user_id, username, team_name, is_active FROM users WHERE team_name = ? ORDER BY id",
        )
        .bind(team_name)
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .map(TeamMember::from)
        .collect();

        Ok(Team::new(team_name, members))
    }

    /// Ids of the active members of a team, in insertion order
    pub async fn active_members(&self, team_name: &str) -> Result<Vec<String>> {
        if !self.exists(team_name).await? {
            return Err(Error::NotFound(format!("Team {}", team_name)));
        }

        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT user_id FROM users WHERE team_name = ? AND is_active = 1 ORDER BY id",
        )
        .bind(team_name)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
