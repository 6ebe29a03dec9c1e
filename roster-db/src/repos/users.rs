//! User repository

use roster_core::User;
use sqlx::SqlitePool;

use crate::error::{Error, Result};
use crate::models::UserRow;

/// Repository for user records
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user by id
    pub async fn get(&self, user_id: &str) -> Result<User> {
        sqlx::query_as::<_, UserRow>(
            "SELECT id, user_id, username, team_name, is_active FROM users WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .map(User::from)
        .ok_or_else(|| Error::NotFound(format!("User {}", user_id)))
    }

    /// Update the active flag and return the new record
    pub async fn set_active(&self, user_id: &str, is_active: bool) -> Result<User> {
        let result = sqlx::query(
            "UPDATE users SET is_active = ?, updated_at = CURRENT_TIMESTAMP WHERE user_id = ?",
        )
        .bind(is_active)
        .bind(user_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("User {}", user_id)));
        }

        self.get(user_id).await
    }

    /// Active members of the user's team in insertion order
    pub async fn active_teammates(&self, user_id: &str) -> Result<Vec<String>> {
        let user = self.get(user_id).await?;

        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT user_id FROM users WHERE team_name = ? AND is_active = 1 ORDER BY id",
        )
        .bind(&user.team_name)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::teams::TeamRepository;
    use crate::repos::test_support::setup_test_db;
    use roster_core::{Team, TeamMember};

    async fn seed(pool: &SqlitePool) {
        TeamRepository::new(pool)
            .create(&Team::new(
                "backend",
                vec![
                    TeamMember::new("u1", "Alice"),
                    TeamMember::new("u2", "Bob"),
                    TeamMember::new("u3", "Carol"),
                ],
            ))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_get_user() {
        let (db, _temp) = setup_test_db().await;
        seed(db.pool()).await;
        let repo = UserRepository::new(db.pool());

        let user = repo.get("u2").await.unwrap();
        assert_eq!(user.username, "Bob");
        assert_eq!(user.team_name, "backend");
        assert!(user.is_active);

        assert!(matches!(repo.get("u9").await.unwrap_err(), Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_set_active() {
        let (db, _temp) = setup_test_db().await;
        seed(db.pool()).await;
        let repo = UserRepository::new(db.pool());

        let user = repo.set_active("u2", false).await.unwrap();
        assert!(!user.is_active);
        assert_eq!(repo.active_teammates("u1").await.unwrap(), vec!["u1", "u3"]);

        assert!(matches!(
            repo.set_active("u9", false).await.unwrap_err(),
            Error::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_active_teammates_ordered_by_insertion() {
        let (db, _temp) = setup_test_db().await;
        seed(db.pool()).await;
        let repo = UserRepository::new(db.pool());

        assert_eq!(
            repo.active_teammates("u3").await.unwrap(),
            vec!["u1", "u2", "u3"]
        );
    }
}
