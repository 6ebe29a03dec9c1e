//! Reviewer slot repository

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::error::Result;

/// Insert one reviewer slot
///
/// Takes any executor so pull request creation can run it inside its
/// transaction.
pub(crate) async fn insert_reviewer<'e, E>(
    executor: E,
    pull_request_id: &str,
    reviewer_id: &str,
) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("INSERT INTO pr_reviewers (pull_request_id, reviewer_id) VALUES (?, ?)")
        .bind(pull_request_id)
        .bind(reviewer_id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Repository for reviewer assignments
pub struct ReviewerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ReviewerRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Reviewers of a pull request in slot order
    pub async fn list_for_pull_request(&self, pull_request_id: &str) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT reviewer_id FROM pr_reviewers WHERE pull_request_id = ? ORDER BY id",
        )
        .bind(pull_request_id)
        .fetch_all(self.pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Swap the reviewer in place, keeping the slot id
    pub async fn replace(
        &self,
        pull_request_id: &str,
        old_reviewer_id: &str,
        new_reviewer_id: &str,
    ) -> Result<()> {
        sqlx::query(
            "UPDATE pr_reviewers SET reviewer_id = ? WHERE pull_request_id = ? AND reviewer_id = ?",
        )
        .bind(new_reviewer_id)
        .bind(pull_request_id)
        .bind(old_reviewer_id)
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Pull requests the user reviews, oldest assignment first
    pub async fn list_for_reviewer(&self, reviewer_id: &str) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT pull_request_id FROM pr_reviewers WHERE reviewer_id = ? ORDER BY id",
        )
        .bind(reviewer_id)
        .fetch_all(self.pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Review count per reviewer, ordered by first assignment
    pub async fn count_by_reviewer(&self) -> Result<Vec<(String, i64)>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT reviewer_id, COUNT(*) AS count FROM pr_reviewers GROUP BY reviewer_id ORDER BY MIN(id)",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Reviewer count per pull request, ordered by first assignment
    pub async fn count_by_pull_request(&self) -> Result<Vec<(String, i64)>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT pull_request_id, COUNT(*) AS count FROM pr_reviewers GROUP BY pull_request_id ORDER BY MIN(id)",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::test_support::{seed_pull_request, seed_team, setup_test_db};

    #[tokio::test]
    async fn test_insert_and_list() {
        let (db, _temp) = setup_test_db().await;
        seed_team(db.pool()).await;
        seed_pull_request(db.pool(), "pr-1", "u1").await;
        let repo = ReviewerRepository::new(db.pool());

        insert_reviewer(db.pool(), "pr-1", "u3").await.unwrap();
        insert_reviewer(db.pool(), "pr-1", "u2").await.unwrap();

        assert_eq!(repo.list_for_pull_request("pr-1").await.unwrap(), vec!["u3", "u2"]);
        assert!(repo.list_for_pull_request("pr-2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_keeps_slot_order() {
        let (db, _temp) = setup_test_db().await;
        seed_team(db.pool()).await;
        seed_pull_request(db.pool(), "pr-1", "u1").await;
        let repo = ReviewerRepository::new(db.pool());
        insert_reviewer(db.pool(), "pr-1", "u2").await.unwrap();
        insert_reviewer(db.pool(), "pr-1", "u3").await.unwrap();

        repo.replace("pr-1", "u2", "u4").await.unwrap();

        assert_eq!(repo.list_for_pull_request("pr-1").await.unwrap(), vec!["u4", "u3"]);
        assert!(repo.list_for_reviewer("u2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_counts() {
        let (db, _temp) = setup_test_db().await;
        seed_team(db.pool()).await;
        seed_pull_request(db.pool(), "pr-1", "u1").await;
        seed_pull_request(db.pool(), "pr-2", "u2").await;
        let repo = ReviewerRepository::new(db.pool());
        insert_reviewer(db.pool(), "pr-1", "u2").await.unwrap();
        insert_reviewer(db.pool(), "pr-1", "u3").await.unwrap();
        insert_reviewer(db.pool(), "pr-2", "u3").await.unwrap();

        assert_eq!(
            repo.count_by_reviewer().await.unwrap(),
            vec![("u2".to_string(), 1), ("u3".to_string(), 2)]
        );
        assert_eq!(
            repo.count_by_pull_request().await.unwrap(),
            vec![("pr-1".to_string(), 2), ("pr-2".to_string(), 1)]
        );
        assert_eq!(repo.list_for_reviewer("u3").await.unwrap(), vec!["pr-1", "pr-2"]);
    }
}
