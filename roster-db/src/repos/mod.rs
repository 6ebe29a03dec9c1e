//! Repository modules for database operations

pub mod pull_requests;
pub mod reviewers;
pub mod teams;
pub mod users;

pub use pull_requests::PullRequestRepository;
pub use reviewers::ReviewerRepository;
pub use teams::TeamRepository;
pub use users::UserRepository;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;
    use roster_core::{Team, TeamMember};
    use sqlx::SqlitePool;
    use tempfile::TempDir;

    use super::TeamRepository;
    use crate::connection::{Database, DatabaseConfig};

    /// Fresh migrated database in a temp dir; keep the dir alive for the test
    pub async fn setup_test_db() -> (Database, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::open(DatabaseConfig::new(temp_dir.path().join("test.db")))
            .await
            .unwrap();
        (db, temp_dir)
    }

    /// Team "backend" with active members u1..u4
    pub async fn seed_team(pool: &SqlitePool) {
        TeamRepository::new(pool)
            .create(&Team::new(
                "backend",
                vec![
                    TeamMember::new("u1", "Alice"),
                    TeamMember::new("u2", "Bob"),
                    TeamMember::new("u3", "Carol"),
                    TeamMember::new("u4", "Dave"),
                ],
            ))
            .await
            .unwrap();
    }

    /// Open pull request without reviewers
    pub async fn seed_pull_request(pool: &SqlitePool, pull_request_id: &str, author_id: &str) {
        sqlx::query(
            r#"
            INSERT INTO pull_requests (pull_request_id, pull_request_name, author_id, status, created_at)
            VALUES (?, ?, ?, 'created', ?)
            "#,
        )
        .bind(pull_request_id)
        .bind(format!("Change {}", pull_request_id))
        .bind(author_id)
        .bind(Utc::now())
        .execute(pool)
        .await
        .unwrap();
    }
}
