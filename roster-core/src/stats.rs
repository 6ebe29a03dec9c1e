//! Review statistics

use std::sync::Arc;

use crate::model::{PrReviewersCount, UserReviewsCount};
use crate::store::Store;
use crate::Result;

/// Read-only reports over reviewer assignments
#[derive(Clone)]
pub struct StatsService {
    store: Arc<dyn Store>,
}

impl StatsService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Every reviewer with the number of pull requests they review
    pub async fn reviews_per_user(&self) -> Result<Vec<UserReviewsCount>> {
        let counts = self.store.count_reviews_by_user().await?;
        let mut report = Vec::with_capacity(counts.len());
        for (user_id, reviews_count) in counts {
            let user = self.store.get_user(&user_id).await?;
            report.push(UserReviewsCount {
                user,
                reviews_count,
            });
        }
        Ok(report)
    }

    /// Every pull request with reviewers and how many it has
    pub async fn reviewers_per_pull_request(&self) -> Result<Vec<PrReviewersCount>> {
        let counts = self.store.count_reviewers_by_pull_request().await?;
        let mut report = Vec::with_capacity(counts.len());
        for (pull_request_id, count) in counts {
            let pr = self.store.get_pull_request(&pull_request_id).await?;
            report.push(PrReviewersCount {
                pull_request: pr.short(),
                count,
            });
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssignmentConfig;
    use crate::model::{NewPullRequest, Team, TeamMember};
    use crate::review::ReviewService;
    use crate::store::{MemoryStore, TeamStore};

    #[tokio::test]
    async fn test_reports() {
        let store = MemoryStore::new();
        store
            .add_team(&Team::new(
                "T",
                vec![
                    TeamMember::new("A", "alice"),
                    TeamMember::new("B", "bob"),
                    TeamMember::new("C", "carol"),
                ],
            ))
            .await
            .unwrap();
        let shared: Arc<dyn Store> = Arc::new(store);
        let reviews = ReviewService::new(shared.clone(), AssignmentConfig::default());
        reviews
            .create_pull_request(NewPullRequest::new("p1", "One", "A"))
            .await
            .unwrap();
        reviews
            .create_pull_request(NewPullRequest::new("p2", "Two", "B"))
            .await
            .unwrap();

        let stats = StatsService::new(shared);

        let per_user = stats.reviews_per_user().await.unwrap();
        let summary: Vec<_> = per_user
            .iter()
            .map(|c| (c.user.user_id.as_str(), c.reviews_count))
            .collect();
        assert_eq!(summary, vec![("B", 1), ("C", 2), ("A", 1)]);
        assert_eq!(per_user[0].user.username, "bob");

        let per_pr = stats.reviewers_per_pull_request().await.unwrap();
        assert_eq!(per_pr.len(), 2);
        assert_eq!(per_pr[0].pull_request.pull_request_id, "p1");
        assert_eq!(per_pr[0].count, 2);
    }

    #[tokio::test]
    async fn test_empty_reports() {
        let stats = StatsService::new(Arc::new(MemoryStore::new()));
        assert!(stats.reviews_per_user().await.unwrap().is_empty());
        assert!(stats.reviewers_per_pull_request().await.unwrap().is_empty());
    }
}
