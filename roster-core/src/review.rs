//! Reviewer assignment engine
//!
//! Reviewers are always drawn from the author's team, in the order the store
//! returns active teammates. Nothing here is randomized or load-balanced: the
//! first eligible teammates win.

use std::sync::Arc;

use chrono::Utc;

use crate::config::AssignmentConfig;
use crate::model::{NewPullRequest, PullRequest, PullRequestShort, Reassignment};
use crate::store::Store;
use crate::{Error, Result};

/// Whether `candidate_id` may take a review slot on a pull request
///
/// The author never reviews their own pull request, and nobody holds two
/// slots on the same one.
pub fn is_allowed_to_review(current_reviewers: &[String], author_id: &str, candidate_id: &str) -> bool {
    candidate_id != author_id && !current_reviewers.iter().any(|r| r == candidate_id)
}

/// Pick up to `limit` reviewers from `teammates`, keeping their order
pub fn select_reviewers(teammates: &[String], author_id: &str, limit: usize) -> Vec<String> {
    let mut selected: Vec<String> = Vec::with_capacity(limit.min(teammates.len()));
    for candidate in teammates {
        if selected.len() == limit {
            break;
        }
        if is_allowed_to_review(&selected, author_id, candidate) {
            selected.push(candidate.clone());
        }
    }
    selected
}

/// First teammate allowed to join the current reviewer set
fn find_replacement<'a>(
    teammates: &'a [String],
    current_reviewers: &[String],
    author_id: &str,
) -> Option<&'a String> {
    teammates
        .iter()
        .find(|candidate| is_allowed_to_review(current_reviewers, author_id, candidate))
}

/// Pull request lifecycle and reviewer assignment
#[derive(Clone)]
pub struct ReviewService {
    store: Arc<dyn Store>,
    config: AssignmentConfig,
}

impl ReviewService {
    pub fn new(store: Arc<dyn Store>, config: AssignmentConfig) -> Self {
        Self { store, config }
    }

    /// Open a pull request and assign its first reviewers
    ///
    /// The author must exist. The record and its reviewer slots are handed
    /// to the store together, so a duplicate id leaves nothing behind.
    pub async fn create_pull_request(&self, new: NewPullRequest) -> Result<PullRequest> {
        if new.pull_request_id.trim().is_empty() {
            return Err(Error::InvalidInput(
                "pull_request_id must not be empty".to_string(),
            ));
        }

        self.store.get_user(&new.author_id).await?;

        let mut pr = PullRequest::open(new);
        self.assign_reviewers(&mut pr).await?;
        self.store.create_pull_request(&pr).await?;

        tracing::info!(
            pull_request_id = %pr.pull_request_id,
            author_id = %pr.author_id,
            reviewers = ?pr.assigned_reviewers,
            "Pull request created"
        );
        Ok(pr)
    }

    /// Fill the reviewer list from the author's active teammates
    pub async fn assign_reviewers(&self, pr: &mut PullRequest) -> Result<()> {
        let teammates = self.store.active_teammates(&pr.author_id).await?;
        pr.assigned_reviewers =
            select_reviewers(&teammates, &pr.author_id, self.config.max_reviewers);

        if pr.assigned_reviewers.len() < self.config.max_reviewers {
            tracing::debug!(
                pull_request_id = %pr.pull_request_id,
                assigned = pr.assigned_reviewers.len(),
                "Author has fewer eligible teammates than reviewer slots"
            );
        }
        Ok(())
    }

    /// Swap `old_reviewer_id` for the first eligible active teammate
    ///
    /// When nobody is eligible the slot stays with the old reviewer, unless
    /// `fail_when_no_candidate` is set, in which case `NoCandidate` is returned.
    /// Neither path writes anything.
    pub async fn change_reviewer(
        &self,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<Reassignment> {
        let pr = self.store.get_pull_request(pull_request_id).await?;
        if pr.is_merged() {
            return Err(Error::PrMerged(pull_request_id.to_string()));
        }

        let reviewers = self.store.reviewers(pull_request_id).await?;
        if !reviewers.iter().any(|r| r == old_reviewer_id) {
            return Err(Error::NotAssigned {
                pull_request_id: pull_request_id.to_string(),
                reviewer_id: old_reviewer_id.to_string(),
            });
        }

        let teammates = self.store.active_teammates(&pr.author_id).await?;
        let new_reviewer_id = match find_replacement(&teammates, &reviewers, &pr.author_id) {
            Some(id) => id.clone(),
            None if self.config.fail_when_no_candidate => {
                return Err(Error::NoCandidate(pull_request_id.to_string()));
            }
            None => {
                tracing::debug!(
                    pull_request_id,
                    reviewer_id = old_reviewer_id,
                    "No replacement candidate, keeping current reviewer"
                );
                return Ok(Reassignment {
                    pull_request: pr,
                    replaced_by: old_reviewer_id.to_string(),
                });
            }
        };

        self.store
            .replace_reviewer(pull_request_id, old_reviewer_id, &new_reviewer_id)
            .await?;

        tracing::info!(
            pull_request_id,
            old_reviewer_id,
            new_reviewer_id = %new_reviewer_id,
            "Reviewer reassigned"
        );

        let pull_request = self.store.get_pull_request(pull_request_id).await?;
        Ok(Reassignment {
            pull_request,
            replaced_by: new_reviewer_id,
        })
    }

    /// Move every open review held by a deactivated user to someone else
    ///
    /// Merged pull requests are left as they are. The first failure stops the
    /// cascade; swaps made before it are kept. Returns how many slots moved.
    pub async fn reassign_reviews_after_deactivation(&self, user_id: &str) -> Result<usize> {
        let pull_request_ids = self.store.pull_requests_by_reviewer(user_id).await?;
        let mut moved = 0;

        for pull_request_id in &pull_request_ids {
            let pr = self.store.get_pull_request(pull_request_id).await?;
            if pr.is_merged() {
                continue;
            }

            let result = self.change_reviewer(pull_request_id, user_id).await?;
            if result.is_noop(user_id) {
                tracing::warn!(
                    pull_request_id = %pull_request_id,
                    user_id,
                    "Inactive reviewer kept, no active teammate available"
                );
            } else {
                moved += 1;
            }
        }

        tracing::info!(
            user_id,
            reviews = pull_request_ids.len(),
            moved,
            "Reassigned reviews of deactivated user"
        );
        Ok(moved)
    }

    /// Mark a pull request merged
    ///
    /// Merging twice returns the stored record and keeps the first merge time.
    pub async fn merge_pull_request(&self, pull_request_id: &str) -> Result<PullRequest> {
        let pr = self.store.get_pull_request(pull_request_id).await?;
        if pr.is_merged() {
            tracing::debug!(pull_request_id, "Pull request already merged");
            return Ok(pr);
        }

        let merged = self
            .store
            .merge_pull_request(pull_request_id, Utc::now())
            .await?;
        tracing::info!(pull_request_id, "Pull request merged");
        Ok(merged)
    }

    /// Pull requests the user is assigned to review
    pub async fn reviews_for_user(&self, user_id: &str) -> Result<Vec<PullRequestShort>> {
        self.store.get_user(user_id).await?;

        let mut reviews = Vec::new();
        for pull_request_id in self.store.pull_requests_by_reviewer(user_id).await? {
            let pr = self.store.get_pull_request(&pull_request_id).await?;
            reviews.push(pr.short());
        }
        Ok(reviews)
    }
}
