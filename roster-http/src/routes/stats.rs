//! Statistics and health endpoints

use axum::extract::State;
use axum::Json;
use roster_core::{PrReviewersCount, Services, UserReviewsCount};

use crate::dto::HealthResponse;
use crate::error::ApiResult;

/// GET /stat/pull_request/reviewers
pub async fn reviewers_per_pull_request(
    State(services): State<Services>,
) -> ApiResult<Json<Vec<PrReviewersCount>>> {
    Ok(Json(services.stats.reviewers_per_pull_request().await?))
}

/// GET /stat/users/reviews
pub async fn reviews_per_user(
    State(services): State<Services>,
) -> ApiResult<Json<Vec<UserReviewsCount>>> {
    Ok(Json(services.stats.reviews_per_user().await?))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
