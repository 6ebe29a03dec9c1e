//! User endpoints

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use roster_core::Services;

use crate::dto::{SetActiveRequest, UserIdQuery, UserResponse, UserReviewsResponse};
use crate::error::ApiResult;

/// POST /users/setIsActive
///
/// Deactivation moves the user's open reviews before responding.
pub async fn set_is_active(
    State(services): State<Services>,
    payload: Result<Json<SetActiveRequest>, JsonRejection>,
) -> ApiResult<Json<UserResponse>> {
    let Json(request) = payload?;
    let user = services
        .teams
        .set_user_active(&request.user_id, request.is_active)
        .await?;
    Ok(Json(UserResponse { user }))
}

/// GET /users/getReview?user_id=
pub async fn get_reviews(
    State(services): State<Services>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> ApiResult<Json<UserReviewsResponse>> {
    let Query(query) = query?;
    let pull_requests = services.reviews.reviews_for_user(&query.user_id).await?;
    Ok(Json(UserReviewsResponse {
        user_id: query.user_id,
        pull_requests,
    }))
}
