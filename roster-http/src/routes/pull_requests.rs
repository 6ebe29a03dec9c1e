//! Pull request endpoints

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use roster_core::{NewPullRequest, Services};

use crate::dto::{MergeResponse, PrResponse, PullRequestIdRequest, ReassignRequest, ReassignResponse};
use crate::error::ApiResult;

/// POST /pullRequest/create
pub async fn create(
    State(services): State<Services>,
    payload: Result<Json<NewPullRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PrResponse>)> {
    let Json(new) = payload?;
    let pr = services.reviews.create_pull_request(new).await?;
    Ok((StatusCode::CREATED, Json(pr.into())))
}

/// POST /pullRequest/merge
pub async fn merge(
    State(services): State<Services>,
    payload: Result<Json<PullRequestIdRequest>, JsonRejection>,
) -> ApiResult<Json<MergeResponse>> {
    let Json(request) = payload?;
    let pr = services
        .reviews
        .merge_pull_request(&request.pull_request_id)
        .await?;
    Ok(Json(pr.into()))
}

/// POST /pullRequest/reassign
pub async fn reassign(
    State(services): State<Services>,
    payload: Result<Json<ReassignRequest>, JsonRejection>,
) -> ApiResult<Json<ReassignResponse>> {
    let Json(request) = payload?;
    let result = services
        .reviews
        .change_reviewer(&request.pull_request_id, &request.old_reviewer_id)
        .await?;
    Ok(Json(ReassignResponse {
        pr: result.pull_request.into(),
        replaced_by: result.replaced_by,
    }))
}
