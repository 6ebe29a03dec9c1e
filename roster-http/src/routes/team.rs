//! Team endpoints

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use roster_core::{Services, Team};

use crate::dto::{KillTeamRequest, TeamNameQuery};
use crate::error::ApiResult;

/// POST /team/add
pub async fn add_team(
    State(services): State<Services>,
    payload: Result<Json<Team>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Team>)> {
    let Json(team) = payload?;
    let team = services.teams.add_team(team).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

/// GET /team/get?team_name=
pub async fn get_team(
    State(services): State<Services>,
    query: Result<Query<TeamNameQuery>, QueryRejection>,
) -> ApiResult<Json<Team>> {
    let Query(query) = query?;
    Ok(Json(services.teams.get_team(&query.team_name).await?))
}

/// POST /team/kill
pub async fn kill_team(
    State(services): State<Services>,
    payload: Result<Json<KillTeamRequest>, JsonRejection>,
) -> ApiResult<Json<Team>> {
    let Json(request) = payload?;
    Ok(Json(services.teams.kill_team(&request.team_name).await?))
}
