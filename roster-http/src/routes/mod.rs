//! Route table

pub mod pull_requests;
pub mod stats;
pub mod team;
pub mod users;

use axum::routing::{get, post};
use axum::Router;
use roster_core::Services;
use tower_http::trace::TraceLayer;

/// Build the router over the given services
pub fn router(services: Services) -> Router {
    Router::new()
        .route("/health", get(stats::health))
        .route("/team/add", post(team::add_team))
        .route("/team/get", get(team::get_team))
        .route("/team/kill", post(team::kill_team))
        .route("/users/setIsActive", post(users::set_is_active))
        .route("/users/getReview", get(users::get_reviews))
        .route("/pullRequest/create", post(pull_requests::create))
        .route("/pullRequest/merge", post(pull_requests::merge))
        .route("/pullRequest/reassign", post(pull_requests::reassign))
        .route(
            "/stat/pull_request/reviewers",
            get(stats::reviewers_per_pull_request),
        )
        .route("/stat/users/reviews", get(stats::reviews_per_user))
        .layer(TraceLayer::new_for_http())
        .with_state(services)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use roster_core::{AssignmentConfig, MemoryStore, Store};
    use serde_json::{json, Value};
    use tower::ServiceExt; // for `oneshot`

    use super::*;

    fn app_with(config: AssignmentConfig) -> Router {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        router(Services::new(store, config))
    }

    fn app() -> Router {
        app_with(AssignmentConfig::default())
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        send(app, Method::POST, uri, Some(body)).await
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::GET, uri, None).await
    }

    async fn seed_team(app: &Router) {
        let (status, _) = post_json(
            app,
            "/team/add",
            json!({
                "team_name": "backend",
                "members": [
                    {"user_id": "A", "username": "Alice", "is_active": true},
                    {"user_id": "B", "username": "Bob", "is_active": true},
                    {"user_id": "C", "username": "Carol", "is_active": true},
                    {"user_id": "D", "username": "Dave", "is_active": true}
                ]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    async fn create_pr(app: &Router, id: &str, author: &str) -> (StatusCode, Value) {
        post_json(
            app,
            "/pullRequest/create",
            json!({"pull_request_id": id, "pull_request_name": "Add search", "author_id": author}),
        )
        .await
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(&app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_team_add_and_get() {
        let app = app();
        seed_team(&app).await;

        let (status, body) = get_json(&app, "/team/get?team_name=backend").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["team_name"], "backend");
        assert_eq!(body["members"].as_array().unwrap().len(), 4);

        let (status, body) = post_json(&app, "/team/add", json!({"team_name": "backend"})).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "TEAM_EXISTS");

        let (status, body) = get_json(&app, "/team/get?team_name=frontend").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_create_pull_request() {
        let app = app();
        seed_team(&app).await;

        let (status, body) = create_pr(&app, "pr-1", "A").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "created");
        assert_eq!(body["assigned_reviewers"], json!(["B", "C"]));

        let (status, body) = create_pr(&app, "pr-1", "A").await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "PR_EXISTS");

        let (status, body) = create_pr(&app, "pr-2", "Z").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_reassign_and_merge() {
        let app = app();
        seed_team(&app).await;
        create_pr(&app, "pr-1", "A").await;

        let (status, body) = post_json(
            &app,
            "/pullRequest/reassign",
            json!({"pull_request_id": "pr-1", "old_reviewer_id": "B"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["replaced_by"], "D");
        assert_eq!(body["pr"]["assigned_reviewers"], json!(["D", "C"]));

        let (status, body) = post_json(
            &app,
            "/pullRequest/reassign",
            json!({"pull_request_id": "pr-1", "old_user_id": "A"}),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "NOT_ASSIGNED");

        let (status, body) =
            post_json(&app, "/pullRequest/merge", json!({"pull_request_id": "pr-1"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pr"]["status"], "merged");
        let merged_at = body["pr"]["merged_at"].clone();
        assert!(merged_at.is_string());

        let (status, body) =
            post_json(&app, "/pullRequest/merge", json!({"pull_request_id": "pr-1"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pr"]["merged_at"], merged_at);

        let (status, body) = post_json(
            &app,
            "/pullRequest/reassign",
            json!({"pull_request_id": "pr-1", "old_reviewer_id": "C"}),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "PR_MERGED");

        let (status, _) =
            post_json(&app, "/pullRequest/merge", json!({"pull_request_id": "pr-9"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_strict_mode_reports_no_candidate() {
        let app = app_with(AssignmentConfig {
            fail_when_no_candidate: true,
            ..AssignmentConfig::default()
        });
        post_json(
            &app,
            "/team/add",
            json!({
                "team_name": "pair",
                "members": [
                    {"user_id": "A", "username": "Alice", "is_active": true},
                    {"user_id": "B", "username": "Bob", "is_active": true}
                ]
            }),
        )
        .await;
        create_pr(&app, "pr-1", "A").await;

        let (status, body) = post_json(
            &app,
            "/pullRequest/reassign",
            json!({"pull_request_id": "pr-1", "old_reviewer_id": "B"}),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "NO_CANDIDATE");
    }

    #[tokio::test]
    async fn test_deactivation_and_reviews() {
        let app = app();
        seed_team(&app).await;
        create_pr(&app, "pr-1", "A").await;

        let (status, body) = get_json(&app, "/users/getReview?user_id=B").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user_id"], "B");
        assert_eq!(body["pull_requests"][0]["pull_request_id"], "pr-1");

        let (status, body) = post_json(
            &app,
            "/users/setIsActive",
            json!({"user_id": "B", "is_active": false}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["is_active"], false);
        assert_eq!(body["user"]["team_name"], "backend");

        let (_, body) = get_json(&app, "/users/getReview?user_id=B").await;
        assert_eq!(body["pull_requests"], json!([]));
        let (_, body) = get_json(&app, "/users/getReview?user_id=D").await;
        assert_eq!(body["pull_requests"][0]["pull_request_id"], "pr-1");

        let (status, _) = get_json(&app, "/users/getReview?user_id=nobody").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_kill_team() {
        let app = app();
        seed_team(&app).await;

        let (status, body) = post_json(&app, "/team/kill", json!({"team_name": "backend"})).await;
        assert_eq!(status, StatusCode::OK);
        let members = body["members"].as_array().unwrap();
        assert!(members.iter().all(|m| m["is_active"] == false));

        let (status, _) = post_json(&app, "/team/kill", json!({"team_name": "ghosts"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_stats() {
        let app = app();
        seed_team(&app).await;
        create_pr(&app, "pr-1", "A").await;
        create_pr(&app, "pr-2", "B").await;

        let (status, body) = get_json(&app, "/stat/users/reviews").await;
        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows[0]["user"]["user_id"], "B");
        assert_eq!(rows[1]["user"]["user_id"], "C");
        assert_eq!(rows[1]["reviews_count"], 2);

        let (status, body) = get_json(&app, "/stat/pull_request/reviewers").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["pull_request"]["pull_request_id"], "pr-1");
        assert_eq!(body[0]["count"], 2);
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_input() {
        let app = app();

        let (status, body) =
            post_json(&app, "/pullRequest/merge", json!({"id": "pr-1"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_INPUT");

        let (status, body) = get_json(&app, "/team/get").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
    }
}
