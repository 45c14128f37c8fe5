//! API Integration Tests
//!
//! Each test spawns the server on a fresh in-memory store; no external
//! services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use integration_tests::{assert_json, assert_status, fixtures::*, TestServer};
use qamous_core::entities::Definition;
use qamous_core::error::DomainError;
use qamous_core::traits::{DefinitionRepository, RepoResult, UserRepository};
use qamous_core::value_objects::{DefinitionId, UserId};
use qamous_core::ReactionKind;
use reqwest::StatusCode;

async fn author_points(server: &TestServer) -> i64 {
    UserRepository::find_by_id(&server.store, server.seed.author.user.id)
        .await
        .unwrap()
        .unwrap()
        .points
}

/// Definition store whose every query fails the way a broken database would
struct FailingDefinitions;

const STORE_FAULT: &str = "relation \"definitions\" does not exist";

#[async_trait]
impl DefinitionRepository for FailingDefinitions {
    async fn find_by_id(&self, _id: DefinitionId) -> RepoResult<Option<Definition>> {
        Err(DomainError::DatabaseError(STORE_FAULT.to_string()))
    }

    async fn find_ids_after(
        &self,
        _after: Option<DefinitionId>,
        _limit: i64,
    ) -> RepoResult<Vec<DefinitionId>> {
        Err(DomainError::DatabaseError(STORE_FAULT.to_string()))
    }

    async fn create(
        &self,
        _author_id: UserId,
        _word_id: i64,
        _body: &str,
        _example: Option<&str>,
        _is_arabic: bool,
    ) -> RepoResult<Definition> {
        Err(DomainError::DatabaseError(STORE_FAULT.to_string()))
    }
}

async fn counts(server: &TestServer) -> CountsBody {
    let response = server
        .get(&server.seed.reaction_path("counts"))
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Reaction Mutation Tests
// ============================================================================

#[tokio::test]
async fn test_like_switch_remove_flow() {
    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.seed.reader.token.clone();

    let response = server
        .post_auth_empty(&server.seed.reaction_path("like"), &token)
        .await
        .unwrap();
    let body: ReactionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.success);
    assert_eq!(body.message, "Definition liked");

    let c = counts(&server).await;
    assert_eq!(c.definition_id, server.seed.definition.id.into_inner());
    assert_eq!((c.like_count, c.dislike_count), (1, 0));
    assert_eq!(author_points(&server).await, 1);

    let response = server
        .post_auth(
            &server.seed.reaction_path("switch"),
            &token,
            &SwitchRequest { to: "dislike" },
        )
        .await
        .unwrap();
    let body: ReactionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.success);

    let c = counts(&server).await;
    assert_eq!((c.like_count, c.dislike_count), (0, 1));
    assert_eq!(author_points(&server).await, -1);

    let response = server
        .post_auth_empty(&server.seed.reaction_path("undislike"), &token)
        .await
        .unwrap();
    let body: ReactionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.success);

    let c = counts(&server).await;
    assert_eq!((c.like_count, c.dislike_count), (0, 0));
    assert_eq!(author_points(&server).await, 0);
}

#[tokio::test]
async fn test_missing_token_is_unauthenticated() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_empty(&server.seed.reaction_path("like"))
        .await
        .unwrap();
    let body: ReactionBody = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert!(!body.success);
    assert_eq!(body.message, "User must be authenticated");
}

#[tokio::test]
async fn test_garbage_token_is_unauthenticated() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_auth_empty(&server.seed.reaction_path("dislike"), "not-a-jwt")
        .await
        .unwrap();
    let body: ReactionBody = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert!(!body.success);
}

#[tokio::test]
async fn test_self_reaction_conflict() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_auth_empty(
            &server.seed.reaction_path("like"),
            &server.seed.author.token,
        )
        .await
        .unwrap();
    let body: ReactionBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert!(!body.success);
    assert_eq!(body.message, "Cannot react to your own definition");

    let c = counts(&server).await;
    assert_eq!((c.like_count, c.dislike_count), (0, 0));
    assert_eq!(author_points(&server).await, 0);
}

#[tokio::test]
async fn test_repeat_like_conflict() {
    let server = TestServer::start().await.expect("Failed to start server");
    let token = &server.seed.reader.token;
    let path = server.seed.reaction_path("like");

    let response = server.post_auth_empty(&path, token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.post_auth_empty(&path, token).await.unwrap();
    let body: ReactionBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body.message, "User has already liked this definition");
    assert_eq!(counts(&server).await.like_count, 1);
}

#[tokio::test]
async fn test_remove_without_reaction_not_found() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_auth_empty(
            &server.seed.reaction_path("unlike"),
            &server.seed.reader.token,
        )
        .await
        .unwrap();
    let body: ReactionBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert!(!body.success);
    assert_eq!(body.message, "No like reaction found for this definition");
}

#[tokio::test]
async fn test_unknown_and_malformed_definition() {
    let server = TestServer::start().await.expect("Failed to start server");
    let token = &server.seed.reader.token;

    let response = server
        .post_auth_empty("/api/v1/reactions/999/like", token)
        .await
        .unwrap();
    let body: ReactionBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.message, "Definition 999 not found");

    let response = server
        .post_auth_empty("/api/v1/reactions/abc/like", token)
        .await
        .unwrap();
    let body: ReactionBody = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert!(!body.success);

    let response = server.get("/api/v1/reactions/999/counts").await.unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_DEFINITION");
}

#[tokio::test]
async fn test_store_failure_is_reported_generically() {
    let server = TestServer::start_with_definitions(|_| Arc::new(FailingDefinitions))
        .await
        .expect("Failed to start server");

    let response = server
        .get(&server.seed.reaction_path("counts"))
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .unwrap();
    assert_eq!(body.error.code, "DATABASE_ERROR");
    assert_eq!(body.error.message, "Internal server error");

    let response = server
        .post_auth_empty(
            &server.seed.reaction_path("like"),
            &server.seed.reader.token,
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let text = response.text().await.unwrap();
    assert!(!text.contains("relation"), "leaked store detail: {text}");
    let body: ReactionBody = serde_json::from_str(&text).unwrap();
    assert!(!body.success);
    assert_eq!(body.message, "Internal server error");
    assert_eq!(author_points(&server).await, 0);
}

#[tokio::test]
async fn test_switch_rejects_bad_body() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_auth(
            &server.seed.reaction_path("switch"),
            &server.seed.reader.token,
            &serde_json::json!({"to": "love"}),
        )
        .await
        .unwrap();
    let body: ReactionBody = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert!(!body.success);
}

#[tokio::test]
async fn test_concurrent_likes() {
    let server = TestServer::start().await.expect("Failed to start server");
    let jwt = qamous_common::JwtService::new("integration-test-secret", 3600);

    let mut readers = Vec::new();
    for i in 0..8 {
        readers.push(
            TestUser::create(&server.store, &jwt, &format!("crowd_{i}"))
                .await
                .unwrap(),
        );
    }

    let path = server.seed.reaction_path("like");
    let responses = join_all(
        readers
            .iter()
            .map(|reader| server.post_auth_empty(&path, &reader.token)),
    )
    .await;

    for response in responses {
        assert_status(response.unwrap(), StatusCode::OK).await.unwrap();
    }
    assert_eq!(counts(&server).await.like_count, 8);
    assert_eq!(author_points(&server).await, 8);
}

// ============================================================================
// Query Tests
// ============================================================================

#[tokio::test]
async fn test_ledger_queries() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_auth_empty(&server.seed.reaction_path("like"), &server.seed.reader.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    let response = server
        .post_auth_empty(&server.seed.reaction_path("dislike"), &server.seed.admin.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get(&server.seed.reaction_path("likes-dislikes"))
        .await
        .unwrap();
    let rows: Vec<ReactionItemBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].user_id, server.seed.reader.user.id.into_inner());
    assert_eq!(rows[0].kind, "like");
    assert_eq!(rows[1].kind, "dislike");

    let response = server.get(&server.seed.reaction_path("likes")).await.unwrap();
    let body: CountBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((body.kind.as_str(), body.count), ("like", 1));

    let response = server
        .get(&server.seed.reaction_path("dislikes"))
        .await
        .unwrap();
    let body: CountBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((body.kind.as_str(), body.count), ("dislike", 1));

    let response = server
        .get_auth(&server.seed.reaction_path("me"), &server.seed.reader.token)
        .await
        .unwrap();
    let body: StateBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.state, "liked");

    let response = server.get(&server.seed.reaction_path("me")).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Admin Tests
// ============================================================================

#[tokio::test]
async fn test_admin_requires_admin_user() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_empty("/api/v1/admin/reactions/reset")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .post_auth_empty("/api/v1/admin/reactions/reset", &server.seed.reader.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_recalculate_repairs_counters() {
    let server = TestServer::start().await.expect("Failed to start server");
    let seed = &server.seed;

    let second = DefinitionRepository::create(&server.store, seed.author.user.id, 2, "second", None, false)
        .await
        .unwrap();
    let third = DefinitionRepository::create(&server.store, seed.author.user.id, 3, "third", None, false)
        .await
        .unwrap();
    server
        .store
        .seed_reaction(seed.reader.user.id, seed.definition.id, ReactionKind::Like)
        .await;
    server.store.set_counts(second.id, 4, 2).await;

    // Configured batch size (2) splits the three definitions across two batches
    let response = server
        .post_auth_empty("/api/v1/admin/reactions/recalculate", &seed.admin.token)
        .await
        .unwrap();
    let body: RecalculateBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.failed_batches, 0);
    assert_eq!(body.updated.len(), 3);
    assert_eq!(body.updated[0].definition_id, seed.definition.id.into_inner());
    assert_eq!((body.updated[0].likes, body.updated[0].dislikes), (1, 0));
    assert_eq!((body.updated[1].likes, body.updated[1].dislikes), (0, 0));
    assert_eq!(body.updated[2].definition_id, third.id.into_inner());

    let c = counts(&server).await;
    assert_eq!((c.like_count, c.dislike_count), (1, 0));

    let response = server
        .post_auth(
            "/api/v1/admin/reactions/recalculate",
            &seed.admin.token,
            &serde_json::json!({"batch_size": 0}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_reset_clears_everything() {
    let server = TestServer::start().await.expect("Failed to start server");
    let seed = &server.seed;

    let response = server
        .post_auth_empty(&seed.reaction_path("like"), &seed.reader.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_auth_empty("/api/v1/admin/reactions/reset", &seed.admin.token)
        .await
        .unwrap();
    let body: ResetBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.reactions_deleted, 1);

    let c = counts(&server).await;
    assert_eq!((c.like_count, c.dislike_count), (0, 0));
    assert_eq!(author_points(&server).await, 0);
}

#[tokio::test]
async fn test_reset_refused_in_production() {
    let server = TestServer::start_with_env("production")
        .await
        .expect("Failed to start server");

    let response = server
        .post_auth_empty("/api/v1/admin/reactions/reset", &server.seed.admin.token)
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
}
