//! E2E tests using the mock RankVectors server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use rankvectors::mock_server::{Fixtures, MockServer, MockState};
use rankvectors::{
    add_credits, approve_suggestion, create_implementations, get_credits, get_implementation,
    get_implementations, get_suggestions, reject_suggestion, rollback_implementation,
    verify_content, CreateImplementationsRequest, CreditQuery, ImplementationListQuery,
    ImplementationStatus, Platform, RankVectorsClient, SuggestionListQuery, SuggestionStatus,
};

const PROJECT: &str = Fixtures::PROJECT_ID;

fn client_for(server: &MockServer) -> RankVectorsClient {
    RankVectorsClient::new("test-key", Some(server.url())).unwrap()
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    let client = reqwest::Client::new();
    let result = client.get(format!("{}/health", url)).send().await;

    assert!(result.is_err());
}

// =============================================================================
// Review Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_review_then_implement_workflow() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let pending = get_suggestions(&client, PROJECT, SuggestionListQuery::pending())
        .await
        .unwrap();
    assert_eq!(pending.len(), 2);

    let approved = approve_suggestion(&client, &pending[0].id).await.unwrap();
    assert!(approved.is_approved());
    let rejected = reject_suggestion(&client, &pending[1].id).await.unwrap();
    assert_eq!(rejected.status(), SuggestionStatus::Rejected);

    let request = CreateImplementationsRequest::new(
        vec![approved.id.clone(), rejected.id.clone()],
        Platform::Wordpress,
        serde_json::json!({"siteUrl": "https://blog.example.com"}),
    );
    let response = create_implementations(&client, PROJECT, &request)
        .await
        .unwrap();

    assert_eq!(response.succeeded(), 1);
    assert_eq!(response.credits_used, Some(1));
    let failure = response.failures().next().unwrap();
    assert_eq!(failure.suggestion_id, rejected.id);

    let implementation_id = response.results[0].implementation_id.clone().unwrap();
    let implementation = get_implementation(&client, PROJECT, &implementation_id)
        .await
        .unwrap();
    assert!(implementation.is_completed());
    assert_eq!(implementation.suggestion_id.as_deref(), Some(approved.id.as_str()));

    let remaining = get_suggestions(&client, PROJECT, SuggestionListQuery::pending())
        .await
        .unwrap();
    assert!(remaining.is_empty());

    server.shutdown().await;
}

#[tokio::test]
async fn test_dry_run_spends_nothing() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let before = get_credits(&client, PROJECT, CreditQuery::default())
        .await
        .unwrap()
        .balance;

    let mut request = CreateImplementationsRequest::new(
        vec!["sugg_3".to_string()],
        Platform::Webflow,
        serde_json::json!({}),
    );
    request.dry_run = Some(true);
    let response = create_implementations(&client, PROJECT, &request)
        .await
        .unwrap();

    assert_eq!(response.succeeded(), 1);
    assert!(response.implementations.is_empty());

    let after = get_credits(&client, PROJECT, CreditQuery::default())
        .await
        .unwrap()
        .balance;
    assert_eq!(before, after);

    server.shutdown().await;
}

#[tokio::test]
async fn test_empty_batch_is_rejected() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let request = CreateImplementationsRequest::new(vec![], Platform::Wordpress, serde_json::json!({}));
    let err = create_implementations(&client, PROJECT, &request)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(400));
    assert_eq!(err.to_string(), "suggestionIds must not be empty");

    server.shutdown().await;
}

// =============================================================================
// Rollback Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_rollback_workflow() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let response = rollback_implementation(
        &client,
        PROJECT,
        "impl_1",
        Some("anchor no longer fits"),
        serde_json::json!({}),
    )
    .await
    .unwrap();
    assert!(response.success);

    let rolled_back = get_implementations(
        &client,
        PROJECT,
        ImplementationListQuery {
            status: Some(ImplementationStatus::RolledBack),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(rolled_back.len(), 1);
    assert_eq!(
        rolled_back[0].rollback_reason.as_deref(),
        Some("anchor no longer fits")
    );

    let again = rollback_implementation(&client, PROJECT, "impl_1", None, serde_json::json!({}))
        .await
        .unwrap();
    assert!(!again.success);

    server.shutdown().await;
}

#[tokio::test]
async fn test_rollback_unknown_implementation() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = rollback_implementation(&client, PROJECT, "impl_404", None, serde_json::json!({}))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Implementation not found");

    server.shutdown().await;
}

// =============================================================================
// Credit and Verification Tests
// =============================================================================

#[tokio::test]
async fn test_add_credits_then_read_history() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let response = add_credits(&client, PROJECT, 25, "stripe").await.unwrap();
    assert_eq!(response.balance, 35);

    let credits = get_credits(&client, PROJECT, CreditQuery::with_history())
        .await
        .unwrap();
    assert_eq!(credits.balance, Some(35));
    assert_eq!(credits.transactions().len(), 3);
    assert_eq!(credits.transactions()[2].amount, Some(25));

    server.shutdown().await;
}

#[tokio::test]
async fn test_verify_changed_page() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let changed = verify_content(&client, PROJECT, Fixtures::CHANGED_PAGE, "sugg_3")
        .await
        .unwrap();
    assert!(changed.is_changed());

    let unchanged = verify_content(&client, PROJECT, "https://example.com/blog/sugg_3", "sugg_3")
        .await
        .unwrap();
    assert!(unchanged.is_current());

    server.shutdown().await;
}

// =============================================================================
// Authentication Tests
// =============================================================================

#[tokio::test]
async fn test_required_token() {
    let state = MockState::new()
        .with_required_token("right-key")
        .with_credits("p1", Fixtures::credits(7));
    let server = MockServer::with_state(state).await;

    let wrong = RankVectorsClient::new("wrong-key", Some(server.url())).unwrap();
    let err = get_credits(&wrong, "p1", CreditQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(401));
    assert_eq!(err.to_string(), "Unauthorized");

    let right = RankVectorsClient::new("right-key", Some(server.url())).unwrap();
    let credits = get_credits(&right, "p1", CreditQuery::default())
        .await
        .unwrap();
    assert_eq!(credits.balance, Some(7));

    server.shutdown().await;
}

#[tokio::test]
async fn test_state_mutation_during_test() {
    let server = MockServer::start_empty().await;
    let client = client_for(&server);

    assert!(get_suggestions(&client, "p1", SuggestionListQuery::default())
        .await
        .unwrap()
        .is_empty());

    {
        let state = server.state();
        let mut state = state.write().await;
        state.suggestions.insert(
            "s1".to_string(),
            Fixtures::suggestion("s1", "p1", SuggestionStatus::Pending),
        );
    }

    let suggestions = get_suggestions(&client, "p1", SuggestionListQuery::default())
        .await
        .unwrap();
    assert_eq!(suggestions.len(), 1);

    server.shutdown().await;
}
