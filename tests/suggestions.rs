//! Execution tests for suggestion operations.
//!
//! Uses wiremock to mock the RankVectors API.

use std::collections::HashMap;

use rankvectors::{
    approve_suggestion, get_suggestions, reject_suggestion, List, RankVectorsClient, Suggestion,
    SuggestionListQuery, SuggestionStatus, ToQuery,
};
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn suggestion_json(id: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "projectId": "proj_1",
        "sourceUrl": "https://example.com/blog/a",
        "targetUrl": "https://example.com/pricing",
        "anchorText": "pricing",
        "relevanceScore": 0.9,
        "status": status,
        "createdAt": "2024-01-01T00:00:00.000Z"
    })
}

#[tokio::test]
async fn test_list_suggestions_without_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/projects/proj_1/suggestions"))
        .and(query_param_is_missing("status"))
        .and(query_param_is_missing("limit"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "suggestions": [suggestion_json("s1", "pending"), suggestion_json("s2", "approved")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RankVectorsClient::new("test-key", Some(&mock_server.uri())).unwrap();
    let suggestions = get_suggestions(&client, "proj_1", SuggestionListQuery::default())
        .await
        .unwrap();

    assert_eq!(suggestions.len(), 2);
    assert!(suggestions[0].is_pending());
    assert!(suggestions[1].is_approved());
}

#[tokio::test]
async fn test_list_returns_records_as_sent() {
    let mock_server = MockServer::start().await;

    let records = serde_json::json!([
        {
            "id": "s1",
            "sourceUrl": "https://example.com/blog/a",
            "targetUrl": "https://example.com/pricing",
            "status": "archived",
            "priority": 3,
            "relevanceScore": 1,
            "createdAt": "2024-01-01T00:00:00.000Z",
            "tags": ["seo", "q1"]
        },
        {"id": "s2", "status": "pending"}
    ]);

    Mock::given(method("GET"))
        .and(path("/api/projects/proj_1/suggestions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"suggestions": records.clone()})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RankVectorsClient::new("test-key", Some(&mock_server.uri())).unwrap();
    let suggestions = get_suggestions(&client, "proj_1", SuggestionListQuery::default())
        .await
        .unwrap();

    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].status(), SuggestionStatus::Unknown);
    assert_eq!(suggestions[0].status.as_deref(), Some("archived"));
    assert!(suggestions[1].source_url.is_none());
    assert!(suggestions[1].is_pending());
    assert_eq!(serde_json::to_value(&suggestions).unwrap(), records);
}

#[tokio::test]
async fn test_list_suggestions_sends_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/projects/proj_1/suggestions"))
        .and(query_param("status", "pending"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "suggestions": [suggestion_json("s1", "pending")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RankVectorsClient::new("test-key", Some(&mock_server.uri())).unwrap();
    let query = SuggestionListQuery {
        status: Some(SuggestionStatus::Pending),
        limit: Some(10),
        offset: Some(20),
    };
    let suggestions = Suggestion::list(&client, &("proj_1".to_string(), query))
        .await
        .unwrap();

    assert_eq!(suggestions.len(), 1);
}

#[tokio::test]
async fn test_missing_list_field_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/projects/proj_1/suggestions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;

    let client = RankVectorsClient::new("test-key", Some(&mock_server.uri())).unwrap();
    let suggestions = get_suggestions(&client, "proj_1", SuggestionListQuery::default())
        .await
        .unwrap();

    assert!(suggestions.is_empty());
}

#[tokio::test]
async fn test_approve_sends_patch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/projects/suggestions/s1"))
        .and(body_json(serde_json::json!({"status": "approved"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(suggestion_json("s1", "approved")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RankVectorsClient::new("test-key", Some(&mock_server.uri())).unwrap();
    let suggestion = approve_suggestion(&client, "s1").await.unwrap();

    assert_eq!(suggestion.status(), SuggestionStatus::Approved);
}

#[tokio::test]
async fn test_reject_sends_patch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/projects/suggestions/s1"))
        .and(body_json(serde_json::json!({"status": "rejected"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(suggestion_json("s1", "rejected")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RankVectorsClient::new("test-key", Some(&mock_server.uri())).unwrap();
    let suggestion = reject_suggestion(&client, "s1").await.unwrap();

    assert_eq!(suggestion.status(), SuggestionStatus::Rejected);
}

#[tokio::test]
async fn test_review_unknown_suggestion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/projects/suggestions/nope"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"error": "Suggestion not found"})),
        )
        .mount(&mock_server)
        .await;

    let client = RankVectorsClient::new("test-key", Some(&mock_server.uri())).unwrap();
    let err = approve_suggestion(&client, "nope").await.unwrap_err();

    assert_eq!(err.to_string(), "Suggestion not found");
    assert!(err.is_not_found());
}

#[test]
fn test_query_string_decodes_with_serde_qs() {
    let query = SuggestionListQuery {
        status: Some(SuggestionStatus::Approved),
        limit: Some(5),
        offset: None,
    };
    let rendered = query.to_query().to_query_string();
    let decoded: HashMap<String, String> =
        serde_qs::from_str(rendered.trim_start_matches('?')).unwrap();

    assert_eq!(decoded.get("status").map(String::as_str), Some("approved"));
    assert_eq!(decoded.get("limit").map(String::as_str), Some("5"));
    assert!(!decoded.contains_key("offset"));
}
