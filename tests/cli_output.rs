//! Tests for CLI output formatting.
//!
//! Covers JSON output with --json and the pretty-print default.

use rankvectors::{
    AddCreditsResponse, ContentVerification, CreditBalance, Implementation, PrettyPrint,
    RollbackResponse, Suggestion,
};

fn make_test_suggestion() -> Suggestion {
    serde_json::from_value(serde_json::json!({
        "id": "sugg_1",
        "projectId": "proj_1",
        "sourceUrl": "https://example.com/blog/a",
        "targetUrl": "https://example.com/pricing",
        "anchorText": "our pricing",
        "relevanceScore": 0.873,
        "status": "pending",
        "createdAt": "2024-01-01T12:00:00Z"
    }))
    .unwrap()
}

fn make_test_implementation() -> Implementation {
    serde_json::from_value(serde_json::json!({
        "id": "impl_1",
        "projectId": "proj_1",
        "suggestionId": "sugg_1",
        "platform": "webflow",
        "status": "rolled_back",
        "pageUrl": "https://example.com/blog/a",
        "rolledBackAt": "2024-01-05T08:30:00Z",
        "rollbackReason": "wrong anchor"
    }))
    .unwrap()
}

// ============================================================================
// JSON Output Tests
// ============================================================================

#[test]
fn test_json_output_uses_wire_names() {
    let suggestion = make_test_suggestion();
    let json_output = serde_json::to_string_pretty(&suggestion).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert_eq!(parsed["sourceUrl"], "https://example.com/blog/a");
    assert_eq!(parsed["status"], "pending");
}

#[test]
fn test_json_output_for_list_is_array() {
    let suggestions = vec![make_test_suggestion(), make_test_suggestion()];
    let json_output = serde_json::to_string_pretty(&suggestions).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}

#[test]
fn test_json_output_renames_transaction_kind() {
    let credits: CreditBalance = serde_json::from_value(serde_json::json!({
        "balance": 5,
        "history": [{"id": "tx_1", "amount": -1, "type": "usage"}]
    }))
    .unwrap();

    let parsed = serde_json::to_value(&credits).unwrap();
    assert_eq!(parsed["history"][0]["type"], "usage");
}

// ============================================================================
// Pretty-Print Tests
// ============================================================================

#[test]
fn test_default_output_is_not_json() {
    let output = make_test_suggestion().pretty_print();

    let parse_result: Result<serde_json::Value, _> = serde_json::from_str(&output);
    assert!(parse_result.is_err(), "Default output should NOT be valid JSON");
}

#[test]
fn test_suggestion_pretty_print_shows_key_fields() {
    let output = make_test_suggestion().pretty_print();

    assert!(output.contains("sugg_1"));
    assert!(output.contains("https://example.com/pricing"));
    assert!(output.contains("our pricing"));
    assert!(output.contains("Relevance:      0.87"));
    assert!(output.contains("2024-01-01 12:00:00 UTC"));
}

#[test]
fn test_implementation_pretty_print_shows_rollback() {
    let output = make_test_implementation().pretty_print();

    assert!(output.contains("Platform:       webflow"));
    assert!(output.contains("Status:         rolled_back"));
    assert!(output.contains("Reason:         wrong anchor"));
    assert!(output.contains("2024-01-05 08:30:00 UTC"));
}

#[test]
fn test_rollback_pretty_print() {
    let response = RollbackResponse {
        success: false,
        message: Some("already rolled back".to_string()),
        implementation: None,
    };
    let output = response.pretty_print();

    assert!(output.starts_with("Rollback: failed"));
    assert!(output.contains("already rolled back"));
}

#[test]
fn test_credit_pretty_print_lists_history() {
    let credits: CreditBalance = serde_json::from_value(serde_json::json!({
        "balance": 9,
        "totalUsed": 1,
        "history": [
            {"id": "tx_1", "amount": 10, "type": "purchase", "createdAt": "2024-01-01T00:00:00Z"},
            {"id": "tx_2", "amount": -1, "description": "Implementations", "createdAt": "2024-01-02T00:00:00Z"}
        ]
    }))
    .unwrap();
    let output = credits.pretty_print();

    assert!(output.contains("Balance:        9"));
    assert!(output.contains("2 transactions"));
    assert!(output.contains("+10"));
    assert!(output.contains("Implementations"));
}

#[test]
fn test_add_credits_pretty_print() {
    let response = AddCreditsResponse {
        balance: 110,
        transaction: None,
    };
    assert!(response.pretty_print().contains("Balance:        110"));
}

#[test]
fn test_verification_pretty_print() {
    let result: ContentVerification = serde_json::from_value(serde_json::json!({
        "changed": false,
        "pageUrl": "https://example.com/blog/a",
        "message": "Page content unchanged"
    }))
    .unwrap();
    let output = result.pretty_print();

    assert!(output.starts_with("Content: unchanged"));
    assert!(output.contains("https://example.com/blog/a"));
}

#[test]
fn test_list_pretty_print_is_table() {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct TestRow {
        id: String,
        status: String,
    }

    let rows = vec![TestRow {
        id: "sugg_1".to_string(),
        status: "pending".to_string(),
    }];

    let table_output = Table::new(rows).to_string();
    assert!(table_output.contains("id"));
    assert!(table_output.contains("sugg_1"));
}
