//! MCP tool parameter types with JSON Schema support.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::{ImplementationStatus, Platform, SuggestionStatus};

/// Review decision for a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    /// Approve the suggestion for implementation.
    Approve,
    /// Reject the suggestion.
    Reject,
}

/// Parameters for the `list_suggestions` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListSuggestionsParams {
    /// Project ID.
    pub project_id: String,
    /// Status filter.
    #[serde(default)]
    pub status: Option<SuggestionStatus>,
    /// Maximum number of results (max 100).
    #[serde(default)]
    pub limit: Option<u32>,
    /// Number of results to skip.
    #[serde(default)]
    pub offset: Option<u32>,
}

/// Parameters for the `review_suggestion` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReviewSuggestionParams {
    /// Suggestion ID.
    pub suggestion_id: String,
    /// Approve or reject.
    pub decision: ReviewDecision,
}

/// Parameters for the `list_implementations` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListImplementationsParams {
    /// Project ID.
    pub project_id: String,
    /// Status filter.
    #[serde(default)]
    pub status: Option<ImplementationStatus>,
    /// Platform filter.
    #[serde(default)]
    pub platform: Option<Platform>,
    /// Maximum number of results (max 100).
    #[serde(default)]
    pub limit: Option<u32>,
    /// Number of results to skip.
    #[serde(default)]
    pub offset: Option<u32>,
}

/// Parameters for the `get_implementation` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetImplementationParams {
    /// Project ID.
    pub project_id: String,
    /// Implementation ID.
    pub implementation_id: String,
}

/// Parameters for the `create_implementations` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateImplementationsParams {
    /// Project ID.
    pub project_id: String,
    /// Approved suggestions to implement.
    pub suggestion_ids: Vec<String>,
    /// Target platform.
    pub platform: Platform,
    /// Platform credentials (opaque JSON object).
    #[serde(default)]
    pub credentials: Option<serde_json::Value>,
    /// Validate without writing to the platform.
    #[serde(default)]
    pub dry_run: Option<bool>,
    /// Check each target page for changes before writing.
    #[serde(default)]
    pub verify_content: Option<bool>,
}

/// Parameters for the `rollback_implementation` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RollbackImplementationParams {
    /// Project ID.
    pub project_id: String,
    /// Implementation ID.
    pub implementation_id: String,
    /// Why the link is being removed.
    #[serde(default)]
    pub reason: Option<String>,
    /// Platform credentials (opaque JSON object).
    #[serde(default)]
    pub credentials: Option<serde_json::Value>,
}

/// Parameters for the `get_credits` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCreditsParams {
    /// Project ID.
    pub project_id: String,
    /// Include transaction history.
    #[serde(default)]
    pub include_history: Option<bool>,
    /// History start (YYYY-MM-DD or RFC 3339).
    #[serde(default)]
    pub start_date: Option<String>,
    /// History end (YYYY-MM-DD or RFC 3339).
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Parameters for the `verify_content` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct VerifyContentParams {
    /// Project ID.
    pub project_id: String,
    /// Page to check.
    pub page_url: String,
    /// Suggestion the check is for.
    pub suggestion_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_suggestions_schema_generates() {
        let schema = schemars::schema_for!(ListSuggestionsParams);
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("project_id"));
        assert!(json.contains("status"));
        assert!(json.contains("limit"));
        assert!(json.contains("offset"));
    }

    #[test]
    fn review_decision_schema_has_variants() {
        let schema = schemars::schema_for!(ReviewDecision);
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("approve"));
        assert!(json.contains("reject"));
    }

    #[test]
    fn list_suggestions_deserializes_with_defaults() {
        let json = r#"{"project_id": "proj_1"}"#;
        let params: ListSuggestionsParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.project_id, "proj_1");
        assert!(params.status.is_none());
        assert!(params.limit.is_none());
        assert!(params.offset.is_none());
    }

    #[test]
    fn list_implementations_deserializes_filters() {
        let json = r#"{"project_id": "p", "status": "rolled_back", "platform": "shopify", "limit": 5}"#;
        let params: ListImplementationsParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.status, Some(ImplementationStatus::RolledBack));
        assert_eq!(params.platform, Some(Platform::Shopify));
        assert_eq!(params.limit, Some(5));
    }

    #[test]
    fn review_params_deserialize() {
        let json = r#"{"suggestion_id": "sugg_1", "decision": "reject"}"#;
        let params: ReviewSuggestionParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.decision, ReviewDecision::Reject);
    }

    #[test]
    fn get_credits_deserializes_dates() {
        let json = r#"{"project_id": "p", "start_date": "2024-01-01"}"#;
        let params: GetCreditsParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.start_date.as_deref(), Some("2024-01-01"));
        assert!(params.end_date.is_none());
    }
}
