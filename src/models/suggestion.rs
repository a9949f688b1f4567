//! Suggestion model and trait implementations.
//!
//! A suggestion proposes a link from a source page to a target page and
//! waits for approval before it can be implemented.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::client::RankVectorsClient;
use crate::error::Result;
use crate::models::{parse_timestamp, project_path};
use crate::query::{QueryParams, ToQuery};
use crate::traits::{List, Update};

/// A proposed link insertion.
///
/// Records are kept as the service sent them: fields this client does not
/// model land in [`Suggestion::extra`], and status values it does not know
/// are kept verbatim. Serializing a suggestion reproduces the original
/// object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Suggestion ID.
    pub id: String,

    /// Owning project ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Page that would receive the link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Page the link points to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,

    /// Proposed anchor text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_text: Option<String>,

    /// Surrounding text where the link would be placed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Relevance score assigned by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<serde_json::Number>,

    /// Review status as sent by the service. See [`Suggestion::status`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Suggestion {
    /// Typed review status; [`SuggestionStatus::Unknown`] when the service
    /// sent no status or one this client does not recognize.
    pub fn status(&self) -> SuggestionStatus {
        self.status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(SuggestionStatus::Unknown)
    }

    /// Relevance score as a float.
    pub fn relevance(&self) -> Option<f64> {
        self.relevance_score.as_ref().and_then(|n| n.as_f64())
    }

    /// Creation time, when present and RFC 3339.
    pub fn created_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.created_at.as_deref())
    }

    /// Whether the suggestion is still awaiting review.
    pub fn is_pending(&self) -> bool {
        self.status() == SuggestionStatus::Pending
    }

    /// Whether the suggestion has been approved (and may be implemented).
    pub fn is_approved(&self) -> bool {
        self.status() == SuggestionStatus::Approved
    }
}

/// Review status of a suggestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    /// Awaiting review.
    #[default]
    Pending,
    /// Approved for implementation.
    Approved,
    /// Rejected by a reviewer.
    Rejected,
    /// Link has been inserted.
    Implemented,
    /// Status not known to this client version. Never sent on the wire.
    #[serde(skip)]
    Unknown,
}

impl SuggestionStatus {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Implemented => "implemented",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuggestionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "implemented" => Ok(Self::Implemented),
            other => Err(format!(
                "unknown suggestion status '{other}' (expected pending, approved, rejected or implemented)"
            )),
        }
    }
}

/// Filters for listing suggestions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionListQuery {
    /// Only suggestions in this status.
    pub status: Option<SuggestionStatus>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Number of results to skip.
    pub offset: Option<u32>,
}

impl SuggestionListQuery {
    /// Query for suggestions awaiting review.
    pub fn pending() -> Self {
        Self {
            status: Some(SuggestionStatus::Pending),
            ..Default::default()
        }
    }
}

impl ToQuery for SuggestionListQuery {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push("status", self.status)
            .push("limit", self.limit)
            .push("offset", self.offset)
    }
}

/// Query type for suggestion listing (project ID plus filters).
pub type SuggestionQuery = (String, SuggestionListQuery);

/// Body of a review request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionReview {
    /// New status for the suggestion.
    pub status: SuggestionStatus,
}

impl SuggestionReview {
    /// Approve the suggestion.
    pub fn approve() -> Self {
        Self {
            status: SuggestionStatus::Approved,
        }
    }

    /// Reject the suggestion.
    pub fn reject() -> Self {
        Self {
            status: SuggestionStatus::Rejected,
        }
    }
}

/// API response wrapper for listing suggestions.
#[derive(Debug, Deserialize)]
struct SuggestionListResponse {
    #[serde(default)]
    suggestions: Vec<Suggestion>,
}

#[async_trait]
impl List for Suggestion {
    type Query = SuggestionQuery;

    #[tracing::instrument(skip(client))]
    async fn list(client: &RankVectorsClient, query: &Self::Query) -> Result<Vec<Self>> {
        let (project_id, filters) = query;
        let path = format!(
            "{}{}",
            project_path(project_id, "/suggestions"),
            filters.to_query().to_query_string()
        );

        let data: SuggestionListResponse = client.get(&path).await?;
        Ok(data.suggestions)
    }
}

#[async_trait]
impl Update for Suggestion {
    type Id = String;
    type Params = SuggestionReview;

    #[tracing::instrument(skip(client))]
    async fn update(
        client: &RankVectorsClient,
        id: Self::Id,
        params: Self::Params,
    ) -> Result<Self> {
        let path = format!("/api/projects/suggestions/{}", urlencoding::encode(&id));
        client.patch(&path, &params).await
    }
}

// Convenience functions for working with suggestions

/// List suggestions for a project.
///
/// # Example
///
/// ```ignore
/// use rankvectors::{RankVectorsClient, get_suggestions, SuggestionListQuery};
///
/// let client = RankVectorsClient::from_env()?;
/// let suggestions = get_suggestions(&client, "proj_123", SuggestionListQuery::pending()).await?;
/// ```
pub async fn get_suggestions(
    client: &RankVectorsClient,
    project_id: &str,
    query: SuggestionListQuery,
) -> Result<Vec<Suggestion>> {
    Suggestion::list(client, &(project_id.to_string(), query)).await
}

/// Approve a suggestion.
pub async fn approve_suggestion(client: &RankVectorsClient, id: &str) -> Result<Suggestion> {
    Suggestion::update(client, id.to_string(), SuggestionReview::approve()).await
}

/// Reject a suggestion.
pub async fn reject_suggestion(client: &RankVectorsClient, id: &str) -> Result<Suggestion> {
    Suggestion::update(client, id.to_string(), SuggestionReview::reject()).await
}
