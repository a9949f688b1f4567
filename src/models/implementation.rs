//! Implementation model and trait implementations.
//!
//! An implementation records an attempt to insert an approved suggestion's
//! link into a live page on a publishing platform.

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
use crate::traits::{Get, List};

/// A link implementation record.
///
/// Like [`Suggestion`](crate::Suggestion), the record round-trips unchanged:
/// unmodelled fields go to [`Implementation::extra`] and enum-like fields
/// keep the service's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Implementation {
    /// Implementation ID.
    pub id: String,

    /// Owning project ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Suggestion this implementation applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion_id: Option<String>,

    /// Platform the link was written to. See [`Implementation::platform`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// Current status. See [`Implementation::status`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Page that was modified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,

    /// Failure reason, when the implementation failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// When the link went live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,

    /// When the link was removed again.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolled_back_at: Option<String>,

    /// Reason given for the rollback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollback_reason: Option<String>,

    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Implementation {
    /// Typed platform; [`Platform::Unknown`] when absent or unrecognized.
    pub fn platform(&self) -> Platform {
        self.platform
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or(Platform::Unknown)
    }

    /// Typed status; [`ImplementationStatus::Unknown`] when absent or
    /// unrecognized.
    pub fn status(&self) -> ImplementationStatus {
        self.status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(ImplementationStatus::Unknown)
    }

    pub fn completed_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.completed_at.as_deref())
    }

    pub fn rolled_back_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.rolled_back_at.as_deref())
    }

    /// Whether the link is live.
    pub fn is_completed(&self) -> bool {
        self.status() == ImplementationStatus::Completed
    }

    /// Whether the implementation was rolled back.
    pub fn is_rolled_back(&self) -> bool {
        self.status() == ImplementationStatus::RolledBack
    }
}

/// Publishing platform targeted by an implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Wordpress,
    Webflow,
    Shopify,
    Contentful,
    /// Custom integration via webhook.
    Custom,
    /// Platform not known to this client version. Never sent on the wire.
    #[serde(skip)]
    Unknown,
}

impl Platform {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wordpress => "wordpress",
            Self::Webflow => "webflow",
            Self::Shopify => "shopify",
            Self::Contentful => "contentful",
            Self::Custom => "custom",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wordpress" => Ok(Self::Wordpress),
            "webflow" => Ok(Self::Webflow),
            "shopify" => Ok(Self::Shopify),
            "contentful" => Ok(Self::Contentful),
            "custom" => Ok(Self::Custom),
            other => Err(format!(
                "unknown platform '{other}' (expected wordpress, webflow, shopify, contentful or custom)"
            )),
        }
    }
}

/// Status of an implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ImplementationStatus {
    /// Queued.
    #[default]
    Pending,
    /// Being written to the platform.
    Processing,
    /// Link is live.
    Completed,
    /// Write failed.
    Failed,
    /// Link removed again.
    RolledBack,
    /// Status not known to this client version. Never sent on the wire.
    #[serde(skip)]
    Unknown,
}

impl ImplementationStatus {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::RolledBack => "rolled_back",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ImplementationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImplementationStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "rolled_back" => Ok(Self::RolledBack),
            other => Err(format!(
                "unknown implementation status '{other}' (expected pending, processing, completed, failed or rolled_back)"
            )),
        }
    }
}

/// Filters for listing implementations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImplementationListQuery {
    /// Only implementations in this status.
    pub status: Option<ImplementationStatus>,
    /// Only implementations on this platform.
    pub platform: Option<Platform>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Number of results to skip.
    pub offset: Option<u32>,
}

impl ToQuery for ImplementationListQuery {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push("status", self.status)
            .push("platform", self.platform)
            .push("limit", self.limit)
            .push("offset", self.offset)
    }
}

/// Query type for implementation listing (project ID plus filters).
pub type ImplementationQuery = (String, ImplementationListQuery);

/// ID type for a single implementation (project ID, implementation ID).
pub type ImplementationId = (String, String);

/// Body for creating a batch of implementations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateImplementationsRequest {
    /// Approved suggestions to implement.
    pub suggestion_ids: Vec<String>,

    /// Target platform.
    pub platform: Platform,

    /// Platform credentials, passed through to the service unchanged.
    pub credentials: serde_json::Value,

    /// Validate without writing to the platform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,

    /// Check each target page for changes before writing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_content: Option<bool>,
}

impl CreateImplementationsRequest {
    /// Create a request with no optional flags set.
    pub fn new(
        suggestion_ids: Vec<String>,
        platform: Platform,
        credentials: serde_json::Value,
    ) -> Self {
        Self {
            suggestion_ids,
            platform,
            credentials,
            dry_run: None,
            verify_content: None,
        }
    }
}

/// Outcome for one suggestion in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationResult {
    pub suggestion_id: String,
    pub success: bool,
    #[serde(default)]
    pub implementation_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response to a batch creation; may report partial success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateImplementationsResponse {
    /// Implementations that were created.
    #[serde(default)]
    pub implementations: Vec<Implementation>,

    /// Per-suggestion outcomes.
    #[serde(default)]
    pub results: Vec<ImplementationResult>,

    /// Credits charged for the batch.
    #[serde(default)]
    pub credits_used: Option<u64>,
}

impl CreateImplementationsResponse {
    /// Number of suggestions that succeeded.
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    /// Results for suggestions that failed.
    pub fn failures(&self) -> impl Iterator<Item = &ImplementationResult> {
        self.results.iter().filter(|r| !r.success)
    }
}

/// Body for rolling back an implementation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollbackRequest {
    /// Why the link is being removed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Platform credentials, passed through to the service unchanged.
    pub credentials: serde_json::Value,
}

/// Response to a rollback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollbackResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// The implementation after rollback.
    #[serde(default)]
    pub implementation: Option<Implementation>,
}

/// API response wrapper for listing implementations.
#[derive(Debug, Deserialize)]
struct ImplementationListResponse {
    #[serde(default)]
    implementations: Vec<Implementation>,
}

#[async_trait]
impl Get for Implementation {
    type Id = ImplementationId;

    #[tracing::instrument(skip(client))]
    async fn get(client: &RankVectorsClient, id: Self::Id) -> Result<Self> {
        let (project_id, implementation_id) = id;
        let path = project_path(
            &project_id,
            &format!("/implementations/{}", urlencoding::encode(&implementation_id)),
        );
        client.get(&path).await
    }
}

#[async_trait]
impl List for Implementation {
    type Query = ImplementationQuery;

    #[tracing::instrument(skip(client))]
    async fn list(client: &RankVectorsClient, query: &Self::Query) -> Result<Vec<Self>> {
        let (project_id, filters) = query;
        let path = format!(
            "{}{}",
            project_path(project_id, "/implementations"),
            filters.to_query().to_query_string()
        );

        let data: ImplementationListResponse = client.get(&path).await?;
        Ok(data.implementations)
    }
}

// Convenience functions for working with implementations

/// Create implementations for a batch of approved suggestions.
///
/// A successful call may still describe per-suggestion failures in
/// [`CreateImplementationsResponse::results`].
///
/// # Example
///
/// ```ignore
/// use rankvectors::{create_implementations, CreateImplementationsRequest, Platform};
///
/// let response = create_implementations(
///     &client,
///     "proj_123",
///     &CreateImplementationsRequest::new(
///         vec!["sugg_1".to_string()],
///         Platform::Wordpress,
///         serde_json::json!({"siteUrl": "https://blog.example.com", "token": "..."}),
///     ),
/// ).await?;
/// println!("{} of {} succeeded", response.succeeded(), response.results.len());
/// ```
#[tracing::instrument(skip(client, request), fields(count = request.suggestion_ids.len()))]
pub async fn create_implementations(
    client: &RankVectorsClient,
    project_id: &str,
    request: &CreateImplementationsRequest,
) -> Result<CreateImplementationsResponse> {
    let path = project_path(project_id, "/implementations");
    client.post(&path, request).await
}

/// Get a single implementation.
pub async fn get_implementation(
    client: &RankVectorsClient,
    project_id: &str,
    implementation_id: &str,
) -> Result<Implementation> {
    Implementation::get(client, (project_id.to_string(), implementation_id.to_string())).await
}

/// List implementations for a project.
pub async fn get_implementations(
    client: &RankVectorsClient,
    project_id: &str,
    query: ImplementationListQuery,
) -> Result<Vec<Implementation>> {
    Implementation::list(client, &(project_id.to_string(), query)).await
}

/// Roll back an implementation, removing its link from the page.
///
/// `credentials` is opaque to this client and validated only by the service.
#[tracing::instrument(skip(client, credentials))]
pub async fn rollback_implementation(
    client: &RankVectorsClient,
    project_id: &str,
    implementation_id: &str,
    reason: Option<&str>,
    credentials: serde_json::Value,
) -> Result<RollbackResponse> {
    let path = project_path(
        project_id,
        &format!("/implementations/{}/rollback", urlencoding::encode(implementation_id)),
    );
    let body = RollbackRequest {
        reason: reason.map(str::to_string),
        credentials,
    };
    client.post(&path, &body).await
}
