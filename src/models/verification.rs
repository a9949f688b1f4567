//! Content change detection.
//!
//! Before a suggestion is implemented the target page may have changed
//! since it was last scraped; verification asks the service to compare.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::RankVectorsClient;
use crate::error::Result;
use crate::models::{parse_timestamp, project_path};

/// Body for a content verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyContentRequest {
    pub page_url: String,
    pub suggestion_id: String,
}

/// Result of a content verification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentVerification {
    /// Whether the page changed since it was last scraped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_scraped_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_at: Option<String>,

    /// Human-readable explanation from the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ContentVerification {
    /// Whether the service reported a change.
    pub fn is_changed(&self) -> bool {
        self.changed == Some(true)
    }

    /// Whether the suggestion can be implemented without re-scraping.
    /// Only an explicit `changed: false` counts.
    pub fn is_current(&self) -> bool {
        self.changed == Some(false)
    }

    pub fn last_scraped_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.last_scraped_at.as_deref())
    }
}

/// Check whether a page changed since it was last scraped.
#[tracing::instrument(skip(client))]
pub async fn verify_content(
    client: &RankVectorsClient,
    project_id: &str,
    page_url: &str,
    suggestion_id: &str,
) -> Result<ContentVerification> {
    let path = project_path(project_id, "/verify-content");
    let body = VerifyContentRequest {
        page_url: page_url.to_string(),
        suggestion_id: suggestion_id.to_string(),
    };
    client.post(&path, &body).await
}
