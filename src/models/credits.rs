//! Credit balance and history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::RankVectorsClient;
use crate::error::Result;
use crate::models::{parse_timestamp, project_path};
use crate::query::{QueryParams, ToQuery};

/// Credit balance of a project, optionally with its transaction history.
///
/// Absent fields stay absent and unmodelled ones are kept in `extra`, so the
/// balance serializes back to what the service sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditBalance {
    /// Credits currently available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<i64>,

    /// Credits consumed so far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_used: Option<i64>,

    /// Transactions, present when history was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<CreditTransaction>>,

    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CreditBalance {
    /// Available credits, zero when the service did not say.
    pub fn available(&self) -> i64 {
        self.balance.unwrap_or_default()
    }

    /// Transactions, empty when no history was returned.
    pub fn transactions(&self) -> &[CreditTransaction] {
        self.history.as_deref().unwrap_or_default()
    }
}

/// A single credit movement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditTransaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Positive for additions, negative for usage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,

    /// Transaction kind (e.g. "purchase", "usage", "refund").
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Where added credits came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CreditTransaction {
    /// Whether this transaction consumed credits.
    pub fn is_usage(&self) -> bool {
        self.amount.is_some_and(|a| a < 0)
    }

    pub fn created_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.created_at.as_deref())
    }
}

/// Options for reading the credit balance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreditQuery {
    /// Include the transaction history.
    pub include_history: Option<bool>,
    /// History start (inclusive).
    pub start_date: Option<DateTime<Utc>>,
    /// History end (inclusive).
    pub end_date: Option<DateTime<Utc>>,
}

impl CreditQuery {
    /// Balance plus full history.
    pub fn with_history() -> Self {
        Self {
            include_history: Some(true),
            ..Default::default()
        }
    }
}

impl ToQuery for CreditQuery {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push("includeHistory", self.include_history)
            .push_date("startDate", self.start_date)
            .push_date("endDate", self.end_date)
    }
}

/// Body for adding credits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddCreditsRequest {
    pub amount: i64,
    pub source: String,
}

/// Response to adding credits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddCreditsResponse {
    /// Balance after the addition.
    pub balance: i64,
    /// The recorded transaction.
    #[serde(default)]
    pub transaction: Option<CreditTransaction>,
}

/// Read a project's credit balance and, optionally, its history.
///
/// # Example
///
/// ```ignore
/// use rankvectors::{get_credits, CreditQuery};
///
/// let credits = get_credits(&client, "proj_123", CreditQuery::with_history()).await?;
/// println!("balance: {}", credits.available());
/// ```
#[tracing::instrument(skip(client))]
pub async fn get_credits(
    client: &RankVectorsClient,
    project_id: &str,
    query: CreditQuery,
) -> Result<CreditBalance> {
    let path = format!(
        "{}{}",
        project_path(project_id, "/credits"),
        query.to_query().to_query_string()
    );
    client.get(&path).await
}

/// Add credits to a project.
#[tracing::instrument(skip(client))]
pub async fn add_credits(
    client: &RankVectorsClient,
    project_id: &str,
    amount: i64,
    source: &str,
) -> Result<AddCreditsResponse> {
    let path = project_path(project_id, "/credits");
    let body = AddCreditsRequest {
        amount,
        source: source.to_string(),
    };
    client.post(&path, &body).await
}
