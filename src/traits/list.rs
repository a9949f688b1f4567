//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::RankVectorsClient;
use crate::error::Result;

/// List entities matching a filter.
///
/// One call issues one request and returns the list carried by that
/// response. Paging is driven by the caller through the `limit` and
/// `offset` fields of the query, where the endpoint supports them.
///
/// # Example
///
/// ```ignore
/// use rankvectors::{RankVectorsClient, Suggestion, SuggestionListQuery, List};
///
/// let client = RankVectorsClient::from_env()?;
/// let pending = Suggestion::list(
///     &client,
///     &("proj_123".to_string(), SuggestionListQuery::pending()),
/// ).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Query parameters for filtering (usually includes the parent ID).
    type Query: Send + Sync;

    /// List entities matching the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list(client: &RankVectorsClient, query: &Self::Query) -> Result<Vec<Self>>;
}
