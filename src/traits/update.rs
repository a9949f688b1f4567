//! Update trait for modifying entities.

use async_trait::async_trait;

use crate::client::RankVectorsClient;
use crate::error::Result;

/// Update an existing entity.
///
/// # Example
///
/// ```ignore
/// use rankvectors::{RankVectorsClient, Suggestion, SuggestionReview, Update};
///
/// let client = RankVectorsClient::from_env()?;
/// let approved = Suggestion::update(
///     &client,
///     "sugg_123".to_string(),
///     SuggestionReview::approve(),
/// ).await?;
/// ```
#[async_trait]
pub trait Update: Sized {
    /// The ID type for this entity.
    type Id: Send;

    /// Parameters for the update.
    type Params: Send;

    /// Update the entity and return the updated version.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn update(client: &RankVectorsClient, id: Self::Id, params: Self::Params)
        -> Result<Self>;
}
