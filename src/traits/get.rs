//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::RankVectorsClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// Implement this trait for entity types that can be fetched individually.
/// Entities scoped to a project use a `(project_id, id)` pair as their ID.
///
/// # Example
///
/// ```ignore
/// use rankvectors::{RankVectorsClient, Implementation, Get};
///
/// let client = RankVectorsClient::from_env()?;
/// let implementation = Implementation::get(
///     &client,
///     ("proj_123".to_string(), "impl_456".to_string()),
/// ).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id: Send;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn get(client: &RankVectorsClient, id: Self::Id) -> Result<Self>;
}
