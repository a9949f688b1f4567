//! RankVectors API client library.
//!
//! A Rust library for the RankVectors link suggestion and implementation
//! service. Every operation issues exactly one authenticated JSON request
//! through [`RankVectorsClient`]; entity operations (Get, List, Update) are
//! defined as traits that the model types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use rankvectors::{
//!     approve_suggestion, get_credits, CreditQuery, List, RankVectorsClient, Suggestion,
//!     SuggestionListQuery,
//! };
//!
//! #[tokio::main]
//! async fn main() -> rankvectors::Result<()> {
//!     // Create client from environment variables
//!     let client = RankVectorsClient::from_env()?;
//!
//!     // List suggestions awaiting review
//!     let pending = Suggestion::list(
//!         &client,
//!         &("proj_123".to_string(), SuggestionListQuery::pending()),
//!     )
//!     .await?;
//!     println!("{} suggestions to review", pending.len());
//!
//!     // Approve the first one
//!     if let Some(first) = pending.first() {
//!         let approved = approve_suggestion(&client, &first.id).await?;
//!         println!("Approved: {} ({})", approved.id, approved.status());
//!     }
//!
//!     // Check the remaining credit balance
//!     let credits = get_credits(&client, "proj_123", CreditQuery::default()).await?;
//!     println!("Credits left: {}", credits.available());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Non-2xx responses surface as [`RankVectorsError::RequestFailed`] carrying
//! the server's `error` message (or `HTTP <code> <reason>` when the body has
//! none). Nothing is retried.
//!
//! # Configuration
//!
//! [`RankVectorsClient::from_env`] reads:
//!
//! - `RANKVECTORS_API_KEY` (required) - Your RankVectors API key
//! - `RANKVECTORS_API_URL` (optional) - Base URL (defaults to `https://rankvectors.com`)

pub mod cli;
mod client;
mod error;
pub mod mcp;
mod models;
mod output;
mod query;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{ApiRequest, RankVectorsClient, DEFAULT_BASE_URL};
pub use error::{RankVectorsError, Result};
pub use output::PrettyPrint;
pub use query::{format_date, QueryParams, ToQuery};

// Re-export traits
pub use traits::{Get, List, Update};

// Re-export models
pub use models::{
    // Suggestion types
    Suggestion,
    SuggestionListQuery,
    SuggestionQuery,
    SuggestionReview,
    SuggestionStatus,
    // Implementation types
    CreateImplementationsRequest,
    CreateImplementationsResponse,
    Implementation,
    ImplementationId,
    ImplementationListQuery,
    ImplementationQuery,
    ImplementationResult,
    ImplementationStatus,
    Platform,
    RollbackRequest,
    RollbackResponse,
    // Credit types
    AddCreditsRequest,
    AddCreditsResponse,
    CreditBalance,
    CreditQuery,
    CreditTransaction,
    // Verification types
    ContentVerification,
    VerifyContentRequest,
};

// Re-export convenience functions
pub use models::{add_credits, get_credits, verify_content};
pub use models::{approve_suggestion, get_suggestions, reject_suggestion};
pub use models::{
    create_implementations, get_implementation, get_implementations, rollback_implementation,
};
