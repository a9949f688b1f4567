//! Mock RankVectors API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the
//! RankVectors API for integration and end-to-end testing. Unlike wiremock
//! which mocks at the HTTP level per-test, this server maintains state across
//! requests, so approving a suggestion and then implementing it behaves the
//! way the real service does.
//!
//! # Example
//!
//! ```ignore
//! use rankvectors::mock_server::{Fixtures, MockServer};
//! use rankvectors::{get_suggestions, RankVectorsClient, SuggestionListQuery};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = RankVectorsClient::new("test-key", Some(server.url())).unwrap();
//!
//!     // Server comes with default fixtures
//!     let pending = get_suggestions(&client, Fixtures::PROJECT_ID, SuggestionListQuery::pending())
//!         .await
//!         .unwrap();
//!     assert_eq!(pending.len(), 2);
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::MockState;
