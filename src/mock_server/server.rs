//! Mock RankVectors API server.
//!
//! Provides an axum-based HTTP server that simulates the RankVectors API.

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock RankVectors API server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a stateful API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound. This type only exists for tests.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "mock server stopped");
            }
        });

        tracing::debug!(%addr, "mock server listening");

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating a `RankVectorsClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for suggestion in scenario.suggestions {
            state = state.with_suggestion(suggestion);
        }

        for implementation in scenario.implementations {
            state = state.with_implementation(implementation);
        }

        for (project_id, balance) in scenario.credits {
            state = state.with_credits(&project_id, balance);
        }

        for page in scenario.changed_pages {
            state = state.with_changed_page(&page);
        }

        state
    }

    /// Create the axum router with all routes.
    pub(crate) fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Suggestion routes
            .route(
                "/api/projects/:project_id/suggestions",
                get(handlers::list_suggestions),
            )
            .route(
                "/api/projects/suggestions/:id",
                patch(handlers::review_suggestion),
            )
            // Implementation routes
            .route(
                "/api/projects/:project_id/implementations",
                get(handlers::list_implementations).post(handlers::create_implementations),
            )
            .route(
                "/api/projects/:project_id/implementations/:id",
                get(handlers::get_implementation),
            )
            .route(
                "/api/projects/:project_id/implementations/:id/rollback",
                post(handlers::rollback_implementation),
            )
            // Credit routes
            .route(
                "/api/projects/:project_id/credits",
                get(handlers::get_credits).post(handlers::add_credits),
            )
            // Verification
            .route(
                "/api/projects/:project_id/verify-content",
                post(handlers::verify_content),
            )
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
