//! Suggestion endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::{authorize, error_response, paginate};
use crate::mock_server::state::MockState;
use crate::{Suggestion, SuggestionReview, SuggestionStatus};

/// Query parameters for listing suggestions.
#[derive(Debug, Default, Deserialize)]
pub struct ListSuggestionsQuery {
    pub status: Option<SuggestionStatus>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Response for listing suggestions.
#[derive(Debug, Serialize)]
pub struct ListSuggestionsResponse {
    pub suggestions: Vec<Suggestion>,
    pub total: usize,
}

/// GET /api/projects/{project_id}/suggestions
pub async fn list_suggestions(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(project_id): Path<String>,
    headers: HeaderMap,
    Query(query): Query<ListSuggestionsQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    let matching = state.list_suggestions(&project_id, query.status);
    let total = matching.len();
    let suggestions = paginate(matching, query.limit, query.offset);

    (
        StatusCode::OK,
        Json(ListSuggestionsResponse { suggestions, total }),
    )
        .into_response()
}

/// PATCH /api/projects/suggestions/{id}
pub async fn review_suggestion(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(review): Json<SuggestionReview>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    if !matches!(
        review.status,
        SuggestionStatus::Approved | SuggestionStatus::Rejected
    ) {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid status: {}", review.status),
        );
    }

    match state.review_suggestion(&id, review.status) {
        Some(suggestion) => (StatusCode::OK, Json(suggestion.clone())).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "Suggestion not found"),
    }
}
