//! Content verification handler.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;

use super::{authorize, error_response};
use crate::mock_server::state::MockState;
use crate::VerifyContentRequest;

/// POST /api/projects/{project_id}/verify-content
pub async fn verify_content(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(project_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<VerifyContentRequest>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    if request.page_url.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "pageUrl is required");
    }

    let result = state.verify_content(&project_id, &request.page_url, &request.suggestion_id);
    (StatusCode::OK, Json(result)).into_response()
}
