//! Implementation endpoint handlers.

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
use crate::{
    CreateImplementationsRequest, Implementation, ImplementationStatus, Platform, RollbackRequest,
};

/// Query parameters for listing implementations.
#[derive(Debug, Default, Deserialize)]
pub struct ListImplementationsQuery {
    pub status: Option<ImplementationStatus>,
    pub platform: Option<Platform>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Response for listing implementations.
#[derive(Debug, Serialize)]
pub struct ListImplementationsResponse {
    pub implementations: Vec<Implementation>,
    pub total: usize,
}

/// POST /api/projects/{project_id}/implementations
pub async fn create_implementations(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(project_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<CreateImplementationsRequest>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    if request.suggestion_ids.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "suggestionIds must not be empty");
    }
    if !request.credentials.is_object() {
        return error_response(StatusCode::BAD_REQUEST, "credentials must be an object");
    }

    let response = state.create_implementations(
        &project_id,
        &request.suggestion_ids,
        request.platform,
        request.dry_run.unwrap_or(false),
    );

    (StatusCode::OK, Json(response)).into_response()
}

/// GET /api/projects/{project_id}/implementations
pub async fn list_implementations(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(project_id): Path<String>,
    headers: HeaderMap,
    Query(query): Query<ListImplementationsQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    let matching = state.list_implementations(&project_id, query.status, query.platform);
    let total = matching.len();
    let implementations = paginate(matching, query.limit, query.offset);

    (
        StatusCode::OK,
        Json(ListImplementationsResponse {
            implementations,
            total,
        }),
    )
        .into_response()
}

/// GET /api/projects/{project_id}/implementations/{id}
pub async fn get_implementation(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((project_id, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    match state.get_implementation(&project_id, &id) {
        Some(implementation) => (StatusCode::OK, Json(implementation.clone())).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "Implementation not found"),
    }
}

/// POST /api/projects/{project_id}/implementations/{id}/rollback
pub async fn rollback_implementation(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((project_id, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(request): Json<RollbackRequest>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    match state.rollback_implementation(&project_id, &id, request.reason) {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "Implementation not found"),
    }
}
