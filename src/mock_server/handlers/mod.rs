//! HTTP request handlers for the mock server.

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::mock_server::state::MockState;

pub mod credits;
pub mod implementations;
pub mod suggestions;
pub mod verification;

pub use credits::*;
pub use implementations::*;
pub use suggestions::*;
pub use verification::*;

/// An error response in the API's `{"error": ...}` shape.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({ "error": message.into() })),
    )
        .into_response()
}

/// Reject the request unless it carries the required bearer token.
pub(crate) fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if state.is_authorized(authorization) {
        Ok(())
    } else {
        Err(error_response(StatusCode::UNAUTHORIZED, "Unauthorized"))
    }
}

/// Apply limit/offset to a listing.
pub(crate) fn paginate<T: Clone>(items: Vec<&T>, limit: Option<u32>, offset: Option<u32>) -> Vec<T> {
    let offset = offset.unwrap_or(0) as usize;
    let limit = limit.map(|l| l as usize).unwrap_or(usize::MAX);
    items
        .into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect()
}
