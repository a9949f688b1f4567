//! Credit endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{authorize, error_response};
use crate::mock_server::state::MockState;
use crate::AddCreditsRequest;

/// Query parameters for reading credits.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCreditsQuery {
    pub include_history: Option<bool>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn parse_bound(name: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>, Response> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| error_response(StatusCode::BAD_REQUEST, format!("Invalid {name}")))
        })
        .transpose()
}

/// GET /api/projects/{project_id}/credits
pub async fn get_credits(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(project_id): Path<String>,
    headers: HeaderMap,
    Query(query): Query<GetCreditsQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    let (start, end) = match (
        parse_bound("startDate", query.start_date.as_deref()),
        parse_bound("endDate", query.end_date.as_deref()),
    ) {
        (Ok(start), Ok(end)) => (start, end),
        (Err(rejection), _) | (_, Err(rejection)) => return rejection,
    };

    let credits = state.get_credits(
        &project_id,
        query.include_history.unwrap_or(false),
        start,
        end,
    );
    (StatusCode::OK, Json(credits)).into_response()
}

/// POST /api/projects/{project_id}/credits
pub async fn add_credits(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(project_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<AddCreditsRequest>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    if request.amount <= 0 {
        return error_response(StatusCode::BAD_REQUEST, "amount must be positive");
    }

    let response = state.add_credits(&project_id, request.amount, &request.source);
    (StatusCode::OK, Json(response)).into_response()
}
