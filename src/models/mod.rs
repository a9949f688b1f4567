//! RankVectors API model types.

use chrono::{DateTime, Utc};

mod credits;
mod implementation;
mod suggestion;
mod verification;

pub use credits::*;
pub use implementation::*;
pub use suggestion::*;
pub use verification::*;

/// Path under `/api/projects/{project_id}` with the project ID percent-encoded.
pub(crate) fn project_path(project_id: &str, rest: &str) -> String {
    format!("/api/projects/{}{}", urlencoding::encode(project_id), rest)
}

/// Timestamps are kept as sent; this reads one as UTC when it is RFC 3339.
pub(crate) fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
        .map(|t| t.with_timezone(&Utc))
}
