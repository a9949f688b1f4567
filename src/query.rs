//! Query string rendering for list and lookup endpoints.

use chrono::{DateTime, SecondsFormat, Utc};

/// Ordered set of query parameters built from optional filter values.
///
/// Absent values are skipped; present values are percent-encoded and kept
/// in insertion order, so the same input always renders the same string.
///
/// # Example
///
/// ```
/// use rankvectors::QueryParams;
///
/// let query = QueryParams::new()
///     .push("status", Some("pending"))
///     .push("limit", None::<u32>)
///     .push("offset", Some(20));
///
/// assert_eq!(query.to_query_string(), "?status=pending&offset=20");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list of `(name, optional value)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Option<String>)>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |query, (name, value)| query.push(name, value))
    }

    /// Append `name=value` if `value` is present.
    #[must_use]
    pub fn push<V: ToString>(mut self, name: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.pairs.push((name, value.to_string()));
        }
        self
    }

    /// Append a timestamp in extended ISO-8601 form, if present.
    #[must_use]
    pub fn push_date(self, name: &'static str, value: Option<DateTime<Utc>>) -> Self {
        self.push(name, value.map(format_date))
    }

    /// Returns true if no parameter is present.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of present parameters.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Render as `?k=v&k2=v2`, or an empty string when nothing is present.
    pub fn to_query_string(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }

        let rendered: Vec<String> = self
            .pairs
            .iter()
            .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
            .collect();

        format!("?{}", rendered.join("&"))
    }
}

/// Types that render themselves as query parameters.
pub trait ToQuery {
    /// The parameters for this filter set, in stable field order.
    fn to_query(&self) -> QueryParams;
}

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub fn format_date(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
