//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{TimeZone, Utc};

use crate::{
    format_date, CreditBalance, CreditTransaction, Implementation, ImplementationStatus, Platform, Suggestion,
    SuggestionStatus,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    /// Project used by the default scenario.
    pub const PROJECT_ID: &'static str = "proj_demo";

    /// Page that reports as changed in the default scenario.
    pub const CHANGED_PAGE: &'static str = "https://example.com/blog/changed";

    fn timestamp(day: u32) -> String {
        format_date(
            Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0)
                .single()
                .unwrap_or_default(),
        )
    }

    // =========================================================================
    // Suggestion Fixtures
    // =========================================================================

    /// Create a suggestion with plausible URLs derived from its ID.
    pub fn suggestion(id: &str, project_id: &str, status: SuggestionStatus) -> Suggestion {
        Suggestion {
            id: id.to_string(),
            project_id: Some(project_id.to_string()),
            source_url: Some(format!("https://example.com/blog/{id}")),
            target_url: Some("https://example.com/pricing".to_string()),
            anchor_text: Some("our pricing".to_string()),
            context: Some("Compare plans on our pricing page.".to_string()),
            relevance_score: serde_json::Number::from_f64(0.87),
            status: Some(status.to_string()),
            created_at: Some(Self::timestamp(1)),
            updated_at: None,
            extra: Default::default(),
        }
    }

    // =========================================================================
    // Implementation Fixtures
    // =========================================================================

    /// Create a completed implementation of a suggestion.
    pub fn implementation(
        id: &str,
        project_id: &str,
        suggestion_id: &str,
        platform: Platform,
    ) -> Implementation {
        Implementation {
            id: id.to_string(),
            project_id: Some(project_id.to_string()),
            suggestion_id: Some(suggestion_id.to_string()),
            platform: Some(platform.to_string()),
            status: Some(ImplementationStatus::Completed.to_string()),
            page_url: Some(format!("https://example.com/blog/{suggestion_id}")),
            error: None,
            created_at: Some(Self::timestamp(2)),
            completed_at: Some(Self::timestamp(2)),
            rolled_back_at: None,
            rollback_reason: None,
            extra: Default::default(),
        }
    }

    // =========================================================================
    // Credit Fixtures
    // =========================================================================

    /// Create a balance with no history.
    pub fn credits(balance: i64) -> CreditBalance {
        CreditBalance {
            balance: Some(balance),
            total_used: Some(0),
            history: None,
            extra: Default::default(),
        }
    }

    /// Create a balance built from one purchase and one usage.
    pub fn credits_with_history(purchased: i64, used: i64) -> CreditBalance {
        CreditBalance {
            balance: Some(purchased - used),
            total_used: Some(used),
            history: Some(vec![
                CreditTransaction {
                    id: Some("tx_purchase".to_string()),
                    amount: Some(purchased),
                    kind: Some("purchase".to_string()),
                    source: Some("stripe".to_string()),
                    description: Some("Credit pack".to_string()),
                    created_at: Some(Self::timestamp(1)),
                    extra: Default::default(),
                },
                CreditTransaction {
                    id: Some("tx_usage".to_string()),
                    amount: Some(-used),
                    kind: Some("usage".to_string()),
                    source: None,
                    description: Some("Implementations".to_string()),
                    created_at: Some(Self::timestamp(2)),
                    extra: Default::default(),
                },
            ]),
            extra: Default::default(),
        }
    }

    // =========================================================================
    // Scenario Fixtures
    // =========================================================================

    /// Create a default scenario with common test data.
    ///
    /// One project with a suggestion in each review state, one live
    /// implementation, ten credits and one changed page.
    pub fn default_scenario() -> DefaultScenario {
        let project = Self::PROJECT_ID;
        DefaultScenario {
            suggestions: vec![
                Self::suggestion("sugg_1", project, SuggestionStatus::Pending),
                Self::suggestion("sugg_2", project, SuggestionStatus::Pending),
                Self::suggestion("sugg_3", project, SuggestionStatus::Approved),
                Self::suggestion("sugg_4", project, SuggestionStatus::Rejected),
                Self::suggestion("sugg_5", project, SuggestionStatus::Implemented),
            ],
            implementations: vec![Self::implementation(
                "impl_1",
                project,
                "sugg_5",
                Platform::Wordpress,
            )],
            credits: vec![(project.to_string(), Self::credits_with_history(11, 1))],
            changed_pages: vec![Self::CHANGED_PAGE.to_string()],
        }
    }
}

/// A complete test scenario with related data.
#[derive(Debug, Clone)]
pub struct DefaultScenario {
    pub suggestions: Vec<Suggestion>,
    pub implementations: Vec<Implementation>,
    /// (project ID, balance) pairs.
    pub credits: Vec<(String, CreditBalance)>,
    pub changed_pages: Vec<String>,
}
