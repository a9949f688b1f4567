//! Mock server state management.
//!
//! Provides the in-memory data store for the mock RankVectors API server.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    format_date, AddCreditsResponse, ContentVerification, CreateImplementationsResponse, CreditBalance,
    CreditTransaction, Implementation, ImplementationResult, ImplementationStatus, Platform,
    RollbackResponse, Suggestion, SuggestionStatus,
};

/// Shared state for the mock server.
///
/// Collections are ordered maps so listings come back in a stable order.
#[derive(Debug, Default)]
pub struct MockState {
    /// Suggestions indexed by ID.
    pub suggestions: BTreeMap<String, Suggestion>,

    /// Implementations indexed by ID.
    pub implementations: BTreeMap<String, Implementation>,

    /// Credit balances indexed by project ID.
    pub credits: HashMap<String, CreditBalance>,

    /// Page URLs that report as changed on verification.
    pub changed_pages: HashSet<String>,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,

    next_id: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a suggestion to the state.
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestions.insert(suggestion.id.clone(), suggestion);
        self
    }

    /// Add an implementation to the state.
    pub fn with_implementation(mut self, implementation: Implementation) -> Self {
        self.implementations
            .insert(implementation.id.clone(), implementation);
        self
    }

    /// Set the credit balance of a project.
    pub fn with_credits(mut self, project_id: &str, balance: CreditBalance) -> Self {
        self.credits.insert(project_id.to_string(), balance);
        self
    }

    /// Mark a page as changed since its last scrape.
    pub fn with_changed_page(mut self, page_url: &str) -> Self {
        self.changed_pages.insert(page_url.to_string());
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Whether an `Authorization` header value is acceptable.
    pub fn is_authorized(&self, authorization: Option<&str>) -> bool {
        match self.required_token {
            None => true,
            Some(ref token) => authorization
                .and_then(|value| value.strip_prefix("Bearer "))
                .is_some_and(|presented| presented == token),
        }
    }

    fn now() -> String {
        format_date(Utc::now())
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}_{}", self.next_id)
    }

    /// Get a suggestion by ID.
    pub fn get_suggestion(&self, id: &str) -> Option<&Suggestion> {
        self.suggestions.get(id)
    }

    /// List a project's suggestions, optionally filtered by status.
    pub fn list_suggestions(
        &self,
        project_id: &str,
        status: Option<SuggestionStatus>,
    ) -> Vec<&Suggestion> {
        self.suggestions
            .values()
            .filter(|s| s.project_id.as_deref() == Some(project_id))
            .filter(|s| status.map(|st| s.status() == st).unwrap_or(true))
            .collect()
    }

    /// Set a suggestion's review status and return the updated version.
    pub fn review_suggestion(&mut self, id: &str, status: SuggestionStatus) -> Option<&Suggestion> {
        let suggestion = self.suggestions.get_mut(id)?;
        suggestion.status = Some(status.to_string());
        suggestion.updated_at = Some(Self::now());
        Some(suggestion)
    }

    /// Get an implementation belonging to a project.
    pub fn get_implementation(&self, project_id: &str, id: &str) -> Option<&Implementation> {
        self.implementations
            .get(id)
            .filter(|i| i.project_id.as_deref() == Some(project_id))
    }

    /// List a project's implementations, optionally filtered.
    pub fn list_implementations(
        &self,
        project_id: &str,
        status: Option<ImplementationStatus>,
        platform: Option<Platform>,
    ) -> Vec<&Implementation> {
        self.implementations
            .values()
            .filter(|i| i.project_id.as_deref() == Some(project_id))
            .filter(|i| status.map(|st| i.status() == st).unwrap_or(true))
            .filter(|i| platform.map(|p| i.platform() == p).unwrap_or(true))
            .collect()
    }

    /// Implement a batch of suggestions, one credit each.
    ///
    /// Suggestions that are unknown, not approved, or that would overdraw the
    /// balance are reported as failures; the rest succeed. A dry run checks
    /// the same rules without changing anything.
    pub fn create_implementations(
        &mut self,
        project_id: &str,
        suggestion_ids: &[String],
        platform: Platform,
        dry_run: bool,
    ) -> CreateImplementationsResponse {
        let mut available = self.balance(project_id);
        let mut implementations = Vec::new();
        let mut results = Vec::new();
        let mut used: u64 = 0;

        for suggestion_id in suggestion_ids {
            let outcome = match self.suggestions.get(suggestion_id) {
                Some(s) if s.project_id.as_deref() != Some(project_id) => {
                    Err("Suggestion not found".to_string())
                }
                None => Err("Suggestion not found".to_string()),
                Some(s) if !s.is_approved() => {
                    Err(format!("Suggestion is {}, not approved", s.status()))
                }
                Some(_) if available < 1 => Err("Insufficient credits".to_string()),
                Some(s) => Ok(s.source_url.clone()),
            };

            match outcome {
                Err(error) => results.push(ImplementationResult {
                    suggestion_id: suggestion_id.clone(),
                    success: false,
                    implementation_id: None,
                    error: Some(error),
                }),
                Ok(_) if dry_run => {
                    available -= 1;
                    results.push(ImplementationResult {
                        suggestion_id: suggestion_id.clone(),
                        success: true,
                        implementation_id: None,
                        error: None,
                    });
                }
                Ok(page_url) => {
                    available -= 1;
                    used += 1;
                    let now = Self::now();
                    let implementation = Implementation {
                        id: self.next_id("impl"),
                        project_id: Some(project_id.to_string()),
                        suggestion_id: Some(suggestion_id.clone()),
                        platform: Some(platform.to_string()),
                        status: Some(ImplementationStatus::Completed.to_string()),
                        page_url,
                        error: None,
                        created_at: Some(now.clone()),
                        completed_at: Some(now.clone()),
                        rolled_back_at: None,
                        rollback_reason: None,
                        extra: Default::default(),
                    };
                    if let Some(s) = self.suggestions.get_mut(suggestion_id) {
                        s.status = Some(SuggestionStatus::Implemented.to_string());
                        s.updated_at = Some(now);
                    }
                    results.push(ImplementationResult {
                        suggestion_id: suggestion_id.clone(),
                        success: true,
                        implementation_id: Some(implementation.id.clone()),
                        error: None,
                    });
                    self.implementations
                        .insert(implementation.id.clone(), implementation.clone());
                    implementations.push(implementation);
                }
            }
        }

        if used > 0 {
            let amount = -(used as i64);
            self.record_transaction(project_id, amount, "usage", None, "Implementations");
        }

        CreateImplementationsResponse {
            implementations,
            results,
            credits_used: Some(used),
        }
    }

    /// Roll back a completed implementation.
    ///
    /// Returns `None` when the implementation does not exist in the project.
    pub fn rollback_implementation(
        &mut self,
        project_id: &str,
        id: &str,
        reason: Option<String>,
    ) -> Option<RollbackResponse> {
        self.get_implementation(project_id, id)?;
        let implementation = self.implementations.get_mut(id)?;

        if !implementation.is_completed() {
            return Some(RollbackResponse {
                success: false,
                message: Some(format!(
                    "Implementation is {}, only completed implementations can be rolled back",
                    implementation.status()
                )),
                implementation: Some(implementation.clone()),
            });
        }

        implementation.status = Some(ImplementationStatus::RolledBack.to_string());
        implementation.rolled_back_at = Some(Self::now());
        implementation.rollback_reason = reason;

        Some(RollbackResponse {
            success: true,
            message: Some("Link removed".to_string()),
            implementation: Some(implementation.clone()),
        })
    }

    /// Current balance of a project (zero when unknown).
    pub fn balance(&self, project_id: &str) -> i64 {
        self.credits
            .get(project_id)
            .map(CreditBalance::available)
            .unwrap_or(0)
    }

    /// Credit balance of a project, with history when requested.
    ///
    /// History is limited to transactions between `start` and `end`
    /// (inclusive) when those are given.
    pub fn get_credits(
        &self,
        project_id: &str,
        include_history: bool,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> CreditBalance {
        let stored = self.credits.get(project_id);
        let history = include_history.then(|| {
            stored
                .map(CreditBalance::transactions)
                .unwrap_or_default()
                .iter()
                .filter(|tx| match tx.created_time() {
                    Some(at) => {
                        start.map(|s| at >= s).unwrap_or(true)
                            && end.map(|e| at <= e).unwrap_or(true)
                    }
                    None => start.is_none() && end.is_none(),
                })
                .cloned()
                .collect()
        });

        CreditBalance {
            balance: Some(self.balance(project_id)),
            total_used: Some(stored.and_then(|c| c.total_used).unwrap_or(0)),
            history,
            extra: Default::default(),
        }
    }

    /// Add credits to a project.
    pub fn add_credits(&mut self, project_id: &str, amount: i64, source: &str) -> AddCreditsResponse {
        let transaction = self.record_transaction(
            project_id,
            amount,
            "purchase",
            Some(source.to_string()),
            "Credits added",
        );
        AddCreditsResponse {
            balance: self.balance(project_id),
            transaction: Some(transaction),
        }
    }

    fn record_transaction(
        &mut self,
        project_id: &str,
        amount: i64,
        kind: &str,
        source: Option<String>,
        description: &str,
    ) -> CreditTransaction {
        let transaction = CreditTransaction {
            id: Some(self.next_id("tx")),
            amount: Some(amount),
            kind: Some(kind.to_string()),
            source,
            description: Some(description.to_string()),
            created_at: Some(Self::now()),
            extra: Default::default(),
        };

        let entry = self.credits.entry(project_id.to_string()).or_default();
        entry.balance = Some(entry.available() + amount);
        if amount < 0 {
            entry.total_used = Some(entry.total_used.unwrap_or(0) - amount);
        }
        entry
            .history
            .get_or_insert_with(Vec::new)
            .push(transaction.clone());

        transaction
    }

    /// Compare a page against its last scrape.
    pub fn verify_content(
        &self,
        project_id: &str,
        page_url: &str,
        suggestion_id: &str,
    ) -> ContentVerification {
        let changed = self.changed_pages.contains(page_url);
        let last_scraped_at = self
            .suggestions
            .get(suggestion_id)
            .filter(|s| s.project_id.as_deref() == Some(project_id))
            .and_then(|s| s.updated_at.clone().or_else(|| s.created_at.clone()));

        ContentVerification {
            changed: Some(changed),
            page_url: Some(page_url.to_string()),
            suggestion_id: Some(suggestion_id.to_string()),
            last_scraped_at,
            checked_at: Some(Self::now()),
            message: Some(if changed {
                "Page content changed since last scrape".to_string()
            } else {
                "Page content unchanged".to_string()
            }),
            extra: Default::default(),
        }
    }
}
