//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{
    AddCreditsResponse, ContentVerification, CreateImplementationsResponse, CreditBalance,
    Implementation, RollbackResponse, Suggestion,
};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

/// Timestamps render in UTC when they parse, otherwise as sent.
fn format_time(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&chrono::Utc).format(TIME_FORMAT).to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn header(title: String) -> Vec<String> {
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

impl PrettyPrint for Suggestion {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Suggestion: {}", self.id));
        lines.push(format!("Status:         {}", or_dash(&self.status)));
        lines.push(format!("Source:         {}", or_dash(&self.source_url)));
        lines.push(format!("Target:         {}", or_dash(&self.target_url)));

        if let Some(ref anchor) = self.anchor_text {
            lines.push(format!("Anchor:         {}", anchor));
        }

        if let Some(score) = self.relevance() {
            lines.push(format!("Relevance:      {:.2}", score));
        }

        if let Some(ref created) = self.created_at {
            lines.push(format!("Created:        {}", format_time(created)));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Implementation {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Implementation: {}", self.id));
        lines.push(format!("Status:         {}", or_dash(&self.status)));
        lines.push(format!("Platform:       {}", or_dash(&self.platform)));
        lines.push(format!("Suggestion:     {}", or_dash(&self.suggestion_id)));

        if let Some(ref page) = self.page_url {
            lines.push(format!("Page:           {}", page));
        }

        if let Some(ref completed) = self.completed_at {
            lines.push(format!("Completed:      {}", format_time(completed)));
        }

        if let Some(ref rolled_back) = self.rolled_back_at {
            lines.push(format!("Rolled back:    {}", format_time(rolled_back)));
        }

        if let Some(ref reason) = self.rollback_reason {
            lines.push(format!("Reason:         {}", reason));
        }

        if let Some(ref error) = self.error {
            lines.push(format!("Error:          {}", error));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for CreateImplementationsResponse {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!(
            "Implementations: {}/{} succeeded",
            self.succeeded(),
            self.results.len()
        ));

        for result in &self.results {
            let outcome = if result.success {
                result
                    .implementation_id
                    .as_deref()
                    .map(|id| format!("ok ({id})"))
                    .unwrap_or_else(|| "ok".to_string())
            } else {
                format!("failed: {}", result.error.as_deref().unwrap_or("unknown error"))
            };
            lines.push(format!("  {:<20} {}", result.suggestion_id, outcome));
        }

        if let Some(credits) = self.credits_used {
            lines.push(format!("Credits used:   {}", credits));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for RollbackResponse {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!(
            "Rollback: {}",
            if self.success { "succeeded" } else { "failed" }
        ));

        if let Some(ref message) = self.message {
            lines.push(format!("Message:        {}", message));
        }

        if let Some(ref implementation) = self.implementation {
            lines.push(format!("Implementation: {}", implementation.id));
            lines.push(format!("Status:         {}", or_dash(&implementation.status)));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for CreditBalance {
    fn pretty_print(&self) -> String {
        let mut lines = header("Credits".to_string());
        lines.push(format!("Balance:        {}", self.available()));

        if let Some(used) = self.total_used {
            lines.push(format!("Used:           {}", used));
        }

        let history = self.transactions();
        if !history.is_empty() {
            lines.push(format!("History:        {} transactions", history.len()));
            for tx in history {
                let when = tx
                    .created_time()
                    .map(|t| t.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                lines.push(format!(
                    "  {:<10} {:>+8}  {}",
                    when,
                    tx.amount.unwrap_or_default(),
                    tx.description.as_deref().or(tx.kind.as_deref()).unwrap_or("")
                ));
            }
        }

        lines.join("\n")
    }
}

impl PrettyPrint for AddCreditsResponse {
    fn pretty_print(&self) -> String {
        let mut lines = header("Credits added".to_string());
        if let Some(amount) = self.transaction.as_ref().and_then(|tx| tx.amount) {
            lines.push(format!("Amount:         {}", amount));
        }
        lines.push(format!("Balance:        {}", self.balance));
        lines.join("\n")
    }
}

impl PrettyPrint for ContentVerification {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!(
            "Content: {}",
            match self.changed {
                Some(true) => "changed",
                Some(false) => "unchanged",
                None => "unknown",
            }
        ));

        if let Some(ref page) = self.page_url {
            lines.push(format!("Page:           {}", page));
        }

        if let Some(ref scraped) = self.last_scraped_at {
            lines.push(format!("Last scraped:   {}", format_time(scraped)));
        }

        if let Some(ref message) = self.message {
            lines.push(format!("Message:        {}", message));
        }

        lines.join("\n")
    }
}
