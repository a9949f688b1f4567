//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the
//! rankvectors binary.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::{ImplementationStatus, Platform, SuggestionStatus};

/// RankVectors API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "rankvectors", about = "RankVectors API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// API key used for bearer authentication.
    #[arg(long, global = true, env = "RANKVECTORS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the API (defaults to https://rankvectors.com).
    #[arg(long, global = true, env = "RANKVECTORS_API_URL")]
    pub base_url: Option<String>,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Review link suggestions.
    #[command(alias = "suggestion")]
    Suggestions {
        #[command(subcommand)]
        command: SuggestionCommand,
    },

    /// Create, inspect and roll back implementations.
    #[command(alias = "implementation")]
    Implementations {
        #[command(subcommand)]
        command: ImplementationCommand,
    },

    /// Read or add credits.
    Credits {
        #[command(subcommand)]
        command: CreditCommand,
    },

    /// Check whether a page changed since it was last scraped.
    Verify {
        /// Project ID.
        project: String,

        /// Page to check.
        #[arg(long)]
        page_url: String,

        /// Suggestion the check is for.
        #[arg(long = "suggestion")]
        suggestion_id: String,
    },

    /// Serve the API as MCP tools over stdio.
    Mcp,
}

/// Suggestion subcommands.
#[derive(Subcommand, Debug)]
pub enum SuggestionCommand {
    /// List suggestions for a project.
    List {
        /// Project ID.
        project: String,

        #[arg(long)]
        status: Option<SuggestionStatus>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Approve a suggestion.
    Approve {
        /// Suggestion ID.
        id: String,
    },

    /// Reject a suggestion.
    Reject {
        /// Suggestion ID.
        id: String,
    },
}

/// Implementation subcommands.
#[derive(Subcommand, Debug)]
pub enum ImplementationCommand {
    /// Implement approved suggestions on a platform.
    Create {
        /// Project ID.
        project: String,

        /// Suggestion to implement (repeatable).
        #[arg(long = "suggestion", required = true)]
        suggestion_ids: Vec<String>,

        /// Target platform.
        #[arg(long)]
        platform: Platform,

        /// Platform credentials as a JSON object.
        #[arg(long, default_value = "{}")]
        credentials: String,

        /// Validate without writing to the platform.
        #[arg(long)]
        dry_run: bool,

        /// Check target pages for changes before writing.
        #[arg(long)]
        verify_content: bool,
    },

    /// Get a single implementation.
    Get {
        /// Project ID.
        project: String,

        /// Implementation ID.
        id: String,
    },

    /// List implementations for a project.
    List {
        /// Project ID.
        project: String,

        #[arg(long)]
        status: Option<ImplementationStatus>,

        #[arg(long)]
        platform: Option<Platform>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Remove an implemented link again.
    Rollback {
        /// Project ID.
        project: String,

        /// Implementation ID.
        id: String,

        /// Why the link is being removed.
        #[arg(long)]
        reason: Option<String>,

        /// Platform credentials as a JSON object.
        #[arg(long, default_value = "{}")]
        credentials: String,
    },
}

/// Credit subcommands.
#[derive(Subcommand, Debug)]
pub enum CreditCommand {
    /// Show the balance, optionally with history.
    Get {
        /// Project ID.
        project: String,

        /// Include transaction history.
        #[arg(long)]
        history: bool,

        /// History start (YYYY-MM-DD or RFC 3339).
        #[arg(long, value_parser = parse_date)]
        start: Option<DateTime<Utc>>,

        /// History end (YYYY-MM-DD or RFC 3339).
        #[arg(long, value_parser = parse_date)]
        end: Option<DateTime<Utc>>,
    },

    /// Add credits to a project.
    Add {
        /// Project ID.
        project: String,

        /// Number of credits.
        #[arg(long)]
        amount: i64,

        /// Where the credits come from.
        #[arg(long, default_value = "manual")]
        source: String,
    },
}

/// Limit/offset paging flags.
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageArgs {
    /// Maximum number of results.
    #[arg(long)]
    pub limit: Option<u32>,

    /// Number of results to skip.
    #[arg(long)]
    pub offset: Option<u32>,
}

/// Parse a date given as `YYYY-MM-DD` (midnight UTC) or RFC 3339.
pub fn parse_date(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| format!("invalid date '{value}'"))?;
        return Ok(Utc.from_utc_datetime(&midnight));
    }

    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid date '{value}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        let date = parse_date("2024-01-31").unwrap();
        assert_eq!(crate::format_date(date), "2024-01-31T00:00:00.000Z");
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let date = parse_date("2024-01-31T02:00:00+02:00").unwrap();
        assert_eq!(crate::format_date(date), "2024-01-31T00:00:00.000Z");
    }

    #[test]
    fn test_parse_invalid_date() {
        assert!(parse_date("31/01/2024").is_err());
    }
}
