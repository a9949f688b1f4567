//! Tests for CLI argument parsing.

use clap::Parser;
use rankvectors::cli::{
    Cli, Command, CreditCommand, ImplementationCommand, PageArgs, SuggestionCommand,
};
use rankvectors::{ImplementationStatus, Platform, SuggestionStatus};

#[test]
fn test_suggestions_list_parses_filters() {
    let cli = Cli::parse_from([
        "rankvectors",
        "suggestions",
        "list",
        "proj_1",
        "--status",
        "pending",
        "--limit",
        "10",
    ]);

    match cli.command {
        Command::Suggestions {
            command:
                SuggestionCommand::List {
                    project,
                    status,
                    page,
                },
        } => {
            assert_eq!(project, "proj_1");
            assert_eq!(status, Some(SuggestionStatus::Pending));
            assert_eq!(
                page,
                PageArgs {
                    limit: Some(10),
                    offset: None
                }
            );
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_suggestion_alias_and_approve() {
    let cli = Cli::parse_from(["rankvectors", "suggestion", "approve", "sugg_1"]);

    match cli.command {
        Command::Suggestions {
            command: SuggestionCommand::Approve { id },
        } => assert_eq!(id, "sugg_1"),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_invalid_status_is_rejected() {
    let result = Cli::try_parse_from([
        "rankvectors",
        "suggestions",
        "list",
        "proj_1",
        "--status",
        "maybe",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_implementations_create_collects_suggestions() {
    let cli = Cli::parse_from([
        "rankvectors",
        "implementations",
        "create",
        "proj_1",
        "--suggestion",
        "s1",
        "--suggestion",
        "s2",
        "--platform",
        "wordpress",
        "--dry-run",
    ]);

    match cli.command {
        Command::Implementations {
            command:
                ImplementationCommand::Create {
                    project,
                    suggestion_ids,
                    platform,
                    credentials,
                    dry_run,
                    verify_content,
                },
        } => {
            assert_eq!(project, "proj_1");
            assert_eq!(suggestion_ids, vec!["s1", "s2"]);
            assert_eq!(platform, Platform::Wordpress);
            assert_eq!(credentials, "{}");
            assert!(dry_run);
            assert!(!verify_content);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_implementations_create_requires_suggestion() {
    let result = Cli::try_parse_from([
        "rankvectors",
        "implementations",
        "create",
        "proj_1",
        "--platform",
        "wordpress",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_implementations_list_accepts_dashed_status() {
    let cli = Cli::parse_from([
        "rankvectors",
        "implementations",
        "list",
        "proj_1",
        "--status",
        "rolled-back",
        "--platform",
        "shopify",
    ]);

    match cli.command {
        Command::Implementations {
            command:
                ImplementationCommand::List {
                    status, platform, ..
                },
        } => {
            assert_eq!(status, Some(ImplementationStatus::RolledBack));
            assert_eq!(platform, Some(Platform::Shopify));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_rollback_reason() {
    let cli = Cli::parse_from([
        "rankvectors",
        "implementations",
        "rollback",
        "proj_1",
        "impl_1",
        "--reason",
        "wrong anchor",
    ]);

    match cli.command {
        Command::Implementations {
            command: ImplementationCommand::Rollback { id, reason, .. },
        } => {
            assert_eq!(id, "impl_1");
            assert_eq!(reason.as_deref(), Some("wrong anchor"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_credits_get_parses_dates() {
    let cli = Cli::parse_from([
        "rankvectors",
        "credits",
        "get",
        "proj_1",
        "--start",
        "2024-01-01",
        "--end",
        "2024-01-31T23:59:59Z",
    ]);

    match cli.command {
        Command::Credits {
            command:
                CreditCommand::Get {
                    history,
                    start,
                    end,
                    ..
                },
        } => {
            assert!(!history);
            assert_eq!(
                rankvectors::format_date(start.unwrap()),
                "2024-01-01T00:00:00.000Z"
            );
            assert_eq!(
                rankvectors::format_date(end.unwrap()),
                "2024-01-31T23:59:59.000Z"
            );
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_credits_add_default_source() {
    let cli = Cli::parse_from(["rankvectors", "credits", "add", "proj_1", "--amount", "50"]);

    match cli.command {
        Command::Credits {
            command:
                CreditCommand::Add {
                    amount, source, ..
                },
        } => {
            assert_eq!(amount, 50);
            assert_eq!(source, "manual");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_verify_command() {
    let cli = Cli::parse_from([
        "rankvectors",
        "verify",
        "proj_1",
        "--page-url",
        "https://example.com/a",
        "--suggestion",
        "s1",
    ]);

    match cli.command {
        Command::Verify {
            project,
            page_url,
            suggestion_id,
        } => {
            assert_eq!(project, "proj_1");
            assert_eq!(page_url, "https://example.com/a");
            assert_eq!(suggestion_id, "s1");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_json_flag_global_position() {
    let cli = Cli::parse_from(["rankvectors", "--json", "credits", "get", "proj_1"]);
    assert!(cli.json);

    let cli = Cli::parse_from(["rankvectors", "credits", "get", "proj_1", "--json"]);
    assert!(cli.json);
}

#[test]
fn test_connection_flags() {
    let cli = Cli::parse_from([
        "rankvectors",
        "--api-key",
        "k",
        "--base-url",
        "http://localhost:3000",
        "-vv",
        "mcp",
    ]);

    assert_eq!(cli.api_key.as_deref(), Some("k"));
    assert_eq!(cli.base_url.as_deref(), Some("http://localhost:3000"));
    assert_eq!(cli.verbose, 2);
    assert!(matches!(cli.command, Command::Mcp));
}
