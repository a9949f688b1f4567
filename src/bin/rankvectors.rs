//! RankVectors API CLI binary.
//!
//! A command-line interface for interacting with the RankVectors API.

use clap::Parser;
use rankvectors::cli::{
    Cli, Command, CreditCommand, ImplementationCommand, PageArgs, SuggestionCommand,
};
use rankvectors::mcp::RankVectorsServer;
use rankvectors::{
    add_credits, approve_suggestion, create_implementations, get_credits, get_implementation,
    get_implementations, get_suggestions, reject_suggestion, rollback_implementation,
    verify_content, CreateImplementationsRequest, CreditQuery, Implementation,
    ImplementationListQuery, PrettyPrint, RankVectorsClient, RankVectorsError, Suggestion,
    SuggestionListQuery,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let client = match build_client(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set RANKVECTORS_API_KEY or pass --api-key");
            return ExitCode::FAILURE;
        }
    };

    let json = cli.json;
    let result = match cli.command {
        Command::Suggestions { command } => handle_suggestions(&client, command, json).await,
        Command::Implementations { command } => {
            handle_implementations(&client, command, json).await
        }
        Command::Credits { command } => handle_credits(&client, command, json).await,
        Command::Verify {
            project,
            page_url,
            suggestion_id,
        } => handle_verify(&client, &project, &page_url, &suggestion_id, json).await,
        Command::Mcp => return serve_mcp(client).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so stdout stays clean for output and the MCP transport.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn build_client(cli: &Cli) -> rankvectors::Result<RankVectorsClient> {
    let api_key = cli.api_key.as_deref().unwrap_or_default();
    RankVectorsClient::new(api_key, cli.base_url.as_deref())
}

async fn handle_suggestions(
    client: &RankVectorsClient,
    command: SuggestionCommand,
    json: bool,
) -> rankvectors::Result<()> {
    match command {
        SuggestionCommand::List {
            project,
            status,
            page: PageArgs { limit, offset },
        } => {
            let query = SuggestionListQuery {
                status,
                limit,
                offset,
            };
            let suggestions = get_suggestions(client, &project, query).await?;
            output_list(&suggestions, json, |s| SuggestionRow::from(s))
        }
        SuggestionCommand::Approve { id } => {
            let suggestion = approve_suggestion(client, &id).await?;
            output_single(&suggestion, json)
        }
        SuggestionCommand::Reject { id } => {
            let suggestion = reject_suggestion(client, &id).await?;
            output_single(&suggestion, json)
        }
    }
}

async fn handle_implementations(
    client: &RankVectorsClient,
    command: ImplementationCommand,
    json: bool,
) -> rankvectors::Result<()> {
    match command {
        ImplementationCommand::Create {
            project,
            suggestion_ids,
            platform,
            credentials,
            dry_run,
            verify_content,
        } => {
            let mut request = CreateImplementationsRequest::new(
                suggestion_ids,
                platform,
                parse_credentials(&credentials)?,
            );
            request.dry_run = dry_run.then_some(true);
            request.verify_content = verify_content.then_some(true);

            let response = create_implementations(client, &project, &request).await?;
            output_single(&response, json)
        }
        ImplementationCommand::Get { project, id } => {
            let implementation = get_implementation(client, &project, &id).await?;
            output_single(&implementation, json)
        }
        ImplementationCommand::List {
            project,
            status,
            platform,
            page: PageArgs { limit, offset },
        } => {
            let query = ImplementationListQuery {
                status,
                platform,
                limit,
                offset,
            };
            let implementations = get_implementations(client, &project, query).await?;
            output_list(&implementations, json, |i| ImplementationRow::from(i))
        }
        ImplementationCommand::Rollback {
            project,
            id,
            reason,
            credentials,
        } => {
            let response = rollback_implementation(
                client,
                &project,
                &id,
                reason.as_deref(),
                parse_credentials(&credentials)?,
            )
            .await?;
            output_single(&response, json)
        }
    }
}

async fn handle_credits(
    client: &RankVectorsClient,
    command: CreditCommand,
    json: bool,
) -> rankvectors::Result<()> {
    match command {
        CreditCommand::Get {
            project,
            history,
            start,
            end,
        } => {
            let query = CreditQuery {
                // Asking for a date range implies wanting the history.
                include_history: (history || start.is_some() || end.is_some()).then_some(true),
                start_date: start,
                end_date: end,
            };
            let credits = get_credits(client, &project, query).await?;
            output_single(&credits, json)
        }
        CreditCommand::Add {
            project,
            amount,
            source,
        } => {
            let response = add_credits(client, &project, amount, &source).await?;
            output_single(&response, json)
        }
    }
}

async fn handle_verify(
    client: &RankVectorsClient,
    project: &str,
    page_url: &str,
    suggestion_id: &str,
    json: bool,
) -> rankvectors::Result<()> {
    let result = verify_content(client, project, page_url, suggestion_id).await?;
    output_single(&result, json)
}

async fn serve_mcp(client: RankVectorsClient) -> ExitCode {
    use rmcp::{transport::stdio, ServiceExt};

    tracing::info!(base_url = client.base_url(), "starting MCP server on stdio");
    let service = match RankVectorsServer::new(client).serve(stdio()).await {
        Ok(service) => service,
        Err(e) => {
            eprintln!("Error: MCP server failed to start: {e}");
            return ExitCode::FAILURE;
        }
    };

    match service.waiting().await {
        Ok(reason) => {
            tracing::info!(?reason, "MCP server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: MCP server stopped: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Credentials are opaque to the client but must at least be JSON.
fn parse_credentials(raw: &str) -> rankvectors::Result<serde_json::Value> {
    serde_json::from_str(raw)
        .map_err(|e| RankVectorsError::InvalidArgument(format!("--credentials must be JSON: {e}")))
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> rankvectors::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F) -> rankvectors::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} item(s)", items.len());
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct SuggestionRow {
    id: String,
    status: String,
    source: String,
    target: String,
    anchor: String,
}

impl From<&Suggestion> for SuggestionRow {
    fn from(s: &Suggestion) -> Self {
        Self {
            id: s.id.clone(),
            status: s.status.clone().unwrap_or_default(),
            source: s.source_url.clone().unwrap_or_default(),
            target: s.target_url.clone().unwrap_or_default(),
            anchor: s.anchor_text.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct ImplementationRow {
    id: String,
    status: String,
    platform: String,
    suggestion: String,
    page: String,
}

impl From<&Implementation> for ImplementationRow {
    fn from(i: &Implementation) -> Self {
        Self {
            id: i.id.clone(),
            status: i.status.clone().unwrap_or_default(),
            platform: i.platform.clone().unwrap_or_default(),
            suggestion: i.suggestion_id.clone().unwrap_or_default(),
            page: i.page_url.clone().unwrap_or_default(),
        }
    }
}
