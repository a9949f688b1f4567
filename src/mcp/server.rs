//! MCP Server handler for the RankVectors API.

use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, ErrorData as McpError, Implementation,
        ListToolsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
        ToolsCapability,
    },
    service::RequestContext,
    RoleServer,
};
use schemars::JsonSchema;
use serde::Serialize;
use std::sync::Arc;

use crate::{
    cli::parse_date,
    mcp::{
        CreateImplementationsParams, GetCreditsParams, GetImplementationParams,
        ListImplementationsParams, ListSuggestionsParams, ReviewDecision, ReviewSuggestionParams,
        RollbackImplementationParams, VerifyContentParams,
    },
    CreateImplementationsRequest, CreditQuery, Get, ImplementationListQuery, List,
    RankVectorsClient, RankVectorsError, Suggestion, SuggestionListQuery, SuggestionReview,
    Update,
};

/// Largest page size the tools will request.
const MAX_LIMIT: u32 = 100;

/// RankVectors MCP Server.
///
/// Implements the MCP ServerHandler trait, providing tools to review
/// suggestions, manage implementations, and inspect credits through the
/// Model Context Protocol.
///
/// # Tools
///
/// - `list_suggestions` - List suggestions for a project
/// - `review_suggestion` - Approve or reject a suggestion
/// - `list_implementations` - List implementations for a project
/// - `get_implementation` - Fetch one implementation
/// - `create_implementations` - Implement approved suggestions
/// - `rollback_implementation` - Remove an implemented link
/// - `get_credits` - Credit balance and history
/// - `verify_content` - Check a page for changes since the last scrape
///
/// # Example
///
/// ```no_run
/// use rankvectors::mcp::RankVectorsServer;
///
/// # fn main() -> rankvectors::Result<()> {
/// let server = RankVectorsServer::from_env()?;
/// // Server can now be used with rmcp transport
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RankVectorsServer {
    client: Arc<RankVectorsClient>,
}

impl RankVectorsServer {
    /// Create a new server from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `RANKVECTORS_API_KEY` is not set.
    pub fn from_env() -> crate::Result<Self> {
        let client = RankVectorsClient::from_env()?;
        Ok(Self::new(client))
    }

    /// Create a new server with an existing client.
    pub fn new(client: RankVectorsClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Generate JSON Schema for a type.
    fn schema<T: JsonSchema>() -> Arc<serde_json::Map<String, serde_json::Value>> {
        let schema = schemars::schema_for!(T);
        let value = serde_json::to_value(&schema).unwrap_or(serde_json::json!({}));
        match value {
            serde_json::Value::Object(map) => Arc::new(map),
            _ => Arc::new(serde_json::Map::new()),
        }
    }

    /// Convert RankVectorsError to McpError.
    fn to_mcp_error(err: RankVectorsError) -> McpError {
        match &err {
            RankVectorsError::RequestFailed {
                message,
                status_code: Some(404),
            } => McpError::resource_not_found(message.clone(), None),
            RankVectorsError::RequestFailed {
                message,
                status_code: Some(400),
            } => McpError::invalid_params(message.clone(), None),
            RankVectorsError::InvalidConfiguration(msg) | RankVectorsError::InvalidArgument(msg) => {
                McpError::invalid_params(msg.clone(), None)
            }
            _ => McpError::internal_error(err.to_string(), None),
        }
    }

    /// Render a value as a pretty JSON tool result.
    fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    fn parse_optional_date(
        value: Option<&str>,
    ) -> Result<Option<chrono::DateTime<chrono::Utc>>, McpError> {
        value
            .map(|v| parse_date(v).map_err(|e| McpError::invalid_params(e, None)))
            .transpose()
    }

    /// Handle the `list_suggestions` tool.
    pub async fn handle_list_suggestions(
        &self,
        params: ListSuggestionsParams,
    ) -> Result<CallToolResult, McpError> {
        let query = SuggestionListQuery {
            status: params.status,
            limit: params.limit.map(|l| l.min(MAX_LIMIT)),
            offset: params.offset,
        };
        let suggestions = Suggestion::list(&self.client, &(params.project_id, query))
            .await
            .map_err(Self::to_mcp_error)?;
        Self::json_result(&suggestions)
    }

    /// Handle the `review_suggestion` tool.
    pub async fn handle_review_suggestion(
        &self,
        params: ReviewSuggestionParams,
    ) -> Result<CallToolResult, McpError> {
        let review = match params.decision {
            ReviewDecision::Approve => SuggestionReview::approve(),
            ReviewDecision::Reject => SuggestionReview::reject(),
        };
        let suggestion = Suggestion::update(&self.client, params.suggestion_id, review)
            .await
            .map_err(Self::to_mcp_error)?;
        Self::json_result(&suggestion)
    }

    /// Handle the `list_implementations` tool.
    pub async fn handle_list_implementations(
        &self,
        params: ListImplementationsParams,
    ) -> Result<CallToolResult, McpError> {
        let query = ImplementationListQuery {
            status: params.status,
            platform: params.platform,
            limit: params.limit.map(|l| l.min(MAX_LIMIT)),
            offset: params.offset,
        };
        let implementations =
            crate::Implementation::list(&self.client, &(params.project_id, query))
                .await
                .map_err(Self::to_mcp_error)?;
        Self::json_result(&implementations)
    }

    /// Handle the `get_implementation` tool.
    pub async fn handle_get_implementation(
        &self,
        params: GetImplementationParams,
    ) -> Result<CallToolResult, McpError> {
        let implementation = crate::Implementation::get(
            &self.client,
            (params.project_id, params.implementation_id),
        )
        .await
        .map_err(Self::to_mcp_error)?;
        Self::json_result(&implementation)
    }

    /// Handle the `create_implementations` tool.
    pub async fn handle_create_implementations(
        &self,
        params: CreateImplementationsParams,
    ) -> Result<CallToolResult, McpError> {
        if params.suggestion_ids.is_empty() {
            return Err(McpError::invalid_params(
                "suggestion_ids must contain at least one suggestion",
                None,
            ));
        }

        let mut request = CreateImplementationsRequest::new(
            params.suggestion_ids,
            params.platform,
            params.credentials.unwrap_or_else(|| serde_json::json!({})),
        );
        request.dry_run = params.dry_run;
        request.verify_content = params.verify_content;

        let response = crate::create_implementations(&self.client, &params.project_id, &request)
            .await
            .map_err(Self::to_mcp_error)?;
        Self::json_result(&response)
    }

    /// Handle the `rollback_implementation` tool.
    pub async fn handle_rollback_implementation(
        &self,
        params: RollbackImplementationParams,
    ) -> Result<CallToolResult, McpError> {
        let response = crate::rollback_implementation(
            &self.client,
            &params.project_id,
            &params.implementation_id,
            params.reason.as_deref(),
            params.credentials.unwrap_or_else(|| serde_json::json!({})),
        )
        .await
        .map_err(Self::to_mcp_error)?;
        Self::json_result(&response)
    }

    /// Handle the `get_credits` tool.
    pub async fn handle_get_credits(
        &self,
        params: GetCreditsParams,
    ) -> Result<CallToolResult, McpError> {
        let query = CreditQuery {
            include_history: params.include_history,
            start_date: Self::parse_optional_date(params.start_date.as_deref())?,
            end_date: Self::parse_optional_date(params.end_date.as_deref())?,
        };
        let credits = crate::get_credits(&self.client, &params.project_id, query)
            .await
            .map_err(Self::to_mcp_error)?;
        Self::json_result(&credits)
    }

    /// Handle the `verify_content` tool.
    pub async fn handle_verify_content(
        &self,
        params: VerifyContentParams,
    ) -> Result<CallToolResult, McpError> {
        let result = crate::verify_content(
            &self.client,
            &params.project_id,
            &params.page_url,
            &params.suggestion_id,
        )
        .await
        .map_err(Self::to_mcp_error)?;
        Self::json_result(&result)
    }

    fn parse_args<T: serde::de::DeserializeOwned>(args: serde_json::Value) -> Result<T, McpError> {
        serde_json::from_value(args).map_err(|e| McpError::invalid_params(e.to_string(), None))
    }
}

impl ServerHandler for RankVectorsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "rankvectors".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "RankVectors MCP Server - Review internal link suggestions, implement and roll \
                 back links, check credits, and verify page content."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: PaginatedRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = vec![
            Tool::new(
                "list_suggestions",
                "List link suggestions for a project. \
                 Optional status filter (pending, approved, rejected, implemented) \
                 and limit/offset paging.",
                Self::schema::<ListSuggestionsParams>(),
            ),
            Tool::new(
                "review_suggestion",
                "Approve or reject a link suggestion by ID.",
                Self::schema::<ReviewSuggestionParams>(),
            ),
            Tool::new(
                "list_implementations",
                "List link implementations for a project. \
                 Optional status and platform filters and limit/offset paging.",
                Self::schema::<ListImplementationsParams>(),
            ),
            Tool::new(
                "get_implementation",
                "Fetch a single implementation by project ID and implementation ID.",
                Self::schema::<GetImplementationParams>(),
            ),
            Tool::new(
                "create_implementations",
                "Insert approved suggestions' links on a platform. \
                 Consumes credits; the result lists per-suggestion success.",
                Self::schema::<CreateImplementationsParams>(),
            ),
            Tool::new(
                "rollback_implementation",
                "Remove an implemented link from its page.",
                Self::schema::<RollbackImplementationParams>(),
            ),
            Tool::new(
                "get_credits",
                "Show a project's credit balance, optionally with history in a date range.",
                Self::schema::<GetCreditsParams>(),
            ),
            Tool::new(
                "verify_content",
                "Check whether a page changed since it was last scraped before implementing a suggestion.",
                Self::schema::<VerifyContentParams>(),
            ),
        ];

        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request
            .arguments
            .map(serde_json::Value::Object)
            .unwrap_or(serde_json::json!({}));

        tracing::debug!(tool = %request.name, "calling tool");

        match request.name.as_ref() {
            "list_suggestions" => self.handle_list_suggestions(Self::parse_args(args)?).await,
            "review_suggestion" => self.handle_review_suggestion(Self::parse_args(args)?).await,
            "list_implementations" => {
                self.handle_list_implementations(Self::parse_args(args)?).await
            }
            "get_implementation" => self.handle_get_implementation(Self::parse_args(args)?).await,
            "create_implementations" => {
                self.handle_create_implementations(Self::parse_args(args)?).await
            }
            "rollback_implementation" => {
                self.handle_rollback_implementation(Self::parse_args(args)?).await
            }
            "get_credits" => self.handle_get_credits(Self::parse_args(args)?).await,
            "verify_content" => self.handle_verify_content(Self::parse_args(args)?).await,
            other => Err(McpError::invalid_params(
                format!("Unknown tool: {other}"),
                None,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_generates_for_all_params() {
        assert!(!RankVectorsServer::schema::<ListSuggestionsParams>().is_empty());
        assert!(!RankVectorsServer::schema::<ReviewSuggestionParams>().is_empty());
        assert!(!RankVectorsServer::schema::<ListImplementationsParams>().is_empty());
        assert!(!RankVectorsServer::schema::<GetImplementationParams>().is_empty());
        assert!(!RankVectorsServer::schema::<CreateImplementationsParams>().is_empty());
        assert!(!RankVectorsServer::schema::<RollbackImplementationParams>().is_empty());
        assert!(!RankVectorsServer::schema::<GetCreditsParams>().is_empty());
        assert!(!RankVectorsServer::schema::<VerifyContentParams>().is_empty());
    }

    #[test]
    fn server_info_has_correct_name() {
        let client = RankVectorsClient::new("test-key", None).unwrap();
        let server = RankVectorsServer::new(client);
        let info = server.get_info();
        assert_eq!(info.server_info.name, "rankvectors");
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn not_found_maps_to_resource_not_found() {
        let err = RankVectorsServer::to_mcp_error(RankVectorsError::RequestFailed {
            message: "Implementation not found".to_string(),
            status_code: Some(404),
        });
        assert_eq!(err.message, "Implementation not found");
    }

    #[test]
    fn server_failure_maps_to_internal_error() {
        let err = RankVectorsServer::to_mcp_error(RankVectorsError::RequestFailed {
            message: "HTTP 500 Internal Server Error".to_string(),
            status_code: Some(500),
        });
        assert!(err.message.contains("500"));
    }

    #[test]
    fn missing_required_param_is_rejected() {
        let err = RankVectorsServer::parse_args::<ListSuggestionsParams>(serde_json::json!({}))
            .unwrap_err();
        assert!(err.message.contains("project_id"));

        let params = RankVectorsServer::parse_args::<ListSuggestionsParams>(
            serde_json::json!({"project_id": "p1", "status": "pending"}),
        )
        .unwrap();
        assert_eq!(params.status, Some(crate::SuggestionStatus::Pending));
    }

    #[test]
    fn invalid_date_is_rejected() {
        let err = RankVectorsServer::parse_optional_date(Some("yesterday")).unwrap_err();
        assert!(err.message.contains("yesterday"));
        assert!(RankVectorsServer::parse_optional_date(None).unwrap().is_none());
    }
}
