//! Tests for the MCP server surface.

use rankvectors::mcp::{CreateImplementationsParams, GetCreditsParams, RankVectorsServer};
use rankvectors::RankVectorsClient;
use rmcp::handler::server::ServerHandler;

fn server() -> RankVectorsServer {
    let client = RankVectorsClient::new("test-key", Some("http://127.0.0.1:9")).unwrap();
    RankVectorsServer::new(client)
}

#[test]
fn server_implements_server_handler() {
    fn assert_server_handler<T: ServerHandler>() {}
    assert_server_handler::<RankVectorsServer>();
}

#[test]
fn server_is_clone_send_sync() {
    fn assert_bounds<T: Clone + Send + Sync>() {}
    assert_bounds::<RankVectorsServer>();
}

#[test]
fn get_info_names_the_server() {
    let info = server().get_info();

    assert_eq!(info.server_info.name, "rankvectors");
    assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    assert!(info.capabilities.tools.is_some());
    assert!(info.instructions.unwrap().contains("RankVectors"));
}

#[test]
fn tool_params_generate_schemas() {
    let schema = serde_json::to_value(schemars::schema_for!(CreateImplementationsParams)).unwrap();
    let required = schema["required"].as_array().unwrap();

    assert!(required.contains(&serde_json::json!("project_id")));
    assert!(required.contains(&serde_json::json!("suggestion_ids")));
    assert!(required.contains(&serde_json::json!("platform")));
    assert!(!required.contains(&serde_json::json!("dry_run")));

    let schema = serde_json::to_value(schemars::schema_for!(GetCreditsParams)).unwrap();
    assert!(schema["properties"]["start_date"].is_object());
}
