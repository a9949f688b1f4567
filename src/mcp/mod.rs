//! MCP (Model Context Protocol) server and tool types.
//!
//! This module provides an MCP server for the RankVectors API, allowing AI
//! assistants to review suggestions, manage implementations and check
//! credits.
//!
//! # Example
//!
//! ```no_run
//! use rankvectors::mcp::RankVectorsServer;
//!
//! # fn main() -> rankvectors::Result<()> {
//! let server = RankVectorsServer::from_env()?;
//! // Server can now be used with rmcp transport
//! # Ok(())
//! # }
//! ```

mod params;
mod server;

pub use params::*;
pub use server::RankVectorsServer;
