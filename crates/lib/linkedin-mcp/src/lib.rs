//! MCP server implementation for linkedin-mcp.
//!
//! This crate wires the prospecting control plane into rmcp tool handlers and
//! exposes the MCP-facing API surface for search, profile lookup and sales
//! intelligence.

mod helpers;
mod tools;
pub mod server;

use std::sync::Arc;

use linkedin_core::api::{ApiError, LinkedinApi};
use linkedin_core::control::{ControlError, LinkedinControlPlane, ScoringConfig};
use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool,
    tool_handler,
    tool_router,
};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};

const SERVER_INSTRUCTIONS: &str = r"linkedin-mcp exposes LinkedIn search, profile lookup and sales prospecting tools.

Workflow:
1. Discover accounts with `search_companies`, `generate_lead_recommendations`,
   `identify_target_accounts` or `find_companies_using_technologies`.
2. Inspect an account with `get_company_details`, `get_company_updates`,
   `search_company_employees` and `find_decision_makers`. Company ids are the
   trailing segment of the company URN (e.g. `1441`).
3. Find people with `search_people`, `search_people_by_skills` or
   `find_recent_job_changes`, then read them with `get_profile_details`.
   Profile ids are public identifiers (e.g. `jane-doe-123`).
4. Prepare outreach with `analyze_prospect_profile`,
   `find_common_connections` and `generate_sales_outreach_context`.

Notes:
- `get_feed_posts` and `search_jobs` return plain text; every other tool returns JSON.
- Failed calls return an error result whose text starts with `Error` followed by a
  JSON `{kind, message}` payload.
- `help` lists every tool. `health` returns `ok`.";

/// Builds a fresh upstream client for a single tool call.
pub type BuildClientFn<A> = Arc<dyn Fn() -> Result<A, ApiError> + Send + Sync>;

/// MCP server wrapper around the client factory and tool routers.
pub struct LinkedinMcp<A: LinkedinApi> {
    tool_router: ToolRouter<Self>,
    build_client: BuildClientFn<A>,
    scoring: Arc<ScoringConfig>,
}

impl<A: LinkedinApi> Clone for LinkedinMcp<A> {
    fn clone(&self) -> Self {
        Self {
            tool_router: self.tool_router.clone(),
            build_client: Arc::clone(&self.build_client),
            scoring: Arc::clone(&self.scoring),
        }
    }
}

impl<A: LinkedinApi> LinkedinMcp<A> {
    /// Creates a new server with the default scoring configuration.
    #[must_use]
    pub fn new(build_client: BuildClientFn<A>) -> Self {
        Self::with_scoring(build_client, Arc::new(ScoringConfig::default()))
    }

    #[must_use]
    pub fn with_scoring(build_client: BuildClientFn<A>, scoring: Arc<ScoringConfig>) -> Self {
        let tool_router = Self::tool_router_core()
            + Self::tool_router_feed()
            + Self::tool_router_search()
            + Self::tool_router_profile()
            + Self::tool_router_sales()
            + Self::tool_router_context();
        Self {
            tool_router,
            build_client,
            scoring,
        }
    }

    /// Control plane over a newly built client.
    pub(crate) fn control(&self) -> Result<LinkedinControlPlane<A>, ControlError> {
        let api = (self.build_client)()?;
        Ok(LinkedinControlPlane::new(api).with_scoring(Arc::clone(&self.scoring)))
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl<A: LinkedinApi> LinkedinMcp<A> {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl<A: LinkedinApi> ServerHandler for LinkedinMcp<A> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use linkedin_core::api::ApiError;
    use linkedin_core::api::memory::{MemoryApi, MemoryData};
    use rmcp::model::CallToolResult;

    use crate::LinkedinMcp;

    pub fn server(data: MemoryData) -> (LinkedinMcp<MemoryApi>, MemoryApi) {
        let api = MemoryApi::new(data);
        let shared = api.clone();
        let server = LinkedinMcp::new(Arc::new(move || Ok(shared.clone())));
        (server, api)
    }

    pub fn unauthenticated_server() -> LinkedinMcp<MemoryApi> {
        LinkedinMcp::new(Arc::new(|| {
            Err(ApiError::Auth("login result CHALLENGE".to_string()))
        }))
    }

    /// Text of the content item at `index`.
    pub fn text(result: &CallToolResult, index: usize) -> String {
        result
            .content
            .get(index)
            .and_then(|content| content.as_text())
            .map(|text| text.text.clone())
            .unwrap_or_default()
    }

    pub fn is_error(result: &CallToolResult) -> bool {
        result.is_error == Some(true)
    }
}
