use linkedin_core::api::LinkedinApi;
use rmcp::{
    ErrorData,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::LinkedinMcp;

/// Payload listing the MCP commands this server offers.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HelpCommands {
    pub commands: Vec<String>,
}

impl Default for HelpCommands {
    fn default() -> Self {
        Self {
            commands: [
                "help - List the MCP commands offered by this server.",
                "health - Health check. Returns 'ok'.",
                "get_feed_posts - Read posts from the authenticated member's feed.",
                "search_jobs - Search job postings; returns text blocks.",
                "search_companies - Search companies by keywords, industry and location.",
                "get_company_details - Fetch a company's profile by id.",
                "get_company_updates - Fetch a company's recent page updates.",
                "search_people - Search people with optional title, company, school and skill filters.",
                "get_profile_details - Fetch a profile's experience, education and skills.",
                "search_company_employees - List a company's employees, optionally by title.",
                "search_people_by_skills - Find people holding every given skill.",
                "find_decision_makers - Find senior people at a company by title.",
                "generate_lead_recommendations - Recommend companies with technology fit and contacts.",
                "identify_target_accounts - Filter companies by size, keywords and technology interests.",
                "analyze_prospect_profile - Score a profile as a sales prospect.",
                "find_companies_using_technologies - Find companies mentioning given technologies.",
                "find_common_connections - Compare two profiles' employers, schools and skills.",
                "find_recent_job_changes - Find people who recently joined a new company.",
                "generate_sales_outreach_context - Build talking points for contacting a prospect.",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        }
    }
}

#[tool_router(router = tool_router_context, vis = "pub")]
impl<A: LinkedinApi> LinkedinMcp<A> {
    #[tool(description = "List the MCP commands offered by this server.")]
    async fn help(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::json(HelpCommands::default())?]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_every_tool_once() {
        let help = HelpCommands::default();
        assert_eq!(help.commands.len(), 19);
        assert!(help.commands.iter().all(|command| command.contains(" - ")));
    }
}
