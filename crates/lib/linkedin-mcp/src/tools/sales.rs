use linkedin_core::api::LinkedinApi;
use linkedin_core::control::{
    ControlError,
    JobChangeRequest,
    LeadRequest,
    TargetAccountRequest,
    TechnologyRequest,
};
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::LinkedinMcp;
use crate::helpers::{self, non_blank};

/// Parameters for finding senior people at a company.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FindDecisionMakersParams {
    pub company_id: String,
    /// Titles to search (default CEO, CTO, CIO, Director, VP, Head, Manager).
    pub titles: Option<Vec<String>>,
    /// Maximum results (default 5).
    pub limit: Option<usize>,
}

/// Parameters for lead recommendations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GenerateLeadRecommendationsParams {
    /// Target industry (default "Information Technology").
    pub industry: Option<String>,
    /// `small` (1-50), `medium` (51-500) or `large` (501+).
    pub company_size: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub location: Option<String>,
    /// Maximum results (default 5).
    pub limit: Option<usize>,
}

/// Parameters for target account discovery.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct IdentifyTargetAccountsParams {
    pub industry: String,
    /// At least one must appear in the company description.
    pub keywords: Option<Vec<String>>,
    pub location: Option<String>,
    pub min_size: Option<u64>,
    pub max_size: Option<u64>,
    pub technology_interests: Option<Vec<String>>,
    /// Maximum results (default 10).
    pub limit: Option<usize>,
}

/// Parameters for prospect scoring.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeProspectProfileParams {
    pub profile_id: String,
    /// Keywords describing your services; defaults to a built-in list.
    pub service_keywords: Option<Vec<String>>,
}

/// Parameters for technology-based company discovery.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FindCompaniesUsingTechnologiesParams {
    pub technologies: Vec<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    /// Maximum results (default 10).
    pub limit: Option<usize>,
}

/// Parameters for recent job change discovery.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FindRecentJobChangesParams {
    pub industry: Option<String>,
    pub title_keywords: Option<Vec<String>>,
    pub location: Option<String>,
    /// Maximum results (default 10).
    pub limit: Option<usize>,
    /// How far back a new position counts as recent (default 6 months).
    pub window_months: Option<u32>,
}

/// Parameters for outreach preparation.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GenerateSalesOutreachContextParams {
    pub profile_id: String,
    /// Short description of the service you are offering.
    pub company_service: String,
}

#[tool_router(router = tool_router_sales, vis = "pub")]
impl<A: LinkedinApi> LinkedinMcp<A> {
    #[tool(description = "Find key decision makers at a company by title.")]
    async fn find_decision_makers(
        &self,
        Parameters(params): Parameters<FindDecisionMakersParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let limit = params.limit.unwrap_or(5);
        let titles = params.titles.unwrap_or_default();
        let outcome: Result<_, ControlError> = async {
            self.control()?
                .find_decision_makers(&params.company_id, &titles, limit)
                .await
        }
        .await;
        Ok(helpers::json_result("finding decision makers", outcome))
    }

    #[tool(description = "Recommend companies to approach, with technology fit and contacts.")]
    async fn generate_lead_recommendations(
        &self,
        Parameters(params): Parameters<GenerateLeadRecommendationsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = LeadRequest {
            industry: non_blank(params.industry),
            company_size: non_blank(params.company_size),
            technologies: params.technologies.unwrap_or_default(),
            location: non_blank(params.location),
            limit: params.limit.unwrap_or(5),
        };
        let outcome: Result<_, ControlError> =
            async { self.control()?.generate_lead_recommendations(&request).await }.await;
        Ok(helpers::json_result("generating lead recommendations", outcome))
    }

    #[tool(description = "Identify target accounts by industry, size, keywords and technology interests.")]
    async fn identify_target_accounts(
        &self,
        Parameters(params): Parameters<IdentifyTargetAccountsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = TargetAccountRequest {
            industry: params.industry,
            keywords: params.keywords.unwrap_or_default(),
            location: non_blank(params.location),
            min_size: params.min_size,
            max_size: params.max_size,
            technology_interests: params.technology_interests.unwrap_or_default(),
            limit: params.limit.unwrap_or(10),
        };
        let outcome: Result<_, ControlError> =
            async { self.control()?.identify_target_accounts(&request).await }.await;
        Ok(helpers::json_result("identifying target accounts", outcome))
    }

    #[tool(description = "Score a profile as a sales prospect (decision maker, service interests, opportunity level).")]
    async fn analyze_prospect_profile(
        &self,
        Parameters(params): Parameters<AnalyzeProspectProfileParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let keywords = params.service_keywords.unwrap_or_default();
        let outcome: Result<_, ControlError> = async {
            self.control()?
                .analyze_prospect_profile(&params.profile_id, &keywords)
                .await
        }
        .await;
        Ok(helpers::json_result("analyzing prospect profile", outcome))
    }

    #[tool(description = "Find companies that mention the given technologies, topped up from job postings.")]
    async fn find_companies_using_technologies(
        &self,
        Parameters(params): Parameters<FindCompaniesUsingTechnologiesParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = TechnologyRequest {
            technologies: params.technologies,
            industry: non_blank(params.industry),
            location: non_blank(params.location),
            limit: params.limit.unwrap_or(10),
        };
        let outcome: Result<_, ControlError> =
            async { self.control()?.find_companies_using_technologies(&request).await }.await;
        Ok(helpers::json_result("finding companies using technologies", outcome))
    }

    #[tool(description = "Find people who recently started at a new company.")]
    async fn find_recent_job_changes(
        &self,
        Parameters(params): Parameters<FindRecentJobChangesParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let defaults = JobChangeRequest::default();
        let request = JobChangeRequest {
            industry: non_blank(params.industry),
            title_keywords: params.title_keywords.unwrap_or_default(),
            location: non_blank(params.location),
            limit: params.limit.unwrap_or(defaults.limit),
            window_months: params.window_months.unwrap_or(defaults.window_months),
        };
        let outcome: Result<_, ControlError> =
            async { self.control()?.find_recent_job_changes(&request).await }.await;
        Ok(helpers::json_result("finding recent job changes", outcome))
    }

    #[tool(description = "Build personalization points and conversation starters for reaching out to a prospect.")]
    async fn generate_sales_outreach_context(
        &self,
        Parameters(params): Parameters<GenerateSalesOutreachContextParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let outcome: Result<_, ControlError> = async {
            self.control()?
                .generate_sales_outreach_context(&params.profile_id, &params.company_service)
                .await
        }
        .await;
        Ok(helpers::json_result("generating sales outreach context", outcome))
    }
}
