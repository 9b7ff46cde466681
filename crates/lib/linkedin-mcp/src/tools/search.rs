use linkedin_core::api::LinkedinApi;
use linkedin_core::control::search::render_jobs;
use linkedin_core::control::{
    CompanySearchRequest,
    ControlError,
    PeopleSearchRequest,
    SkillSearchRequest,
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

/// Parameters for searching job postings.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchJobsParams {
    pub keywords: String,
    /// Number of postings to return (default 3).
    pub limit: Option<usize>,
    /// Number of postings to skip (default 0).
    pub offset: Option<usize>,
    /// Location filter; blank means anywhere.
    pub location: Option<String>,
}

/// Parameters for searching companies.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchCompaniesParams {
    pub keywords: String,
    pub industry: Option<String>,
    pub location: Option<String>,
    /// Maximum results (default 10).
    pub limit: Option<usize>,
}

/// Parameters for searching people.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchPeopleParams {
    pub keywords: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub school: Option<String>,
    /// Keep only people with a matching skill.
    pub skill: Option<String>,
    /// Maximum results (default 10).
    pub limit: Option<usize>,
}

/// Parameters for listing a company's employees.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchCompanyEmployeesParams {
    pub company_id: String,
    pub title: Option<String>,
    /// Maximum results (default 10).
    pub limit: Option<usize>,
}

/// Parameters for finding people by skills.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchPeopleBySkillsParams {
    /// Every skill must be present on the profile.
    pub skills: Vec<String>,
    pub title: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    /// Maximum results (default 10).
    pub limit: Option<usize>,
}

#[tool_router(router = tool_router_search, vis = "pub")]
impl<A: LinkedinApi> LinkedinMcp<A> {
    #[tool(description = "Search for jobs. Returns 'Job by {title} at {company} in {location}: {description}' blocks.")]
    async fn search_jobs(
        &self,
        Parameters(params): Parameters<SearchJobsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let limit = params.limit.unwrap_or(3);
        let offset = params.offset.unwrap_or(0);
        let location = non_blank(params.location);
        let outcome: Result<_, ControlError> = async {
            self.control()?
                .search_jobs(&params.keywords, location.as_deref(), limit, offset)
                .await
        }
        .await;
        Ok(helpers::text_result(
            "searching jobs",
            outcome.map(|listings| render_jobs(&listings)),
        ))
    }

    #[tool(description = "Search for companies by keywords, industry and location.")]
    async fn search_companies(
        &self,
        Parameters(params): Parameters<SearchCompaniesParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = CompanySearchRequest {
            keywords: params.keywords,
            industry: non_blank(params.industry),
            location: non_blank(params.location),
            limit: params.limit.unwrap_or(10),
        };
        let outcome: Result<_, ControlError> =
            async { self.control()?.search_companies(&request).await }.await;
        Ok(helpers::json_result("searching companies", outcome))
    }

    #[tool(description = "Search for people by keywords, title, company, industry, location, school or skill.")]
    async fn search_people(
        &self,
        Parameters(params): Parameters<SearchPeopleParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = PeopleSearchRequest {
            keywords: non_blank(params.keywords),
            title: non_blank(params.title),
            company: non_blank(params.company),
            industry: non_blank(params.industry),
            location: non_blank(params.location),
            school: non_blank(params.school),
            skill: non_blank(params.skill),
            limit: params.limit.unwrap_or(10),
        };
        let outcome: Result<_, ControlError> =
            async { self.control()?.search_people(&request).await }.await;
        Ok(helpers::json_result("searching people", outcome))
    }

    #[tool(description = "Search for employees of a company, optionally filtered by title.")]
    async fn search_company_employees(
        &self,
        Parameters(params): Parameters<SearchCompanyEmployeesParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let limit = params.limit.unwrap_or(10);
        let title = non_blank(params.title);
        let outcome: Result<_, ControlError> = async {
            self.control()?
                .search_company_employees(&params.company_id, title.as_deref(), limit)
                .await
        }
        .await;
        Ok(helpers::json_result("searching company employees", outcome))
    }

    #[tool(description = "Find people who have all of the given skills.")]
    async fn search_people_by_skills(
        &self,
        Parameters(params): Parameters<SearchPeopleBySkillsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = SkillSearchRequest {
            skills: params.skills,
            title: non_blank(params.title),
            industry: non_blank(params.industry),
            location: non_blank(params.location),
            limit: params.limit.unwrap_or(10),
        };
        let outcome: Result<_, ControlError> =
            async { self.control()?.search_people_by_skills(&request).await }.await;
        Ok(helpers::json_result("searching people by skills", outcome))
    }
}
