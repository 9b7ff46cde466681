use linkedin_core::api::LinkedinApi;
use linkedin_core::control::ControlError;
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
use crate::helpers;

/// Parameters for fetching a company by id.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetCompanyDetailsParams {
    pub company_id: String,
}

/// Parameters for fetching a profile by public id.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetProfileDetailsParams {
    pub profile_id: String,
}

/// Parameters for comparing two profiles.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FindCommonConnectionsParams {
    pub profile_id1: String,
    pub profile_id2: String,
    /// Maximum shared skills to list (default 5).
    pub limit: Option<usize>,
}

#[tool_router(router = tool_router_profile, vis = "pub")]
impl<A: LinkedinApi> LinkedinMcp<A> {
    #[tool(description = "Get detailed information about a company.")]
    async fn get_company_details(
        &self,
        Parameters(params): Parameters<GetCompanyDetailsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let outcome: Result<_, ControlError> =
            async { self.control()?.get_company_details(&params.company_id).await }.await;
        Ok(helpers::json_result("getting company details", outcome))
    }

    #[tool(description = "Get a profile's experience, education and skills.")]
    async fn get_profile_details(
        &self,
        Parameters(params): Parameters<GetProfileDetailsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let outcome: Result<_, ControlError> =
            async { self.control()?.get_profile_details(&params.profile_id).await }.await;
        Ok(helpers::json_result("getting profile details", outcome))
    }

    #[tool(description = "Find shared employers, schools and skills between two profiles.")]
    async fn find_common_connections(
        &self,
        Parameters(params): Parameters<FindCommonConnectionsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let limit = params.limit.unwrap_or(5);
        let outcome: Result<_, ControlError> = async {
            self.control()?
                .find_common_connections(&params.profile_id1, &params.profile_id2, limit)
                .await
        }
        .await;
        Ok(helpers::json_result("finding common connections", outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use linkedin_core::api::memory::MemoryData;
    use linkedin_models::{Experience, Profile, TimePeriod, YearMonth};

    fn profile() -> Profile {
        Profile {
            public_id: "jane".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            headline: "CTO".to_string(),
            experience: vec![Experience {
                company_name: "Acme".to_string(),
                title: "CTO".to_string(),
                description: String::new(),
                time_period: Some(TimePeriod {
                    start_date: Some(YearMonth { year: 2021, month: Some(4) }),
                    end_date: None,
                }),
            }],
            ..Profile::default()
        }
    }

    #[tokio::test]
    async fn profile_details_include_date_ranges_and_skills() {
        let (server, api) = test_support::server(MemoryData::new().with_profile(profile(), &["Rust"]));

        let result = server
            .get_profile_details(Parameters(GetProfileDetailsParams {
                profile_id: "jane".to_string(),
            }))
            .await
            .expect("tool should not raise");

        let json: serde_json::Value =
            serde_json::from_str(&test_support::text(&result, 0)).expect("output should be json");
        assert_eq!(json["name"], "Jane Doe");
        assert_eq!(json["experience"][0]["date_range"], "2021 - Present");
        assert_eq!(json["skills"][0], "Rust");
        assert_eq!(json["education"], serde_json::json!([]));
        assert_eq!(api.calls(), vec!["get_profile", "get_profile_skills"]);
    }

    #[tokio::test]
    async fn missing_company_is_not_found() {
        let (server, _) = test_support::server(MemoryData::new());

        let result = server
            .get_company_details(Parameters(GetCompanyDetailsParams {
                company_id: "404".to_string(),
            }))
            .await
            .expect("tool should not raise");

        assert!(test_support::is_error(&result));
        assert!(test_support::text(&result, 0).starts_with("Error getting company details: not found"));
        assert!(test_support::text(&result, 1).contains("\"not_found\""));
    }
}
