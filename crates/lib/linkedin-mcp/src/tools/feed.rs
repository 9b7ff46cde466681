use linkedin_core::api::LinkedinApi;
use linkedin_core::control::ControlError;
use linkedin_core::control::feed::render_feed;
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

/// Parameters for reading the member's feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetFeedPostsParams {
    /// Number of posts to return (default 10).
    pub limit: Option<usize>,
    /// Number of posts to skip (default 0).
    pub offset: Option<usize>,
}

/// Parameters for reading a company page's updates.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetCompanyUpdatesParams {
    pub company_id: String,
    /// Number of updates to return (default 5).
    pub limit: Option<usize>,
}

#[tool_router(router = tool_router_feed, vis = "pub")]
impl<A: LinkedinApi> LinkedinMcp<A> {
    #[tool(description = "Retrieve posts from the LinkedIn feed as 'Post by {author}: {content}' lines.")]
    async fn get_feed_posts(
        &self,
        Parameters(params): Parameters<GetFeedPostsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let limit = params.limit.unwrap_or(10);
        let offset = params.offset.unwrap_or(0);
        let outcome: Result<_, ControlError> =
            async { self.control()?.get_feed_posts(limit, offset).await }.await;
        Ok(helpers::text_result(
            "getting feed posts",
            outcome.map(|posts| render_feed(&posts)),
        ))
    }

    #[tool(description = "Get recent updates posted by a company.")]
    async fn get_company_updates(
        &self,
        Parameters(params): Parameters<GetCompanyUpdatesParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let limit = params.limit.unwrap_or(5);
        let outcome: Result<_, ControlError> = async {
            self.control()?
                .get_company_updates(&params.company_id, limit)
                .await
        }
        .await;
        Ok(helpers::json_result("getting company updates", outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use linkedin_core::api::memory::MemoryData;
    use linkedin_models::FeedPost;

    #[tokio::test]
    async fn feed_posts_render_as_lines() {
        let (server, _) = test_support::server(
            MemoryData::new()
                .with_feed_post(FeedPost {
                    author_name: "Jane Doe".to_string(),
                    content: "Hiring platform engineers".to_string(),
                    ..FeedPost::default()
                })
                .with_feed_post(FeedPost {
                    author_name: "Raj Patel".to_string(),
                    content: "Conference recap".to_string(),
                    ..FeedPost::default()
                }),
        );

        let result = server
            .get_feed_posts(Parameters(GetFeedPostsParams {
                limit: Some(1),
                offset: Some(1),
            }))
            .await
            .expect("tool should not raise");

        assert!(!test_support::is_error(&result));
        assert_eq!(test_support::text(&result, 0), "Post by Raj Patel: Conference recap\n");
    }

    #[tokio::test]
    async fn feed_failure_becomes_error_text() {
        let server = test_support::unauthenticated_server();

        let result = server
            .get_feed_posts(Parameters(GetFeedPostsParams::default()))
            .await
            .expect("tool should not raise");

        assert!(test_support::is_error(&result));
        assert!(test_support::text(&result, 0).starts_with("Error getting feed posts: "));
    }
}
