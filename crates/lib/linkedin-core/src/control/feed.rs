use std::fmt::Write as _;

use linkedin_models::FeedPost;
use serde::Serialize;
use tracing::debug;

use super::{ControlError, LinkedinControlPlane};
use crate::api::LinkedinApi;

/// One company page update.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UpdateSummary {
    pub content: String,
    pub timestamp: Option<String>,
}

impl<A: LinkedinApi> LinkedinControlPlane<A> {
    /// Posts from the authenticated member's feed.
    ///
    /// # Errors
    /// Returns `ControlError::Api` if the feed cannot be fetched.
    pub async fn get_feed_posts(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<FeedPost>, ControlError> {
        let mut posts = self.api().get_feed_posts(limit, offset).await?;
        posts.truncate(limit);
        debug!(count = posts.len(), offset, "fetched feed posts");
        Ok(posts)
    }

    /// Most recent updates posted on a company page.
    ///
    /// # Errors
    /// Returns `ControlError::Api` if the updates cannot be fetched.
    pub async fn get_company_updates(
        &self,
        company_id: &str,
        limit: usize,
    ) -> Result<Vec<UpdateSummary>, ControlError> {
        let updates = self.api().get_company_updates(company_id, limit).await?;
        Ok(updates
            .into_iter()
            .take(limit)
            .map(|update| UpdateSummary {
                content: update.content.unwrap_or_else(|| "No content".to_string()),
                timestamp: update.timestamp,
            })
            .collect())
    }
}

/// Renders feed posts as `Post by {author}: {content}` lines.
pub fn render_feed(posts: &[FeedPost]) -> String {
    let mut out = String::new();
    for post in posts {
        let _ = writeln!(out, "Post by {}: {}", post.author_name, post.content);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::{MemoryApi, MemoryData};
    use linkedin_models::CompanyUpdate;

    #[test]
    fn feed_renders_one_line_per_post() {
        let posts = vec![
            FeedPost {
                author_name: "Jane Doe".to_string(),
                content: "Shipping today".to_string(),
                ..FeedPost::default()
            },
            FeedPost {
                author_name: "Raj".to_string(),
                content: String::new(),
                ..FeedPost::default()
            },
        ];

        assert_eq!(
            render_feed(&posts),
            "Post by Jane Doe: Shipping today\nPost by Raj: \n"
        );
        assert_eq!(render_feed(&[]), "");
    }

    #[tokio::test]
    async fn company_updates_default_missing_content() {
        let api = MemoryApi::new(MemoryData::new().with_company_updates(
            "42",
            vec![
                CompanyUpdate {
                    content: None,
                    timestamp: Some("2d".to_string()),
                },
                CompanyUpdate {
                    content: Some("We moved to the cloud".to_string()),
                    timestamp: None,
                },
            ],
        ));
        let control = LinkedinControlPlane::new(api);

        let updates = control
            .get_company_updates("42", 5)
            .await
            .expect("updates should load");

        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].content, "No content");
        assert_eq!(updates[0].timestamp.as_deref(), Some("2d"));
        assert_eq!(updates[1].timestamp, None);
    }
}
