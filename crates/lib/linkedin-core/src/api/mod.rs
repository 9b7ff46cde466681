//! Upstream client seam.
//!
//! `LinkedinApi` is the set of remote operations the control plane relies on.
//! `VoyagerClient` talks to the platform's internal API; `MemoryApi` serves
//! preloaded records.

use std::{error::Error, fmt};

use async_trait::async_trait;
use linkedin_models::{
    Company,
    CompanyUpdate,
    FeedPost,
    JobHit,
    JobPosting,
    PersonHit,
    Profile,
    ProfilePost,
    Skill,
};

pub mod memory;
pub mod voyager;

pub use memory::MemoryApi;
pub use voyager::{VoyagerClient, VoyagerConfig, VoyagerCredentials};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Login was rejected or a checkpoint challenge was requested.
    Auth(String),
    /// Transport failure or a non-success status from the platform.
    Unavailable(String),
    /// The response body did not have the expected shape.
    Malformed(String),
    NotFound(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auth(message) => write!(f, "authentication failed: {message}"),
            Self::Unavailable(message) => write!(f, "upstream unavailable: {message}"),
            Self::Malformed(message) => write!(f, "malformed response: {message}"),
            Self::NotFound(what) => write!(f, "not found: {what}"),
        }
    }
}

impl Error for ApiError {}

/// Remote operations exposed by the networking platform.
#[async_trait]
pub trait LinkedinApi: Send + Sync + 'static {
    async fn get_profile(&self, public_id: &str) -> Result<Profile, ApiError>;

    async fn get_profile_skills(&self, public_id: &str) -> Result<Vec<Skill>, ApiError>;

    async fn get_profile_posts(
        &self,
        public_id: &str,
        limit: usize,
    ) -> Result<Vec<ProfilePost>, ApiError>;

    async fn get_company(&self, company_id: &str) -> Result<Company, ApiError>;

    async fn get_company_updates(
        &self,
        company_id: &str,
        limit: usize,
    ) -> Result<Vec<CompanyUpdate>, ApiError>;

    async fn get_job(&self, job_id: &str) -> Result<JobPosting, ApiError>;

    async fn get_feed_posts(&self, limit: usize, offset: usize) -> Result<Vec<FeedPost>, ApiError>;

    async fn search_people(&self, query: &PeopleQuery) -> Result<Vec<PersonHit>, ApiError>;

    async fn search_companies(&self, query: &CompanyQuery) -> Result<Vec<Company>, ApiError>;

    async fn search_jobs(&self, query: &JobQuery) -> Result<Vec<JobHit>, ApiError>;
}

/// People search filters. Blank filters are never sent upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeopleQuery {
    pub keywords: Option<String>,
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub school_name: Option<String>,
    pub industry: Option<String>,
    pub location_name: Option<String>,
    pub limit: usize,
}

impl PeopleQuery {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_keywords(mut self, keywords: Option<&str>) -> Self {
        self.keywords = non_empty(keywords);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: Option<&str>) -> Self {
        self.title = non_empty(title);
        self
    }

    #[must_use]
    pub fn with_company_name(mut self, company_name: Option<&str>) -> Self {
        self.company_name = non_empty(company_name);
        self
    }

    #[must_use]
    pub fn with_school_name(mut self, school_name: Option<&str>) -> Self {
        self.school_name = non_empty(school_name);
        self
    }

    #[must_use]
    pub fn with_industry(mut self, industry: Option<&str>) -> Self {
        self.industry = non_empty(industry);
        self
    }

    #[must_use]
    pub fn with_location_name(mut self, location_name: Option<&str>) -> Self {
        self.location_name = non_empty(location_name);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyQuery {
    pub keywords: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub limit: usize,
}

impl CompanyQuery {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_keywords(mut self, keywords: Option<&str>) -> Self {
        self.keywords = non_empty(keywords);
        self
    }

    #[must_use]
    pub fn with_industry(mut self, industry: Option<&str>) -> Self {
        self.industry = non_empty(industry);
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: Option<&str>) -> Self {
        self.location = non_empty(location);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobQuery {
    pub keywords: Option<String>,
    pub location_name: Option<String>,
    pub company_name: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

impl JobQuery {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_keywords(mut self, keywords: Option<&str>) -> Self {
        self.keywords = non_empty(keywords);
        self
    }

    #[must_use]
    pub fn with_location_name(mut self, location_name: Option<&str>) -> Self {
        self.location_name = non_empty(location_name);
        self
    }

    #[must_use]
    pub fn with_company_name(mut self, company_name: Option<&str>) -> Self {
        self.company_name = non_empty(company_name);
        self
    }

    #[must_use]
    pub const fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

/// Drops blank values so they are not forwarded as filters.
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filters_are_dropped() {
        let query = PeopleQuery::new(10)
            .with_keywords(Some("  "))
            .with_title(Some("CTO"))
            .with_company_name(None);

        assert_eq!(query.keywords, None);
        assert_eq!(query.title.as_deref(), Some("CTO"));
        assert_eq!(query.company_name, None);
        assert_eq!(query.limit, 10);
    }

    #[test]
    fn api_error_messages_name_the_failure() {
        let err = ApiError::Auth("CHALLENGE".to_string());
        assert_eq!(err.to_string(), "authentication failed: CHALLENGE");
    }
}
