//! In-memory `LinkedinApi` backed by preloaded records.
//!
//! Searches apply case-insensitive substring matching on the filters that are
//! set, which is close enough to the platform's behaviour to exercise the
//! control plane offline. Every call is recorded so callers can assert on the
//! number and order of upstream requests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

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

use super::{ApiError, CompanyQuery, JobQuery, LinkedinApi, PeopleQuery};

/// Records served by `MemoryApi`.
#[derive(Debug, Clone, Default)]
pub struct MemoryData {
    pub profiles: HashMap<String, Profile>,
    pub skills: HashMap<String, Vec<Skill>>,
    pub profile_posts: HashMap<String, Vec<ProfilePost>>,
    pub companies: Vec<Company>,
    pub company_updates: HashMap<String, Vec<CompanyUpdate>>,
    pub people: Vec<PersonHit>,
    pub jobs: Vec<JobPosting>,
    pub feed: Vec<FeedPost>,
    /// When set, every call fails with this error.
    pub failure: Option<ApiError>,
    /// Profiles whose lookups fail with `ApiError::Unavailable`.
    pub broken_profiles: HashSet<String>,
}

impl MemoryData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_profile(mut self, profile: Profile, skills: &[&str]) -> Self {
        let skills = skills
            .iter()
            .map(|name| Skill {
                name: (*name).to_string(),
            })
            .collect();
        self.skills.insert(profile.public_id.clone(), skills);
        self.profiles.insert(profile.public_id.clone(), profile);
        self
    }

    #[must_use]
    pub fn with_profile_posts(mut self, public_id: &str, posts: Vec<ProfilePost>) -> Self {
        self.profile_posts.insert(public_id.to_string(), posts);
        self
    }

    #[must_use]
    pub fn with_company(mut self, company: Company) -> Self {
        self.companies.push(company);
        self
    }

    #[must_use]
    pub fn with_company_updates(mut self, company_id: &str, updates: Vec<CompanyUpdate>) -> Self {
        self.company_updates.insert(company_id.to_string(), updates);
        self
    }

    #[must_use]
    pub fn with_person(mut self, person: PersonHit) -> Self {
        self.people.push(person);
        self
    }

    #[must_use]
    pub fn with_job(mut self, job: JobPosting) -> Self {
        self.jobs.push(job);
        self
    }

    #[must_use]
    pub fn with_feed_post(mut self, post: FeedPost) -> Self {
        self.feed.push(post);
        self
    }

    #[must_use]
    pub fn with_failure(mut self, failure: ApiError) -> Self {
        self.failure = Some(failure);
        self
    }

    #[must_use]
    pub fn with_broken_profile(mut self, public_id: &str) -> Self {
        self.broken_profiles.insert(public_id.to_string());
        self
    }
}

/// Cheaply clonable client over shared `MemoryData`.
#[derive(Debug, Clone)]
pub struct MemoryApi {
    data: Arc<MemoryData>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MemoryApi {
    #[must_use]
    pub fn new(data: MemoryData) -> Self {
        Self {
            data: Arc::new(data),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Operation names of every call made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn call_count(&self, operation: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.as_str() == operation)
            .count()
    }

    fn record(&self, operation: &str) -> Result<(), ApiError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(operation.to_string());
        }
        self.data.failure.clone().map_or(Ok(()), Err)
    }

    fn check_profile(&self, public_id: &str) -> Result<(), ApiError> {
        if self.data.broken_profiles.contains(public_id) {
            return Err(ApiError::Unavailable(format!("profile {public_id} timed out")));
        }
        Ok(())
    }

    fn find_company(&self, company_id: &str) -> Option<&Company> {
        self.data.companies.iter().find(|company| {
            company.id() == company_id || company.universal_name.as_deref() == Some(company_id)
        })
    }
}

#[async_trait]
impl LinkedinApi for MemoryApi {
    async fn get_profile(&self, public_id: &str) -> Result<Profile, ApiError> {
        self.record("get_profile")?;
        self.check_profile(public_id)?;
        self.data
            .profiles
            .get(public_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("profile {public_id}")))
    }

    async fn get_profile_skills(&self, public_id: &str) -> Result<Vec<Skill>, ApiError> {
        self.record("get_profile_skills")?;
        self.check_profile(public_id)?;
        Ok(self.data.skills.get(public_id).cloned().unwrap_or_default())
    }

    async fn get_profile_posts(
        &self,
        public_id: &str,
        limit: usize,
    ) -> Result<Vec<ProfilePost>, ApiError> {
        self.record("get_profile_posts")?;
        self.check_profile(public_id)?;
        Ok(self
            .data
            .profile_posts
            .get(public_id)
            .map(|posts| posts.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn get_company(&self, company_id: &str) -> Result<Company, ApiError> {
        self.record("get_company")?;
        self.find_company(company_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("company {company_id}")))
    }

    async fn get_company_updates(
        &self,
        company_id: &str,
        limit: usize,
    ) -> Result<Vec<CompanyUpdate>, ApiError> {
        self.record("get_company_updates")?;
        Ok(self
            .data
            .company_updates
            .get(company_id)
            .map(|updates| updates.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn get_job(&self, job_id: &str) -> Result<JobPosting, ApiError> {
        self.record("get_job")?;
        self.data
            .jobs
            .iter()
            .find(|job| job.job_id == job_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("job {job_id}")))
    }

    async fn get_feed_posts(&self, limit: usize, offset: usize) -> Result<Vec<FeedPost>, ApiError> {
        self.record("get_feed_posts")?;
        Ok(self.data.feed.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn search_people(&self, query: &PeopleQuery) -> Result<Vec<PersonHit>, ApiError> {
        self.record("search_people")?;
        Ok(self
            .data
            .people
            .iter()
            .filter(|person| {
                matches(query.keywords.as_deref(), &[&person.full_name(), &person.occupation])
                    && matches(query.title.as_deref(), &[&person.occupation])
                    && matches(
                        query.company_name.as_deref(),
                        &[person.current_company(), &person.occupation],
                    )
                    && matches(query.location_name.as_deref(), &[&person.location_name])
            })
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn search_companies(&self, query: &CompanyQuery) -> Result<Vec<Company>, ApiError> {
        self.record("search_companies")?;
        Ok(self
            .data
            .companies
            .iter()
            .filter(|company| {
                let name = company.name.as_deref().unwrap_or_default();
                let description = company.description.as_deref().unwrap_or_default();
                let industries = company.industries.join(" ");
                let city = company
                    .headquarter
                    .as_ref()
                    .and_then(|hq| hq.city.as_deref())
                    .unwrap_or_default();
                let country = company.country().unwrap_or_default();
                matches(query.keywords.as_deref(), &[name, description, &industries])
                    && matches(query.industry.as_deref(), &[&industries])
                    && matches(query.location.as_deref(), &[city, country])
            })
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn search_jobs(&self, query: &JobQuery) -> Result<Vec<JobHit>, ApiError> {
        self.record("search_jobs")?;
        Ok(self
            .data
            .jobs
            .iter()
            .filter(|job| {
                let company = job.company_name.as_deref().unwrap_or_default();
                matches(query.keywords.as_deref(), &[&job.title, &job.description])
                    && matches(query.location_name.as_deref(), &[&job.formatted_location])
                    && matches(query.company_name.as_deref(), &[company])
            })
            .skip(query.offset)
            .take(query.limit)
            .map(|job| JobHit {
                entity_urn: format!("urn:li:fs_normalized_jobPosting:{}", job.job_id),
                title: Some(job.title.clone()),
            })
            .collect())
    }
}

/// True when no filter is set or any field contains it, ignoring case.
fn matches(filter: Option<&str>, fields: &[&str]) -> bool {
    filter.is_none_or(|filter| {
        let needle = filter.to_lowercase();
        fields
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(public_id: &str, occupation: &str) -> PersonHit {
        PersonHit {
            public_id: public_id.to_string(),
            occupation: occupation.to_string(),
            ..PersonHit::default()
        }
    }

    #[tokio::test]
    async fn people_search_matches_case_insensitively() {
        let api = MemoryApi::new(
            MemoryData::new()
                .with_person(person("a", "CTO at Acme"))
                .with_person(person("b", "Engineer at Initech")),
        );

        let hits = api
            .search_people(&PeopleQuery::new(10).with_title(Some("cto")))
            .await
            .expect("search should succeed");

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].public_id, "a");
        assert_eq!(api.calls(), vec!["search_people".to_string()]);
    }

    #[tokio::test]
    async fn failure_applies_to_every_call() {
        let api = MemoryApi::new(
            MemoryData::new().with_failure(ApiError::Auth("CHALLENGE".to_string())),
        );

        let err = api.get_feed_posts(10, 0).await.expect_err("should fail");
        assert_eq!(err, ApiError::Auth("CHALLENGE".to_string()));
    }

    #[tokio::test]
    async fn broken_profiles_fail_only_their_own_lookups() {
        let api = MemoryApi::new(
            MemoryData::new()
                .with_profile(
                    Profile {
                        public_id: "ok".to_string(),
                        ..Profile::default()
                    },
                    &["Rust"],
                )
                .with_broken_profile("flaky"),
        );

        assert!(api.get_profile_skills("ok").await.is_ok());
        assert!(matches!(
            api.get_profile_skills("flaky").await,
            Err(ApiError::Unavailable(_))
        ));
        assert!(matches!(
            api.get_profile("missing").await,
            Err(ApiError::NotFound(_))
        ));
    }
}
