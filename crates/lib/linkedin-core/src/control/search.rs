use std::fmt::Write as _;

use linkedin_models::schema::{PLACEHOLDER_UNKNOWN, profile_url};
use serde::Serialize;
use tracing::{debug, warn};

use super::format::contains_ci;
use super::records::{CompanySummary, PersonSummary};
use super::{ControlError, LinkedinControlPlane};
use crate::api::{CompanyQuery, JobQuery, LinkedinApi, PeopleQuery};

#[derive(Debug, Clone, Default)]
pub struct CompanySearchRequest {
    pub keywords: String,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub limit: usize,
}

#[derive(Debug, Clone, Default)]
pub struct PeopleSearchRequest {
    pub keywords: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub school: Option<String>,
    /// Keep only people with a skill whose name contains this text.
    pub skill: Option<String>,
    pub limit: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SkillSearchRequest {
    /// Every one of these must match at least one of the person's skills.
    pub skills: Vec<String>,
    pub title: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub limit: usize,
}

/// A job posting flattened for the text listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SkilledPerson {
    pub id: String,
    pub name: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub matched_skills: Vec<String>,
    pub url: String,
}

impl<A: LinkedinApi> LinkedinControlPlane<A> {
    /// Searches job postings and resolves each hit to its full posting.
    ///
    /// Hits whose posting cannot be fetched are skipped.
    ///
    /// # Errors
    /// Returns `ControlError::Api` if the search itself fails.
    pub async fn search_jobs(
        &self,
        keywords: &str,
        location: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<JobListing>, ControlError> {
        let query = JobQuery::new(limit)
            .with_keywords(Some(keywords))
            .with_location_name(location)
            .with_offset(offset);
        let hits = self.api().search_jobs(&query).await?;

        let mut listings = Vec::new();
        for hit in hits.iter().take(limit) {
            match self.api().get_job(hit.job_id()).await {
                Ok(job) => listings.push(JobListing {
                    title: job.title,
                    company: job
                        .company_name
                        .unwrap_or_else(|| PLACEHOLDER_UNKNOWN.to_string()),
                    location: job.formatted_location,
                    description: job.description,
                }),
                Err(err) => warn!(job_id = hit.job_id(), error = %err, "skipping job posting"),
            }
        }
        debug!(keywords, count = listings.len(), "job search complete");
        Ok(listings)
    }

    /// # Errors
    /// Returns `ControlError::Api` if the search fails.
    pub async fn search_companies(
        &self,
        request: &CompanySearchRequest,
    ) -> Result<Vec<CompanySummary>, ControlError> {
        let query = CompanyQuery::new(request.limit)
            .with_keywords(Some(&request.keywords))
            .with_industry(request.industry.as_deref())
            .with_location(request.location.as_deref());
        let companies = self.api().search_companies(&query).await?;

        Ok(companies
            .iter()
            .take(request.limit)
            .map(CompanySummary::from_company)
            .collect())
    }

    /// People search with an optional local skill filter.
    ///
    /// With a skill filter set, each hit's skills are fetched and hits whose
    /// skills cannot be fetched are dropped.
    ///
    /// # Errors
    /// Returns `ControlError::Api` if the search itself fails.
    pub async fn search_people(
        &self,
        request: &PeopleSearchRequest,
    ) -> Result<Vec<PersonSummary>, ControlError> {
        let query = PeopleQuery::new(request.limit)
            .with_keywords(request.keywords.as_deref())
            .with_title(request.title.as_deref())
            .with_company_name(request.company.as_deref())
            .with_industry(request.industry.as_deref())
            .with_location_name(request.location.as_deref())
            .with_school_name(request.school.as_deref());
        let people = self.api().search_people(&query).await?;

        let skill = request
            .skill
            .as_deref()
            .map(str::trim)
            .filter(|skill| !skill.is_empty());
        let Some(skill) = skill else {
            return Ok(people
                .iter()
                .take(request.limit)
                .map(|person| PersonSummary::from_hit(person, person.current_company()))
                .collect());
        };

        let mut results = Vec::new();
        for person in &people {
            if results.len() >= request.limit {
                break;
            }
            match self.api().get_profile_skills(&person.public_id).await {
                Ok(skills) => {
                    if skills.iter().any(|entry| contains_ci(&entry.name, skill)) {
                        results.push(PersonSummary::from_hit(person, person.current_company()));
                    }
                }
                Err(err) => warn!(
                    profile_id = %person.public_id,
                    error = %err,
                    "skipping person, skills unavailable"
                ),
            }
        }
        Ok(results)
    }

    /// People currently listed at a company, optionally narrowed by title.
    ///
    /// # Errors
    /// Returns `ControlError::NotFound` if the company has no name, or
    /// `ControlError::Api` if a lookup fails.
    pub async fn search_company_employees(
        &self,
        company_id: &str,
        title: Option<&str>,
        limit: usize,
    ) -> Result<Vec<PersonSummary>, ControlError> {
        let company = self.api().get_company(company_id).await?;
        let company_name = company
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| {
                ControlError::NotFound(format!("could not find company name for {company_id}"))
            })?;

        let query = PeopleQuery::new(limit)
            .with_company_name(Some(&company_name))
            .with_title(title);
        let people = self.api().search_people(&query).await?;

        Ok(people
            .iter()
            .take(limit)
            .map(|person| PersonSummary::from_hit(person, &company_name))
            .collect())
    }

    /// People holding every requested skill.
    ///
    /// The search is keyed on the first skill and over-fetches to leave room
    /// for the local all-skills filter.
    ///
    /// # Errors
    /// Returns `ControlError::InvalidInput` when no skill is given, or
    /// `ControlError::Api` if the search fails.
    pub async fn search_people_by_skills(
        &self,
        request: &SkillSearchRequest,
    ) -> Result<Vec<SkilledPerson>, ControlError> {
        let required: Vec<&str> = request
            .skills
            .iter()
            .map(|skill| skill.trim())
            .filter(|skill| !skill.is_empty())
            .collect();
        let Some(first) = required.first() else {
            return Err(ControlError::InvalidInput(
                "at least one skill is required".to_string(),
            ));
        };

        let query = PeopleQuery::new(request.limit.saturating_mul(2))
            .with_keywords(Some(*first))
            .with_title(request.title.as_deref())
            .with_industry(request.industry.as_deref())
            .with_location_name(request.location.as_deref());
        let people = self.api().search_people(&query).await?;

        let mut results = Vec::new();
        for person in &people {
            if results.len() >= request.limit {
                break;
            }
            let skills = match self.api().get_profile_skills(&person.public_id).await {
                Ok(skills) => skills,
                Err(err) => {
                    warn!(profile_id = %person.public_id, error = %err, "skipping person, skills unavailable");
                    continue;
                }
            };

            let has_all = required
                .iter()
                .all(|wanted| skills.iter().any(|skill| contains_ci(&skill.name, wanted)));
            if !has_all {
                continue;
            }

            let matched_skills = skills
                .iter()
                .filter(|skill| required.iter().any(|wanted| contains_ci(&skill.name, wanted)))
                .map(|skill| skill.name.clone())
                .collect();
            results.push(SkilledPerson {
                id: person.public_id.clone(),
                name: person.full_name(),
                title: person.occupation.clone(),
                company: person.current_company().to_string(),
                location: person.location_name.clone(),
                matched_skills,
                url: profile_url(&person.public_id),
            });
        }
        Ok(results)
    }
}

/// Renders job listings as `Job by ...` blocks separated by blank lines.
pub fn render_jobs(listings: &[JobListing]) -> String {
    let mut out = String::new();
    for job in listings {
        let _ = write!(
            out,
            "Job by {} at {} in {}: {}\n\n",
            job.title, job.company, job.location, job.description
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::{MemoryApi, MemoryData};
    use linkedin_models::{Company, JobPosting, PersonHit};

    fn job(id: &str, title: &str, company: Option<&str>) -> JobPosting {
        JobPosting {
            job_id: id.to_string(),
            title: title.to_string(),
            company_name: company.map(str::to_string),
            description: "Build pipelines".to_string(),
            formatted_location: "Jakarta, Indonesia".to_string(),
            ..JobPosting::default()
        }
    }

    fn person(id: &str, occupation: &str) -> PersonHit {
        PersonHit {
            public_id: id.to_string(),
            first_name: id.to_uppercase(),
            last_name: "Test".to_string(),
            occupation: occupation.to_string(),
            ..PersonHit::default()
        }
    }

    #[tokio::test]
    async fn job_search_respects_limit_and_renders_blocks() {
        let api = MemoryApi::new(
            MemoryData::new()
                .with_job(job("1", "Data Engineer", Some("Acme")))
                .with_job(job("2", "Senior Data Engineer", None))
                .with_job(job("3", "Data Engineer II", Some("Initech"))),
        );
        let control = LinkedinControlPlane::new(api.clone());

        let listings = control
            .search_jobs("data engineer", Some("Jakarta"), 2, 0)
            .await
            .expect("job search should succeed");

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[1].company, "Unknown");
        assert_eq!(api.call_count("get_job"), 2);
        assert_eq!(
            render_jobs(&listings[..1]),
            "Job by Data Engineer at Acme in Jakarta, Indonesia: Build pipelines\n\n"
        );
    }

    #[tokio::test]
    async fn skill_filter_drops_people_without_the_skill() {
        let api = MemoryApi::new(
            MemoryData::new()
                .with_person(person("a", "Engineer"))
                .with_person(person("b", "Engineer"))
                .with_person(person("c", "Engineer"))
                .with_profile(
                    linkedin_models::Profile {
                        public_id: "a".to_string(),
                        ..Default::default()
                    },
                    &["Rust", "Kubernetes"],
                )
                .with_profile(
                    linkedin_models::Profile {
                        public_id: "b".to_string(),
                        ..Default::default()
                    },
                    &["Excel"],
                )
                .with_broken_profile("c"),
        );
        let control = LinkedinControlPlane::new(api);

        let people = control
            .search_people(&PeopleSearchRequest {
                keywords: Some("engineer".to_string()),
                skill: Some("RUST".to_string()),
                limit: 10,
                ..PeopleSearchRequest::default()
            })
            .await
            .expect("search should succeed");

        assert_eq!(people.len(), 1);
        assert_eq!(people[0].id, "a");
    }

    #[tokio::test]
    async fn employees_require_a_company_name() {
        let api = MemoryApi::new(MemoryData::new().with_company(Company {
            entity_urn: "urn:li:fs_normalized_company:9".to_string(),
            ..Company::default()
        }));
        let control = LinkedinControlPlane::new(api);

        let err = control
            .search_company_employees("9", None, 10)
            .await
            .expect_err("nameless company should fail");
        assert!(matches!(err, ControlError::NotFound(_)));
    }

    #[tokio::test]
    async fn skills_search_requires_at_least_one_skill() {
        let control = LinkedinControlPlane::new(MemoryApi::new(MemoryData::new()));
        let err = control
            .search_people_by_skills(&SkillSearchRequest {
                skills: vec!["  ".to_string()],
                limit: 5,
                ..SkillSearchRequest::default()
            })
            .await
            .expect_err("empty skills should fail");
        assert!(matches!(err, ControlError::InvalidInput(_)));
    }
}
