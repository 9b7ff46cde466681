//! Prospecting workflows built from several upstream lookups.

use chrono::{Datelike, NaiveDate, Utc};
use linkedin_models::schema::{PLACEHOLDER_NO_DESCRIPTION, PLACEHOLDER_UNKNOWN, company_url, profile_url};
use linkedin_models::{Company, Profile, YearMonth};
use serde::Serialize;
use tracing::{debug, warn};

use super::format::{contains_ci, count_or_unknown, preview, truncate_with_ellipsis};
use super::records::{ContactSummary, PersonSummary, company_country, company_industry, company_name};
use super::{ControlError, LinkedinControlPlane};
use crate::api::{CompanyQuery, JobQuery, LinkedinApi, PeopleQuery};

/// Titles searched when the caller gives none.
pub const DEFAULT_DECISION_TITLES: &[&str] =
    &["CEO", "CTO", "CIO", "Director", "VP", "Head", "Manager"];

const LEAD_CONTACT_TITLES: &[&str] = &["CTO", "CIO"];
const LEAD_CONTACTS_PER_TITLE: usize = 2;
const LEAD_CONTACTS_MAX: usize = 2;
const TARGET_CONTACT_TITLES: &[&str] = &["CTO", "CIO"];
const DEFAULT_LEAD_INDUSTRY: &str = "Information Technology";
const UPDATES_FOR_FIT: usize = 5;
const TARGET_DESCRIPTION_CHARS: usize = 200;
const ACTIVITY_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct LeadRequest {
    pub industry: Option<String>,
    /// `small`, `medium` or `large`; anything else means no size filter.
    pub company_size: Option<String>,
    pub technologies: Vec<String>,
    pub location: Option<String>,
    pub limit: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TargetAccountRequest {
    pub industry: String,
    pub keywords: Vec<String>,
    pub location: Option<String>,
    pub min_size: Option<u64>,
    pub max_size: Option<u64>,
    pub technology_interests: Vec<String>,
    pub limit: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TechnologyRequest {
    pub technologies: Vec<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub limit: usize,
}

#[derive(Debug, Clone)]
pub struct JobChangeRequest {
    pub industry: Option<String>,
    pub title_keywords: Vec<String>,
    pub location: Option<String>,
    pub limit: usize,
    pub window_months: u32,
}

impl Default for JobChangeRequest {
    fn default() -> Self {
        Self {
            industry: None,
            title_keywords: Vec::new(),
            location: None,
            limit: 10,
            window_months: 6,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LeadRecommendation {
    pub company_id: String,
    pub company_name: String,
    pub industry: String,
    pub location: String,
    #[serde(serialize_with = "count_or_unknown")]
    pub size: Option<u64>,
    pub technology_fit: String,
    pub decision_makers: Vec<ContactSummary>,
    pub company_url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TargetAccount {
    pub company_id: String,
    pub company_name: String,
    pub industry: String,
    pub location: String,
    #[serde(serialize_with = "count_or_unknown")]
    pub size: Option<u64>,
    pub description: String,
    pub tech_score: usize,
    pub tech_mentions: Vec<String>,
    pub decision_makers: Vec<ContactSummary>,
    pub company_url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TechnologyCompany {
    pub id: Option<String>,
    pub name: String,
    pub industry: String,
    pub location: String,
    #[serde(serialize_with = "count_or_unknown")]
    pub size: Option<u64>,
    pub technologies_mentioned: Vec<String>,
    pub url: String,
    /// Set on entries discovered through job postings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecentJobChange {
    pub id: String,
    pub name: String,
    pub current_title: String,
    pub current_company: String,
    pub previous_company: String,
    pub location: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OutreachProspect {
    pub name: String,
    pub title: String,
    pub company: String,
    pub headline: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OutreachCompany {
    pub id: String,
    pub name: String,
    #[serde(serialize_with = "count_or_unknown")]
    pub size: Option<u64>,
    pub industry: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EducationBrief {
    pub school: String,
    pub degree: String,
    pub field: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExperienceBrief {
    pub company: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PersonalizationPoint {
    #[serde(rename = "type")]
    pub kind: String,
    pub context: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OutreachContext {
    pub prospect: OutreachProspect,
    /// `None` when the current employer could not be resolved.
    pub company_details: Option<OutreachCompany>,
    pub top_skills: Vec<String>,
    pub education_background: Vec<EducationBrief>,
    pub experience_summary: Vec<ExperienceBrief>,
    pub recent_activity: Vec<Activity>,
    pub common_connections: Vec<String>,
    pub personalization_points: Vec<PersonalizationPoint>,
    pub conversation_starters: Vec<String>,
}

/// Inclusive staff-count bounds for a size label.
#[must_use]
pub fn size_range(label: &str) -> Option<(u64, u64)> {
    match label.trim().to_lowercase().as_str() {
        "small" => Some((1, 50)),
        "medium" => Some((51, 500)),
        "large" => Some((501, u64::MAX)),
        _ => None,
    }
}

/// True when `start` lies no more than `window_months` before `today`.
/// A missing month counts as January.
#[must_use]
pub fn is_recent_start(start: YearMonth, today: NaiveDate, window_months: u32) -> bool {
    let start_month = i64::from(start.month.unwrap_or(1).clamp(1, 12));
    let elapsed = (i64::from(today.year()) - i64::from(start.year)) * 12
        + (i64::from(today.month()) - start_month);
    elapsed <= i64::from(window_months)
}

impl<A: LinkedinApi> LinkedinControlPlane<A> {
    /// Senior people at a company, one search per title. Blank titles are
    /// ignored; with none left the default decision-maker titles are used.
    ///
    /// # Errors
    /// Returns `ControlError::NotFound` if the company has no name, or
    /// `ControlError::Api` if a lookup fails.
    pub async fn find_decision_makers(
        &self,
        company_id: &str,
        titles: &[String],
        limit: usize,
    ) -> Result<Vec<PersonSummary>, ControlError> {
        let company = self.api().get_company(company_id).await?;
        let company_name = company
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| {
                ControlError::NotFound(format!("could not find company name for {company_id}"))
            })?;

        let mut titles: Vec<&str> = titles
            .iter()
            .map(|title| title.trim())
            .filter(|title| !title.is_empty())
            .collect();
        if titles.is_empty() {
            titles = DEFAULT_DECISION_TITLES.to_vec();
        }
        let per_title = (limit / titles.len()).saturating_add(1);

        let mut people = Vec::new();
        for title in titles {
            let query = PeopleQuery::new(per_title)
                .with_company_name(Some(&company_name))
                .with_title(Some(title));
            people.extend(self.api().search_people(&query).await?);
            if people.len() >= limit {
                break;
            }
        }

        Ok(people
            .iter()
            .take(limit)
            .map(|person| PersonSummary::from_hit(person, &company_name))
            .collect())
    }

    /// Companies worth approaching, each with a technology fit and contacts.
    ///
    /// # Errors
    /// Returns `ControlError::Api` if the company search fails.
    pub async fn generate_lead_recommendations(
        &self,
        request: &LeadRequest,
    ) -> Result<Vec<LeadRecommendation>, ControlError> {
        let industry = request
            .industry
            .as_deref()
            .map(str::trim)
            .filter(|industry| !industry.is_empty())
            .unwrap_or(DEFAULT_LEAD_INDUSTRY);
        let query = CompanyQuery::new(request.limit.saturating_mul(2))
            .with_keywords(Some(industry))
            .with_location(request.location.as_deref());
        let companies = self.api().search_companies(&query).await?;

        let range = request.company_size.as_deref().and_then(size_range);
        let candidates = companies
            .iter()
            .filter(|company| {
                range.is_none_or(|(min, max)| {
                    let staff = company.staff_count.unwrap_or(0);
                    (min..=max).contains(&staff)
                })
            })
            .take(request.limit);

        let mut leads = Vec::new();
        for company in candidates {
            let name = company_name(company);
            let technology_fit = self
                .technology_fit(company, &request.technologies)
                .await;
            let decision_makers = self
                .lead_contacts(company, LEAD_CONTACT_TITLES, LEAD_CONTACTS_PER_TITLE, LEAD_CONTACTS_MAX)
                .await;

            leads.push(LeadRecommendation {
                company_id: company.id().to_string(),
                company_name: name,
                industry: company_industry(company),
                location: company_country(company),
                size: company.staff_count,
                technology_fit,
                decision_makers,
                company_url: company_url(company.id()),
            });
        }
        debug!(industry, count = leads.len(), "generated lead recommendations");
        Ok(leads)
    }

    /// Companies matching size, keyword and technology criteria.
    ///
    /// # Errors
    /// Returns `ControlError::Api` if the company search fails.
    pub async fn identify_target_accounts(
        &self,
        request: &TargetAccountRequest,
    ) -> Result<Vec<TargetAccount>, ControlError> {
        let query = CompanyQuery::new(request.limit.saturating_mul(3))
            .with_keywords(Some(&request.industry))
            .with_location(request.location.as_deref());
        let companies = self.api().search_companies(&query).await?;

        let mut matched: Vec<&Company> = Vec::new();
        for company in &companies {
            if matched.len() >= request.limit {
                break;
            }
            let staff = company.staff_count.unwrap_or(0);
            if request.min_size.is_some_and(|min| staff < min)
                || request.max_size.is_some_and(|max| staff > max)
            {
                continue;
            }
            if !request.keywords.is_empty() {
                let description = company.description.as_deref().unwrap_or_default();
                if !request
                    .keywords
                    .iter()
                    .any(|keyword| contains_ci(description, keyword))
                {
                    continue;
                }
            }
            matched.push(company);
        }

        let mut accounts = Vec::new();
        for company in matched {
            let description = company.description.as_deref().map_or_else(
                || PLACEHOLDER_NO_DESCRIPTION.to_string(),
                |text| truncate_with_ellipsis(text, TARGET_DESCRIPTION_CHARS),
            );
            let tech_mentions: Vec<String> = request
                .technology_interests
                .iter()
                .filter(|tech| contains_ci(&description, tech))
                .cloned()
                .collect();
            let decision_makers = self
                .lead_contacts(company, TARGET_CONTACT_TITLES, 1, usize::MAX)
                .await;

            accounts.push(TargetAccount {
                company_id: company.id().to_string(),
                company_name: company_name(company),
                industry: company_industry(company),
                location: company_country(company),
                size: company.staff_count,
                description,
                tech_score: tech_mentions.len(),
                tech_mentions,
                decision_makers,
                company_url: company_url(company.id()),
            });
        }
        Ok(accounts)
    }

    /// Companies whose descriptions mention any of the technologies, topped up
    /// from the hiring companies of matching job postings.
    ///
    /// # Errors
    /// Returns `ControlError::InvalidInput` when no technology is given, or
    /// `ControlError::Api` if a search fails.
    pub async fn find_companies_using_technologies(
        &self,
        request: &TechnologyRequest,
    ) -> Result<Vec<TechnologyCompany>, ControlError> {
        let technologies: Vec<&str> = request
            .technologies
            .iter()
            .map(|tech| tech.trim())
            .filter(|tech| !tech.is_empty())
            .collect();
        if technologies.is_empty() {
            return Err(ControlError::InvalidInput(
                "at least one technology is required".to_string(),
            ));
        }

        let keywords = technologies
            .iter()
            .take(2)
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        let query = CompanyQuery::new(request.limit.saturating_mul(3))
            .with_keywords(Some(&keywords))
            .with_industry(request.industry.as_deref())
            .with_location(request.location.as_deref());
        let companies = self.api().search_companies(&query).await?;

        let mut results = Vec::new();
        for company in &companies {
            if results.len() >= request.limit {
                break;
            }
            let description = company.description.as_deref().unwrap_or_default();
            let mentioned: Vec<String> = technologies
                .iter()
                .filter(|tech| contains_ci(description, tech))
                .map(|tech| (*tech).to_string())
                .collect();
            if mentioned.is_empty() {
                continue;
            }
            results.push(TechnologyCompany {
                id: Some(company.id().to_string()),
                name: company_name(company),
                industry: company_industry(company),
                location: company_country(company),
                size: company.staff_count,
                technologies_mentioned: mentioned,
                url: company_url(company.id()),
                source: None,
            });
        }

        if results.len() < request.limit {
            let remaining = request.limit - results.len();
            for tech in &technologies {
                if results.len() >= request.limit {
                    break;
                }
                let query = JobQuery::new(remaining.saturating_mul(2)).with_keywords(Some(*tech));
                let hits = self.api().search_jobs(&query).await?;
                for hit in &hits {
                    if results.len() >= request.limit {
                        break;
                    }
                    let job = match self.api().get_job(hit.job_id()).await {
                        Ok(job) => job,
                        Err(err) => {
                            warn!(job_id = hit.job_id(), error = %err, "skipping job posting");
                            continue;
                        }
                    };
                    let company_id = job.company_id().map(str::to_string);
                    if results.iter().any(|known| known.id == company_id) {
                        continue;
                    }
                    results.push(TechnologyCompany {
                        url: company_id
                            .as_deref()
                            .map_or_else(|| "#".to_string(), company_url),
                        id: company_id,
                        name: job
                            .company_name
                            .unwrap_or_else(|| PLACEHOLDER_UNKNOWN.to_string()),
                        industry: PLACEHOLDER_UNKNOWN.to_string(),
                        location: PLACEHOLDER_UNKNOWN.to_string(),
                        size: None,
                        technologies_mentioned: vec![(*tech).to_string()],
                        source: Some("Job Posting".to_string()),
                    });
                }
            }
        }
        Ok(results)
    }

    /// People who moved to a new employer within the request window.
    ///
    /// # Errors
    /// Returns `ControlError::Api` if the people search fails.
    pub async fn find_recent_job_changes(
        &self,
        request: &JobChangeRequest,
    ) -> Result<Vec<RecentJobChange>, ControlError> {
        self.find_recent_job_changes_as_of(request, Utc::now().date_naive())
            .await
    }

    /// `find_recent_job_changes` measured from a fixed date.
    ///
    /// # Errors
    /// Returns `ControlError::Api` if the people search fails.
    pub async fn find_recent_job_changes_as_of(
        &self,
        request: &JobChangeRequest,
        today: NaiveDate,
    ) -> Result<Vec<RecentJobChange>, ControlError> {
        let title_keywords: Vec<&str> = request
            .title_keywords
            .iter()
            .map(|keyword| keyword.trim())
            .filter(|keyword| !keyword.is_empty())
            .collect();
        let query = PeopleQuery::new(request.limit.saturating_mul(3))
            .with_industry(request.industry.as_deref())
            .with_location_name(request.location.as_deref())
            .with_title(title_keywords.first().copied());
        let people = self.api().search_people(&query).await?;

        let mut changes = Vec::new();
        for person in &people {
            if changes.len() >= request.limit {
                break;
            }
            let profile = match self.api().get_profile(&person.public_id).await {
                Ok(profile) => profile,
                Err(err) => {
                    warn!(profile_id = %person.public_id, error = %err, "skipping person, profile unavailable");
                    continue;
                }
            };
            let [current, previous, ..] = profile.experience.as_slice() else {
                continue;
            };
            if current.company_name.to_lowercase() == previous.company_name.to_lowercase() {
                continue;
            }
            if !title_keywords.is_empty()
                && !title_keywords
                    .iter()
                    .any(|keyword| contains_ci(&current.title, keyword))
            {
                continue;
            }
            let Some(start) = current.start() else {
                continue;
            };
            if !is_recent_start(start, today, request.window_months) {
                continue;
            }

            changes.push(RecentJobChange {
                id: person.public_id.clone(),
                name: profile.full_name(),
                current_title: current.title.clone(),
                current_company: current.company_name.clone(),
                previous_company: previous.company_name.clone(),
                location: profile.location_name.clone(),
                url: profile_url(&person.public_id),
            });
        }
        Ok(changes)
    }

    /// Talking points for a first message to a prospect.
    ///
    /// # Errors
    /// Returns `ControlError::Api` if the profile or its skills cannot be fetched.
    pub async fn generate_sales_outreach_context(
        &self,
        profile_id: &str,
        company_service: &str,
    ) -> Result<OutreachContext, ControlError> {
        let profile = self.api().get_profile(profile_id).await?;
        let skills = self.api().get_profile_skills(profile_id).await?;

        let (title, company) = profile
            .current_position()
            .map(|exp| (exp.title.clone(), exp.company_name.clone()))
            .unwrap_or_default();

        let company_details = if company.is_empty() {
            None
        } else {
            self.outreach_company(&company).await
        };

        let recent_activity = match self.api().get_profile_posts(profile_id, 3).await {
            Ok(posts) => posts
                .iter()
                .map(|post| Activity {
                    kind: "post".to_string(),
                    content: preview(&post.content, ACTIVITY_PREVIEW_CHARS),
                })
                .collect(),
            Err(err) => {
                warn!(profile_id, error = %err, "recent activity unavailable");
                Vec::new()
            }
        };

        let skill_names: Vec<String> = skills.into_iter().map(|skill| skill.name).collect();
        let top_skills: Vec<String> = skill_names.iter().take(5).cloned().collect();
        let personalization_points =
            personalization_points(&profile, &title, &company, &skill_names, company_service);
        let conversation_starters =
            conversation_starters(&profile, &title, &company, &skill_names, company_service);

        Ok(OutreachContext {
            prospect: OutreachProspect {
                name: profile.full_name(),
                title,
                company,
                headline: profile.headline.clone(),
                url: profile_url(profile_id),
            },
            company_details,
            top_skills,
            education_background: profile
                .education
                .iter()
                .map(|edu| EducationBrief {
                    school: edu.school_name.clone(),
                    degree: edu.degree_name.clone(),
                    field: edu.field_of_study.clone(),
                })
                .collect(),
            experience_summary: profile
                .experience
                .iter()
                .take(3)
                .map(|exp| ExperienceBrief {
                    company: exp.company_name.clone(),
                    title: exp.title.clone(),
                })
                .collect(),
            recent_activity,
            common_connections: Vec::new(),
            personalization_points,
            conversation_starters,
        })
    }

    /// Grades how well a company matches the technologies of interest.
    /// Lookup failures degrade to `"Unknown"`.
    async fn technology_fit(&self, company: &Company, technologies: &[String]) -> String {
        let technologies: Vec<&str> = technologies
            .iter()
            .map(|tech| tech.trim())
            .filter(|tech| !tech.is_empty())
            .collect();
        if technologies.is_empty() {
            return PLACEHOLDER_UNKNOWN.to_string();
        }

        let updates = match self
            .api()
            .get_company_updates(company.id(), UPDATES_FOR_FIT)
            .await
        {
            Ok(updates) => updates,
            Err(err) => {
                warn!(company_id = company.id(), error = %err, "technology fit unavailable");
                return PLACEHOLDER_UNKNOWN.to_string();
            }
        };
        let mut mentioned: Vec<&str> = Vec::new();
        for update in &updates {
            let content = update.content.as_deref().unwrap_or_default();
            for tech in &technologies {
                if contains_ci(content, tech) && !mentioned.contains(tech) {
                    mentioned.push(*tech);
                }
            }
        }
        if !mentioned.is_empty() {
            return format!("High - Mentioned in company updates: {}", mentioned.join(", "));
        }

        let query = JobQuery::new(5)
            .with_keywords(Some(&technologies.join(" ")))
            .with_company_name(company.name.as_deref());
        match self.api().search_jobs(&query).await {
            Ok(hits) if !hits.is_empty() => {
                "Medium - Company has job postings with relevant technologies".to_string()
            }
            Ok(_) => "Low - No direct mentions found".to_string(),
            Err(err) => {
                warn!(company_id = company.id(), error = %err, "technology fit unavailable");
                PLACEHOLDER_UNKNOWN.to_string()
            }
        }
    }

    /// Contacts at a company, one people search per title.
    /// A failed search ends the loop and keeps what was found so far.
    async fn lead_contacts(
        &self,
        company: &Company,
        titles: &[&str],
        per_title: usize,
        max: usize,
    ) -> Vec<ContactSummary> {
        let Some(name) = company.name.as_deref().filter(|name| !name.trim().is_empty()) else {
            return Vec::new();
        };

        let mut contacts = Vec::new();
        for title in titles {
            if contacts.len() >= max {
                break;
            }
            let query = PeopleQuery::new(per_title)
                .with_company_name(Some(name))
                .with_title(Some(*title));
            match self.api().search_people(&query).await {
                Ok(people) => {
                    let room = max - contacts.len();
                    contacts.extend(people.iter().take(room).map(ContactSummary::from_hit));
                }
                Err(err) => {
                    warn!(company_id = company.id(), error = %err, "stopping contact search");
                    break;
                }
            }
        }
        contacts
    }

    async fn outreach_company(&self, employer: &str) -> Option<OutreachCompany> {
        let query = CompanyQuery::new(1).with_keywords(Some(employer));
        match self.api().search_companies(&query).await {
            Ok(companies) => companies.first().map(|company| OutreachCompany {
                id: company.id().to_string(),
                name: employer.to_string(),
                size: company.staff_count,
                industry: company_industry(company),
            }),
            Err(err) => {
                warn!(company = employer, error = %err, "company details unavailable");
                None
            }
        }
    }
}

fn service_related_skills(skills: &[String], company_service: &str) -> Vec<String> {
    let words: Vec<String> = company_service
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    let mut related: Vec<String> = Vec::new();
    for skill in skills {
        let lowered = skill.to_lowercase();
        if words.iter().any(|word| lowered.contains(word.as_str())) && !related.contains(skill) {
            related.push(skill.clone());
        }
    }
    related
}

fn personalization_points(
    profile: &Profile,
    title: &str,
    company: &str,
    skills: &[String],
    company_service: &str,
) -> Vec<PersonalizationPoint> {
    let mut points = Vec::new();
    if !title.is_empty() {
        points.push(PersonalizationPoint {
            kind: "role".to_string(),
            context: format!("Current role as {title} at {company}"),
        });
    }

    let related = service_related_skills(skills, company_service);
    if !related.is_empty() {
        points.push(PersonalizationPoint {
            kind: "skills".to_string(),
            context: format!("Skills related to your services: {}", related.join(", ")),
        });
    }

    if let Some(edu) = profile.education.first()
        && !edu.school_name.is_empty()
    {
        points.push(PersonalizationPoint {
            kind: "education".to_string(),
            context: format!(
                "Educational background: {} in {} from {}",
                edu.degree_name, edu.field_of_study, edu.school_name
            ),
        });
    }

    if profile.experience.len() >= 2 {
        let progression = profile
            .experience
            .iter()
            .take(3)
            .map(|exp| format!("{} at {}", exp.title, exp.company_name))
            .collect::<Vec<_>>()
            .join(" → ");
        points.push(PersonalizationPoint {
            kind: "career".to_string(),
            context: format!("Career progression: {progression}"),
        });
    }
    points
}

fn conversation_starters(
    profile: &Profile,
    title: &str,
    company: &str,
    skills: &[String],
    company_service: &str,
) -> Vec<String> {
    let leading = skills.iter().take(2).cloned().collect::<Vec<_>>().join(", ");
    let mut starters = vec![
        format!("I noticed you've been at {company} as {title}. How has your experience been so far?"),
        format!("I saw you have expertise in {leading}. What projects are you currently focused on?"),
    ];
    if let Some(skill) = service_related_skills(skills, company_service).first() {
        starters.push(format!(
            "Your experience with {skill} caught my attention. Have you been working on any initiatives related to this recently?"
        ));
    }
    if let Some(edu) = profile.education.first() {
        starters.push(format!(
            "I see we share an interest in {}. What drew you to that field?",
            edu.field_of_study
        ));
    }
    starters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, 1).expect("valid date")
    }

    #[test]
    fn size_buckets_are_inclusive() {
        assert_eq!(size_range("small"), Some((1, 50)));
        assert_eq!(size_range("Medium"), Some((51, 500)));
        assert_eq!(size_range("large").map(|(min, _)| min), Some(501));
        assert_eq!(size_range("enterprise"), None);
    }

    #[test]
    fn recent_window_is_relative_to_today() {
        let today = date(2026, 10);
        assert!(is_recent_start(YearMonth { year: 2026, month: Some(4) }, today, 6));
        assert!(!is_recent_start(YearMonth { year: 2026, month: Some(3) }, today, 6));
        assert!(is_recent_start(YearMonth { year: 2026, month: None }, date(2026, 7), 6));
        assert!(!is_recent_start(YearMonth { year: 2025, month: None }, today, 6));
    }

    #[test]
    fn outreach_helpers_follow_profile_content() {
        let profile = Profile {
            education: vec![linkedin_models::Education {
                school_name: "MIT".to_string(),
                field_of_study: "Computer Science".to_string(),
                ..Default::default()
            }],
            experience: vec![
                linkedin_models::Experience {
                    company_name: "Acme".to_string(),
                    title: "CTO".to_string(),
                    ..Default::default()
                },
                linkedin_models::Experience {
                    company_name: "Initech".to_string(),
                    title: "Engineer".to_string(),
                    ..Default::default()
                },
            ],
            ..Profile::default()
        };
        let skills = vec!["Cloud Computing".to_string(), "Rust".to_string()];

        let points = personalization_points(&profile, "CTO", "Acme", &skills, "cloud migration");
        let kinds: Vec<&str> = points.iter().map(|point| point.kind.as_str()).collect();
        assert_eq!(kinds, vec!["role", "skills", "education", "career"]);
        assert_eq!(points[1].context, "Skills related to your services: Cloud Computing");
        assert_eq!(points[2].context, "Educational background:  in Computer Science from MIT");
        assert_eq!(
            points[3].context,
            "Career progression: CTO at Acme → Engineer at Initech"
        );

        let starters = conversation_starters(&profile, "CTO", "Acme", &skills, "cloud migration");
        assert_eq!(starters.len(), 4);
        assert!(starters[1].contains("Cloud Computing, Rust"));
        assert!(starters[3].contains("Computer Science"));
    }
}
