//! Voyager (internal web API) client.
//!
//! Authentication is lazy: the first remote call logs in with the configured
//! credentials and every later call on the same client reuses the session's
//! CSRF token. Response parsing is defensive; missing keys become empty values
//! rather than errors.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use linkedin_models::schema::{
    AUTH_URL,
    DECORATION_FULL_COMPANY,
    DECORATION_JOB_POSTING,
    DECORATION_JOB_SEARCH_HIT,
    TYPE_COMPACT_JOB_COMPANY,
    TYPE_JOB_POSTING,
    TYPE_UPDATE_V2,
    VOYAGER_API_BASE,
    id_from_urn,
};
use linkedin_models::{
    Company,
    CompanyUpdate,
    Education,
    Experience,
    FeedPost,
    Headquarter,
    JobHit,
    JobPosting,
    PersonHit,
    Profile,
    ProfilePost,
    Skill,
    TimePeriod,
    YearMonth,
};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::{ApiError, CompanyQuery, JobQuery, LinkedinApi, PeopleQuery};

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const ACCEPT_JSON: &str = "application/json";
const ACCEPT_NORMALIZED: &str = "application/vnd.linkedin.normalized+json+2.1";
const MAX_SEARCH_PAGE: usize = 49;
const MAX_SKILLS: usize = 100;

/// Login identity for the platform.
#[derive(Debug)]
pub struct VoyagerCredentials {
    pub email: String,
    pub password: SecretString,
}

impl VoyagerCredentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }
}

/// HTTP settings for the Voyager client.
#[derive(Debug, Clone)]
pub struct VoyagerConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl VoyagerConfig {
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for VoyagerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

struct Session {
    csrf_token: String,
}

pub struct VoyagerClient {
    http: Client,
    credentials: Arc<VoyagerCredentials>,
    session: OnceCell<Session>,
}

impl VoyagerClient {
    /// Builds a client. No network traffic happens until the first call.
    ///
    /// # Errors
    /// Returns `ApiError::Unavailable` if the HTTP client cannot be constructed.
    pub fn new(credentials: Arc<VoyagerCredentials>, config: &VoyagerConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(transport_err)?;
        Ok(Self {
            http,
            credentials,
            session: OnceCell::new(),
        })
    }

    async fn session(&self) -> Result<&Session, ApiError> {
        self.session.get_or_try_init(|| self.authenticate()).await
    }

    async fn authenticate(&self) -> Result<Session, ApiError> {
        info!(email = %self.credentials.email, "authenticating against voyager");

        let bootstrap = self.http.get(AUTH_URL).send().await.map_err(transport_err)?;
        let jsessionid = bootstrap
            .cookies()
            .find(|cookie| cookie.name() == "JSESSIONID")
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| ApiError::Auth("login page did not set JSESSIONID".to_string()))?;

        let form = [
            ("session_key", self.credentials.email.as_str()),
            ("session_password", self.credentials.password.expose_secret()),
            ("JSESSIONID", jsessionid.as_str()),
        ];
        let response = self
            .http
            .post(AUTH_URL)
            .form(&form)
            .send()
            .await
            .map_err(transport_err)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Auth("credentials rejected".to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::Unavailable(format!("login returned {status}")));
        }

        let body: Value = response.json().await.map_err(malformed_err)?;
        match body.get("login_result").and_then(Value::as_str) {
            Some("PASS") => {
                debug!("voyager session established");
                Ok(Session {
                    csrf_token: jsessionid.trim_matches('"').to_string(),
                })
            }
            Some(other) => Err(ApiError::Auth(other.to_string())),
            None => Err(ApiError::Malformed("login response lacks login_result".to_string())),
        }
    }

    async fn fetch(&self, path: &str, accept: &str) -> Result<Value, ApiError> {
        let session = self.session().await?;
        let url = format!("{VOYAGER_API_BASE}{path}");
        debug!(%url, "voyager request");

        let response = self
            .http
            .get(&url)
            .header("csrf-token", session.csrf_token.as_str())
            .header("accept", accept)
            .header("x-restli-protocol-version", "2.0.0")
            .header("x-li-lang", "en_US")
            .send()
            .await
            .map_err(transport_err)?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ApiError::Auth(format!("{path} returned {status}")));
            }
            StatusCode::NOT_FOUND => return Err(ApiError::NotFound(path.to_string())),
            _ if !status.is_success() => {
                return Err(ApiError::Unavailable(format!("{path} returned {status}")));
            }
            _ => {}
        }

        response.json().await.map_err(malformed_err)
    }

    /// Fetches pages of at most `MAX_SEARCH_PAGE` results until `limit` items
    /// are collected or a page comes back empty.
    async fn paged<T>(
        &self,
        path: impl Fn(usize, usize) -> String + Send + Sync,
        limit: usize,
        offset: usize,
        parse: fn(&Value) -> Vec<T>,
    ) -> Result<Vec<T>, ApiError>
    where
        T: Send,
    {
        let mut results = Vec::new();
        let mut start = offset;
        while results.len() < limit {
            let count = (limit - results.len()).min(MAX_SEARCH_PAGE);
            let page = self.fetch(&path(count, start), ACCEPT_NORMALIZED).await?;
            let items = parse(&page);
            if items.is_empty() {
                break;
            }
            start += items.len();
            results.extend(items);
        }
        results.truncate(limit);
        Ok(results)
    }
}

#[async_trait]
impl LinkedinApi for VoyagerClient {
    async fn get_profile(&self, public_id: &str) -> Result<Profile, ApiError> {
        let path = format!("/identity/profiles/{}/profileView", encode(public_id));
        let data = self.fetch(&path, ACCEPT_JSON).await?;
        parse_profile_view(public_id, &data)
    }

    async fn get_profile_skills(&self, public_id: &str) -> Result<Vec<Skill>, ApiError> {
        let path = format!(
            "/identity/profiles/{}/skills?count={MAX_SKILLS}&start=0",
            encode(public_id)
        );
        let data = self.fetch(&path, ACCEPT_JSON).await?;
        Ok(parse_skills(&data))
    }

    async fn get_profile_posts(
        &self,
        public_id: &str,
        limit: usize,
    ) -> Result<Vec<ProfilePost>, ApiError> {
        let profile = self.get_profile(public_id).await?;
        if profile.urn_id.is_empty() {
            return Err(ApiError::Malformed(format!("profile {public_id} has no urn")));
        }
        let path = format!(
            "/identity/profileUpdatesV2?count={limit}&includeLongTermHistory=true&moduleKey=member-shares:phone&numComments=0&profileUrn=urn:li:fsd_profile:{}&q=memberShareFeed&start=0",
            profile.urn_id
        );
        let data = self.fetch(&path, ACCEPT_JSON).await?;
        let mut posts = parse_profile_posts(&data);
        posts.truncate(limit);
        Ok(posts)
    }

    async fn get_company(&self, company_id: &str) -> Result<Company, ApiError> {
        let path = format!(
            "/organization/companies?decorationId={DECORATION_FULL_COMPANY}&q=universalName&universalName={}",
            encode(company_id)
        );
        let data = self.fetch(&path, ACCEPT_JSON).await?;
        parse_company(&data).ok_or_else(|| ApiError::NotFound(format!("company {company_id}")))
    }

    async fn get_company_updates(
        &self,
        company_id: &str,
        limit: usize,
    ) -> Result<Vec<CompanyUpdate>, ApiError> {
        let path = format!(
            "/feed/updates?companyUniversalName={}&q=companyFeedByUniversalName&moduleKey=member-share&count={limit}&start=0",
            encode(company_id)
        );
        let data = self.fetch(&path, ACCEPT_JSON).await?;
        let mut updates = parse_company_updates(&data);
        updates.truncate(limit);
        Ok(updates)
    }

    async fn get_job(&self, job_id: &str) -> Result<JobPosting, ApiError> {
        let path = format!(
            "/jobs/jobPostings/{}?decorationId={DECORATION_JOB_POSTING}",
            encode(job_id)
        );
        let data = self.fetch(&path, ACCEPT_JSON).await?;
        Ok(parse_job_posting(job_id, &data))
    }

    async fn get_feed_posts(&self, limit: usize, offset: usize) -> Result<Vec<FeedPost>, ApiError> {
        self.paged(
            |count, start| format!("/feed/updatesV2?count={count}&q=chronFeed&start={start}"),
            limit,
            offset,
            parse_feed_posts,
        )
        .await
    }

    async fn search_people(&self, query: &PeopleQuery) -> Result<Vec<PersonHit>, ApiError> {
        let filters = filter_list(&[
            ("resultType", Some("PEOPLE")),
            ("title", query.title.as_deref()),
            ("company", query.company_name.as_deref()),
            ("school", query.school_name.as_deref()),
            ("industry", query.industry.as_deref()),
            ("geoRegion", query.location_name.as_deref()),
        ]);
        let keywords = keywords_param(query.keywords.as_deref());
        self.paged(
            |count, start| blended_search_path(&filters, &keywords, count, start),
            query.limit,
            0,
            parse_people_hits,
        )
        .await
    }

    async fn search_companies(&self, query: &CompanyQuery) -> Result<Vec<Company>, ApiError> {
        let filters = filter_list(&[
            ("resultType", Some("COMPANIES")),
            ("industry", query.industry.as_deref()),
            ("geoRegion", query.location.as_deref()),
        ]);
        let keywords = keywords_param(query.keywords.as_deref());
        self.paged(
            |count, start| blended_search_path(&filters, &keywords, count, start),
            query.limit,
            0,
            parse_company_hits,
        )
        .await
    }

    async fn search_jobs(&self, query: &JobQuery) -> Result<Vec<JobHit>, ApiError> {
        let filters = filter_list(&[
            ("resultType", Some("JOBS")),
            ("locationFallback", query.location_name.as_deref()),
            ("company", query.company_name.as_deref()),
        ]);
        let keywords = keywords_param(query.keywords.as_deref());
        self.paged(
            |count, start| {
                format!(
                    "/search/hits?decorationId={DECORATION_JOB_SEARCH_HIT}&count={count}&filters=List({filters})&origin=JOB_SEARCH_PAGE_QUERY_EXPANSION&q=jserpFilters&queryContext=List(primaryHitType->JOBS,spellCorrectionEnabled->true)&start={start}{keywords}"
                )
            },
            query.limit,
            query.offset,
            parse_job_hits,
        )
        .await
    }
}

fn transport_err(err: reqwest::Error) -> ApiError {
    ApiError::Unavailable(err.to_string())
}

fn malformed_err(err: reqwest::Error) -> ApiError {
    ApiError::Malformed(err.to_string())
}

fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn filter_list(filters: &[(&str, Option<&str>)]) -> String {
    filters
        .iter()
        .filter_map(|(name, value)| value.map(|value| format!("{name}->{}", encode(value))))
        .collect::<Vec<_>>()
        .join(",")
}

fn keywords_param(keywords: Option<&str>) -> String {
    keywords.map_or_else(String::new, |keywords| format!("&keywords={}", encode(keywords)))
}

fn blended_search_path(filters: &str, keywords: &str, count: usize, start: usize) -> String {
    format!(
        "/search/blended?count={count}&filters=List({filters})&origin=GLOBAL_SEARCH_HEADER&q=all&start={start}&queryContext=List(spellCorrectionEnabled->true){keywords}"
    )
}

fn str_at(value: &Value, pointer: &str) -> String {
    opt_str_at(value, pointer).unwrap_or_default()
}

fn opt_str_at(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Reads a text field that is either a bare string or an object with `text`.
fn text_at(value: &Value, pointer: &str) -> Option<String> {
    match value.pointer(pointer)? {
        Value::String(text) => Some(text.clone()),
        Value::Object(map) => map.get("text").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

fn array_at<'a>(value: &'a Value, pointer: &str) -> &'a [Value] {
    value
        .pointer(pointer)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn year_month(value: Option<&Value>) -> Option<YearMonth> {
    let value = value?;
    let year = value.get("year").and_then(Value::as_i64)?;
    let month = value
        .get("month")
        .and_then(Value::as_u64)
        .and_then(|month| u32::try_from(month).ok());
    Some(YearMonth {
        year: i32::try_from(year).ok()?,
        month,
    })
}

fn time_period(value: &Value) -> Option<TimePeriod> {
    let period = value.get("timePeriod")?;
    Some(TimePeriod {
        start_date: year_month(period.get("startDate")),
        end_date: year_month(period.get("endDate")),
    })
}

fn parse_profile_view(public_id: &str, data: &Value) -> Result<Profile, ApiError> {
    let profile = data
        .get("profile")
        .filter(|profile| profile.is_object())
        .ok_or_else(|| ApiError::Malformed(format!("profile view for {public_id} lacks profile")))?;

    let urn = opt_str_at(profile, "/miniProfile/entityUrn")
        .or_else(|| opt_str_at(profile, "/entityUrn"))
        .unwrap_or_default();

    let experience = array_at(data, "/positionView/elements")
        .iter()
        .map(|item| Experience {
            company_name: str_at(item, "/companyName"),
            title: str_at(item, "/title"),
            description: str_at(item, "/description"),
            time_period: time_period(item),
        })
        .collect();

    let education = array_at(data, "/educationView/elements")
        .iter()
        .map(|item| Education {
            school_name: str_at(item, "/schoolName"),
            degree_name: str_at(item, "/degreeName"),
            field_of_study: str_at(item, "/fieldOfStudy"),
            time_period: time_period(item),
        })
        .collect();

    Ok(Profile {
        public_id: public_id.to_string(),
        urn_id: id_from_urn(&urn).to_string(),
        first_name: str_at(profile, "/firstName"),
        last_name: str_at(profile, "/lastName"),
        headline: str_at(profile, "/headline"),
        location_name: str_at(profile, "/locationName"),
        industry_name: str_at(profile, "/industryName"),
        experience,
        education,
    })
}

fn parse_skills(data: &Value) -> Vec<Skill> {
    array_at(data, "/elements")
        .iter()
        .map(|item| Skill {
            name: str_at(item, "/name"),
        })
        .collect()
}

fn parse_company(data: &Value) -> Option<Company> {
    let company = array_at(data, "/elements").first()?;
    let industries = array_at(company, "/companyIndustries")
        .iter()
        .filter_map(|industry| opt_str_at(industry, "/localizedName"))
        .collect();
    let headquarter = company.get("headquarter").map(|hq| Headquarter {
        city: opt_str_at(hq, "/city"),
        country: opt_str_at(hq, "/country"),
    });
    let specialities = array_at(company, "/specialities")
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();

    Some(Company {
        entity_urn: str_at(company, "/entityUrn"),
        universal_name: opt_str_at(company, "/universalName"),
        name: opt_str_at(company, "/name"),
        industries,
        headquarter,
        description: opt_str_at(company, "/description"),
        staff_count: company.get("staffCount").and_then(Value::as_u64),
        founded: company
            .pointer("/foundedOn/year")
            .and_then(Value::as_i64)
            .and_then(|year| i32::try_from(year).ok()),
        specialities,
        website_url: opt_str_at(company, "/companyPageUrl")
            .or_else(|| opt_str_at(company, "/websiteUrl")),
    })
}

fn parse_job_posting(job_id: &str, data: &Value) -> JobPosting {
    let company = format!("/companyDetails/{TYPE_COMPACT_JOB_COMPANY}/companyResolutionResult");
    JobPosting {
        job_id: job_id.to_string(),
        title: str_at(data, "/title"),
        company_name: opt_str_at(data, &format!("{company}/name")),
        company_urn: opt_str_at(data, &format!("{company}/entityUrn")),
        description: text_at(data, "/description").unwrap_or_default(),
        formatted_location: str_at(data, "/formattedLocation"),
    }
}

/// Flattens the clusters of a blended search response.
fn blended_items(data: &Value) -> impl Iterator<Item = &Value> {
    array_at(data, "/data/elements")
        .iter()
        .flat_map(|cluster| array_at(cluster, "/elements").iter())
}

fn parse_people_hits(data: &Value) -> Vec<PersonHit> {
    blended_items(data)
        .filter_map(|item| {
            let public_id = opt_str_at(item, "/publicIdentifier")?;
            let name = text_at(item, "/title").unwrap_or_default();
            let (first_name, last_name) = name
                .split_once(' ')
                .map_or((name.as_str(), ""), |(first, last)| (first, last));
            Some(PersonHit {
                public_id,
                urn_id: id_from_urn(&str_at(item, "/targetUrn")).to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                occupation: text_at(item, "/headline").unwrap_or_default(),
                location_name: text_at(item, "/subline").unwrap_or_default(),
                experience: Vec::new(),
            })
        })
        .collect()
}

fn parse_company_hits(data: &Value) -> Vec<Company> {
    blended_items(data)
        .filter(|item| str_at(item, "/targetUrn").contains("company"))
        .map(|item| {
            let headline = text_at(item, "/headline").unwrap_or_default();
            let mut parts = headline.split(" • ").map(str::trim);
            let industry = parts.next().filter(|part| !part.is_empty());
            let location = parts.next().filter(|part| !part.is_empty());
            Company {
                entity_urn: str_at(item, "/targetUrn"),
                name: text_at(item, "/title"),
                industries: industry.map(str::to_string).into_iter().collect(),
                headquarter: location.map(|location| Headquarter {
                    city: None,
                    country: Some(location.to_string()),
                }),
                description: text_at(item, "/snippetText"),
                ..Company::default()
            }
        })
        .collect()
}

fn included_of_type<'a>(data: &'a Value, type_name: &'a str) -> impl Iterator<Item = &'a Value> {
    array_at(data, "/included")
        .iter()
        .filter(move |item| item.get("$type").and_then(Value::as_str) == Some(type_name))
}

fn parse_job_hits(data: &Value) -> Vec<JobHit> {
    included_of_type(data, TYPE_JOB_POSTING)
        .map(|item| JobHit {
            entity_urn: str_at(item, "/entityUrn"),
            title: opt_str_at(item, "/title"),
        })
        .collect()
}

fn parse_feed_posts(data: &Value) -> Vec<FeedPost> {
    included_of_type(data, TYPE_UPDATE_V2)
        .map(|item| FeedPost {
            author_name: text_at(item, "/actor/name").unwrap_or_default(),
            author_profile: str_at(item, "/actor/navigationContext/actionTarget"),
            content: text_at(item, "/commentary/text").unwrap_or_default(),
            url: str_at(item, "/socialContent/shareUrl"),
        })
        .collect()
}

fn parse_company_updates(data: &Value) -> Vec<CompanyUpdate> {
    let update = format!("/value/{TYPE_UPDATE_V2}");
    array_at(data, "/elements")
        .iter()
        .map(|item| CompanyUpdate {
            content: text_at(item, &format!("{update}/commentary/text")),
            timestamp: text_at(item, &format!("{update}/actor/subDescription")),
        })
        .collect()
}

fn parse_profile_posts(data: &Value) -> Vec<ProfilePost> {
    array_at(data, "/elements")
        .iter()
        .map(|item| ProfilePost {
            content: text_at(item, "/commentary/text").unwrap_or_default(),
        })
        .collect()
}
