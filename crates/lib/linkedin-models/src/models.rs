use serde::{Deserialize, Serialize};

use crate::schema::id_from_urn;

/// Year and optional month as reported on positions and education entries.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
}

/// Start/end dates of a position or education entry. No end date means ongoing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TimePeriod {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<YearMonth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<YearMonth>,
}

/// A single position in a profile's experience list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub company_name: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_period: Option<TimePeriod>,
}

impl Experience {
    #[must_use]
    pub fn start(&self) -> Option<YearMonth> {
        self.time_period.and_then(|period| period.start_date)
    }

    #[must_use]
    pub fn end(&self) -> Option<YearMonth> {
        self.time_period.and_then(|period| period.end_date)
    }

    /// A position without an end date is the member's current one.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.end().is_none()
    }
}

/// A single entry in a profile's education list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub school_name: String,
    pub degree_name: String,
    pub field_of_study: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_period: Option<TimePeriod>,
}

/// Full member profile as returned by the profile view.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub public_id: String,
    pub urn_id: String,
    pub first_name: String,
    pub last_name: String,
    pub headline: String,
    pub location_name: String,
    pub industry_name: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
}

impl Profile {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// First position in the experience list that has no end date.
    ///
    /// Positions arrive newest first, so with several open positions this is
    /// the most recently started one.
    #[must_use]
    pub fn current_position(&self) -> Option<&Experience> {
        self.experience.iter().find(|exp| exp.is_current())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Skill {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Headquarter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Company record. Search hits carry a subset of these fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Company {
    pub entity_urn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub universal_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub industries: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headquarter: Option<Headquarter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founded: Option<i32>,
    pub specialities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
}

impl Company {
    #[must_use]
    pub fn id(&self) -> &str {
        id_from_urn(&self.entity_urn)
    }

    #[must_use]
    pub fn primary_industry(&self) -> Option<&str> {
        self.industries.first().map(String::as_str)
    }

    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.headquarter
            .as_ref()
            .and_then(|hq| hq.country.as_deref())
    }
}

/// Partial member record returned by people search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonHit {
    pub public_id: String,
    pub urn_id: String,
    pub first_name: String,
    pub last_name: String,
    pub occupation: String,
    pub location_name: String,
    pub experience: Vec<Experience>,
}

impl PersonHit {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Company name of the first listed position, or empty.
    #[must_use]
    pub fn current_company(&self) -> &str {
        self.experience
            .first()
            .map_or("", |exp| exp.company_name.as_str())
    }
}

/// Partial job record returned by job search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct JobHit {
    pub entity_urn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl JobHit {
    #[must_use]
    pub fn job_id(&self) -> &str {
        id_from_urn(&self.entity_urn)
    }
}

/// Job posting details with the hiring company resolved.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPosting {
    pub job_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_urn: Option<String>,
    pub description: String,
    pub formatted_location: String,
}

impl JobPosting {
    #[must_use]
    pub fn company_id(&self) -> Option<&str> {
        self.company_urn
            .as_deref()
            .filter(|urn| !urn.is_empty())
            .map(id_from_urn)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedPost {
    pub author_name: String,
    pub author_profile: String,
    pub content: String,
    pub url: String,
}

/// Company page update. The timestamp is the relative text shown under the actor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CompanyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProfilePost {
    pub content: String,
}
