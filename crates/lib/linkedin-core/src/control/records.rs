//! Flattened output records shared by several tools.

use linkedin_models::schema::{
    PLACEHOLDER_NO_DESCRIPTION,
    PLACEHOLDER_UNKNOWN,
    company_url,
    profile_url,
};
use linkedin_models::{Company, PersonHit};
use serde::Serialize;

use super::format::count_or_unknown;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PersonSummary {
    pub id: String,
    pub name: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
}

impl PersonSummary {
    #[must_use]
    pub fn from_hit(hit: &PersonHit, company: &str) -> Self {
        Self {
            id: hit.public_id.clone(),
            name: hit.full_name(),
            title: hit.occupation.clone(),
            company: company.to_string(),
            location: hit.location_name.clone(),
            url: profile_url(&hit.public_id),
        }
    }
}

/// Name, title and link of a contact attached to an account.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ContactSummary {
    pub name: String,
    pub title: String,
    pub url: String,
}

impl ContactSummary {
    #[must_use]
    pub fn from_hit(hit: &PersonHit) -> Self {
        Self {
            name: hit.full_name(),
            title: hit.occupation.clone(),
            url: profile_url(&hit.public_id),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CompanySummary {
    pub id: String,
    pub name: String,
    pub industry: String,
    pub location: String,
    pub description: String,
    #[serde(serialize_with = "count_or_unknown")]
    pub size: Option<u64>,
    pub url: String,
}

impl CompanySummary {
    #[must_use]
    pub fn from_company(company: &Company) -> Self {
        Self {
            id: company.id().to_string(),
            name: company_name(company),
            industry: company_industry(company),
            location: company_country(company),
            description: company
                .description
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_NO_DESCRIPTION.to_string()),
            size: company.staff_count,
            url: company_url(company.id()),
        }
    }
}

pub fn company_name(company: &Company) -> String {
    company
        .name
        .clone()
        .unwrap_or_else(|| PLACEHOLDER_UNKNOWN.to_string())
}

pub fn company_industry(company: &Company) -> String {
    company
        .primary_industry()
        .unwrap_or(PLACEHOLDER_UNKNOWN)
        .to_string()
}

pub fn company_country(company: &Company) -> String {
    company.country().unwrap_or(PLACEHOLDER_UNKNOWN).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkedin_models::Experience;

    #[test]
    fn company_summary_fills_placeholders() {
        let summary = CompanySummary::from_company(&Company {
            entity_urn: "urn:li:fs_normalized_company:77".to_string(),
            ..Company::default()
        });

        let json = serde_json::to_value(&summary).expect("summary should serialize");
        assert_eq!(json["id"], "77");
        assert_eq!(json["name"], "Unknown");
        assert_eq!(json["industry"], "Unknown");
        assert_eq!(json["location"], "Unknown");
        assert_eq!(json["description"], "No description available");
        assert_eq!(json["size"], "Unknown");
        assert_eq!(json["url"], "https://www.linkedin.com/company/77");
    }

    #[test]
    fn company_summary_keeps_numeric_size() {
        let summary = CompanySummary::from_company(&Company {
            staff_count: Some(120),
            ..Company::default()
        });
        let json = serde_json::to_value(&summary).expect("summary should serialize");
        assert_eq!(json["size"], 120);
    }

    #[test]
    fn person_summary_uses_given_company() {
        let hit = PersonHit {
            public_id: "jane".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            experience: vec![Experience {
                company_name: "Acme".to_string(),
                ..Experience::default()
            }],
            ..PersonHit::default()
        };
        let summary = PersonSummary::from_hit(&hit, hit.current_company());
        assert_eq!(summary.name, "Jane Doe");
        assert_eq!(summary.company, "Acme");
        assert_eq!(summary.url, "https://www.linkedin.com/in/jane");
    }
}
