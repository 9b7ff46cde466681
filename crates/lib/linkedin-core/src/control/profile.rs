use linkedin_models::schema::{PLACEHOLDER_NO_DESCRIPTION, PLACEHOLDER_UNKNOWN, profile_url};
use linkedin_models::{Profile, Skill};
use serde::Serialize;
use tracing::debug;

use super::format::{common_names, count_or_unknown, date_range, year_or_unknown};
use super::records::{company_industry, company_name};
use super::{ControlError, LinkedinControlPlane};
use crate::api::LinkedinApi;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CompanyDetails {
    pub id: String,
    pub name: String,
    pub industry: String,
    pub description: String,
    pub website: String,
    pub location: String,
    #[serde(serialize_with = "count_or_unknown")]
    pub size: Option<u64>,
    pub specialties: Vec<String>,
    #[serde(serialize_with = "year_or_unknown")]
    pub founded: Option<i32>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExperienceEntry {
    pub company: String,
    pub title: String,
    pub description: String,
    pub date_range: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub field: String,
    pub date_range: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProfileDetails {
    pub id: String,
    pub name: String,
    pub headline: String,
    pub location: String,
    pub industry: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProfileRef {
    pub id: String,
    pub name: String,
    pub url: String,
}

impl ProfileRef {
    fn from_profile(profile: &Profile, public_id: &str) -> Self {
        Self {
            id: public_id.to_string(),
            name: profile.full_name(),
            url: profile_url(public_id),
        }
    }
}

/// Overlap between two members' employers, schools and skills.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommonConnections {
    pub profile1: ProfileRef,
    pub profile2: ProfileRef,
    pub common_companies: Vec<String>,
    pub common_schools: Vec<String>,
    pub common_skills: Vec<String>,
    pub connection_strength: usize,
}

impl<A: LinkedinApi> LinkedinControlPlane<A> {
    /// # Errors
    /// Returns `ControlError::Api` if the company cannot be fetched.
    pub async fn get_company_details(&self, company_id: &str) -> Result<CompanyDetails, ControlError> {
        let company = self.api().get_company(company_id).await?;

        let location = company.headquarter.as_ref().map_or_else(
            || PLACEHOLDER_UNKNOWN.to_string(),
            |hq| {
                format!(
                    "{}, {}",
                    hq.city.as_deref().unwrap_or_default(),
                    hq.country.as_deref().unwrap_or_default()
                )
            },
        );

        Ok(CompanyDetails {
            id: company_id.to_string(),
            name: company_name(&company),
            industry: company_industry(&company),
            description: company
                .description
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_NO_DESCRIPTION.to_string()),
            website: company
                .website_url
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_UNKNOWN.to_string()),
            location,
            size: company.staff_count,
            specialties: company.specialities.clone(),
            founded: company.founded,
        })
    }

    /// # Errors
    /// Returns `ControlError::Api` if the profile or its skills cannot be fetched.
    pub async fn get_profile_details(&self, profile_id: &str) -> Result<ProfileDetails, ControlError> {
        let profile = self.api().get_profile(profile_id).await?;
        let skills = self.api().get_profile_skills(profile_id).await?;

        let experience = profile
            .experience
            .iter()
            .map(|exp| ExperienceEntry {
                company: exp.company_name.clone(),
                title: exp.title.clone(),
                description: exp.description.clone(),
                date_range: date_range(exp.time_period.as_ref(), "Present"),
            })
            .collect();
        let education = profile
            .education
            .iter()
            .map(|edu| EducationEntry {
                school: edu.school_name.clone(),
                degree: edu.degree_name.clone(),
                field: edu.field_of_study.clone(),
                date_range: date_range(edu.time_period.as_ref(), ""),
            })
            .collect();

        Ok(ProfileDetails {
            id: profile_id.to_string(),
            name: profile.full_name(),
            headline: profile.headline.clone(),
            location: profile.location_name.clone(),
            industry: profile.industry_name.clone(),
            experience,
            education,
            skills: skills.into_iter().map(|skill| skill.name).collect(),
            url: profile_url(profile_id),
        })
    }

    /// Compares two members' employers, schools and skills.
    ///
    /// # Errors
    /// Returns `ControlError::Api` if either profile or skill list cannot be fetched.
    pub async fn find_common_connections(
        &self,
        profile_id1: &str,
        profile_id2: &str,
        limit: usize,
    ) -> Result<CommonConnections, ControlError> {
        let first = self.api().get_profile(profile_id1).await?;
        let second = self.api().get_profile(profile_id2).await?;
        let first_skills = self.api().get_profile_skills(profile_id1).await?;
        let second_skills = self.api().get_profile_skills(profile_id2).await?;

        let comparison = compare_profiles(
            (&first, &first_skills),
            (&second, &second_skills),
            limit,
        );
        debug!(
            profile_id1,
            profile_id2,
            strength = comparison.connection_strength,
            "compared profiles"
        );

        Ok(CommonConnections {
            profile1: ProfileRef::from_profile(&first, profile_id1),
            profile2: ProfileRef::from_profile(&second, profile_id2),
            ..comparison
        })
    }
}

/// Pure overlap computation. Profile references are left blank.
///
/// `connection_strength` counts every shared skill up to five, even when
/// `common_skills` is cut to `limit`.
pub fn compare_profiles(
    first: (&Profile, &[Skill]),
    second: (&Profile, &[Skill]),
    limit: usize,
) -> CommonConnections {
    let (first, first_skills) = first;
    let (second, second_skills) = second;

    let common_companies = common_names(
        first.experience.iter().map(|exp| exp.company_name.as_str()),
        second.experience.iter().map(|exp| exp.company_name.as_str()),
    );
    let common_schools = common_names(
        first.education.iter().map(|edu| edu.school_name.as_str()),
        second.education.iter().map(|edu| edu.school_name.as_str()),
    );
    let mut common_skills = common_names(
        first_skills.iter().map(|skill| skill.name.as_str()),
        second_skills.iter().map(|skill| skill.name.as_str()),
    );

    let connection_strength =
        common_companies.len() + common_schools.len() + common_skills.len().min(5);
    common_skills.truncate(limit);

    let blank = ProfileRef {
        id: String::new(),
        name: String::new(),
        url: String::new(),
    };
    CommonConnections {
        profile1: blank.clone(),
        profile2: blank,
        common_companies,
        common_schools,
        common_skills,
        connection_strength,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkedin_models::{Education, Experience};

    fn profile(companies: &[&str], schools: &[&str]) -> Profile {
        Profile {
            experience: companies
                .iter()
                .map(|name| Experience {
                    company_name: (*name).to_string(),
                    ..Experience::default()
                })
                .collect(),
            education: schools
                .iter()
                .map(|name| Education {
                    school_name: (*name).to_string(),
                    ..Education::default()
                })
                .collect(),
            ..Profile::default()
        }
    }

    fn skills(names: &[&str]) -> Vec<Skill> {
        names
            .iter()
            .map(|name| Skill {
                name: (*name).to_string(),
            })
            .collect()
    }

    #[test]
    fn comparison_counts_capped_skills() {
        let left = profile(&["Acme", "Initech"], &["MIT"]);
        let right = profile(&["ACME"], &["mit", "Stanford"]);
        let shared = ["A", "B", "C", "D", "E", "F", "G"];

        let result = compare_profiles(
            (&left, &skills(&shared)),
            (&right, &skills(&shared)),
            3,
        );

        assert_eq!(result.common_companies, vec!["acme".to_string()]);
        assert_eq!(result.common_schools, vec!["mit".to_string()]);
        assert_eq!(result.common_skills.len(), 3);
        assert_eq!(result.connection_strength, 1 + 1 + 5);
    }

    #[test]
    fn comparison_is_symmetric_for_companies_and_schools() {
        let left = profile(&["Globex", "Acme"], &["Oxford"]);
        let right = profile(&["acme", "globex", "Hooli"], &["OXFORD"]);

        let forward = compare_profiles((&left, &[]), (&right, &[]), 5);
        let backward = compare_profiles((&right, &[]), (&left, &[]), 5);

        let mut forward_companies = forward.common_companies.clone();
        let mut backward_companies = backward.common_companies.clone();
        forward_companies.sort();
        backward_companies.sort();
        assert_eq!(forward_companies, backward_companies);
        assert_eq!(forward.common_schools, backward.common_schools);
        assert_eq!(forward.connection_strength, backward.connection_strength);
    }

    #[test]
    fn company_details_serialize_unknown_size_and_founding() {
        let details = CompanyDetails {
            id: "1".to_string(),
            name: "Acme".to_string(),
            industry: "Software".to_string(),
            description: "No description available".to_string(),
            website: "Unknown".to_string(),
            location: "Unknown".to_string(),
            size: None,
            specialties: Vec::new(),
            founded: Some(1999),
        };
        let json = serde_json::to_value(&details).expect("details should serialize");
        assert_eq!(json["size"], "Unknown");
        assert_eq!(json["founded"], 1999);
    }
}
