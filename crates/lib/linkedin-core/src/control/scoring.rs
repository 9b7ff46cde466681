//! Prospect scoring.
//!
//! Scores combine a decision-maker bonus with a capped count of service
//! keywords found in the headline, experience descriptions and skills. All
//! weights and thresholds come from `ScoringConfig`, which deserializes from
//! TOML with every field optional.

use linkedin_models::schema::profile_url;
use linkedin_models::{Profile, Skill};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ControlError, LinkedinControlPlane};
use crate::api::LinkedinApi;

const DEFAULT_DECISION_MAKER_KEYWORDS: &[&str] = &[
    "cto", "cio", "vp", "director", "chief", "head", "lead", "senior", "manager",
];

const DEFAULT_SERVICE_KEYWORDS: &[&str] = &[
    "cloud",
    "migration",
    "digital transformation",
    "infrastructure",
    "security",
    "automation",
    "devops",
    "ai",
    "machine learning",
    "data analytics",
    "integration",
    "erp",
    "crm",
    "software development",
    "consulting",
    "it services",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Current-title fragments that mark a decision maker.
    pub decision_maker_keywords: Vec<String>,
    /// Used when the caller does not supply service keywords.
    pub service_keywords: Vec<String>,
    pub headline_weight: u32,
    pub experience_weight: u32,
    pub skill_weight: u32,
    pub decision_maker_bonus: u32,
    /// Opportunity points per service point.
    pub service_multiplier: u32,
    pub service_points_cap: u32,
    pub high_threshold: u32,
    pub medium_threshold: u32,
    /// Skills echoed back in the analysis.
    pub top_skills: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            decision_maker_keywords: to_strings(DEFAULT_DECISION_MAKER_KEYWORDS),
            service_keywords: to_strings(DEFAULT_SERVICE_KEYWORDS),
            headline_weight: 2,
            experience_weight: 1,
            skill_weight: 1,
            decision_maker_bonus: 30,
            service_multiplier: 5,
            service_points_cap: 50,
            high_threshold: 70,
            medium_threshold: 40,
            top_skills: 10,
        }
    }
}

impl ScoringConfig {
    /// Parses an override file. Missing fields keep their defaults.
    ///
    /// # Errors
    /// Returns the TOML error when the document is not a valid config.
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    #[must_use]
    pub fn is_decision_maker(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.decision_maker_keywords
            .iter()
            .any(|keyword| title.contains(&keyword.to_lowercase()))
    }

    #[must_use]
    pub const fn level(&self, score: u32) -> OpportunityLevel {
        if score >= self.high_threshold {
            OpportunityLevel::High
        } else if score >= self.medium_threshold {
            OpportunityLevel::Medium
        } else {
            OpportunityLevel::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpportunityLevel {
    High,
    Medium,
    Low,
}

/// Keyword hits and the derived opportunity score for one prospect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProspectScore {
    pub is_decision_maker: bool,
    pub service_interests: Vec<String>,
    pub service_score: u32,
    pub opportunity_score: u32,
    pub opportunity_level: OpportunityLevel,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProspectAnalysis {
    pub name: String,
    pub headline: String,
    pub current_title: String,
    pub current_company: String,
    pub location: String,
    pub industry: String,
    pub is_decision_maker: bool,
    pub service_interests: Vec<String>,
    pub service_score: u32,
    pub opportunity_score: u32,
    pub opportunity_level: OpportunityLevel,
    pub profile_url: String,
    pub skills: Vec<String>,
}

/// Scores a profile against `keywords`, falling back to the configured
/// service keywords when `keywords` is empty.
#[must_use]
pub fn score_prospect(
    config: &ScoringConfig,
    profile: &Profile,
    skills: &[Skill],
    keywords: &[String],
) -> ProspectScore {
    let keywords = if keywords.is_empty() {
        &config.service_keywords
    } else {
        keywords
    };
    // (as given, lowercased): matching ignores case, interests echo the caller.
    let keywords: Vec<(&str, String)> = keywords
        .iter()
        .map(|keyword| keyword.trim())
        .filter(|keyword| !keyword.is_empty())
        .map(|keyword| (keyword, keyword.to_lowercase()))
        .collect();

    let current_title = profile
        .current_position()
        .map(|position| position.title.as_str())
        .unwrap_or_default();
    let is_decision_maker = config.is_decision_maker(current_title);

    let mut interests: Vec<String> = Vec::new();
    let mut service_score = 0_u32;

    let headline = profile.headline.to_lowercase();
    for (keyword, needle) in &keywords {
        if headline.contains(needle.as_str()) {
            service_score = service_score.saturating_add(config.headline_weight);
            if !interests.iter().any(|known| known == keyword) {
                interests.push((*keyword).to_string());
            }
        }
    }

    for exp in &profile.experience {
        let description = exp.description.to_lowercase();
        for (keyword, needle) in &keywords {
            if description.contains(needle.as_str()) && !interests.iter().any(|known| known == keyword) {
                interests.push((*keyword).to_string());
                service_score = service_score.saturating_add(config.experience_weight);
            }
        }
    }

    for skill in skills {
        let name = skill.name.to_lowercase();
        for (keyword, needle) in &keywords {
            if name.contains(needle.as_str()) && !interests.iter().any(|known| known == keyword) {
                interests.push((*keyword).to_string());
                service_score = service_score.saturating_add(config.skill_weight);
            }
        }
    }

    let bonus = if is_decision_maker {
        config.decision_maker_bonus
    } else {
        0
    };
    let service_points = service_score
        .saturating_mul(config.service_multiplier)
        .min(config.service_points_cap);
    let opportunity_score = bonus.saturating_add(service_points);

    ProspectScore {
        is_decision_maker,
        service_interests: interests,
        service_score,
        opportunity_score,
        opportunity_level: config.level(opportunity_score),
    }
}

impl<A: LinkedinApi> LinkedinControlPlane<A> {
    /// Scores a member as a sales prospect.
    ///
    /// # Errors
    /// Returns `ControlError::Api` if the profile or its skills cannot be fetched.
    pub async fn analyze_prospect_profile(
        &self,
        profile_id: &str,
        service_keywords: &[String],
    ) -> Result<ProspectAnalysis, ControlError> {
        let profile = self.api().get_profile(profile_id).await?;
        let skills = self.api().get_profile_skills(profile_id).await?;
        let config = self.scoring();

        let score = score_prospect(config, &profile, &skills, service_keywords);
        debug!(
            profile_id,
            score = score.opportunity_score,
            level = ?score.opportunity_level,
            "scored prospect"
        );

        let (current_title, current_company) = profile
            .current_position()
            .map(|position| (position.title.clone(), position.company_name.clone()))
            .unwrap_or_default();

        Ok(ProspectAnalysis {
            name: profile.full_name(),
            headline: profile.headline.clone(),
            current_title,
            current_company,
            location: profile.location_name.clone(),
            industry: profile.industry_name.clone(),
            is_decision_maker: score.is_decision_maker,
            service_interests: score.service_interests,
            service_score: score.service_score,
            opportunity_score: score.opportunity_score,
            opportunity_level: score.opportunity_level,
            profile_url: profile_url(profile_id),
            skills: skills
                .into_iter()
                .take(config.top_skills)
                .map(|skill| skill.name)
                .collect(),
        })
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}
