use std::{error::Error, fmt, sync::Arc};

use serde::Serialize;

use crate::api::{ApiError, LinkedinApi};

pub mod feed;
pub mod format;
pub mod profile;
pub mod records;
pub mod sales;
pub mod scoring;
pub mod search;

pub use feed::UpdateSummary;
pub use profile::{CommonConnections, CompanyDetails, ProfileDetails};
pub use records::{CompanySummary, ContactSummary, PersonSummary};
pub use sales::{
    JobChangeRequest,
    LeadRecommendation,
    LeadRequest,
    OutreachContext,
    RecentJobChange,
    TargetAccount,
    TargetAccountRequest,
    TechnologyCompany,
    TechnologyRequest,
};
pub use scoring::{OpportunityLevel, ProspectAnalysis, ScoringConfig};
pub use search::{CompanySearchRequest, JobListing, PeopleSearchRequest, SkillSearchRequest, SkilledPerson};

#[derive(Debug)]
pub enum ControlError {
    Api(ApiError),
    InvalidInput(String),
    NotFound(String),
    Serialize(String),
}

/// Coarse failure category reported alongside error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    AuthFailure,
    UpstreamUnavailable,
    MalformedResponse,
    NotFound,
    InvalidInput,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthFailure => "auth_failure",
            Self::UpstreamUnavailable => "upstream_unavailable",
            Self::MalformedResponse => "malformed_response",
            Self::NotFound => "not_found",
            Self::InvalidInput => "invalid_input",
        }
    }
}

impl ControlError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Api(ApiError::Auth(_)) => ErrorKind::AuthFailure,
            Self::Api(ApiError::Unavailable(_)) => ErrorKind::UpstreamUnavailable,
            Self::Api(ApiError::Malformed(_)) | Self::Serialize(_) => ErrorKind::MalformedResponse,
            Self::Api(ApiError::NotFound(_)) | Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(err) => write!(f, "{err}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::NotFound(message) => write!(f, "{message}"),
            Self::Serialize(message) => write!(f, "failed to serialize output: {message}"),
        }
    }
}

impl Error for ControlError {}

impl From<ApiError> for ControlError {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}

impl From<serde_json::Error> for ControlError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}

/// Runs tool logic against a single upstream client.
///
/// A control plane is built per tool call around a freshly constructed client,
/// so nothing learned during one call is visible to the next.
pub struct LinkedinControlPlane<A: LinkedinApi> {
    api: A,
    scoring: Arc<ScoringConfig>,
}

impl<A: LinkedinApi> LinkedinControlPlane<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            scoring: Arc::new(ScoringConfig::default()),
        }
    }

    #[must_use]
    pub fn with_scoring(mut self, scoring: Arc<ScoringConfig>) -> Self {
        self.scoring = scoring;
        self
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }
}
