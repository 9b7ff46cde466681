pub const LINKEDIN_BASE_URL: &str = "https://www.linkedin.com";
pub const VOYAGER_API_BASE: &str = "https://www.linkedin.com/voyager/api";
pub const AUTH_URL: &str = "https://www.linkedin.com/uas/authenticate";

pub const PROFILE_URL_BASE: &str = "https://www.linkedin.com/in";
pub const COMPANY_URL_BASE: &str = "https://www.linkedin.com/company";

pub const TYPE_COMPACT_JOB_COMPANY: &str =
    "com.linkedin.voyager.deco.jobs.web.shared.WebCompactJobPostingCompany";
pub const TYPE_UPDATE_V2: &str = "com.linkedin.voyager.feed.render.UpdateV2";
pub const TYPE_JOB_POSTING: &str = "com.linkedin.voyager.jobs.JobPosting";

pub const DECORATION_FULL_COMPANY: &str =
    "com.linkedin.voyager.deco.organization.web.WebFullCompanyMain-12";
pub const DECORATION_JOB_POSTING: &str =
    "com.linkedin.voyager.deco.jobs.web.shared.WebLightJobPosting-23";
pub const DECORATION_JOB_SEARCH_HIT: &str =
    "com.linkedin.voyager.deco.jobs.search.ListedJobSearchHit-17";

pub const PLACEHOLDER_UNKNOWN: &str = "Unknown";
pub const PLACEHOLDER_NO_DESCRIPTION: &str = "No description available";

/// Returns the trailing segment of a URN such as `urn:li:fs_miniCompany:1035`.
pub fn id_from_urn(urn: &str) -> &str {
    urn.rsplit(':').next().unwrap_or(urn)
}

pub fn profile_url(public_id: &str) -> String {
    format!("{PROFILE_URL_BASE}/{public_id}")
}

pub fn company_url(company_id: &str) -> String {
    format!("{COMPANY_URL_BASE}/{company_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_from_urn_takes_last_segment() {
        assert_eq!(id_from_urn("urn:li:fs_normalized_jobPosting:3812"), "3812");
        assert_eq!(id_from_urn("plain"), "plain");
        assert_eq!(id_from_urn(""), "");
    }

    #[test]
    fn urls_are_built_from_ids() {
        assert_eq!(profile_url("jane-doe"), "https://www.linkedin.com/in/jane-doe");
        assert_eq!(company_url("1035"), "https://www.linkedin.com/company/1035");
    }
}
