use std::collections::HashMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use linkedin_core::api::memory::{MemoryApi, MemoryData};
use linkedin_core::api::ApiError;
use linkedin_core::control::{
    ErrorKind,
    JobChangeRequest,
    LeadRequest,
    LinkedinControlPlane,
    OpportunityLevel,
    SkillSearchRequest,
    TargetAccountRequest,
    TechnologyRequest,
};
use linkedin_models::{Company, CompanyUpdate, JobPosting, PersonHit, Profile, ProfilePost};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Fixture {
    companies: Vec<Company>,
    people: Vec<PersonHit>,
    profiles: Vec<ProfileFixture>,
    jobs: Vec<JobPosting>,
    updates: HashMap<String, Vec<CompanyUpdate>>,
    posts: HashMap<String, Vec<ProfilePost>>,
    broken_profiles: Vec<String>,
}

#[derive(Deserialize)]
struct ProfileFixture {
    profile: Profile,
    skills: Vec<String>,
}

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("network.json")
}

fn load_fixture() -> MemoryData {
    let path = fixture_path();
    let raw = std::fs::read_to_string(&path).unwrap_or_else(|err| {
        let path_display = path.display();
        panic!("failed to read network fixture at {path_display}: {err}")
    });
    let fixture: Fixture = serde_json::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse network fixture: {err}"));

    let mut data = MemoryData::new();
    for company in fixture.companies {
        data = data.with_company(company);
    }
    for person in fixture.people {
        data = data.with_person(person);
    }
    for entry in fixture.profiles {
        let skills: Vec<&str> = entry.skills.iter().map(String::as_str).collect();
        data = data.with_profile(entry.profile, &skills);
    }
    for job in fixture.jobs {
        data = data.with_job(job);
    }
    for (company_id, updates) in fixture.updates {
        data = data.with_company_updates(&company_id, updates);
    }
    for (public_id, posts) in fixture.posts {
        data = data.with_profile_posts(&public_id, posts);
    }
    for public_id in &fixture.broken_profiles {
        data = data.with_broken_profile(public_id);
    }
    data
}

fn control_plane() -> (LinkedinControlPlane<MemoryApi>, MemoryApi) {
    let api = MemoryApi::new(load_fixture());
    (LinkedinControlPlane::new(api.clone()), api)
}

fn october_2026() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 1).expect("valid date")
}

#[tokio::test]
async fn recent_job_changes_skip_same_employer_and_broken_profiles() {
    let (control, api) = control_plane();

    let changes = control
        .find_recent_job_changes_as_of(&JobChangeRequest::default(), october_2026())
        .await
        .expect("job change search should succeed");

    assert_eq!(changes.len(), 1, "only jane moved recently: {changes:?}");
    let change = &changes[0];
    assert_eq!(change.id, "jane-cto");
    assert_eq!(change.current_title, "Chief Technology Officer");
    assert_eq!(change.current_company, "Acme Cloud");
    assert_eq!(change.previous_company, "Initech");
    assert_eq!(change.url, "https://www.linkedin.com/in/jane-cto");
    assert_eq!(api.call_count("get_profile"), 4);
}

#[tokio::test]
async fn recent_job_changes_filter_on_title_keywords() {
    let (control, _) = control_plane();
    let request = JobChangeRequest {
        title_keywords: vec!["engineer".to_string()],
        ..JobChangeRequest::default()
    };

    let changes = control
        .find_recent_job_changes_as_of(&request, october_2026())
        .await
        .expect("job change search should succeed");

    assert!(changes.is_empty());
}

#[tokio::test]
async fn decision_makers_stop_once_limit_is_reached() {
    let (control, api) = control_plane();

    let people = control
        .find_decision_makers("101", &[], 2)
        .await
        .expect("decision maker search should succeed");

    let ids: Vec<&str> = people.iter().map(|person| person.id.as_str()).collect();
    assert_eq!(ids, vec!["jane-cto", "raj-cio"]);
    assert!(people.iter().all(|person| person.company == "Acme Cloud"));
    // CEO, CTO, CIO
    assert_eq!(api.call_count("search_people"), 3);
}

#[tokio::test]
async fn lead_recommendations_apply_size_bucket_and_fit() {
    let (control, _) = control_plane();
    let request = LeadRequest {
        company_size: Some("medium".to_string()),
        technologies: vec!["Kubernetes".to_string()],
        limit: 5,
        ..LeadRequest::default()
    };

    let leads = control
        .generate_lead_recommendations(&request)
        .await
        .expect("lead generation should succeed");

    assert_eq!(leads.len(), 1);
    let lead = &leads[0];
    assert_eq!(lead.company_name, "Acme Cloud");
    assert_eq!(lead.technology_fit, "High - Mentioned in company updates: Kubernetes");
    assert_eq!(lead.decision_makers.len(), 2);
    assert_eq!(lead.company_url, "https://www.linkedin.com/company/101");
}

#[tokio::test]
async fn lead_recommendations_without_technologies_report_unknown_fit() {
    let (control, _) = control_plane();
    let request = LeadRequest {
        limit: 5,
        ..LeadRequest::default()
    };

    let leads = control
        .generate_lead_recommendations(&request)
        .await
        .expect("lead generation should succeed");

    assert_eq!(leads.len(), 2);
    assert!(leads.iter().all(|lead| lead.technology_fit == "Unknown"));
}

#[tokio::test]
async fn target_accounts_score_technology_mentions() {
    let (control, _) = control_plane();
    let request = TargetAccountRequest {
        industry: "Information Technology".to_string(),
        keywords: vec!["devops".to_string()],
        technology_interests: vec!["automation".to_string(), "kubernetes".to_string()],
        limit: 10,
        ..TargetAccountRequest::default()
    };

    let accounts = control
        .identify_target_accounts(&request)
        .await
        .expect("target account search should succeed");

    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].company_name, "Tiny Ops");
    assert_eq!(accounts[0].tech_score, 1);
    assert_eq!(accounts[0].tech_mentions, vec!["automation".to_string()]);
    assert!(accounts[0].decision_makers.is_empty());

    let json = serde_json::to_value(&accounts).expect("accounts should serialize");
    assert_eq!(json[0]["company_id"], "102");
    assert_eq!(json[0]["company_name"], "Tiny Ops");
    assert_eq!(json[0]["company_url"], "https://www.linkedin.com/company/102");
    assert!(json[0].get("id").is_none());
    assert!(json[0].get("url").is_none());
}

#[tokio::test]
async fn oversized_limits_do_not_overflow_search_sizing() {
    let (control, _) = control_plane();

    let accounts = control
        .identify_target_accounts(&TargetAccountRequest {
            industry: "Information Technology".to_string(),
            limit: usize::MAX / 2,
            ..TargetAccountRequest::default()
        })
        .await
        .expect("target account search should succeed");
    assert!(!accounts.is_empty());

    let people = control
        .search_people_by_skills(&SkillSearchRequest {
            skills: vec!["kubernetes".to_string()],
            limit: usize::MAX,
            ..SkillSearchRequest::default()
        })
        .await
        .expect("skill search should succeed");
    assert_eq!(people[0].id, "jane-cto");

    let companies = control
        .find_companies_using_technologies(&TechnologyRequest {
            technologies: vec!["Kubernetes".to_string()],
            limit: usize::MAX,
            ..TechnologyRequest::default()
        })
        .await
        .expect("technology search should succeed");
    assert_eq!(companies.len(), 3);
}

#[tokio::test]
async fn technology_search_tops_up_from_job_postings() {
    let (control, _) = control_plane();
    let request = TechnologyRequest {
        technologies: vec!["Kubernetes".to_string()],
        limit: 3,
        ..TechnologyRequest::default()
    };

    let companies = control
        .find_companies_using_technologies(&request)
        .await
        .expect("technology search should succeed");

    assert_eq!(companies.len(), 3);
    let json = serde_json::to_value(&companies).expect("companies should serialize");
    assert_eq!(json[0]["name"], "Acme Cloud");
    assert!(json[0].get("source").is_none());
    assert_eq!(json[1]["id"], "102");
    assert_eq!(json[1]["source"], "Job Posting");
    assert_eq!(json[1]["industry"], "Unknown");
    assert_eq!(json[2]["name"], "Hooli");
}

#[tokio::test]
async fn people_by_skills_require_every_skill() {
    let (control, _) = control_plane();
    let request = SkillSearchRequest {
        skills: vec!["kubernetes".to_string(), "rust".to_string()],
        limit: 5,
        ..SkillSearchRequest::default()
    };

    let people = control
        .search_people_by_skills(&request)
        .await
        .expect("skill search should succeed");

    assert_eq!(people.len(), 1);
    assert_eq!(people[0].id, "jane-cto");
    assert_eq!(people[0].matched_skills, vec!["Kubernetes", "Rust"]);

    let json = serde_json::to_value(&people).expect("people should serialize");
    assert_eq!(json[0]["company"], "Acme Cloud");
    assert_eq!(json[0]["title"], "CTO at Acme Cloud | Kubernetes");
}

#[tokio::test]
async fn prospect_analysis_scores_current_role() {
    let (control, _) = control_plane();

    let analysis = control
        .analyze_prospect_profile("jane-cto", &[])
        .await
        .expect("analysis should succeed");

    assert!(analysis.is_decision_maker);
    assert_eq!(analysis.current_company, "Acme Cloud");
    assert_eq!(analysis.service_interests, vec!["cloud", "migration", "security"]);
    assert_eq!(analysis.opportunity_score, 60);
    assert_eq!(analysis.opportunity_level, OpportunityLevel::Medium);
    assert_eq!(analysis.skills.len(), 4);
}

#[tokio::test]
async fn common_connections_share_employer_and_skill() {
    let (control, _) = control_plane();

    let common = control
        .find_common_connections("jane-cto", "raj-cio", 5)
        .await
        .expect("comparison should succeed");

    assert_eq!(common.profile1.name, "Jane Doe");
    assert_eq!(common.common_companies, vec!["acme cloud".to_string()]);
    assert!(common.common_schools.is_empty());
    assert_eq!(common.common_skills, vec!["cloud computing".to_string()]);
    assert_eq!(common.connection_strength, 2);
}

#[tokio::test]
async fn outreach_context_resolves_employer_and_activity() {
    let (control, _) = control_plane();

    let context = control
        .generate_sales_outreach_context("jane-cto", "cloud migration services")
        .await
        .expect("outreach context should build");

    assert_eq!(context.prospect.company, "Acme Cloud");
    assert_eq!(
        context.company_details.as_ref().map(|company| company.id.as_str()),
        Some("101")
    );
    assert_eq!(context.recent_activity.len(), 1);
    assert!(context.recent_activity[0].content.ends_with("..."));
    assert_eq!(context.recent_activity[0].content.chars().count(), 103);
    assert_eq!(context.conversation_starters.len(), 4);
}

#[tokio::test]
async fn upstream_failure_is_typed() {
    let api = MemoryApi::new(load_fixture().with_failure(ApiError::Auth("CHALLENGE".to_string())));
    let control = LinkedinControlPlane::new(api);

    let err = control
        .get_company_details("101")
        .await
        .expect_err("auth failure should surface");

    assert_eq!(err.kind(), ErrorKind::AuthFailure);
}
