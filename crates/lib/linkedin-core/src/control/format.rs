//! Small shaping helpers shared by the control plane modules.

use linkedin_models::TimePeriod;
use linkedin_models::schema::PLACEHOLDER_UNKNOWN;
use serde::Serializer;

/// Case-insensitive substring test.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Keeps the first `max` characters and appends `...` when anything was cut.
pub fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// Keeps the first `max` characters and always appends `...`.
pub fn preview(text: &str, max: usize) -> String {
    let head: String = text.chars().take(max).collect();
    format!("{head}...")
}

/// `"{start} - {end}"` with the given fallback for a missing end year.
pub fn date_range(period: Option<&TimePeriod>, open_end: &str) -> String {
    let start = period
        .and_then(|period| period.start_date)
        .map(|date| date.year.to_string())
        .unwrap_or_default();
    let end = period
        .and_then(|period| period.end_date)
        .map_or_else(|| open_end.to_string(), |date| date.year.to_string());
    format!("{start} - {end}")
}

/// Case-insensitive, order-preserving intersection of two name lists.
/// Blank names never match.
pub fn common_names<'a>(
    left: impl IntoIterator<Item = &'a str>,
    right: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let right: Vec<String> = right.into_iter().map(str::to_lowercase).collect();
    let mut common: Vec<String> = Vec::new();
    for name in left {
        let lowered = name.trim().to_lowercase();
        if lowered.is_empty() || common.contains(&lowered) {
            continue;
        }
        if right.iter().any(|other| other.trim() == lowered) {
            common.push(lowered);
        }
    }
    common
}

#[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
pub fn count_or_unknown<S: Serializer>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(count) => serializer.serialize_u64(*count),
        None => serializer.serialize_str(PLACEHOLDER_UNKNOWN),
    }
}

#[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
pub fn year_or_unknown<S: Serializer>(value: &Option<i32>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(year) => serializer.serialize_i32(*year),
        None => serializer.serialize_str(PLACEHOLDER_UNKNOWN),
    }
}
