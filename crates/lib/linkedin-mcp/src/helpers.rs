use linkedin_core::control::{ControlError, ErrorKind};
use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use tracing::error;

#[derive(Debug, Serialize)]
struct ErrorPayload {
    kind: ErrorKind,
    message: String,
}

/// Pretty-printed JSON on success, an error result otherwise.
pub(crate) fn json_result<T: Serialize>(
    action: &str,
    outcome: Result<T, ControlError>,
) -> CallToolResult {
    let rendered = outcome.and_then(|value| {
        serde_json::to_string_pretty(&value).map_err(ControlError::from)
    });
    text_result(action, rendered)
}

pub(crate) fn text_result(action: &str, outcome: Result<String, ControlError>) -> CallToolResult {
    match outcome {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(err) => failure(action, &err),
    }
}

/// Error result whose first content reads `Error {action}: {err}` and whose
/// second carries the `{kind, message}` payload.
pub(crate) fn failure(action: &str, err: &ControlError) -> CallToolResult {
    let kind = err.kind();
    error!(action, kind = kind.as_str(), error = %err, "tool call failed");

    let message = err.to_string();
    let mut contents = vec![Content::text(format!("Error {action}: {message}"))];
    if let Ok(payload) = Content::json(ErrorPayload { kind, message }) {
        contents.push(payload);
    }
    CallToolResult::error(contents)
}

/// Trimmed value, or `None` when blank.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use linkedin_core::api::ApiError;

    #[test]
    fn failure_carries_text_and_kind() {
        let err = ControlError::from(ApiError::Unavailable("status 503".to_string()));
        let result = failure("searching jobs", &err);

        assert!(test_support::is_error(&result));
        assert_eq!(
            test_support::text(&result, 0),
            "Error searching jobs: upstream unavailable: status 503"
        );
        let payload: serde_json::Value = serde_json::from_str(&test_support::text(&result, 1))
            .expect("payload should be json");
        assert_eq!(payload["kind"], "upstream_unavailable");
        assert_eq!(payload["message"], "upstream unavailable: status 503");
    }

    #[test]
    fn json_result_pretty_prints() {
        let result = json_result("listing", Ok(vec!["a", "b"]));
        assert!(!test_support::is_error(&result));
        assert_eq!(test_support::text(&result, 0), "[\n  \"a\",\n  \"b\"\n]");
    }

    #[test]
    fn blank_values_are_dropped() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(" Jakarta ".to_string())).as_deref(), Some("Jakarta"));
    }
}
