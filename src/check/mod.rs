//! # Response Assertions
//!
//! Field-level expectation helpers for HTTP responses. Each helper checks
//! one thing and panics with a descriptive message, so a failing test
//! reports the actual value alongside the expectation. Latency checks
//! compare elapsed time against a threshold: a check, not an enforced
//! cutoff.

use regex::Regex;

use crate::http::response::ApiResponse;

/// Assert an exact status code.
pub fn assert_status(response: &ApiResponse, expected: u16) {
    if response.status != expected {
        panic!(
            "Status code should be {expected} but was {} {} (body: {})",
            response.status,
            response.status_text,
            snippet(&response.body)
        );
    }
}

/// Assert any 2xx status.
pub fn assert_success(response: &ApiResponse) {
    if !response.is_success() {
        panic!(
            "Expected a success status but got {} {} (body: {})",
            response.status,
            response.status_text,
            snippet(&response.body)
        );
    }
}

/// Assert the response declares a JSON content type.
pub fn assert_json_content_type(response: &ApiResponse) {
    if !response.content_type.to_lowercase().contains("json") {
        panic!(
            "Response should be JSON but content-type was `{}`",
            response.content_type
        );
    }
}

/// Assert the response body contains `needle`.
pub fn assert_body_contains(response: &ApiResponse, needle: &str) {
    if !response.body.contains(needle) {
        panic!(
            "Response body should contain `{needle}` (body: {})",
            snippet(&response.body)
        );
    }
}

/// Assert response time is within the threshold.
pub fn assert_response_time_within(response: &ApiResponse, threshold_ms: u64) {
    if response.time_ms >= threshold_ms {
        panic!(
            "Response time should be within {threshold_ms}ms but took {}ms",
            response.time_ms
        );
    }
}

/// Assert a string value matches a regex pattern. `what` names the field
/// in the failure message.
pub fn assert_matches(value: &str, pattern: &str, what: &str) {
    let regex = Regex::new(pattern)
        .unwrap_or_else(|err| panic!("Invalid assertion pattern `{pattern}`: {err}"));
    if !regex.is_match(value) {
        panic!("{what} should match `{pattern}` but was `{value}`");
    }
}

/// Assert an optional string is present and non-empty. Returns the value
/// so chained assertions can use it.
pub fn assert_non_empty<'a>(value: Option<&'a str>, what: &str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        Some(_) => panic!("{what} should not be empty"),
        None => panic!("{what} should be present"),
    }
}

/// Assert an optional value is present, returning it.
pub fn assert_some<T>(value: Option<T>, what: &str) -> T {
    match value {
        Some(v) => v,
        None => panic!("{what} should be present"),
    }
}

fn snippet(body: &str) -> String {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    if end < body.len() {
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn make_response(status: u16, body: &str, time_ms: u64) -> ApiResponse {
        ApiResponse {
            status,
            status_text: "OK".to_string(),
            headers: HashMap::new(),
            body: body.to_string(),
            time_ms,
            size_bytes: body.len() as u64,
            content_type: "application/json".to_string(),
        }
    }

    #[test]
    fn passing_assertions_are_silent() {
        let response = make_response(200, r#"{"message":"success"}"#, 12);
        assert_status(&response, 200);
        assert_success(&response);
        assert_json_content_type(&response);
        assert_body_contains(&response, "success");
        assert_response_time_within(&response, 40_000);
    }

    #[test]
    #[should_panic(expected = "Status code should be 200")]
    fn status_mismatch_panics_with_actual() {
        assert_status(&make_response(404, "", 0), 200);
    }

    #[test]
    #[should_panic(expected = "Response time should be within")]
    fn slow_response_fails_threshold() {
        assert_response_time_within(&make_response(200, "", 5000), 1000);
    }

    #[test]
    fn regex_format_checks() {
        assert_matches("9876543210", r"^\d{10}$", "phone number");
        assert_matches("user@test.com", r"^[^@\s]+@[^@\s]+\.[a-z]+$", "email");
    }

    #[test]
    #[should_panic(expected = "phone number should match")]
    fn regex_mismatch_names_the_field() {
        assert_matches("not-a-phone", r"^\d{10}$", "phone number");
    }

    #[test]
    #[should_panic(expected = "access token should be present")]
    fn missing_optional_names_the_field() {
        assert_non_empty(None, "access token");
    }
}
