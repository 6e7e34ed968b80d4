//! # JSON Utilities
//!
//! Serialization and deserialization helpers shared by every suite.
//! Deserialization is lenient (unknown fields are ignored); failures are
//! logged with enough context to diagnose a drifted endpoint contract
//! before the error propagates to the test.

use std::any::type_name;
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::http::response::ApiResponse;

const BODY_SNIPPET_LEN: usize = 500;

/// Serialize a value to a compact JSON string.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|err| Error::json(type_name::<T>(), err))
}

/// Serialize a value to pretty-printed JSON (request-body logging).
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|err| Error::json(type_name::<T>(), err))
}

/// Deserialize a JSON string into `T`, logging the target type and a
/// snippet of the offending payload on failure.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|err| {
        log::error!(
            "JSON deserialization into {} failed: {err}; payload: {}",
            type_name::<T>(),
            snippet(json, BODY_SNIPPET_LEN)
        );
        Error::json(type_name::<T>(), err)
    })
}

/// Deserialize a response body into `T`, validating the status code first.
///
/// A non-2xx status is logged with its status line, content type, and a
/// body snippet, then surfaced as [`Error::UnexpectedStatus`]; the body
/// is never fed to the deserializer. A non-JSON content type is only
/// warned about; some services mislabel their payloads.
pub fn from_response<T: DeserializeOwned>(response: &ApiResponse) -> Result<T> {
    check_success(response, type_name::<T>())?;

    if !response.content_type.to_lowercase().contains("json") {
        log::warn!(
            "Response Content-Type is not JSON ({}), attempting to parse anyway",
            response.content_type
        );
    }

    from_json(&response.body)
}

/// Deserialize an array response body into a list of `T`.
pub fn from_response_list<T: DeserializeOwned>(response: &ApiResponse) -> Result<Vec<T>> {
    check_success(response, type_name::<T>())?;
    from_json(&response.body)
}

/// Read a JSON file as a string.
pub fn read_json_file(path: impl AsRef<Path>) -> Result<String> {
    Ok(fs::read_to_string(path.as_ref())?)
}

/// Read a JSON file and deserialize it into `T`.
pub fn read_json_file_as<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let raw = read_json_file(path)?;
    from_json(&raw)
}

fn check_success(response: &ApiResponse, target: &str) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }

    log::error!(
        "HTTP {} {} while deserializing into {target} (content-type: {}); body: {}",
        response.status,
        response.status_text,
        response.content_type,
        snippet(&response.body, 1000)
    );

    Err(Error::UnexpectedStatus {
        status: response.status,
        status_text: response.status_text.clone(),
        content_type: response.content_type.clone(),
        body_snippet: snippet(&response.body, 200),
    })
}

fn snippet(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        return text.to_string();
    }
    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
