use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::error::Result;

/// Captured HTTP response: everything a test needs to assert on, read
/// eagerly so the connection is released before assertions run.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub time_ms: u64,
    pub size_bytes: u64,
    pub content_type: String,
}

impl ApiResponse {
    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Header lookup, case-insensitive on the header name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Deserialize the body into `T`, validating the status code first.
    /// See [`crate::json::from_response`].
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        crate::json::from_response(self)
    }

    /// Deserialize an array body into a list of `T`.
    pub fn json_list<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        crate::json::from_response_list(self)
    }
}
