//! Crate-wide error type.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the framework's own layers. Assertion failures are
/// not represented here; those panic through the test harness directly.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is absent for the current environment.
    #[error("missing required config value `{0}`")]
    MissingConfig(&'static str),

    /// A header name or value was rejected by the HTTP layer.
    #[error("invalid header `{name}`: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Transport-level failure from the HTTP client.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A success body was expected but the service answered outside 2xx.
    #[error("unexpected HTTP status {status} {status_text} (content-type: {content_type}): {body_snippet}")]
    UnexpectedStatus {
        status: u16,
        status_text: String,
        content_type: String,
        body_snippet: String,
    },

    /// JSON (de)serialization failure, tagged with the target type.
    #[error("failed to deserialize JSON into {target}: {source}")]
    Json {
        target: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A variable was read through a typed getter but never produced.
    #[error("variable `{0}` not found")]
    MissingVariable(String),

    /// A variable exists but does not parse as the requested type.
    #[error("variable `{key}` has non-{expected} value `{value}`")]
    InvalidVariable {
        key: String,
        expected: &'static str,
        value: String,
    },

    /// A JSON schema file could not be loaded or compiled.
    #[error("schema error for `{path}`: {reason}")]
    Schema { path: String, reason: String },

    /// Filesystem failure outside the swallowed persist path.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a `Json` error, logging the offending payload the way the
    /// HTTP error path does.
    pub(crate) fn json(target: &'static str, source: serde_json::Error) -> Self {
        Error::Json { target, source }
    }
}
