//! # Authentication
//!
//! Authentication modes applied to outgoing requests: Bearer token,
//! Basic auth, and API key (header or query). The active mode normally
//! comes from [`crate::Config::auth_method`]; suites may also override it
//! per request for token-bearing calls.

/// Supported authentication methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    None,
    Bearer {
        token: String,
    },
    Basic {
        username: String,
        password: String,
    },
    ApiKey {
        key: String,
        value: String,
        location: ApiKeyLocation,
    },
}

/// Where to place the API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyLocation {
    Header,
    Query,
}

impl Default for AuthMethod {
    fn default() -> Self {
        AuthMethod::None
    }
}

impl AuthMethod {
    /// Bearer-style JWT header used by the BOMB admin API, which expects
    /// `authorization: JWT <token>` rather than the standard scheme.
    pub fn jwt_header(token: &str) -> (String, String) {
        ("authorization".to_string(), format!("JWT {token}"))
    }
}
