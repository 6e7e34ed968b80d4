//! # HTTP Layer
//!
//! Blocking HTTP client wrapper: verb-named helpers, path-parameter
//! substitution, query parameters, custom headers, and auth application,
//! returning a captured [`response::ApiResponse`].

pub mod client;
pub mod method;
pub mod response;
