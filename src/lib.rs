//! # postcheck
//!
//! API test-automation framework: layered configuration, a blocking HTTP
//! client with verb helpers, JSON (de)serialization utilities, a
//! thread-partitioned shared variable store, and typed request/response
//! models for the services under test. Test suites live under `tests/`
//! and drive externally-owned REST services (or local stand-ins) through
//! these layers, asserting on status codes, field values, formats, and
//! response latency.

pub mod auth;
pub mod check;
pub mod config;
pub mod data;
pub mod endpoints;
pub mod error;
pub mod harness;
pub mod http;
pub mod json;
pub mod models;
pub mod schema;
pub mod vars;

pub use config::Config;
pub use error::{Error, Result};
pub use harness::TestSession;
pub use http::client::RestClient;
pub use http::response::ApiResponse;
