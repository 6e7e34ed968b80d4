//! # JSON Schema Validation
//!
//! Validates response bodies against JSON schema documents kept under
//! `schemas/`. All violations are collected into one failure message so a
//! drifted contract is reported in a single run.

use std::path::Path;

use jsonschema::{Draft, Validator};

use crate::error::{Error, Result};
use crate::http::response::ApiResponse;

/// Load and compile a schema file (draft-07, matching the documents under
/// `schemas/`).
pub fn compile(path: impl AsRef<Path>) -> Result<Validator> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|err| Error::Schema {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;
    let schema: serde_json::Value = serde_json::from_str(&raw).map_err(|err| Error::Schema {
        path: path.display().to_string(),
        reason: format!("schema is not valid JSON: {err}"),
    })?;
    jsonschema::options()
        .with_draft(Draft::Draft7)
        .build(&schema)
        .map_err(|err| Error::Schema {
            path: path.display().to_string(),
            reason: err.to_string(),
        })
}

/// Validate a JSON string against a compiled schema, returning every
/// violation as a rendered message.
pub fn validate_str(validator: &Validator, body: &str) -> Result<Vec<String>> {
    let instance: serde_json::Value =
        serde_json::from_str(body).map_err(|err| Error::json("schema validation input", err))?;
    Ok(validator
        .iter_errors(&instance)
        .map(|err| format!("{} (at instance path `{}`)", err, err.instance_path))
        .collect())
}

/// Assert a response body conforms to the schema file. Panics with the
/// full violation list on mismatch.
pub fn assert_valid(response: &ApiResponse, schema_path: impl AsRef<Path>) {
    let schema_path = schema_path.as_ref();
    let validator = match compile(schema_path) {
        Ok(validator) => validator,
        Err(err) => panic!("Failed to compile schema `{}`: {err}", schema_path.display()),
    };
    let violations = match validate_str(&validator, &response.body) {
        Ok(violations) => violations,
        Err(err) => panic!(
            "Response body is not valid JSON for schema `{}`: {err}",
            schema_path.display()
        ),
    };
    if !violations.is_empty() {
        panic!(
            "Response does not match schema `{}`:\n  {}",
            schema_path.display(),
            violations.join("\n  ")
        );
    }
}
