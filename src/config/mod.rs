//! # Layered Configuration
//!
//! Environment-specific settings loaded from TOML files. `config.toml`
//! supplies the base layer; when an environment is selected (explicitly
//! or through the `POSTCHECK_ENV` variable) the matching
//! `config-{env}.toml` is merged over it, key by key. Every key has a
//! built-in default, so a missing base file is non-fatal.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;

use crate::auth::{ApiKeyLocation, AuthMethod};
use crate::error::{Error, Result};

/// Base configuration file name.
pub const BASE_FILE: &str = "config.toml";

/// Process variable selecting the environment overlay.
pub const ENV_VAR: &str = "POSTCHECK_ENV";

/// Top-level framework configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL for the placeholder API under test.
    pub base_url: String,
    /// Connect + request timeout applied to every call.
    pub timeout_ms: u64,
    /// Fixed retry budget for failed test cases (whole-test retry).
    pub retry_count: u32,
    pub log_request: bool,
    pub log_response: bool,
    pub content_type: String,
    /// Latency threshold compared against response times in assertions.
    pub response_time_threshold_ms: u64,
    pub auth: AuthConfig,
    pub login: LoginConfig,
    pub buyer_app: BuyerAppConfig,
}

/// Authentication settings for the default client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// One of `none`, `basic`, `bearer` (alias `token`), `api_key`.
    #[serde(rename = "type")]
    pub auth_type: String,
    pub token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Credentials used by the BOMB login flow.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginConfig {
    pub phone_number: Option<String>,
    pub token: Option<String>,
}

/// Buyer App (Navo) backend settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuyerAppConfig {
    pub base_url: String,
    pub phone_number: Option<String>,
    pub token: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: "https://jsonplaceholder.typicode.com".to_string(),
            timeout_ms: 30_000,
            retry_count: 3,
            log_request: true,
            log_response: true,
            content_type: "application/json".to_string(),
            response_time_threshold_ms: 40_000,
            auth: AuthConfig::default(),
            login: LoginConfig::default(),
            buyer_app: BuyerAppConfig::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig {
            auth_type: "none".to_string(),
            token: None,
            username: None,
            password: None,
        }
    }
}

impl Default for BuyerAppConfig {
    fn default() -> Self {
        BuyerAppConfig {
            base_url: "https://api.navofashion.in".to_string(),
            phone_number: None,
            token: "000000".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `dir`, merging the `config-{env}.toml`
    /// overlay when an environment is given. A missing base file falls
    /// back to built-in defaults; a missing overlay is logged and skipped.
    pub fn load(dir: impl AsRef<Path>, env: Option<&str>) -> Result<Self> {
        let dir = dir.as_ref();
        let base_path = dir.join(BASE_FILE);

        let mut value = match fs::read_to_string(&base_path) {
            Ok(raw) => parse_toml(&raw, &base_path)?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::warn!(
                    "Config file `{}` not found, using built-in defaults",
                    base_path.display()
                );
                toml::Value::Table(toml::map::Map::new())
            }
            Err(err) => {
                return Err(Error::Config(format!(
                    "failed to read `{}`: {err}",
                    base_path.display()
                )));
            }
        };

        if let Some(env) = env {
            let overlay_path = dir.join(format!("config-{env}.toml"));
            match fs::read_to_string(&overlay_path) {
                Ok(raw) => {
                    let overlay = parse_toml(&raw, &overlay_path)?;
                    merge(&mut value, overlay);
                    log::info!("Applied config overlay for environment `{env}`");
                }
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    log::warn!(
                        "No config overlay found for environment `{env}` at `{}`",
                        overlay_path.display()
                    );
                }
                Err(err) => {
                    return Err(Error::Config(format!(
                        "failed to read `{}`: {err}",
                        overlay_path.display()
                    )));
                }
            }
        }

        value
            .try_into()
            .map_err(|err| Error::Config(format!("invalid configuration: {err}")))
    }

    /// Load from the current directory, selecting the environment from
    /// `POSTCHECK_ENV` if set.
    pub fn load_default() -> Result<Self> {
        let env = std::env::var(ENV_VAR).ok();
        Self::load(".", env.as_deref())
    }

    /// Resolve the configured auth mode into a concrete [`AuthMethod`],
    /// failing with `MissingConfig` when required credentials are absent.
    pub fn auth_method(&self) -> Result<AuthMethod> {
        match self.auth.auth_type.to_lowercase().as_str() {
            "basic" => Ok(AuthMethod::Basic {
                username: require(self.auth.username.as_deref(), "auth.username")?.to_string(),
                password: require(self.auth.password.as_deref(), "auth.password")?.to_string(),
            }),
            "bearer" | "token" => Ok(AuthMethod::Bearer {
                token: require(self.auth.token.as_deref(), "auth.token")?.to_string(),
            }),
            "api_key" => Ok(AuthMethod::ApiKey {
                key: "X-API-Key".to_string(),
                value: require(self.auth.token.as_deref(), "auth.token")?.to_string(),
                location: ApiKeyLocation::Header,
            }),
            "none" => Ok(AuthMethod::None),
            other => {
                log::warn!("Unknown auth type `{other}`, no authentication configured");
                Ok(AuthMethod::None)
            }
        }
    }

    /// Login phone number, required by the BOMB auth suites.
    pub fn login_phone_number(&self) -> Result<&str> {
        require(self.login.phone_number.as_deref(), "login.phone_number")
    }

    /// Static login token, required by the BOMB auth suites.
    pub fn login_token(&self) -> Result<&str> {
        require(self.login.token.as_deref(), "login.token")
    }

    /// Buyer App phone number, required by the Buyer App auth suites.
    pub fn buyer_app_phone_number(&self) -> Result<&str> {
        require(
            self.buyer_app.phone_number.as_deref(),
            "buyer_app.phone_number",
        )
    }
}

fn require<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::MissingConfig(name)),
    }
}

fn parse_toml(raw: &str, path: &Path) -> Result<toml::Value> {
    toml::from_str(raw)
        .map_err(|err| Error::Config(format!("failed to parse `{}`: {err}", path.display())))
}

/// Merge `overlay` into `base`. Tables merge key by key; any other value
/// in the overlay replaces the base value outright.
fn merge(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.base_url, "https://jsonplaceholder.typicode.com");
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.retry_count, 3);
        assert_eq!(config.response_time_threshold_ms, 40_000);
        assert_eq!(config.auth.auth_type, "none");
        assert_eq!(config.buyer_app.token, "000000");
    }

    #[test]
    fn overlay_overrides_base_key_by_key() {
        let mut base: toml::Value = toml::from_str(
            "base_url = \"https://base.example.com\"\ntimeout_ms = 1000\n[auth]\ntype = \"none\"",
        )
        .unwrap();
        let overlay: toml::Value =
            toml::from_str("base_url = \"https://staging.example.com\"\n[auth]\ntype = \"bearer\"\ntoken = \"t\"")
                .unwrap();

        merge(&mut base, overlay);
        let config: Config = base.try_into().unwrap();

        assert_eq!(config.base_url, "https://staging.example.com");
        // Untouched base keys survive the merge.
        assert_eq!(config.timeout_ms, 1000);
        assert_eq!(config.auth.auth_type, "bearer");
        assert_eq!(config.auth.token.as_deref(), Some("t"));
    }

    #[test]
    fn load_with_missing_base_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path(), None).unwrap();
        assert_eq!(config.base_url, "https://jsonplaceholder.typicode.com");
    }

    #[test]
    fn load_applies_environment_overlay() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(BASE_FILE),
            "base_url = \"https://base.example.com\"\nretry_count = 5\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("config-staging.toml"),
            "base_url = \"https://staging.example.com\"\n",
        )
        .unwrap();

        let config = Config::load(dir.path(), Some("staging")).unwrap();
        assert_eq!(config.base_url, "https://staging.example.com");
        assert_eq!(config.retry_count, 5);
    }

    #[test]
    fn missing_overlay_is_non_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(BASE_FILE),
            "base_url = \"https://base.example.com\"\n",
        )
        .unwrap();

        let config = Config::load(dir.path(), Some("prod")).unwrap();
        assert_eq!(config.base_url, "https://base.example.com");
    }

    #[test]
    fn auth_method_requires_credentials() {
        let config: Config = toml::from_str("[auth]\ntype = \"bearer\"").unwrap();
        assert!(matches!(
            config.auth_method(),
            Err(Error::MissingConfig("auth.token"))
        ));

        let config: Config = toml::from_str("[auth]\ntype = \"bearer\"\ntoken = \"abc\"").unwrap();
        assert!(matches!(
            config.auth_method().unwrap(),
            AuthMethod::Bearer { token } if token == "abc"
        ));
    }
}
