use std::collections::HashMap;
use std::time::{Duration, Instant};

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderName, HeaderValue};
use serde::Serialize;

use crate::auth::{ApiKeyLocation, AuthMethod};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::method::HttpMethod;
use crate::http::response::ApiResponse;

/// Blocking REST client with verb-named helpers.
///
/// Every call substitutes `{name}` path parameters, applies the
/// configured auth mode and content-type headers, measures elapsed time,
/// and reads the full response body before returning.
pub struct RestClient {
    http: Client,
    base_url: String,
    content_type: String,
    auth: AuthMethod,
    log_request: bool,
    log_response: bool,
}

/// Optional parts of a request. All verb helpers funnel into
/// [`RestClient::send`] with one of these.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub path_params: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    /// Per-request auth override; `None` falls back to the client's mode.
    pub auth: Option<AuthMethod>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path_param(mut self, key: &str, value: impl ToString) -> Self {
        self.path_params.push((key.to_string(), value.to_string()));
        self
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn header(mut self, key: &str, value: impl ToString) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json_body<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body =
            Some(serde_json::to_value(body).map_err(|err| Error::json("request body", err))?);
        Ok(self)
    }

    pub fn auth(mut self, auth: AuthMethod) -> Self {
        self.auth = Some(auth);
        self
    }
}

impl RestClient {
    /// Build a client from the loaded configuration (base URL, timeout,
    /// content type, auth mode, request/response logging).
    pub fn new(config: &Config) -> Result<Self> {
        Self::for_base_url(config, &config.base_url)
    }

    /// Build a client against a different base URL (the Buyer App backend,
    /// or a local stand-in server) while keeping the rest of the config.
    pub fn for_base_url(config: &Config, base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(RestClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            content_type: config.content_type.clone(),
            auth: config.auth_method()?,
            log_request: config.log_request,
            log_response: config.log_response,
        })
    }

    /// Replace the client-level auth mode (e.g. after a login flow
    /// produced a token).
    pub fn set_auth(&mut self, auth: AuthMethod) {
        self.auth = auth;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn get(&self, endpoint: &str) -> Result<ApiResponse> {
        self.send(HttpMethod::Get, endpoint, RequestOptions::new())
    }

    pub fn get_with_path(
        &self,
        endpoint: &str,
        path_params: &[(&str, &str)],
    ) -> Result<ApiResponse> {
        self.send(
            HttpMethod::Get,
            endpoint,
            with_path_params(RequestOptions::new(), path_params),
        )
    }

    pub fn get_with_query(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<ApiResponse> {
        let mut options = RequestOptions::new();
        for (key, value) in query {
            options = options.query(key, value);
        }
        self.send(HttpMethod::Get, endpoint, options)
    }

    pub fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<ApiResponse> {
        self.send(
            HttpMethod::Post,
            endpoint,
            RequestOptions::new().json_body(body)?,
        )
    }

    pub fn post_with_headers<T: Serialize>(
        &self,
        endpoint: &str,
        body: &T,
        headers: &[(&str, &str)],
    ) -> Result<ApiResponse> {
        let mut options = RequestOptions::new().json_body(body)?;
        for (key, value) in headers {
            options = options.header(key, value);
        }
        self.send(HttpMethod::Post, endpoint, options)
    }

    pub fn put<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<ApiResponse> {
        self.send(
            HttpMethod::Put,
            endpoint,
            RequestOptions::new().json_body(body)?,
        )
    }

    pub fn put_with_path<T: Serialize>(
        &self,
        endpoint: &str,
        path_params: &[(&str, &str)],
        body: &T,
    ) -> Result<ApiResponse> {
        self.send(
            HttpMethod::Put,
            endpoint,
            with_path_params(RequestOptions::new().json_body(body)?, path_params),
        )
    }

    pub fn patch<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<ApiResponse> {
        self.send(
            HttpMethod::Patch,
            endpoint,
            RequestOptions::new().json_body(body)?,
        )
    }

    pub fn patch_with_path<T: Serialize>(
        &self,
        endpoint: &str,
        path_params: &[(&str, &str)],
        body: &T,
    ) -> Result<ApiResponse> {
        self.send(
            HttpMethod::Patch,
            endpoint,
            with_path_params(RequestOptions::new().json_body(body)?, path_params),
        )
    }

    pub fn delete(&self, endpoint: &str) -> Result<ApiResponse> {
        self.send(HttpMethod::Delete, endpoint, RequestOptions::new())
    }

    pub fn delete_with_path(
        &self,
        endpoint: &str,
        path_params: &[(&str, &str)],
    ) -> Result<ApiResponse> {
        self.send(
            HttpMethod::Delete,
            endpoint,
            with_path_params(RequestOptions::new(), path_params),
        )
    }

    /// Build and send a request, capturing the response eagerly.
    pub fn send(
        &self,
        method: HttpMethod,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        let path = substitute_path_params(endpoint, &options.path_params);
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .http
            .request(method.into(), &url)
            .header(CONTENT_TYPE, &self.content_type)
            .header(ACCEPT, &self.content_type);

        request = apply_headers(request, &options.headers)?;
        request = apply_auth(request, options.auth.as_ref().unwrap_or(&self.auth))?;

        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        if self.log_request {
            log::info!("Performing {method} request to: {url}");
        }

        let started = Instant::now();
        let response = request.send()?;
        let time_ms = started.elapsed().as_millis() as u64;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            headers.insert(
                key.to_string(),
                value.to_str().unwrap_or_default().to_string(),
            );
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("text/plain")
            .to_string();

        let body = response.text()?;

        let captured = ApiResponse {
            status: status.as_u16(),
            status_text,
            headers,
            size_bytes: body.len() as u64,
            body,
            time_ms,
            content_type,
        };

        if self.log_response {
            log::info!(
                "{method} {url} -> {} {} in {}ms ({} bytes)",
                captured.status,
                captured.status_text,
                captured.time_ms,
                captured.size_bytes
            );
        }

        Ok(captured)
    }
}

fn with_path_params(mut options: RequestOptions, path_params: &[(&str, &str)]) -> RequestOptions {
    for (key, value) in path_params {
        options = options.path_param(key, value);
    }
    options
}

/// Replace `{name}` segments in an endpoint template. Unknown placeholders
/// are left intact so the resulting request fails visibly server-side
/// instead of silently dropping a segment.
fn substitute_path_params(endpoint: &str, params: &[(String, String)]) -> String {
    let mut path = endpoint.to_string();
    for (key, value) in params {
        path = path.replace(&format!("{{{key}}}"), value);
    }
    path
}

fn apply_headers(
    mut request: RequestBuilder,
    headers: &[(String, String)],
) -> Result<RequestBuilder> {
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|err| Error::InvalidHeader {
            name: key.clone(),
            reason: err.to_string(),
        })?;
        let value = HeaderValue::from_str(value).map_err(|err| Error::InvalidHeader {
            name: key.clone(),
            reason: err.to_string(),
        })?;
        request = request.header(name, value);
    }
    Ok(request)
}

fn apply_auth(mut request: RequestBuilder, auth: &AuthMethod) -> Result<RequestBuilder> {
    match auth {
        AuthMethod::None => {}
        AuthMethod::Bearer { token } => {
            request = request.bearer_auth(token);
        }
        AuthMethod::Basic { username, password } => {
            request = request.basic_auth(username, Some(password));
        }
        AuthMethod::ApiKey {
            key,
            value,
            location: ApiKeyLocation::Header,
        } => {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|err| {
                Error::InvalidHeader {
                    name: key.clone(),
                    reason: err.to_string(),
                }
            })?;
            let value = HeaderValue::from_str(value).map_err(|err| Error::InvalidHeader {
                name: key.clone(),
                reason: err.to_string(),
            })?;
            request = request.header(name, value);
        }
        AuthMethod::ApiKey {
            key,
            value,
            location: ApiKeyLocation::Query,
        } => {
            request = request.query(&[(key.as_str(), value.as_str())]);
        }
    }
    Ok(request)
}
