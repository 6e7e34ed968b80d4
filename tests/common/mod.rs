#![allow(dead_code)]
//! Shared helpers for the hermetic integration suites: a local mock
//! server standing in for the externally-owned services, and config
//! builders pointing a session at it.

use std::io::Read;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use postcheck::Config;
use tiny_http::{Header, Response, Server};

/// A request as seen by a [`MockServer`] handler.
#[derive(Debug, Clone)]
pub struct Received {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Received {
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

/// What a handler sends back. Always labeled `application/json`.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Reply {
            status,
            body: body.to_string(),
        }
    }

    pub fn ok(body: serde_json::Value) -> Self {
        Self::json(200, body)
    }

    pub fn not_found() -> Self {
        Self::json(404, serde_json::json!({}))
    }

    pub fn unauthorized() -> Self {
        Self::json(401, serde_json::json!({ "message": "unauthorized" }))
    }
}

/// Local stand-in server for one suite. Handles requests on a background
/// thread until dropped.
pub struct MockServer {
    base_url: String,
    server: Arc<Server>,
    handle: Option<JoinHandle<()>>,
}

impl MockServer {
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&Received) -> Reply + Send + Sync + 'static,
    {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("bind mock server"));
        let addr = server.server_addr().to_ip().expect("mock server address");
        let base_url = format!("http://{addr}");

        let worker = Arc::clone(&server);
        let handle = thread::spawn(move || {
            for mut request in worker.incoming_requests() {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);

                let (path, query) = split_url(request.url());
                let received = Received {
                    method: request.method().to_string(),
                    path,
                    query,
                    headers: request
                        .headers()
                        .iter()
                        .map(|header| (header.field.to_string(), header.value.to_string()))
                        .collect(),
                    body,
                };

                let reply = handler(&received);
                let content_type =
                    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                        .expect("content-type header");
                let response = Response::from_string(reply.body)
                    .with_status_code(reply.status)
                    .with_header(content_type);
                let _ = request.respond(response);
            }
        });

        MockServer {
            base_url,
            server,
            handle: Some(handle),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn split_url(url: &str) -> (String, Vec<(String, String)>) {
    let (path, raw_query) = match url.split_once('?') {
        Some((path, query)) => (path, query),
        None => (url, ""),
    };
    let query = raw_query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect();
    (path.to_string(), query)
}

/// Config pointing at a mock server, with quiet request logging so suite
/// output stays readable.
pub fn mock_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.base_url = server.base_url().to_string();
    config.timeout_ms = 5_000;
    config.log_request = false;
    config.log_response = false;
    config
}
