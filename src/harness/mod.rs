//! # Suite Harness
//!
//! One-time process setup, the per-suite [`TestSession`] context, and a
//! fixed-budget retry wrapper for flaky end-to-end cases.
//!
//! Suites construct a `TestSession` in their setup and thread it through
//! their steps explicitly; shared state between dependent steps flows
//! through the session or the [`crate::vars`] store, never through
//! mutable statics.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use std::time::Instant;

use crate::config::Config;
use crate::error::Result;
use crate::http::client::RestClient;
use crate::vars;

static INIT: Once = Once::new();

/// Process-wide setup: logger and variable-store seed. Idempotent; every
/// suite entry point calls this.
///
/// A missing seed file is non-fatal (the store runs with empty defaults);
/// a corrupt one is logged and leaves the store uninitialized, so
/// dependent reads fail visibly in the tests that need them.
pub fn ensure_initialized() {
    INIT.call_once(|| {
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("info"),
        )
        .is_test(true)
        .try_init();

        if let Err(err) = vars::initialize(vars::VARIABLES_FILE) {
            log::error!("Failed to initialize variable store: {err}");
        }
    });
}

/// Per-suite context: loaded configuration plus a ready client.
pub struct TestSession {
    pub config: Config,
    pub client: RestClient,
}

impl TestSession {
    /// Session against the configured environment (`config.toml` plus the
    /// `POSTCHECK_ENV` overlay).
    pub fn new() -> Result<Self> {
        ensure_initialized();
        let config = Config::load_default()?;
        let client = RestClient::new(&config)?;
        Ok(TestSession { config, client })
    }

    /// Session with an explicit configuration (hermetic suites point
    /// `base_url` at a local stand-in server).
    pub fn with_config(config: Config) -> Result<Self> {
        ensure_initialized();
        let client = RestClient::new(&config)?;
        Ok(TestSession { config, client })
    }

    /// Client against the Buyer App backend, sharing this session's
    /// timeout/auth settings.
    pub fn buyer_app_client(&self) -> Result<RestClient> {
        RestClient::for_base_url(&self.config, &self.config.buyer_app.base_url)
    }

    /// Client against an arbitrary base URL with this session's settings.
    pub fn client_for(&self, base_url: &str) -> Result<RestClient> {
        RestClient::for_base_url(&self.config, base_url)
    }
}

/// Run a test body, retrying the whole thing up to `retries` more times
/// if it panics. The retry is all-or-nothing (no request-level retry)
/// and the last failure is re-raised so the harness still reports it.
pub fn retry_failed<F: Fn()>(name: &str, retries: u32, test: F) {
    let total = retries + 1;
    let mut last_panic: Option<Box<dyn Any + Send>> = None;

    for attempt in 1..=total {
        let started = Instant::now();
        match panic::catch_unwind(AssertUnwindSafe(&test)) {
            Ok(()) => {
                log::info!(
                    "Test PASSED: {name} (attempt {attempt} of {total}, {}ms)",
                    started.elapsed().as_millis()
                );
                return;
            }
            Err(payload) => {
                log::error!(
                    "Test FAILED: {name} (attempt {attempt} of {total}): {}",
                    panic_message(payload.as_ref())
                );
                last_panic = Some(payload);
                if attempt < total {
                    log::info!("Retrying test: {name} (attempt {} of {total})", attempt + 1);
                }
            }
        }
    }

    if let Some(payload) = last_panic {
        panic::resume_unwind(payload);
    }
}

pub fn log_suite_start(name: &str) {
    log::info!("========================================");
    log::info!("Test Suite Started: {name}");
    log::info!("========================================");
}

pub fn log_suite_finish(name: &str) {
    log::info!("Test Suite Finished: {name}");
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
