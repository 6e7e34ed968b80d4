//! # Shared Variable Store
//!
//! Process-wide, thread-partitioned key/value store that lets one test
//! step publish a computed value (an auth token, a created resource ID)
//! for consumption by later, dependent steps, without a shared database
//! or explicit parameter threading.
//!
//! Each thread works on its own copy of the variables, seeded from a
//! global snapshot loaded once from `test-variables.json`. Writes are
//! visible only to the writing thread; `persist` promotes a single key
//! back to the backing file (and the global snapshot) so independent
//! runs can share it. Long-running worker threads reused across
//! unrelated runs must call [`clear`] or [`cleanup`] themselves; maps
//! are never dropped automatically.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, ThreadId};

use parking_lot::RwLock;

use crate::error::{Error, Result};

/// Default backing file for seed values and persisted keys.
pub const VARIABLES_FILE: &str = "test-variables.json";

/// Key holding the BOMB API access token.
pub const TOKEN_KEY: &str = "bomb_token";

/// Key holding the Buyer App access token.
pub const BUYER_APP_TOKEN_KEY: &str = "buyer_app_token";

/// Thread-partitioned variable store.
///
/// The process-wide instance lives behind [`global`]; independent
/// instances exist so the store itself can be tested with scratch
/// backing files.
pub struct VariableStore {
    /// Seed snapshot copied into each thread's map on first access.
    globals: RwLock<HashMap<String, String>>,
    /// Per-thread partitions, keyed by thread id rather than a
    /// thread-local so `persist`/tests can reason about them uniformly.
    threads: RwLock<HashMap<ThreadId, HashMap<String, String>>>,
    backing: RwLock<Option<PathBuf>>,
    initialized: AtomicBool,
}

impl Default for VariableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableStore {
    pub fn new() -> Self {
        VariableStore {
            globals: RwLock::new(HashMap::new()),
            threads: RwLock::new(HashMap::new()),
            backing: RwLock::new(None),
            initialized: AtomicBool::new(false),
        }
    }

    /// Load the seed snapshot from `path`. Idempotent; later calls are
    /// skipped. A missing file is non-fatal: the store runs with empty
    /// defaults, and the path is still recorded so a later [`persist`]
    /// can create the file.
    ///
    /// [`persist`]: VariableStore::persist
    pub fn initialize(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut backing = self.backing.write();
        if self.initialized.load(Ordering::Acquire) {
            log::debug!("Variable store already initialized, skipping");
            return Ok(());
        }

        let path = path.as_ref().to_path_buf();
        match std::fs::read_to_string(&path) {
            Ok(raw) => {
                let seed: HashMap<String, String> =
                    serde_json::from_str(&raw).map_err(|err| Error::json("seed variables", err))?;
                log::info!(
                    "Variable store initialized with {} variables from `{}`",
                    seed.len(),
                    path.display()
                );
                *self.globals.write() = seed;
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::warn!(
                    "Unable to find `{}`; variable store will run with empty initial values",
                    path.display()
                );
            }
            Err(err) => return Err(Error::Io(err)),
        }

        *backing = Some(path);
        self.initialized.store(true, Ordering::Release);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Run `f` against the current thread's map, creating it from the
    /// global snapshot on first access.
    fn with_thread_map<R>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> R) -> R {
        let id = thread::current().id();
        let mut threads = self.threads.write();
        let map = threads.entry(id).or_insert_with(|| {
            log::debug!("Seeding variables for thread {id:?}");
            self.globals.read().clone()
        });
        f(map)
    }

    /// Get a variable for the current thread. Unknown keys return `None`,
    /// never an error.
    pub fn get(&self, key: &str) -> Option<String> {
        if key.trim().is_empty() {
            log::warn!("Attempted to get variable with empty key");
            return None;
        }
        self.with_thread_map(|map| map.get(key).cloned())
    }

    /// Get a variable, substituting `default` when absent.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Get a variable parsed as an integer. Absence or a non-numeric
    /// value is an error, surfacing suite-ordering mistakes where a
    /// dependent test ran before its producer.
    pub fn get_int(&self, key: &str) -> Result<i64> {
        let value = self
            .get(key)
            .ok_or_else(|| Error::MissingVariable(key.to_string()))?;
        value.parse::<i64>().map_err(|_| {
            log::error!("Failed to parse variable `{key}` with value `{value}` as integer");
            Error::InvalidVariable {
                key: key.to_string(),
                expected: "integer",
                value,
            }
        })
    }

    /// Get a variable parsed as an integer, substituting `default` when
    /// absent or unparsable.
    pub fn get_int_or(&self, key: &str, default: i64) -> i64 {
        match self.get(key) {
            None => default,
            Some(value) => value.parse().unwrap_or_else(|_| {
                log::warn!("Failed to parse variable `{key}` as integer, using default {default}");
                default
            }),
        }
    }

    /// Get a variable parsed as a boolean (strict `true`/`false`).
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        let value = self
            .get(key)
            .ok_or_else(|| Error::MissingVariable(key.to_string()))?;
        value.parse::<bool>().map_err(|_| {
            log::error!("Failed to parse variable `{key}` with value `{value}` as boolean");
            Error::InvalidVariable {
                key: key.to_string(),
                expected: "boolean",
                value,
            }
        })
    }

    /// Get a variable parsed as a boolean, substituting `default` when
    /// absent or unparsable.
    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            None => default,
            Some(value) => value.parse().unwrap_or_else(|_| {
                log::warn!("Failed to parse variable `{key}` as boolean, using default {default}");
                default
            }),
        }
    }

    /// Set a variable in the current thread's map, overwriting silently.
    pub fn set(&self, key: &str, value: impl ToString) {
        if key.trim().is_empty() {
            log::warn!("Attempted to set variable with empty key");
            return;
        }
        let value = value.to_string();
        log::debug!("Variable `{key}` updated to: {}", truncate(&value, 50));
        self.with_thread_map(|map| {
            map.insert(key.to_string(), value);
        });
    }

    pub fn has(&self, key: &str) -> bool {
        !key.is_empty() && self.with_thread_map(|map| map.contains_key(key))
    }

    /// Remove a variable from the current thread's map, returning the
    /// previous value.
    pub fn remove(&self, key: &str) -> Option<String> {
        let removed = self.with_thread_map(|map| map.remove(key));
        if removed.is_some() {
            log::debug!("Variable `{key}` removed");
        }
        removed
    }

    /// Empty the current thread's map. Other threads and the global seed
    /// snapshot are untouched.
    pub fn clear(&self) {
        let id = thread::current().id();
        if let Some(map) = self.threads.write().get_mut(&id) {
            map.clear();
            log::debug!("All variables cleared for thread {id:?}");
        }
    }

    /// Drop the current thread's map entirely; the next access re-seeds
    /// from the global snapshot. Call from reused worker threads between
    /// unrelated runs.
    pub fn cleanup(&self) {
        let id = thread::current().id();
        self.threads.write().remove(&id);
        log::debug!("Thread-local variables cleaned up for thread {id:?}");
    }

    /// Number of variables in the current thread's map.
    pub fn count(&self) -> usize {
        self.with_thread_map(|map| map.len())
    }

    /// Copy of the current thread's map (debugging aid).
    pub fn all(&self) -> HashMap<String, String> {
        self.with_thread_map(|map| map.clone())
    }

    /// Promote the current thread's value for `key` into the backing file
    /// and the global seed snapshot (so newly created threads observe it).
    ///
    /// The file is re-read before the merge so unrelated keys written by
    /// other processes since the last load survive; the merge itself is
    /// last-writer-wins with no locking against concurrent persisters,
    /// an accepted limitation for a test-convenience cache. Any file
    /// failure is logged and swallowed: losing a persisted token must not
    /// fail the currently-passing test.
    pub fn persist(&self, key: &str) {
        let Some(value) = self.get(key) else {
            log::warn!("Cannot persist `{key}`: no value set on this thread");
            return;
        };

        let path = self.backing.read().clone();
        let Some(path) = path else {
            log::warn!("Cannot persist `{key}`: store has no backing file");
            return;
        };

        let mut on_disk: HashMap<String, String> = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(err) => {
                    log::warn!(
                        "Backing file `{}` is not valid JSON ({err}), rewriting from scratch",
                        path.display()
                    );
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                log::error!("Failed to read `{}` during persist: {err}", path.display());
                return;
            }
        };

        on_disk.insert(key.to_string(), value.clone());

        let raw = match serde_json::to_string_pretty(&on_disk) {
            Ok(raw) => raw,
            Err(err) => {
                log::error!("Failed to serialize variables for persist: {err}");
                return;
            }
        };
        if let Err(err) = std::fs::write(&path, raw) {
            log::error!("Failed to persist `{key}` to `{}`: {err}", path.display());
            return;
        }

        self.globals.write().insert(key.to_string(), value);
        log::info!("Persisted `{key}` to `{}`", path.display());
    }
}

fn truncate(value: &str, max_len: usize) -> String {
    if value.len() <= max_len {
        return value.to_string();
    }
    let mut end = max_len;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &value[..end])
}

// ─── Process-wide store ──────────────────────────────────────────────────────

/// The process-wide store shared by every suite.
pub fn global() -> &'static VariableStore {
    static STORE: OnceLock<VariableStore> = OnceLock::new();
    STORE.get_or_init(VariableStore::new)
}

/// Initialize the process-wide store. Idempotent.
pub fn initialize(path: impl AsRef<Path>) -> Result<()> {
    global().initialize(path)
}

pub fn is_initialized() -> bool {
    global().is_initialized()
}

pub fn get(key: &str) -> Option<String> {
    global().get(key)
}

pub fn get_or(key: &str, default: &str) -> String {
    global().get_or(key, default)
}

pub fn get_int(key: &str) -> Result<i64> {
    global().get_int(key)
}

pub fn get_int_or(key: &str, default: i64) -> i64 {
    global().get_int_or(key, default)
}

pub fn get_bool(key: &str) -> Result<bool> {
    global().get_bool(key)
}

pub fn get_bool_or(key: &str, default: bool) -> bool {
    global().get_bool_or(key, default)
}

pub fn set(key: &str, value: impl ToString) {
    global().set(key, value)
}

pub fn has(key: &str) -> bool {
    global().has(key)
}

pub fn remove(key: &str) -> Option<String> {
    global().remove(key)
}

pub fn clear() {
    global().clear()
}

pub fn cleanup() {
    global().cleanup()
}

// ─── Token conveniences ──────────────────────────────────────────────────────

/// BOMB API access token, if a login flow stored one.
pub fn token() -> Option<String> {
    get(TOKEN_KEY)
}

pub fn set_token(token: &str) {
    set(TOKEN_KEY, token);
    log::info!("BOMB token updated");
}

/// Persist the BOMB token for sharing across independent runs.
pub fn save_token() {
    match token() {
        Some(value) if !value.is_empty() => global().persist(TOKEN_KEY),
        _ => log::warn!("Cannot save empty BOMB token to file"),
    }
}

/// Buyer App access token, if a login flow stored one.
pub fn buyer_app_token() -> Option<String> {
    get(BUYER_APP_TOKEN_KEY)
}

pub fn set_buyer_app_token(token: &str) {
    set(BUYER_APP_TOKEN_KEY, token);
    log::info!("Buyer App token updated");
}

pub fn save_buyer_app_token() {
    match buyer_app_token() {
        Some(value) if !value.is_empty() => global().persist(BUYER_APP_TOKEN_KEY),
        _ => log::warn!("Cannot save empty Buyer App token to file"),
    }
}

/// Response-time threshold used by latency assertions; defaults to 40s.
pub fn response_timeout_ms() -> u64 {
    get_int_or("res_time", 40_000).max(0) as u64
}
