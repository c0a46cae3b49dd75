use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use devwrap_fetch::http::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use devwrap_session::controller::{DEFAULT_SHARE_ORIGIN, DEFAULT_YEAR};
use devwrap_session::{SessionOptions, DEFAULT_DWELL};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

// ── Schema ──

/// Longest time a slide stays on screen before advancing.
pub const MAX_DWELL_SECS: u64 = 3_600;
/// Longest stats request timeout.
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Keys accepted by `devwrap config set`.
pub const KNOWN_KEYS: &[&str] = &[
    "endpoint",
    "dwell_secs",
    "share_origin",
    "share_command",
    "year",
    "request_timeout_secs",
];

/// Settings stored in `config.json`. Missing keys take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub dwell_secs: u64,
    pub share_origin: String,
    /// Program that receives title, text and url on stdin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_command: Option<String>,
    pub year: u16,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            dwell_secs: DEFAULT_DWELL.as_secs(),
            share_origin: DEFAULT_SHARE_ORIGIN.to_string(),
            share_command: None,
            year: DEFAULT_YEAR,
            request_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Config {
    /// Load from `path`. Returns defaults if the file is missing or
    /// unparseable.
    pub fn load(path: &Path) -> Self {
        let map = match read_map(path) {
            Ok(m) => m,
            Err(e) => {
                warn!(target: "devwrap::config", path = %path.display(), error = %e, "ignoring config file");
                return Self::default();
            }
        };
        match serde_json::from_value(serde_json::Value::Object(map)) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(target: "devwrap::config", path = %path.display(), error = %e, "ignoring config file");
                Self::default()
            }
        }
    }

    /// Range check for values that deserialize fine but make no sense.
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_DWELL_SECS).contains(&self.dwell_secs) {
            return Err(format!("dwell_secs must be between 1 and {MAX_DWELL_SECS}"));
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(format!(
                "request_timeout_secs must be between 1 and {MAX_REQUEST_TIMEOUT_SECS}"
            ));
        }
        Ok(())
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            dwell: Duration::from_secs(self.dwell_secs.clamp(1, MAX_DWELL_SECS)),
            share_origin: self.share_origin.clone(),
            year: self.year,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.clamp(1, MAX_REQUEST_TIMEOUT_SECS))
    }
}

// ── Paths ──

/// `<config dir>/devwrap/config.json`, or `.devwrap/config.json` when the
/// platform has no config dir.
pub fn default_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("devwrap").join("config.json"),
        None => PathBuf::from(".devwrap").join("config.json"),
    }
}

/// `<local data dir>/devwrap/logs`.
pub fn log_dir() -> PathBuf {
    match dirs::data_local_dir() {
        Some(dir) => dir.join("devwrap").join("logs"),
        None => PathBuf::from(".devwrap").join("logs"),
    }
}

// ── Raw file access ──

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not replace config file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Read the config object. Returns an empty map if the file doesn't exist.
pub fn read_map(path: &Path) -> Result<serde_json::Map<String, serde_json::Value>, ConfigError> {
    if !path.exists() {
        return Ok(serde_json::Map::new());
    }
    let content = std::fs::read_to_string(path)?;
    let val: serde_json::Value = serde_json::from_str(&content)?;
    match val {
        serde_json::Value::Object(map) => Ok(map),
        _ => Ok(serde_json::Map::new()),
    }
}

/// Write the config object atomically: temp file in the same dir, then rename.
pub fn write_map(
    path: &Path,
    map: &serde_json::Map<String, serde_json::Value>,
) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(map)?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(json.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}

/// Parse a CLI string into a JSON value (bool/number/string).
pub fn parse_value(s: &str) -> serde_json::Value {
    match s {
        "true" => serde_json::Value::Bool(true),
        "false" => serde_json::Value::Bool(false),
        _ => match s.parse::<i64>() {
            Ok(n) => serde_json::Value::Number(n.into()),
            Err(_) => serde_json::Value::String(s.to_string()),
        },
    }
}
