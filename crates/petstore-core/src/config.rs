//! Suite configuration: target service, request timeout, sentinel ids

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides `base_url` after file loading.
pub const BASE_URL_ENV: &str = "PETSTORE_BASE_URL";

/// Default service under test (base path included).
pub const DEFAULT_BASE_URL: &str = "http://5.181.109.28:9090/api/v3";

/// Suite configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the pet-store API, including the `/api/v3` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra HTTP headers sent with every request (API keys, etc.)
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Pet id assumed not to exist on the server
    #[serde(default = "default_missing_id")]
    pub missing_pet_id: i64,

    /// Order id assumed not to exist on the server
    #[serde(default = "default_missing_id")]
    pub missing_order_id: i64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_missing_id() -> i64 {
    9999
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            headers: HashMap::new(),
            missing_pet_id: default_missing_id(),
            missing_order_id: default_missing_id(),
        }
    }
}

impl Config {
    /// Load config from file.
    ///
    /// Format is picked by extension: `.json`, `.yaml`/`.yml`, anything else is TOML.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e.to_string()))?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let config: Self = match ext.as_str() {
            "json" => {
                serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
            "yaml" | "yml" => {
                serde_yml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
            _ => toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from default location (.petstore.toml), falling back to defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        let candidates = [".petstore.toml", ".petstore.json", "petstore.toml"];

        for name in candidates {
            let path = Path::new(name);
            if path.exists() {
                return Self::load(path);
            }
        }

        Ok(Self::default())
    }

    /// Apply `PETSTORE_BASE_URL` if set and non-empty.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_base_url_override(std::env::var(BASE_URL_ENV).ok())
    }

    /// Replace `base_url` when `url` is present and non-empty.
    #[must_use]
    pub fn with_base_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        self
    }

    /// Base URL without a trailing slash, ready for `{base}{path}` joins.
    #[must_use]
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reject configs that cannot drive a run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a non-http(s) base URL or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base_url must start with http:// or https://, got {url:?}"
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be > 0".into()));
        }
        Ok(())
    }

    /// Create example config file
    pub fn example() -> &'static str {
        r#"# petstore-contract configuration

# Service under test (include the /api/v3 prefix).
# PETSTORE_BASE_URL overrides this value.
base_url = "http://5.181.109.28:9090/api/v3"

# Per-request timeout in seconds
timeout_secs = 10

# Ids assumed not to exist (not-found contract cases)
missing_pet_id = 9999
missing_order_id = 9999

# Extra headers sent with every request
[headers]
# api_key = "special-key"
"#
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read {0}: {1}")]
    Io(PathBuf, String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}
