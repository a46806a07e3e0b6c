//! Client configuration management
//!
//! Handles loading and saving client settings:
//! - API base URL and user agent
//! - Pagination defaults
//! - Per-call timeout and runtime worker count
//!
//! Credentials never live in this file; see [`crate::core::credentials`].

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{GitHubError, Result};
use crate::http::endpoint::{Pagination, DEFAULT_PER_PAGE, MAX_PER_PAGE};
use crate::http::request::DEFAULT_USER_AGENT;

/// Public GitHub API host
pub const DEFAULT_API_URL: &str = "https://api.github.com";

// Environment overrides
pub const API_URL_ENV: &str = "GHREST_API_URL";
pub const TIMEOUT_ENV: &str = "GHREST_TIMEOUT_SECS";

/// Settable configuration keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ApiUrl,
    UserAgent,
    PerPage,
    MaxPerPage,
    TimeoutSecs,
    WorkerThreads,
}

impl ConfigKey {
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::ApiUrl => "api-url",
            ConfigKey::UserAgent => "user-agent",
            ConfigKey::PerPage => "per-page",
            ConfigKey::MaxPerPage => "max-per-page",
            ConfigKey::TimeoutSecs => "timeout-secs",
            ConfigKey::WorkerThreads => "worker-threads",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.name() == s)
    }

    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::ApiUrl,
            ConfigKey::UserAgent,
            ConfigKey::PerPage,
            ConfigKey::MaxPerPage,
            ConfigKey::TimeoutSecs,
            ConfigKey::WorkerThreads,
        ]
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the REST API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// `User-Agent` sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Page size the API uses when none is requested
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Largest page size the API accepts
    #[serde(default = "default_max_per_page")]
    pub max_per_page: u32,

    /// Per-call timeout in seconds; 0 disables it
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Runtime worker threads; defaults to the host core count
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

fn default_max_per_page() -> u32 {
    MAX_PER_PAGE
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            user_agent: default_user_agent(),
            per_page: default_per_page(),
            max_per_page: default_max_per_page(),
            timeout_secs: default_timeout_secs(),
            worker_threads: None,
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "ghrest")
            .ok_or_else(|| GitHubError::Config("Could not determine config directory".into()))?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Apply `GHREST_*` environment overrides
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = lookup(API_URL_ENV) {
            self.set(ConfigKey::ApiUrl, &url)?;
        }
        if let Some(secs) = lookup(TIMEOUT_ENV) {
            self.set(ConfigKey::TimeoutSecs, &secs)?;
        }
        Ok(self)
    }

    /// Set one key from its string form
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        let value = value.trim();
        let number = |value: &str| {
            value.parse::<u64>().map_err(|_| {
                GitHubError::InvalidInput(format!("'{}' expects a number, got '{}'", key, value))
            })
        };

        match key {
            ConfigKey::ApiUrl => {
                url::Url::parse(value).map_err(|e| {
                    GitHubError::InvalidInput(format!("Invalid API URL '{}': {}", value, e))
                })?;
                self.api_url = value.trim_end_matches('/').to_string();
            }
            ConfigKey::UserAgent => {
                if value.is_empty() {
                    return Err(GitHubError::InvalidInput("User agent cannot be empty".into()));
                }
                self.user_agent = value.to_string();
            }
            ConfigKey::PerPage => self.per_page = number(value)?.clamp(1, u64::from(u32::MAX)) as u32,
            ConfigKey::MaxPerPage => {
                self.max_per_page = number(value)?.clamp(1, u64::from(u32::MAX)) as u32
            }
            ConfigKey::TimeoutSecs => self.timeout_secs = number(value)?,
            ConfigKey::WorkerThreads => {
                self.worker_threads = match number(value)? {
                    0 => None,
                    n => Some(n as usize),
                }
            }
        }
        Ok(())
    }

    /// Current value of one key as a string
    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::ApiUrl => self.api_url.clone(),
            ConfigKey::UserAgent => self.user_agent.clone(),
            ConfigKey::PerPage => self.per_page.to_string(),
            ConfigKey::MaxPerPage => self.max_per_page.to_string(),
            ConfigKey::TimeoutSecs => self.timeout_secs.to_string(),
            ConfigKey::WorkerThreads => self.worker_threads().to_string(),
        }
    }

    /// Pagination policy described by this configuration
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.per_page, self.max_per_page)
    }

    /// Default per-call timeout, if enabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Worker threads for the runtime
    pub fn worker_threads(&self) -> usize {
        self.worker_threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}
