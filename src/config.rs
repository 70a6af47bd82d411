use crate::constants::*;
use crate::error::{Result, RatingsError};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub credentials: Credentials,
    pub endpoints: Endpoints,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub tmdb_key: String,
    pub omdb_key: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub tmdb: String,
    pub omdb: String,
    pub rotten_tomatoes: String,
    pub metacritic: String,
    pub letterboxd: String,
    pub filmaffinity: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            tmdb: DEFAULT_TMDB_URL.to_string(),
            omdb: DEFAULT_OMDB_URL.to_string(),
            rotten_tomatoes: DEFAULT_ROTTEN_TOMATOES_URL.to_string(),
            metacritic: DEFAULT_METACRITIC_URL.to_string(),
            letterboxd: DEFAULT_LETTERBOXD_URL.to_string(),
            filmaffinity: DEFAULT_FILMAFFINITY_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Point every source at one base URL. Used by tests against a mock server.
    pub fn all_at(base: &str) -> Self {
        Self {
            tmdb: base.to_string(),
            omdb: base.to_string(),
            rotten_tomatoes: base.to_string(),
            metacritic: base.to_string(),
            letterboxd: base.to_string(),
            filmaffinity: base.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: None,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    /// Loads the optional TOML file, then lets `TMDB_KEY` / `OMDB_KEY` override the
    /// credentials. Missing keys are left empty; the remote APIs report them.
    pub fn load() -> Result<Self> {
        let config_path =
            std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = if Path::new(&config_path).exists() {
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config_content = fs::read_to_string(path).map_err(|e| {
            RatingsError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&config_content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(TMDB_KEY_VAR) {
            self.credentials.tmdb_key = key;
        }
        if let Ok(key) = std::env::var(OMDB_KEY_VAR) {
            self.credentials.omdb_key = key;
        }
    }
}
