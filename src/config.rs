//! Configuration management for the db_query client.
//!
//! Handles loading configuration from TOML files and environment variables.
//! The only setting the client needs is where the backend lives.

use crate::error::{ApiError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Default backend address.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Backend API settings.
    #[serde(default)]
    pub api: ApiConfig,
}

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Base URL overrides read from the environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvOverrides {
    /// `DBQ_API_URL`: full base URL, wins over host/port.
    pub api_url: Option<String>,
    /// `API_HOST`
    pub host: Option<String>,
    /// `API_PORT`
    pub port: Option<String>,
}

impl EnvOverrides {
    /// Reads the overrides from the process environment; empty values count as unset.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            api_url: var("DBQ_API_URL"),
            host: var("API_HOST"),
            port: var("API_PORT"),
        }
    }
}

impl ApiConfig {
    /// Applies `DBQ_API_URL`, or `API_HOST`/`API_PORT`, over the file value.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(&EnvOverrides::from_env())
    }

    /// Applies the given overrides, rejecting values that cannot form a valid URL.
    pub fn apply_overrides(&mut self, env: &EnvOverrides) -> Result<()> {
        if let Some(url) = &env.api_url {
            self.base_url = url.clone();
            self.parsed_base_url()?;
            return Ok(());
        }

        if env.host.is_none() && env.port.is_none() {
            return Ok(());
        }

        let mut url = self.parsed_base_url()?;
        if let Some(host) = &env.host {
            url.set_host(Some(host))
                .map_err(|e| ApiError::config(format!("Invalid API_HOST '{host}': {e}")))?;
        }
        if let Some(port) = &env.port {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|e| ApiError::config(format!("Invalid API_PORT '{port}': {e}")))?;
            url.set_port(Some(port))
                .map_err(|_| ApiError::config(format!("Cannot set port {port} on '{url}'")))?;
        }
        self.base_url = url.as_str().trim_end_matches('/').to_string();
        Ok(())
    }

    /// Validates the base URL and returns it parsed.
    ///
    /// Endpoint paths are appended to the base URL, so a query string or
    /// fragment is rejected.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            ApiError::config(format!("Invalid base URL '{}': {e}", self.base_url))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ApiError::config(format!(
                "Invalid scheme '{}'. Expected 'http' or 'https'",
                url.scheme()
            )));
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(ApiError::config(format!(
                "Base URL '{}' must not contain a query string or fragment",
                self.base_url
            )));
        }

        Ok(url)
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("db-query")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ApiError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Resolves the base URL: CLI flag, then environment, then file value.
    pub fn resolve_base_url(&mut self, env: &EnvOverrides, cli_url: Option<&str>) -> Result<()> {
        self.api.apply_overrides(env)?;
        if let Some(url) = cli_url {
            self.api.base_url = url.to_string();
        }
        self.api.parsed_base_url()?;
        Ok(())
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            ApiError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}
