//! Profile management
//!
//! Profiles are named, stored credentials for a Dropbox account, together with
//! the API endpoints and timeouts used to reach it.

use serde::{Deserialize, Serialize};

use crate::config::ConfigManager;
use crate::error::{Error, Result};

/// Default RPC endpoint base
pub const DEFAULT_API_URL: &str = "https://api.dropboxapi.com/2";

/// Default content (upload/download) endpoint base
pub const DEFAULT_CONTENT_URL: &str = "https://content.dropboxapi.com/2";

/// Timeout configuration for a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Connection timeout in milliseconds
    #[serde(default = "default_connect_timeout")]
    pub connect_ms: u64,

    /// Whole-request timeout in milliseconds
    #[serde(default = "default_read_timeout")]
    pub read_ms: u64,
}

fn default_connect_timeout() -> u64 {
    5000
}

fn default_read_timeout() -> u64 {
    30000
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_ms: default_connect_timeout(),
            read_ms: default_read_timeout(),
        }
    }
}

/// A profile is a named Dropbox credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Unique name for this profile
    pub name: String,

    /// Long-lived bearer access token
    pub access_token: String,

    /// RPC endpoint base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Content endpoint base URL
    #[serde(default = "default_content_url")]
    pub content_url: String,

    /// Timeout configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<TimeoutConfig>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_content_url() -> String {
    DEFAULT_CONTENT_URL.to_string()
}

impl Profile {
    /// Create a new profile pointing at the public Dropbox endpoints
    pub fn new(name: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access_token: access_token.into(),
            api_url: default_api_url(),
            content_url: default_content_url(),
            timeout: None,
        }
    }

    /// Get the effective timeout configuration
    pub fn timeout_config(&self) -> TimeoutConfig {
        self.timeout.clone().unwrap_or_default()
    }

    /// Check that the endpoint URLs parse and the token is present
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::Config("Profile name cannot be empty".into()));
        }
        if self.access_token.trim().is_empty() {
            return Err(Error::Auth(format!(
                "profile '{}' has no access token",
                self.name
            )));
        }
        for raw in [&self.api_url, &self.content_url] {
            let parsed = url::Url::parse(raw)?;
            if parsed.scheme() != "https" && parsed.scheme() != "http" {
                return Err(Error::Config(format!("Unsupported URL scheme: {raw}")));
            }
        }
        Ok(())
    }
}

/// Manager for profile operations
pub struct ProfileManager {
    config_manager: ConfigManager,
}

impl ProfileManager {
    /// Create a new ProfileManager with a specific ConfigManager
    pub fn with_config_manager(config_manager: ConfigManager) -> Self {
        Self { config_manager }
    }

    /// Create a new ProfileManager using the default config location
    pub fn new() -> Result<Self> {
        let config_manager = ConfigManager::new()?;
        Ok(Self { config_manager })
    }

    /// List all stored profiles
    pub fn list(&self) -> Result<Vec<Profile>> {
        let config = self.config_manager.load()?;
        Ok(config.profiles)
    }

    /// Get a profile by name
    pub fn get(&self, name: &str) -> Result<Profile> {
        let config = self.config_manager.load()?;
        config
            .profiles
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::ProfileNotFound(name.to_string()))
    }

    /// Add or replace a profile
    pub fn set(&self, profile: Profile) -> Result<()> {
        profile.validate()?;
        let mut config = self.config_manager.load()?;

        config.profiles.retain(|p| p.name != profile.name);
        config.profiles.push(profile);

        self.config_manager.save(&config)
    }

    /// Remove a profile
    pub fn remove(&self, name: &str) -> Result<()> {
        let mut config = self.config_manager.load()?;
        let original_len = config.profiles.len();

        config.profiles.retain(|p| p.name != name);

        if config.profiles.len() == original_len {
            return Err(Error::ProfileNotFound(name.to_string()));
        }

        self.config_manager.save(&config)
    }
}
