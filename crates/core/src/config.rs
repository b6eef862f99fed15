//! Configuration file
//!
//! A single TOML document holds output defaults and the stored profiles. It
//! lives at `$DBX_CONFIG_DIR/config.toml` when that variable is set, and at
//! `<platform config dir>/dbx/config.toml` otherwise.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::profile::Profile;

/// Current configuration schema version
///
/// Files without a `schema_version` key predate versioning and load as 0.
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "DBX_CONFIG_DIR";

const CONFIG_FILE: &str = "config.toml";

/// Output format used when `--json` is not given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Terminal color policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when the stream is a terminal
    #[default]
    Auto,
    /// Color even when piped
    Always,
    Never,
}

/// The `[defaults]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default)]
    pub output: OutputFormat,

    #[serde(default)]
    pub color: ColorMode,

    /// Show spinners while requests are in flight
    #[serde(default = "progress_on")]
    pub progress: bool,
}

fn progress_on() -> bool {
    true
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: OutputFormat::default(),
            color: ColorMode::default(),
            progress: progress_on(),
        }
    }
}

/// Whole configuration document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub schema_version: u32,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub profiles: Vec<Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
            profiles: Vec::new(),
        }
    }
}

/// Reads and writes the configuration file
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Locate the configuration file from the environment
    pub fn new() -> Result<Self> {
        let dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::config_dir()
                .map(|base| base.join("dbx"))
                .ok_or_else(|| Error::Config("no configuration directory on this platform".into()))?,
        };
        Ok(Self::with_path(dir.join(CONFIG_FILE)))
    }

    /// Use an explicit file path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load the file, or the defaults when it does not exist yet
    ///
    /// Older schemas are upgraded and written back; newer ones are refused.
    pub fn load(&self) -> Result<Config> {
        let content = match std::fs::read_to_string(&self.config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.config_path.display(), "no config file");
                return Ok(Config::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: Config = toml::from_str(&content)?;
        match config.schema_version.cmp(&SCHEMA_VERSION) {
            Ordering::Equal => Ok(config),
            Ordering::Less => self.upgrade(config),
            Ordering::Greater => Err(Error::Config(format!(
                "{} uses schema {} but this dbx understands up to {}; upgrade dbx",
                self.config_path.display(),
                config.schema_version,
                SCHEMA_VERSION
            ))),
        }
    }

    /// Write the file atomically, owner-only on Unix
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let staging = self.config_path.with_extension("toml.tmp");
        std::fs::write(&staging, toml::to_string_pretty(config)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&staging, std::fs::Permissions::from_mode(0o600))?;
        }

        std::fs::rename(&staging, &self.config_path)?;
        Ok(())
    }

    // Unversioned (0) files share the version 1 layout, so stamping is the
    // whole upgrade.
    fn upgrade(&self, mut config: Config) -> Result<Config> {
        tracing::info!(
            path = %self.config_path.display(),
            from = config.schema_version,
            to = SCHEMA_VERSION,
            "upgrading configuration file"
        );
        config.schema_version = SCHEMA_VERSION;
        self.save(&config)?;
        Ok(config)
    }
}
