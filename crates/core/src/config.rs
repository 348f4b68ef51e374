//! Configuration management
//!
//! This module handles loading and migrating the cloudcall configuration
//! file. The file is TOML, stored at `$CLOUDCALL_CONFIG_DIR/config.toml` when
//! that variable is set and at `~/.config/cloudcall/config.toml` otherwise.

use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};
use crate::model::{AlarmDeletionRequest, ObjectLocator};
use crate::policy::ErrorPolicy;

/// Current configuration schema version
///
/// Files with an older version go through `ConfigManager::migrate`.
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "CLOUDCALL_CONFIG_DIR";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Connection settings shared by all clients
    #[serde(default)]
    pub service: ServiceSettings,

    /// Alarm-deletion flow settings
    #[serde(default)]
    pub alarms: AlarmSettings,

    /// Encrypted-object retrieval settings
    #[serde(default)]
    pub object: ObjectSettings,
}

/// Connection settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceSettings {
    /// AWS region; the SDK provider chain is consulted when unset
    #[serde(default)]
    pub region: Option<String>,

    /// Endpoint override, e.g. a local emulator
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl ServiceSettings {
    /// Parsed endpoint override, if any
    pub fn endpoint_url(&self) -> Result<Option<Url>> {
        self.endpoint
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(Error::from)
    }
}

/// Settings for `delete-alarms`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlarmSettings {
    /// Alarms to delete when none are given on the command line
    #[serde(default)]
    pub names: Vec<String>,

    /// What to do when the delete call fails
    #[serde(default = "default_alarm_policy")]
    pub on_error: ErrorPolicy,
}

impl AlarmSettings {
    /// Build the deletion request from the configured names
    pub fn request(&self) -> Result<AlarmDeletionRequest> {
        AlarmDeletionRequest::new(self.names.iter().cloned())
    }
}

/// Settings for `decrypt-object`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObjectSettings {
    #[serde(default)]
    pub bucket: String,

    #[serde(default)]
    pub key: String,

    /// What to do when the fetch or decrypt call fails
    #[serde(default = "default_object_policy")]
    pub on_error: ErrorPolicy,
}

impl ObjectSettings {
    /// Build the object locator from the configured bucket and key
    pub fn locator(&self) -> Result<ObjectLocator> {
        ObjectLocator::new(self.bucket.clone(), self.key.clone())
    }
}

fn default_alarm_policy() -> ErrorPolicy {
    ErrorPolicy::Suppress
}

fn default_object_policy() -> ErrorPolicy {
    ErrorPolicy::Propagate
}

impl Default for AlarmSettings {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            on_error: default_alarm_policy(),
        }
    }
}

impl Default for ObjectSettings {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            key: String::new(),
            on_error: default_object_policy(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            service: ServiceSettings::default(),
            alarms: AlarmSettings::default(),
            object: ObjectSettings::default(),
        }
    }
}

/// Locates and loads the configuration file
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("cloudcall"),
        };
        Ok(Self {
            config_path: config_dir.join("config.toml"),
        })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns a default configuration.
    /// If the schema version doesn't match, attempts migration.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let mut config: Config = toml::from_str(&content)?;

        if config.schema_version < SCHEMA_VERSION {
            config = self.migrate(config)?;
        } else if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade cloudcall.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        // Fail on a malformed endpoint before any client is built
        config.service.endpoint_url()?;

        Ok(config)
    }

    /// Migrate configuration from older schema version
    fn migrate(&self, config: Config) -> Result<Config> {
        let mut config = config;
        config.schema_version = SCHEMA_VERSION;
        Ok(config)
    }
}
