//! CLI command definitions and execution
//!
//! Each binary owns one command module. Flags common to both binaries live in
//! [`GlobalArgs`], which also resolves the effective configuration: command
//! line first, then the configuration file.

use std::path::PathBuf;

use clap::Args;
use cloudcall_core::{Config, ConfigManager, ErrorPolicy, Result};

use crate::output::OutputConfig;

pub mod decrypt_object;
pub mod delete_alarms;

/// Flags shared by `delete-alarms` and `decrypt-object`
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Output format: human-readable or JSON
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub debug: bool,

    /// Print client version, region and request parameters before the call
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Configuration file (default: $CLOUDCALL_CONFIG_DIR/config.toml or ~/.config/cloudcall/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// AWS region (default: [service] region, then the AWS provider chain, then us-west-2)
    #[arg(long, env = "CLOUDCALL_REGION")]
    pub region: Option<String>,

    /// Endpoint URL override, e.g. a local emulator
    #[arg(long, env = "CLOUDCALL_ENDPOINT")]
    pub endpoint: Option<String>,

    /// What to do when the remote call fails
    #[arg(long, value_name = "POLICY")]
    pub on_error: Option<ErrorPolicy>,
}

impl GlobalArgs {
    /// Output configuration derived from the flags
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            json: self.json,
            no_color: self.no_color,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }

    /// Load the configuration file and apply command-line overrides
    pub fn load_config(&self) -> Result<Config> {
        let manager = match &self.config {
            Some(path) => ConfigManager::with_path(path.clone()),
            None => ConfigManager::new()?,
        };

        let mut config = manager.load()?;
        self.apply_overrides(&mut config)?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut Config) -> Result<()> {
        if let Some(region) = &self.region {
            config.service.region = Some(region.clone());
        }

        if let Some(endpoint) = &self.endpoint {
            config.service.endpoint = Some(endpoint.clone());
            config.service.endpoint_url()?;
        }

        if let Some(policy) = self.on_error {
            config.alarms.on_error = policy;
            config.object.on_error = policy;
        }

        Ok(())
    }
}
