//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables and
//! default values, using Figment.

use crate::config::GraftConfig;
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use graft_domain::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `GraftConfig::default()`
    /// 2. TOML configuration file (if exists)
    /// 3. Environment variables with prefix, nested keys separated by `__`
    ///    (e.g., `GRAFT__LOGGING__LEVEL`)
    pub fn load(&self) -> Result<GraftConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(GraftConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}{}", self.env_prefix, CONFIG_ENV_SEPARATOR))
                .split(CONFIG_ENV_SEPARATOR),
        );

        let config: GraftConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &GraftConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;
        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;
        Ok(())
    }

    /// First existing configuration file among the usual locations
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate container configuration
pub fn validate_config(config: &GraftConfig) -> Result<()> {
    validate_resolution_config(config)?;
    validate_bindings_config(config)?;
    parse_log_level(&config.logging.level)?;
    Ok(())
}

fn validate_resolution_config(config: &GraftConfig) -> Result<()> {
    if config.workers == Some(0) {
        return Err(Error::configuration("Worker count cannot be 0"));
    }
    if config.markers.iter().any(|marker| marker.trim().is_empty()) {
        return Err(Error::configuration("Marker names cannot be empty"));
    }
    if !config.default_markers && config.markers.is_empty() {
        return Err(Error::configuration(
            "No markers recognized: enable default_markers or list markers",
        ));
    }
    Ok(())
}

fn validate_bindings_config(config: &GraftConfig) -> Result<()> {
    for (abstraction, concrete) in &config.bindings {
        if abstraction.trim().is_empty() || concrete.trim().is_empty() {
            return Err(Error::configuration(format!(
                "Binding '{abstraction}' = '{concrete}' must name both types"
            )));
        }
    }
    Ok(())
}
