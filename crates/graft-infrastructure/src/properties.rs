//! Figment-backed property source
//!
//! Merges TOML property files and prefixed environment variables into one
//! key space addressed with dotted keys (`feature.cache-mode`).

use crate::config::PropertiesConfig;
use crate::constants::CONFIG_ENV_SEPARATOR;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use graft_domain::ports::PropertySource;
use serde_json::Value;
use tracing::{debug, warn};

/// Property source reading TOML files and the environment through Figment
///
/// Later files override earlier ones; environment variables override files.
/// Scalars are returned in their textual form (`true`, `8080`); tables and
/// arrays are not properties and look up as absent.
#[derive(Clone)]
pub struct FigmentPropertySource {
    figment: Figment,
}

impl FigmentPropertySource {
    /// Build the source described by `config`
    pub fn from_config(config: &PropertiesConfig) -> Self {
        let mut figment = Figment::new();
        for file in &config.files {
            if file.exists() {
                debug!(file = %file.display(), "Property file loaded");
                figment = figment.merge(Toml::file(file));
            } else {
                warn!(file = %file.display(), "Property file not found, skipped");
            }
        }
        if let Some(prefix) = &config.env_prefix {
            figment = figment.merge(
                Env::prefixed(&format!("{prefix}{CONFIG_ENV_SEPARATOR}"))
                    .split(CONFIG_ENV_SEPARATOR),
            );
        }
        Self::from_figment(figment)
    }

    /// Wrap an already assembled figment
    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }
}

impl PropertySource for FigmentPropertySource {
    fn lookup(&self, key: &str) -> Option<String> {
        match self.figment.extract_inner::<Value>(key).ok()? {
            Value::String(value) => Some(value),
            Value::Bool(value) => Some(value.to_string()),
            Value::Number(value) => Some(value.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn source_name(&self) -> &str {
        "figment"
    }
}
