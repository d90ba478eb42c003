//! Configuration types

use crate::constants::*;
use graft_application::ResolutionSettings;
use graft_domain::value_objects::{Marker, TypeKey};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Container configuration
///
/// ```toml
/// default_markers = true
/// markers = ["Gateway"]
/// wait_until_completion = true
/// workers = 4
///
/// [bindings]
/// "dyn app::UserStore" = "app::PostgresUserStore"
///
/// [properties]
/// files = ["application.toml"]
/// env_prefix = "APP"
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraftConfig {
    /// Recognize the built-in markers (`Component`, `Service`, ...)
    pub default_markers: bool,

    /// Additional markers recognized as roots
    pub markers: Vec<String>,

    /// Explicit bindings, abstraction type name to concrete type name
    pub bindings: BTreeMap<String, String>,

    /// Await the resolution pass before the container is handed out
    pub wait_until_completion: bool,

    /// Worker threads of the resolution pass; one per CPU when unset
    pub workers: Option<usize>,

    /// Property sources consulted by activation conditions
    pub properties: PropertiesConfig,

    /// Logging
    pub logging: LoggingConfig,
}

impl Default for GraftConfig {
    fn default() -> Self {
        Self {
            default_markers: true,
            markers: Vec::new(),
            bindings: BTreeMap::new(),
            wait_until_completion: true,
            workers: None,
            properties: PropertiesConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl GraftConfig {
    /// Markers that make a type a root
    pub fn recognized_markers(&self) -> BTreeSet<Marker> {
        let mut markers = if self.default_markers {
            Marker::defaults()
        } else {
            BTreeSet::new()
        };
        markers.extend(self.markers.iter().cloned().map(Marker::from));
        markers
    }

    /// Configured bindings as type keys
    pub fn explicit_bindings(&self) -> Vec<(TypeKey, TypeKey)> {
        self.bindings
            .iter()
            .map(|(abstraction, concrete)| {
                (
                    TypeKey::from(abstraction.trim().to_string()),
                    TypeKey::from(concrete.trim().to_string()),
                )
            })
            .collect()
    }

    /// Settings for the resolution engine
    pub fn resolution_settings(&self) -> ResolutionSettings {
        ResolutionSettings {
            markers: self.recognized_markers(),
            workers: self.workers,
        }
    }
}

/// Property sources configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertiesConfig {
    /// TOML property files, later files override earlier ones; missing files are skipped
    pub files: Vec<PathBuf>,

    /// Environment prefix (e.g. `APP` reads `APP__FEATURE__ENABLED` as `feature.enabled`)
    pub env_prefix: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily-rolling file in addition to stdout
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}
