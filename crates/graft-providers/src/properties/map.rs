//! Properties held in memory

use graft_domain::ports::PropertySource;
use std::collections::HashMap;

/// Property source over a plain map
#[derive(Debug, Default, Clone)]
pub struct MapPropertySource {
    values: HashMap<String, String>,
}

impl MapPropertySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property (builder style)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapPropertySource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl PropertySource for MapPropertySource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn source_name(&self) -> &str {
        "map"
    }
}
