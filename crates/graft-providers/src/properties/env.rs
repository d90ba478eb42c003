//! Properties read from the process environment

use graft_domain::ports::PropertySource;

/// Property source over environment variables
///
/// Key `feature.cache-mode` with prefix `APP` is read from
/// `APP_FEATURE_CACHE_MODE`: dots and dashes become underscores and the
/// whole name is upper-cased.
#[derive(Debug, Clone)]
pub struct EnvPropertySource {
    prefix: String,
}

impl EnvPropertySource {
    /// Create a source reading `PREFIX_KEY` variables
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Environment variable name for `key`
    pub fn variable_name(&self, key: &str) -> String {
        let key = key.replace(['.', '-'], "_").to_uppercase();
        if self.prefix.is_empty() {
            key
        } else {
            format!("{}_{}", self.prefix.to_uppercase(), key)
        }
    }
}

impl PropertySource for EnvPropertySource {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(self.variable_name(key)).ok()
    }

    fn source_name(&self) -> &str {
        "env"
    }
}
