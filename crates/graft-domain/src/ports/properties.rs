//! Property source port

/// External key/value source consulted by property conditions
pub trait PropertySource: Send + Sync {
    /// Value of `key`, or `None` when absent
    fn lookup(&self, key: &str) -> Option<String>;

    /// Name used in logs
    fn source_name(&self) -> &str {
        "properties"
    }
}
