//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Marker names are defined in `graft_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "graft.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "graft";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "GRAFT";

/// Separator between the prefix and nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "GRAFT_LOG";

/// File stem used when the configured log path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "graft";

