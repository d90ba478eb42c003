//! Domain constants
//!
//! Names of the markers recognized out of the box. A type carrying any of
//! these tags is instantiated by the engine unless configuration replaces the
//! default marker set.

/// Generic component marker
pub const MARKER_COMPONENT: &str = "Component";

/// Application service marker
pub const MARKER_SERVICE: &str = "Service";

/// Persistence adapter marker
pub const MARKER_REPOSITORY: &str = "Repository";

/// Configuration holder marker
pub const MARKER_CONFIGURATION: &str = "Configuration";

/// Inbound adapter marker
pub const MARKER_CONTROLLER: &str = "Controller";

/// Use case marker
pub const MARKER_USE_CASE: &str = "UseCase";

/// Command handler marker
pub const MARKER_COMMAND_HANDLER: &str = "CommandHandler";

/// Query handler marker
pub const MARKER_QUERY_HANDLER: &str = "QueryHandler";

/// Event handler marker
pub const MARKER_EVENT_HANDLER: &str = "EventHandler";

/// Every marker recognized when configuration does not say otherwise
pub const DEFAULT_MARKERS: &[&str] = &[
    MARKER_COMPONENT,
    MARKER_SERVICE,
    MARKER_REPOSITORY,
    MARKER_CONFIGURATION,
    MARKER_CONTROLLER,
    MARKER_USE_CASE,
    MARKER_COMMAND_HANDLER,
    MARKER_QUERY_HANDLER,
    MARKER_EVENT_HANDLER,
];
