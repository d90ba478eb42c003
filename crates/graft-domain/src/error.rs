//! Error handling types

use crate::value_objects::TypeKey;
use thiserror::Error;

/// Boxed error returned by user-supplied constructors and provider factories
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for graft
///
/// The first four variants are configuration defects detected while building
/// the object graph. Every one of them aborts the resolution pass.
#[derive(Error, Debug)]
pub enum Error {
    /// A type transitively depends on itself
    #[error("Cyclic dependency: {}", format_chain(.chain))]
    CyclicDependency {
        /// Resolution chain, starting and ending with the same type
        chain: Vec<TypeKey>,
    },

    /// A constructor parameter cannot be satisfied by any eligible type, binding or provider
    #[error("Unresolved dependency: {requested_by} requires {missing}, which is not registered, bound or provided")]
    UnresolvedDependency {
        /// Type whose constructor declares the parameter
        requested_by: TypeKey,
        /// Parameter type that could not be satisfied
        missing: TypeKey,
    },

    /// An abstraction has several implementations and no explicit binding
    #[error("Ambiguous binding for {abstraction}: candidates {}", format_list(.candidates))]
    AmbiguousBinding {
        /// The abstraction being resolved
        abstraction: TypeKey,
        /// Discovered implementations, sorted by name
        candidates: Vec<TypeKey>,
    },

    /// The constructor or provider factory itself failed
    #[error("Failed to construct {type_key}: {source}")]
    ConstructionFailure {
        /// Concrete type whose construction failed
        type_key: TypeKey,
        /// Error reported by the constructor
        #[source]
        source: BoxError,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// I/O error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Infrastructure error (runtime, logging, background tasks)
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// The resolution pass was aborted because another branch failed
    #[error("Resolution pass cancelled")]
    Cancelled,

    /// Internal invariant violation
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Resolution error creation methods
impl Error {
    /// Create a cyclic dependency error from a closed chain
    pub fn cyclic(chain: Vec<TypeKey>) -> Self {
        Self::CyclicDependency { chain }
    }

    /// Create an unresolved dependency error
    pub fn unresolved(requested_by: TypeKey, missing: TypeKey) -> Self {
        Self::UnresolvedDependency {
            requested_by,
            missing,
        }
    }

    /// Create an ambiguous binding error; candidates are sorted for stable messages
    pub fn ambiguous(abstraction: TypeKey, mut candidates: Vec<TypeKey>) -> Self {
        candidates.sort();
        Self::AmbiguousBinding {
            abstraction,
            candidates,
        }
    }

    /// Wrap a constructor failure with the type being built
    pub fn construction<E: Into<BoxError>>(type_key: TypeKey, source: E) -> Self {
        Self::ConstructionFailure {
            type_key,
            source: source.into(),
        }
    }
}

// Configuration, I/O and infrastructure error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Classification
impl Error {
    /// Whether this error is the secondary cancellation signal of a failed pass
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The type the error is about, when there is one
    pub fn offending_type(&self) -> Option<&TypeKey> {
        match self {
            Self::CyclicDependency { chain } => chain.first(),
            Self::UnresolvedDependency { requested_by, .. } => Some(requested_by),
            Self::AmbiguousBinding { abstraction, .. } => Some(abstraction),
            Self::ConstructionFailure { type_key, .. } => Some(type_key),
            _ => None,
        }
    }
}

fn format_chain(chain: &[TypeKey]) -> String {
    chain
        .iter()
        .map(TypeKey::name)
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn format_list(keys: &[TypeKey]) -> String {
    keys.iter().map(TypeKey::name).collect::<Vec<_>>().join(", ")
}
