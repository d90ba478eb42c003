//! Capability markers

use crate::constants::DEFAULT_MARKERS;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

/// Capability tag declared on a type (e.g. `Service`, `Repository`)
///
/// Membership of a type's markers in the recognized set decides whether the
/// engine instantiates it as a root.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Marker(Cow<'static, str>);

impl Marker {
    /// Create a marker
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Marker name
    pub fn name(&self) -> &str {
        &self.0
    }

    /// The built-in marker set
    pub fn defaults() -> BTreeSet<Marker> {
        DEFAULT_MARKERS.iter().map(|m| Marker::new(*m)).collect()
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Marker({})", self.0)
    }
}

impl From<&'static str> for Marker {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Marker {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
