//! Injectable Registry
//!
//! Compile-time registration of injectable types through a `linkme`
//! distributed slice. Each crate contributing types declares entries next to
//! the types themselves; [`LinkedTypeCatalog`] collects them at startup.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  1. Type declares:  #[linkme::distributed_slice(INJECTABLES)] │
//! │                     static ENTRY: InjectableEntry = ...       │
//! │                              ↓                                │
//! │  2. Catalog reads:  LinkedTypeCatalog::discover()             │
//! │                              ↓                                │
//! │  3. Engine filters and resolves the descriptors               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Registering a type
//!
//! ```ignore
//! use graft_application::registry::{InjectableEntry, INJECTABLES};
//!
//! #[linkme::distributed_slice(INJECTABLES)]
//! static USER_SERVICE: InjectableEntry = InjectableEntry {
//!     name: "user_service",
//!     describe: || TypeDescriptor::builder::<UserService>()
//!         .marker(MARKER_SERVICE)
//!         .construct_default(),
//! };
//! ```

pub mod injectables;

pub use injectables::{INJECTABLES, InjectableEntry, LinkedTypeCatalog, list_injectables};
