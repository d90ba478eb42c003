//! Error extension utilities
//!
//! Converts foreign errors (figment, TOML, I/O, the subscriber registry,
//! tokio join handles) into the domain error type while keeping the original
//! error as the source.

use graft_domain::error::{BoxError, Error, Result};
use std::fmt;

/// Extension trait for adding context to errors
///
/// # Example
///
/// ```ignore
/// use graft_infrastructure::error_ext::ErrorContext;
///
/// std::fs::write(&path, rendered).io_context("Failed to write config file")?;
/// let config: GraftConfig = figment.extract().config_context("Invalid configuration")?;
/// let report = pending.await.pass_context()??;
/// ```
pub trait ErrorContext<T>: Sized {
    /// Wrap the error as an infrastructure error
    fn context(self, context: impl fmt::Display) -> Result<T>;

    /// Wrap the error as an I/O error
    fn io_context(self, context: impl fmt::Display) -> Result<T>;

    /// Wrap the error as a configuration error
    fn config_context(self, context: impl fmt::Display) -> Result<T>;

    /// Wrap the failure of the task that ran a resolution pass
    fn pass_context(self) -> Result<T> {
        self.context("Resolution pass did not complete")
    }
}

/// Variant a foreign error is filed under
#[derive(Clone, Copy)]
enum Category {
    Infrastructure,
    Io,
    Configuration,
}

fn wrap<E>(category: Category, context: impl fmt::Display, err: E) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    let message = format!("{context}: {err}");
    let source = Some(Box::new(err) as BoxError);
    match category {
        Category::Infrastructure => Error::Infrastructure { message, source },
        Category::Io => Error::Io { message, source },
        Category::Configuration => Error::Configuration { message, source },
    }
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl fmt::Display) -> Result<T> {
        self.map_err(|err| wrap(Category::Infrastructure, context, err))
    }

    fn io_context(self, context: impl fmt::Display) -> Result<T> {
        self.map_err(|err| wrap(Category::Io, context, err))
    }

    fn config_context(self, context: impl fmt::Display) -> Result<T> {
        self.map_err(|err| wrap(Category::Configuration, context, err))
    }
}
