//! Navigation errors.

use octothorpe::{ResolveError, UrlError};
use thiserror::Error;

/// An error produced while navigating.
///
/// Navigation failures never corrupt state: the current route and the
/// history are only updated after resolution succeeds, so the application
/// shell can render the error while the previous view stays mounted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The target did not resolve (not found, or malformed path).
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A named-route target could not be turned into a URL.
    #[error(transparent)]
    Url(#[from] UrlError),

    /// Redirect routes kept pointing at each other.
    #[error("redirect chain from `{from}` exceeded {limit} hops")]
    RedirectLoop { from: String, limit: usize },

    /// A browser location outside the configured base path was handed to
    /// the context; the URL does not belong to this app.
    #[error("browser location `{0}` is outside the configured base path")]
    OutsideBase(String),
}
