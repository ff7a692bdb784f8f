//! Error types for route declaration, table construction, and resolution.
//!
//! Each stage of the route table lifecycle has its own error enum:
//! a pattern that cannot be compiled (`PatternError`), a table whose
//! invariants do not hold (`TableError`), a path that cannot be resolved
//! (`ResolveError`), and a URL that cannot be generated (`UrlError`).

use thiserror::Error;

/// A route pattern string that cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Patterns are absolute: `/chat/:character_id`, never `chat/:character_id`.
    #[error("route pattern `{0}` must start with '/'")]
    MissingLeadingSlash(String),

    /// A `:` or `*` segment with nothing after the marker.
    #[error("route pattern `{0}` has a parameter segment with an empty name")]
    EmptyParamName(String),

    /// The same parameter name appears twice in one pattern.
    #[error("route pattern `{pattern}` declares parameter `{name}` more than once")]
    DuplicateParam { pattern: String, name: String },

    /// Optional parameters and catch-alls consume the tail of the path,
    /// so nothing may follow them.
    #[error("segment `{segment}` must be the last segment of pattern `{pattern}`")]
    NotLastSegment { pattern: String, segment: String },
}

/// A route table whose invariants do not hold at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// One of the declared patterns failed to compile.
    #[error("route `{name}`: {source}")]
    Pattern {
        name: String,
        #[source]
        source: PatternError,
    },

    /// Route names are unique within a table.
    #[error("route name `{0}` is registered more than once")]
    DuplicateName(String),

    /// Two patterns have the same shape (they match exactly the same set of
    /// concrete paths), so one of them could never be the intended target.
    #[error("routes `{first}` and `{second}` declare equivalent patterns (`{pattern}`)")]
    EquivalentPattern {
        first: String,
        second: String,
        pattern: String,
    },

    /// A redirect route whose target pattern references a parameter the
    /// source pattern does not capture.
    #[error("redirect `{name}` targets `{target}`, which needs parameter `{param}` its pattern does not capture")]
    UnboundRedirectParam {
        name: String,
        target: String,
        param: String,
    },
}

/// A path that could not be resolved against the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No registered pattern matches the requested path. The table defines
    /// no implicit fallback; the surrounding application decides what to
    /// render (or registers an explicit `*rest` route).
    #[error("no route matches `{path}`")]
    NotFound { path: String },

    /// The input was not a well-formed path (a leading slash is required).
    #[error("malformed path `{path}`: a route path must start with '/'")]
    Malformed { path: String },
}

/// A URL that could not be generated from a named route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("no route is named `{0}`")]
    UnknownRoute(String),

    #[error("pattern `{pattern}` needs parameter `{param}` to build a URL")]
    MissingParam { pattern: String, param: String },
}
