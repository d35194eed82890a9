//! Route tree construction errors.

use thiserror::Error;

use crate::routing::method::HttpMethod;
use crate::routing::segment::SegmentError;

/// Errors that abort building a route tree.
///
/// Paths are rendered in normalized form (`/users/{id}`), so a message names
/// the same route however its pattern was formatted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Two routes share both method and resolved path.
    #[error("multiple routes with the same HTTP method {method} and path {path}")]
    DuplicateRoute { method: HttpMethod, path: String },

    /// Routes disagree on the variable name used at one tree position.
    #[error("routes found with clashing variable names at {path}: {}", .names.join(", "))]
    VariableNameClash { path: String, names: Vec<String> },

    /// A variable branch that cannot be represented by a single binding.
    #[error("ambiguous variable route at {path}: variable `{name}` is already bound on this path")]
    AmbiguousVariableRoute { path: String, name: String },

    /// A pattern component could not be classified.
    #[error("invalid path pattern `{path}` for {method}: {source}")]
    InvalidSegment {
        method: HttpMethod,
        path: String,
        #[source]
        source: SegmentError,
    },
}

/// Result type for route tree operations.
pub type RouteResult<T> = Result<T, RouteError>;
