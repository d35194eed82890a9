//! Route-matching trie with a small route table service around it.
//!
//! The core lives in [`routing`]: declared routes are folded into an
//! immutable [`RouteNode`] tree, conflicts are rejected while building, and
//! requests are resolved to a [`MatchResult`].
//!
//! ```
//! use route_trie::{HttpMethod, MatchResult, Route, RouteNode};
//!
//! let root = RouteNode::<&str, ()>::create([
//!     Route::new(HttpMethod::Get, "/users/{id}", "show_user"),
//! ])
//! .unwrap();
//!
//! match root.resolve(HttpMethod::Get, "/users/42") {
//!     MatchResult::Matched { handler, path_variables, .. } => {
//!         assert_eq!(*handler, "show_user");
//!         assert_eq!(path_variables["id"], "42");
//!     }
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

// Core
pub mod routing;

// Service shell
pub mod config;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::TableConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{
    resolve, HttpMethod, MatchResult, NodeKind, PathVariables, Route, RouteError, RouteNode,
    RouteTable,
};
