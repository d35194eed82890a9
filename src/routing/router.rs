//! Route table served by the dispatcher.
//!
//! # Responsibilities
//! - Turn configured routes into a validated tree
//! - Resolve requests against it
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Handlers and auth requirements are opaque identifiers from config
//! - A reload builds a new table; an existing table never changes

use std::fmt;

use serde::Serialize;

use crate::config::RouteConfig;
use crate::routing::error::RouteResult;
use crate::routing::matcher::{resolve, MatchResult};
use crate::routing::method::HttpMethod;
use crate::routing::node::RouteNode;
use crate::routing::sub_route::Route;

/// Name of the handler a route is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HandlerId(pub String);

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authorization requirement attached to a route. Forwarded, never evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AuthRequirement(pub String);

impl fmt::Display for AuthRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolution result over the configured table.
pub type TableMatch<'a> = MatchResult<'a, HandlerId, AuthRequirement>;

/// Compiled route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    root: RouteNode<HandlerId, AuthRequirement>,
}

impl RouteTable {
    /// Build a table from configured routes.
    pub fn from_config(routes: &[RouteConfig]) -> RouteResult<Self> {
        let root = RouteNode::create(routes.iter().map(|route| {
            let declared = Route::new(
                route.method,
                route.path.clone(),
                HandlerId(route.handler.clone()),
            );
            match &route.auth {
                Some(auth) => declared.with_auth(AuthRequirement(auth.clone())),
                None => declared,
            }
        }))?;

        tracing::info!(routes = root.route_count(), "Route table compiled");
        Ok(Self { root })
    }

    pub fn root(&self) -> &RouteNode<HandlerId, AuthRequirement> {
        &self.root
    }

    pub fn route_count(&self) -> usize {
        self.root.route_count()
    }

    pub fn resolve(&self, method: HttpMethod, path: &str) -> TableMatch<'_> {
        resolve(&self.root, method, path)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            root: RouteNode::empty(),
        }
    }
}
