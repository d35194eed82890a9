//! Request-time route resolution.
//!
//! # Responsibilities
//! - Walk the tree one path component at a time
//! - Bind variable components by name
//! - Distinguish a missing path from a missing method
//!
//! # Design Decisions
//! - A fixed child always wins over the variable child; no backtracking
//! - Pure function of (tree, method, path); borrows from the tree
//! - Unmatched requests are result variants, never errors

use std::collections::{BTreeSet, HashMap};

use crate::routing::method::HttpMethod;
use crate::routing::node::RouteNode;
use crate::routing::sub_route::components;

/// Variable name to bound path component.
pub type PathVariables = HashMap<String, String>;

/// Outcome of resolving a request against the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult<'a, H, A> {
    Matched {
        handler: &'a H,
        auth: Option<&'a A>,
        path_variables: PathVariables,
    },
    NotFound,
    MethodNotAllowed {
        allowed_methods: BTreeSet<HttpMethod>,
    },
}

impl<H, A> MatchResult<'_, H, A> {
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchResult::Matched { .. })
    }

    /// Short label used in logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            MatchResult::Matched { .. } => "matched",
            MatchResult::NotFound => "not_found",
            MatchResult::MethodNotAllowed { .. } => "method_not_allowed",
        }
    }
}

/// Resolve `method` and `path` against a built tree.
pub fn resolve<'a, H, A>(
    root: &'a RouteNode<H, A>,
    method: HttpMethod,
    path: &str,
) -> MatchResult<'a, H, A> {
    let Some((node, path_variables)) = root.find(path) else {
        return MatchResult::NotFound;
    };

    match node.handler(method) {
        Some((handler, auth)) => MatchResult::Matched {
            handler,
            auth,
            path_variables,
        },
        None if node.handlers().is_empty() => MatchResult::NotFound,
        None => MatchResult::MethodNotAllowed {
            allowed_methods: node.allowed_methods(),
        },
    }
}

impl<H, A> RouteNode<H, A> {
    /// Walk to the node addressed by `path`, ignoring methods.
    pub fn find(&self, path: &str) -> Option<(&RouteNode<H, A>, PathVariables)> {
        let mut node = self;
        let mut path_variables = PathVariables::new();

        for component in components(path) {
            node = match node.fixed_child(component) {
                Some(child) => child,
                None => {
                    let child = node.variable_child()?;
                    path_variables.insert(child.name().to_string(), component.to_string());
                    child
                }
            };
        }

        Some((node, path_variables))
    }

    /// See [`resolve`].
    pub fn resolve(&self, method: HttpMethod, path: &str) -> MatchResult<'_, H, A> {
        resolve(self, method, path)
    }
}
