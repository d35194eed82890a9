//! Resolution responses.
//!
//! # Responsibilities
//! - Turn a table match into an owned, serializable resolution
//! - Map resolutions to status codes and the `Allow` header
//!
//! # Design Decisions
//! - Same JSON shape for the dispatcher and `route-trie match`
//! - Methods outside [`HttpMethod`] resolve by path only
//! - Request methods match exactly; CLI tokens ignore case

use std::collections::BTreeMap;

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::routing::{AuthRequirement, HandlerId, HttpMethod, MatchResult, RouteTable, TableMatch};

/// Owned outcome of resolving one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    Matched {
        handler: HandlerId,
        auth: Option<AuthRequirement>,
        path_variables: BTreeMap<String, String>,
    },
    NotFound,
    MethodNotAllowed { allowed_methods: Vec<HttpMethod> },
}

impl Resolution {
    /// Resolve a method token, as typed on the command line.
    pub fn resolve(table: &RouteTable, method: &str, path: &str) -> Self {
        Self::resolve_method(table, method.parse().ok(), path)
    }

    /// Resolve an incoming HTTP request method.
    pub fn resolve_request(table: &RouteTable, method: &Method, path: &str) -> Self {
        Self::resolve_method(table, HttpMethod::try_from(method).ok(), path)
    }

    /// `None` stands for a method outside [`HttpMethod`].
    fn resolve_method(table: &RouteTable, method: Option<HttpMethod>, path: &str) -> Self {
        match method {
            Some(method) => table.resolve(method, path).into(),
            None => match table.root().find(path) {
                Some((node, _)) if !node.handlers().is_empty() => Resolution::MethodNotAllowed {
                    allowed_methods: node.allowed_methods().into_iter().collect(),
                },
                _ => Resolution::NotFound,
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Resolution::Matched { .. } => StatusCode::OK,
            Resolution::NotFound => StatusCode::NOT_FOUND,
            Resolution::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub fn outcome(&self) -> &'static str {
        match self {
            Resolution::Matched { .. } => "matched",
            Resolution::NotFound => "not_found",
            Resolution::MethodNotAllowed { .. } => "method_not_allowed",
        }
    }

    /// `Allow` header value, for method-not-allowed resolutions.
    pub fn allow_header(&self) -> Option<String> {
        match self {
            Resolution::MethodNotAllowed { allowed_methods } => Some(
                allowed_methods
                    .iter()
                    .map(HttpMethod::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            _ => None,
        }
    }
}

impl From<TableMatch<'_>> for Resolution {
    fn from(result: TableMatch<'_>) -> Self {
        match result {
            MatchResult::Matched {
                handler,
                auth,
                path_variables,
            } => Resolution::Matched {
                handler: handler.clone(),
                auth: auth.cloned(),
                path_variables: path_variables.into_iter().collect(),
            },
            MatchResult::NotFound => Resolution::NotFound,
            MatchResult::MethodNotAllowed { allowed_methods } => Resolution::MethodNotAllowed {
                allowed_methods: allowed_methods.into_iter().collect(),
            },
        }
    }
}

impl IntoResponse for Resolution {
    fn into_response(self) -> Response {
        let status = self.status();
        let allow = self.allow_header();
        let mut response = (status, Json(self)).into_response();

        if let Some(value) = allow.and_then(|allow| HeaderValue::from_str(&allow).ok()) {
            response.headers_mut().insert(header::ALLOW, value);
        }
        response
    }
}
