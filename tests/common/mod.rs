//! Shared utilities for integration tests.

#![allow(dead_code)]

use route_trie::config::RouteConfig;
use route_trie::{HttpMethod, Route, RouteTable};

/// Distinguishable handler used by the tree tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handler(pub &'static str);

pub type TestRoute = Route<Handler, &'static str>;

pub fn route(method: HttpMethod, path: &str, name: &'static str) -> TestRoute {
    Route::new(method, path, Handler(name))
}

pub fn route_config(method: HttpMethod, path: &str, handler: &str) -> RouteConfig {
    RouteConfig {
        method,
        path: path.to_string(),
        handler: handler.to_string(),
        auth: None,
    }
}

/// A small but representative table.
pub fn sample_table() -> RouteTable {
    let mut routes = vec![
        route_config(HttpMethod::Get, "/", "index"),
        route_config(HttpMethod::Get, "/users", "list_users"),
        route_config(HttpMethod::Post, "/users", "create_user"),
        route_config(HttpMethod::Get, "/users/me", "current_user"),
        route_config(HttpMethod::Get, "/users/{id}", "get_user"),
        route_config(HttpMethod::Delete, "/users/{id}", "delete_user"),
    ];
    routes[5].auth = Some("users:admin".to_string());
    RouteTable::from_config(&routes).unwrap()
}
