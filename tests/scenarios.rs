//! End-to-end build and match scenarios.

mod common;

use std::collections::BTreeSet;

use common::{route, Handler};
use route_trie::{HttpMethod, MatchResult, NodeKind, PathVariables, RouteError, RouteNode};

fn vars(pairs: &[(&str, &str)]) -> PathVariables {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn assert_matched(
    result: MatchResult<'_, Handler, &'static str>,
    expected: Handler,
    expected_vars: PathVariables,
) {
    match result {
        MatchResult::Matched {
            handler,
            path_variables,
            ..
        } => {
            assert_eq!(*handler, expected);
            assert_eq!(path_variables, expected_vars);
        }
        other => panic!("expected match for {:?}, got {:?}", expected, other),
    }
}

#[test]
fn test_fixed_routes_and_method_not_allowed() {
    let h1 = Handler("h1");
    let h2 = Handler("h2");
    let root = RouteNode::create([
        route(HttpMethod::Get, "/foo", "h1"),
        route(HttpMethod::Post, "/foo/bar", "h2"),
    ])
    .unwrap();

    assert_matched(root.resolve(HttpMethod::Get, "/foo"), h1, vars(&[]));
    assert_matched(root.resolve(HttpMethod::Post, "/foo/bar"), h2, vars(&[]));
    assert_eq!(
        root.resolve(HttpMethod::Get, "/foo/bar"),
        MatchResult::MethodNotAllowed {
            allowed_methods: BTreeSet::from([HttpMethod::Post]),
        }
    );
}

#[test]
fn test_single_variable_route() {
    let root = RouteNode::create([route(HttpMethod::Post, "/{bar}", "h")]).unwrap();
    assert_matched(
        root.resolve(HttpMethod::Post, "/anything"),
        Handler("h"),
        vars(&[("bar", "anything")]),
    );
}

#[test]
fn test_shared_variable_node() {
    let root = RouteNode::create([
        route(HttpMethod::Get, "/{foo}", "get"),
        route(HttpMethod::Post, "/{foo}", "post"),
    ])
    .unwrap();

    let node = root.variable_child().unwrap();
    assert_eq!(node.kind(), NodeKind::Variable);
    assert_eq!(node.handlers().len(), 2);

    assert_matched(root.resolve(HttpMethod::Get, "/x"), Handler("get"), vars(&[("foo", "x")]));
    assert_matched(root.resolve(HttpMethod::Post, "/x"), Handler("post"), vars(&[("foo", "x")]));
}

#[test]
fn test_duplicate_route_fails() {
    let err = RouteNode::create([
        route(HttpMethod::Get, "/foo", "a"),
        route(HttpMethod::Get, "/foo", "b"),
    ])
    .unwrap_err();
    assert!(matches!(err, RouteError::DuplicateRoute { method: HttpMethod::Get, .. }));
}

#[test]
fn test_variable_name_clash_fails() {
    let err = RouteNode::create([
        route(HttpMethod::Get, "/{foo}/bar", "a"),
        route(HttpMethod::Get, "/{bar}", "b"),
    ])
    .unwrap_err();
    assert!(matches!(err, RouteError::VariableNameClash { .. }));
}

#[test]
fn test_root_route() {
    let root = RouteNode::create([route(HttpMethod::Get, "/", "root")]).unwrap();
    assert_eq!(root.handlers().len(), 1);
    assert!(root.fixed_children().is_empty());
    assert!(root.variable_child().is_none());
    assert_matched(root.resolve(HttpMethod::Get, "/"), Handler("root"), vars(&[]));
}

#[test]
fn test_fixed_routes_follow_literal_path() {
    let root = RouteNode::create([route(HttpMethod::Put, "/a/b/c", "abc")]).unwrap();

    let mut node = &root;
    for literal in ["a", "b", "c"] {
        assert!(node.variable_child().is_none());
        assert_eq!(node.fixed_children().len(), 1);
        node = node.fixed_child(literal).unwrap();
        assert!(node.is_fixed());
        assert_eq!(node.name(), literal);
    }
    assert_eq!(node.handlers().len(), 1);
    assert_eq!(node.handler(HttpMethod::Put), Some((&Handler("abc"), None)));
}

#[test]
fn test_variable_node_reached_at_declared_depth() {
    let root =
        RouteNode::create([route(HttpMethod::Get, "/orgs/{org}/members", "members")]).unwrap();
    let orgs = root.fixed_child("orgs").unwrap();
    let org = orgs.variable_child().unwrap();
    assert!(org.is_variable());
    assert_eq!(org.name(), "org");
    assert!(org.fixed_child("members").unwrap().is_fixed());
}

#[test]
fn test_variable_route_with_and_without_continuation() {
    // Both share the `foo` variable node; the shorter route ends on it.
    let root = RouteNode::create([
        route(HttpMethod::Get, "/{foo}/bar", "long"),
        route(HttpMethod::Get, "/{foo}", "short"),
    ])
    .unwrap();

    assert_matched(root.resolve(HttpMethod::Get, "/x"), Handler("short"), vars(&[("foo", "x")]));
    assert_matched(root.resolve(HttpMethod::Get, "/x/bar"), Handler("long"), vars(&[("foo", "x")]));
    assert_eq!(root.resolve(HttpMethod::Get, "/x/baz"), MatchResult::NotFound);
}

#[test]
fn test_auth_requirement_forwarded() {
    let root = RouteNode::create([
        route(HttpMethod::Get, "/admin", "admin").with_auth("role:admin"),
        route(HttpMethod::Get, "/public", "public"),
    ])
    .unwrap();

    match root.resolve(HttpMethod::Get, "/admin") {
        MatchResult::Matched { auth, .. } => assert_eq!(auth, Some(&"role:admin")),
        other => panic!("unexpected: {:?}", other),
    }
    match root.resolve(HttpMethod::Get, "/public") {
        MatchResult::Matched { auth, .. } => assert_eq!(auth, None),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_tree_is_shareable_across_threads() {
    let root = std::sync::Arc::new(
        RouteNode::create([route(HttpMethod::Get, "/items/{id}", "item")]).unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let root = root.clone();
            std::thread::spawn(move || {
                let path = format!("/items/{}", i);
                match root.resolve(HttpMethod::Get, &path) {
                    MatchResult::Matched { path_variables, .. } => path_variables["id"].clone(),
                    _ => String::new(),
                }
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), i.to_string());
    }
}
