//! The route tree and its builder.
//!
//! # Construction
//! ```text
//! Route[]
//!     → SubRoute[] (segments parsed once)
//!     → partition by the segment at the current depth
//!         exhausted  → handlers of this node
//!         fixed      → one child per literal
//!         variable   → at most one child, name checked
//!     → recurse per child, freeze, link into parent
//! ```
//!
//! Groups are kept in sorted maps while folding, so the reported error does not
//! depend on the order routes were declared in. Nothing is mutated once a node
//! has been returned from the builder.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use crate::routing::error::{RouteError, RouteResult};
use crate::routing::method::HttpMethod;
use crate::routing::segment::Segment;
use crate::routing::sub_route::{render_path, Route, SubRoute};

/// How a node is reached from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Reached by a literal segment. The root is always fixed.
    Fixed,
    /// Reached by a capturing segment.
    Variable,
}

/// One position in the routing tree.
#[derive(Debug, Clone)]
pub struct RouteNode<H, A> {
    kind: NodeKind,
    name: String,
    handlers: HashMap<HttpMethod, (H, Option<A>)>,
    fixed_children: HashMap<String, RouteNode<H, A>>,
    variable_child: Option<Box<RouteNode<H, A>>>,
}

impl<H, A> RouteNode<H, A> {
    /// Build a validated tree from a collection of routes.
    ///
    /// Fails on an invalid pattern before checking declaration conflicts; no
    /// partial tree is ever returned. The error reported does not depend on
    /// the order of `routes`.
    pub fn create<I>(routes: I) -> RouteResult<Self>
    where
        I: IntoIterator<Item = Route<H, A>>,
    {
        let mut sub_routes = Vec::new();
        let mut invalid = Vec::new();
        for route in routes {
            match SubRoute::try_from(route) {
                Ok(sub_route) => sub_routes.push(sub_route),
                Err(e) => invalid.push(e),
            }
        }
        if let Some(e) = first_invalid(invalid) {
            return Err(e);
        }
        let count = sub_routes.len();

        let mut prefix = Vec::new();
        let root = build(NodeKind::Fixed, String::new(), sub_routes, &mut prefix)?;

        tracing::debug!(routes = count, "Route tree built");
        Ok(root)
    }

    /// A root without routes.
    pub fn empty() -> Self {
        Self {
            kind: NodeKind::Fixed,
            name: String::new(),
            handlers: HashMap::new(),
            fixed_children: HashMap::new(),
            variable_child: None,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_fixed(&self) -> bool {
        self.kind == NodeKind::Fixed
    }

    pub fn is_variable(&self) -> bool {
        self.kind == NodeKind::Variable
    }

    /// Literal or variable name that reaches this node; empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Routes terminating exactly at this node.
    pub fn handlers(&self) -> &HashMap<HttpMethod, (H, Option<A>)> {
        &self.handlers
    }

    pub fn handler(&self, method: HttpMethod) -> Option<(&H, Option<&A>)> {
        self.handlers
            .get(&method)
            .map(|(handler, auth)| (handler, auth.as_ref()))
    }

    pub fn fixed_children(&self) -> &HashMap<String, RouteNode<H, A>> {
        &self.fixed_children
    }

    pub fn fixed_child(&self, literal: &str) -> Option<&RouteNode<H, A>> {
        self.fixed_children.get(literal)
    }

    pub fn variable_child(&self) -> Option<&RouteNode<H, A>> {
        self.variable_child.as_deref()
    }

    /// Methods registered at this node, in declaration order of [`HttpMethod`].
    pub fn allowed_methods(&self) -> BTreeSet<HttpMethod> {
        self.handlers.keys().copied().collect()
    }

    /// Number of routes in this subtree.
    pub fn route_count(&self) -> usize {
        self.handlers.len()
            + self
                .fixed_children
                .values()
                .map(RouteNode::route_count)
                .sum::<usize>()
            + self.variable_child().map_or(0, RouteNode::route_count)
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let label = match (self.kind, depth) {
            (NodeKind::Fixed, 0) => "/".to_string(),
            (NodeKind::Fixed, _) => self.name.clone(),
            (NodeKind::Variable, _) => format!("{{{}}}", self.name),
        };
        write!(f, "{:indent$}{}", "", label, indent = depth * 2)?;

        if !self.handlers.is_empty() {
            let methods: Vec<&str> = self.allowed_methods().iter().map(|m| m.as_str()).collect();
            write!(f, " [{}]", methods.join(", "))?;
        }
        writeln!(f)?;

        let mut literals: Vec<&String> = self.fixed_children.keys().collect();
        literals.sort();
        for literal in literals {
            self.fixed_children[literal].write_outline(f, depth + 1)?;
        }
        if let Some(child) = self.variable_child() {
            child.write_outline(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Indented outline of the tree, children sorted, variable child last.
impl<H, A> fmt::Display for RouteNode<H, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, 0)
    }
}

type Group<H, A> = BTreeMap<String, Vec<SubRoute<H, A>>>;

// `prefix` holds the segments leading to the node under construction.
fn build<H, A>(
    kind: NodeKind,
    name: String,
    sub_routes: Vec<SubRoute<H, A>>,
    prefix: &mut Vec<Segment>,
) -> RouteResult<RouteNode<H, A>> {
    let depth = prefix.len();
    let mut terminal = Vec::new();
    let mut fixed: Group<H, A> = BTreeMap::new();
    let mut variable: Group<H, A> = BTreeMap::new();

    for sub_route in sub_routes {
        let next = sub_route.segments.get(depth).cloned();
        match next {
            None => terminal.push(sub_route),
            Some(Segment::Fixed(value)) => fixed.entry(value).or_default().push(sub_route),
            Some(Segment::Variable(var)) => variable.entry(var).or_default().push(sub_route),
        }
    }

    let handlers = collect_handlers(terminal, prefix)?;

    let mut fixed_children = HashMap::with_capacity(fixed.len());
    for (literal, group) in fixed {
        prefix.push(Segment::Fixed(literal.clone()));
        let child = build(NodeKind::Fixed, literal.clone(), group, prefix)?;
        prefix.pop();
        fixed_children.insert(literal, child);
    }

    let variable_child = match single_variable(variable, prefix)? {
        Some((name, group)) => {
            prefix.push(Segment::Variable(name.clone()));
            let child = build(NodeKind::Variable, name, group, prefix)?;
            prefix.pop();
            Some(Box::new(child))
        }
        None => None,
    };

    Ok(RouteNode {
        kind,
        name,
        handlers,
        fixed_children,
        variable_child,
    })
}

fn collect_handlers<H, A>(
    mut terminal: Vec<SubRoute<H, A>>,
    prefix: &[Segment],
) -> RouteResult<HashMap<HttpMethod, (H, Option<A>)>> {
    // Sorted so that with several duplicated methods the lowest one is reported.
    terminal.sort_by_key(|sub_route| sub_route.method);

    let mut handlers = HashMap::with_capacity(terminal.len());
    for sub_route in terminal {
        if handlers.contains_key(&sub_route.method) {
            return Err(RouteError::DuplicateRoute {
                method: sub_route.method,
                path: render_path(prefix),
            });
        }
        handlers.insert(sub_route.method, (sub_route.handler, sub_route.auth));
    }
    Ok(handlers)
}

fn single_variable<H, A>(
    mut groups: Group<H, A>,
    prefix: &[Segment],
) -> RouteResult<Option<(String, Vec<SubRoute<H, A>>)>> {
    if groups.len() > 1 {
        return Err(RouteError::VariableNameClash {
            path: render_path(prefix),
            names: groups.into_keys().collect(),
        });
    }

    let Some((name, group)) = groups.pop_first() else {
        return Ok(None);
    };

    let bound = prefix
        .iter()
        .any(|segment| matches!(segment, Segment::Variable(n) if *n == name));
    if bound {
        let mut path = prefix.to_vec();
        path.push(Segment::Variable(name.clone()));
        return Err(RouteError::AmbiguousVariableRoute {
            path: render_path(&path),
            name,
        });
    }

    Ok(Some((name, group)))
}

// Pattern errors are reported for the smallest `(path, method)`.
fn first_invalid(errors: Vec<RouteError>) -> Option<RouteError> {
    errors.into_iter().min_by(|a, b| invalid_key(a).cmp(&invalid_key(b)))
}

fn invalid_key(error: &RouteError) -> Option<(&str, HttpMethod)> {
    match error {
        RouteError::InvalidSegment { method, path, .. } => Some((path.as_str(), *method)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Handler = &'static str;

    fn get(path: &str, handler: Handler) -> Route<Handler, &'static str> {
        Route::new(HttpMethod::Get, path, handler)
    }

    fn post(path: &str, handler: Handler) -> Route<Handler, &'static str> {
        Route::new(HttpMethod::Post, path, handler)
    }

    fn set<T: Ord + Clone>(items: &[T]) -> BTreeSet<T> {
        items.iter().cloned().collect()
    }

    #[test]
    fn test_simple_route_node() {
        let root = RouteNode::create([get("/foo", "h1"), post("/foo/bar", "h2")]).unwrap();

        assert_eq!(root.name(), "");
        assert!(root.variable_child().is_none());
        assert!(root.handlers().is_empty());
        assert_eq!(
            root.fixed_children().keys().collect::<Vec<_>>(),
            vec!["foo"]
        );

        let foo = root.fixed_child("foo").unwrap();
        assert_eq!(foo.allowed_methods(), set(&[HttpMethod::Get]));
        assert_eq!(foo.handler(HttpMethod::Get), Some((&"h1", None)));

        let bar = foo.fixed_child("bar").unwrap();
        assert_eq!(bar.allowed_methods(), set(&[HttpMethod::Post]));
        assert_eq!(bar.handler(HttpMethod::Post), Some((&"h2", None)));
        assert!(bar.fixed_children().is_empty());
    }

    #[test]
    fn test_variable_route_node() {
        let root = RouteNode::create([post("/{bar}", "h")]).unwrap();
        assert!(root.fixed_children().is_empty());

        let child = root.variable_child().unwrap();
        assert!(child.is_variable());
        assert_eq!(child.name(), "bar");
        assert_eq!(child.handler(HttpMethod::Post), Some((&"h", None)));
    }

    #[test]
    fn test_same_path_different_methods() {
        let root = RouteNode::create([get("/foo", "h1"), post("/foo", "h2")]).unwrap();
        let foo = root.fixed_child("foo").unwrap();
        assert_eq!(foo.allowed_methods(), set(&[HttpMethod::Get, HttpMethod::Post]));
        assert_eq!(foo.handler(HttpMethod::Get), Some((&"h1", None)));
        assert_eq!(foo.handler(HttpMethod::Post), Some((&"h2", None)));
    }

    #[test]
    fn test_shared_variable_node_different_methods() {
        let root = RouteNode::create([get("/{foo}", "h1"), post("/{foo}", "h2")]).unwrap();
        let child = root.variable_child().unwrap();
        assert_eq!(child.kind(), NodeKind::Variable);
        assert_eq!(child.name(), "foo");
        assert_eq!(child.allowed_methods(), set(&[HttpMethod::Get, HttpMethod::Post]));
        assert_eq!(child.handler(HttpMethod::Get), Some((&"h1", None)));
        assert_eq!(child.handler(HttpMethod::Post), Some((&"h2", None)));
    }

    #[test]
    fn test_duplicate_routes() {
        let err = RouteNode::create([get("/foo", "h1"), get("/foo", "h2")]).unwrap_err();
        assert_eq!(
            err,
            RouteError::DuplicateRoute {
                method: HttpMethod::Get,
                path: "/foo".into(),
            }
        );
        assert!(err
            .to_string()
            .starts_with("multiple routes with the same HTTP method"));
    }

    #[test]
    fn test_duplicate_detected_across_formatting() {
        let err = RouteNode::create([get("/a/{id}", "h1"), get("a//{id}/", "h2")]).unwrap_err();
        assert_eq!(
            err,
            RouteError::DuplicateRoute {
                method: HttpMethod::Get,
                path: "/a/{id}".into(),
            }
        );
    }

    #[test]
    fn test_non_matching_variable_names() {
        let err = RouteNode::create([get("/{foo}/bar", "h"), get("/{bar}", "h")]).unwrap_err();
        assert_eq!(
            err,
            RouteError::VariableNameClash {
                path: "/".into(),
                names: vec!["bar".into(), "foo".into()],
            }
        );
        assert!(err
            .to_string()
            .starts_with("routes found with clashing variable names"));
    }

    #[test]
    fn test_variable_prefix_and_longer_route_share_node() {
        let root = RouteNode::create([get("/{foo}/bar", "h1"), get("/{foo}", "h2")]).unwrap();
        let foo = root.variable_child().unwrap();
        assert_eq!(foo.name(), "foo");
        assert_eq!(foo.handler(HttpMethod::Get), Some((&"h2", None)));

        let bar = foo.fixed_child("bar").unwrap();
        assert!(bar.is_fixed());
        assert_eq!(bar.handler(HttpMethod::Get), Some((&"h1", None)));
    }

    #[test]
    fn test_rebound_variable_is_ambiguous() {
        let err = RouteNode::create([get("/{id}/items/{id}", "h")]).unwrap_err();
        assert_eq!(
            err,
            RouteError::AmbiguousVariableRoute {
                path: "/{id}/items/{id}".into(),
                name: "id".into(),
            }
        );
    }

    #[test]
    fn test_root_route_node() {
        let root = RouteNode::create([get("/", "h")]).unwrap();
        assert!(root.is_fixed());
        assert_eq!(root.name(), "");
        assert!(root.variable_child().is_none());
        assert!(root.fixed_children().is_empty());
        assert_eq!(root.handlers().len(), 1);
        assert_eq!(root.handler(HttpMethod::Get), Some((&"h", None)));
    }

    #[test]
    fn test_auth_is_carried() {
        let root = RouteNode::create([get("/admin", "h").with_auth("admin")]).unwrap();
        let admin = root.fixed_child("admin").unwrap();
        assert_eq!(admin.handler(HttpMethod::Get), Some((&"h", Some(&"admin"))));
    }

    #[test]
    fn test_empty_route_set() {
        let root = RouteNode::<Handler, ()>::create(Vec::new()).unwrap();
        assert_eq!(root.route_count(), 0);
        assert!(root.handlers().is_empty());
    }

    #[test]
    fn test_outline_and_count() {
        let root = RouteNode::create([
            get("/", "root"),
            get("/users", "list"),
            post("/users", "create"),
            get("/users/{id}", "show"),
            get("/about", "about"),
        ])
        .unwrap();

        assert_eq!(root.route_count(), 5);
        assert_eq!(
            root.to_string(),
            "/ [GET]\n  about [GET]\n  users [GET, POST]\n    {id} [GET]\n"
        );
    }

    #[test]
    fn test_invalid_pattern_reported_independent_of_order() {
        let first = RouteNode::create([get("/b/}", "b"), get("/a/{", "a")]).unwrap_err();
        let second = RouteNode::create([get("/a/{", "a"), get("/b/}", "b")]).unwrap_err();

        assert_eq!(first, second);
        assert!(matches!(first, RouteError::InvalidSegment { ref path, .. } if path == "/a/{"));
    }

    #[test]
    fn test_invalid_pattern_wins_over_conflict() {
        let err = RouteNode::create([get("/x", "h1"), get("/x", "h2"), post("/{", "h3")])
            .unwrap_err();
        assert!(matches!(err, RouteError::InvalidSegment { .. }));
    }
}
