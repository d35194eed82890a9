//! Route declarations and their parsed form.

use crate::routing::error::RouteError;
use crate::routing::method::HttpMethod;
use crate::routing::segment::{Segment, SegmentError};

/// A declared route: method, path pattern, handler and an optional
/// authorization requirement. Handler and auth are carried opaquely.
#[derive(Debug, Clone, PartialEq)]
pub struct Route<H, A> {
    pub method: HttpMethod,
    pub path: String,
    pub handler: H,
    pub auth: Option<A>,
}

impl<H, A> Route<H, A> {
    pub fn new(method: HttpMethod, path: impl Into<String>, handler: H) -> Self {
        Self {
            method,
            path: path.into(),
            handler,
            auth: None,
        }
    }

    /// Attach an authorization requirement.
    pub fn with_auth(mut self, auth: A) -> Self {
        self.auth = Some(auth);
        self
    }
}

/// A route reduced to its ordered segment sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SubRoute<H, A> {
    pub segments: Vec<Segment>,
    pub method: HttpMethod,
    pub handler: H,
    pub auth: Option<A>,
}

impl<H, A> SubRoute<H, A> {
    /// Normalized pattern, `/` for the root.
    pub fn path(&self) -> String {
        render_path(&self.segments)
    }
}

impl<H, A> TryFrom<Route<H, A>> for SubRoute<H, A> {
    type Error = RouteError;

    fn try_from(route: Route<H, A>) -> Result<Self, Self::Error> {
        let segments = parse_pattern(&route.path).map_err(|source| RouteError::InvalidSegment {
            method: route.method,
            path: route.path.clone(),
            source,
        })?;

        Ok(Self {
            segments,
            method: route.method,
            handler: route.handler,
            auth: route.auth,
        })
    }
}

/// Split a pattern on `/`, dropping empty components.
pub fn parse_pattern(pattern: &str) -> Result<Vec<Segment>, SegmentError> {
    components(pattern).map(Segment::parse).collect()
}

/// Non-empty components of a path, as used both for patterns and requests.
pub(crate) fn components(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|c| !c.is_empty())
}

pub(crate) fn render_path<'a>(segments: impl IntoIterator<Item = &'a Segment>) -> String {
    let mut path = String::new();
    for segment in segments {
        path.push('/');
        path.push_str(&segment.to_string());
    }
    if path.is_empty() {
        path.push('/');
    }
    path
}
