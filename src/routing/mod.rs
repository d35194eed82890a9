//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup or reload):
//!     Route[] (method, pattern, handler, auth)
//!     → sub_route.rs (split pattern into segments)
//!     → node.rs (fold into a validated tree)
//!     → Freeze as immutable RouteNode
//!
//! Incoming Request (method, path)
//!     → matcher.rs (walk tree, bind variables)
//!     → Return: Matched, NotFound or MethodNotAllowed
//! ```
//!
//! # Design Decisions
//! - Conflicts are build-time errors, never request-time surprises
//! - Tree is immutable at runtime and shared without locks
//! - Deterministic: fixed segment beats variable segment, nothing else
//! - Handler and auth types are opaque to the tree

pub mod error;
pub mod matcher;
pub mod method;
pub mod node;
pub mod router;
pub mod segment;
pub mod sub_route;

pub use error::{RouteError, RouteResult};
pub use matcher::{resolve, MatchResult, PathVariables};
pub use method::HttpMethod;
pub use node::{NodeKind, RouteNode};
pub use router::{AuthRequirement, HandlerId, RouteTable, TableMatch};
pub use segment::{Segment, SegmentError};
pub use sub_route::{Route, SubRoute};
