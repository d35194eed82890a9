//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Route building, reloads and dispatch produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured fields rather than formatted strings where practical
//! - Request ID attached to every dispatch log line
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
