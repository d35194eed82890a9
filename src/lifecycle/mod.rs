//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Compile table → Start metrics → Bind listener → Serve
//!
//! Reload (startup.rs):
//!     Watcher compiles table → atomic swap into the dispatcher
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     SIGTERM/SIGINT → trigger → stop accepting → drain → exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - A failed reload is logged and the current table kept
//! - Listener binds last (traffic only when the table is ready)

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
