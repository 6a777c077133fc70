//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Resolve config → Credentials / identity → Connect client → Run workflow
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then signer, then network
//! - One workflow run per process; everything is released on exit

pub mod startup;
