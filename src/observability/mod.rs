//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Workflows and chain client produce:
//!     → logging.rs (structured log events, one span per run with a run_id)
//!
//! Consumers:
//!     → stderr (operator terminal, CI logs)
//! ```
//!
//! # Design Decisions
//! - Structured fields rather than formatted strings
//! - Run ID (UUID v4) flows through every event of a run
//! - Secrets are never recorded

pub mod logging;
