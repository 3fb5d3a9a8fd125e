//! Audit orchestration
//!
//! One generic engine drives every report: fetch each page, let the
//! report's rule extract or inspect, verify references with bounded
//! concurrency and fold the outcomes into an ordered report.

pub mod control;
pub mod orchestrator;
pub mod rules;

// Re-export commonly used items
pub use control::AuditControl;
pub use orchestrator::{AuditRequest, Auditor, resolve_targets, run_report};
pub use rules::{AuditRule, AuditTarget, PageInspection};
