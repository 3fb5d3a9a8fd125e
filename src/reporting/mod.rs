//! Report aggregation and logging
//!
//! This module holds the per-kind row records, the run summary and the
//! structured logging helpers used throughout the application.

pub mod logging;
pub mod report;

// Re-export commonly used items
pub use report::{
    AssetRow, AuditReport, AuditSummary, BrokenImageRow, BrokenLinkRow, BrokenPdfRow, MetadataRow,
    NavLinkRow, ReportKind, ReportRow, TextMatchRow,
};
