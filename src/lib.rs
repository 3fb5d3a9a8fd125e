//! siteaudit - audit web pages for broken links, images, PDFs and metadata
//!
//! Every report follows the same path: discover pages, fetch each page,
//! extract the references a report cares about, verify their live status
//! and keep only the interesting results as structured rows.
//!
//! ```no_run
//! use siteaudit::audit::{AuditControl, AuditRequest, run_report};
//! use siteaudit::config::Config;
//! use siteaudit::discovery::PageSource;
//! use siteaudit::reporting::ReportKind;
//!
//! # async fn example() -> siteaudit::Result<()> {
//! let request = AuditRequest {
//!     kind: ReportKind::Asset404,
//!     source: Some(PageSource::Raw("example.com".to_string())),
//!     keyword: None,
//! };
//! let report = run_report(&request, &Config::default(), AuditControl::new(), None).await?;
//! println!("{}", report.summary);
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod config;
pub mod core;
pub mod discovery;
pub mod extraction;
pub mod reporting;
pub mod ui;
pub mod validation;

// Re-export commonly used items
pub use audit::{AuditControl, AuditRequest, Auditor, run_report};
pub use config::{CliConfig, Config, NavSite};
pub use self::core::{AuditError, PageUrl, Result};
pub use reporting::{AuditReport, AuditSummary, ReportKind, ReportRow};
