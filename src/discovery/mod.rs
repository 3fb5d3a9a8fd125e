//! Page discovery
//!
//! This module turns operator input or a sitemap into the ordered list of
//! pages an audit run crawls.

pub mod normalize;
pub mod sitemap;

// Re-export commonly used items
pub use normalize::normalize_page_urls;
pub use sitemap::{discover_sitemap_pages, parse_locations};

/// Where the pages of an audit run come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    /// Comma/newline separated URLs typed by the operator
    Raw(String),
    /// A sitemap (or sitemap index) URL
    Sitemap(String),
}
