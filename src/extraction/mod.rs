//! HTML extraction
//!
//! Turns a parsed page into the items an audit checks: embedded assets
//! (links, images, PDFs), navigation links, metadata and visible text.

pub mod assets;
pub mod page;

// Re-export commonly used items
pub use assets::{AssetSelection, extract_assets, extract_selected, parse_srcset};
pub use page::{NavRegion, PageMetadata, contains_keyword, extract_metadata, extract_nav_links};
