use rustc_hash::FxHashSet;

use crate::core::error::{AuditError, Result};
use crate::core::types::PageUrl;

const DEFAULT_SCHEME: &str = "https://";

/// Turn free-form operator text into an ordered, deduplicated page list.
///
/// Segments are separated by commas or newlines; blank segments are dropped.
/// Anything without an `http://`/`https://` prefix (checked
/// case-insensitively) is prefixed with `https://`. Order of first
/// occurrence is preserved. More than `max_count` unique URLs is an error
/// carrying the actual count; the list is never truncated.
///
/// # Examples
/// ```
/// use siteaudit::discovery::normalize_page_urls;
///
/// let pages = normalize_page_urls("example.com, https://example.com", 20).unwrap();
/// assert_eq!(pages.len(), 1);
/// assert_eq!(pages[0].as_str(), "https://example.com");
/// ```
pub fn normalize_page_urls(raw: &str, max_count: usize) -> Result<Vec<PageUrl>> {
    let mut seen = FxHashSet::default();
    let mut pages = Vec::new();

    for segment in raw.split([',', '\n']) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        let url = with_scheme(segment);
        if seen.insert(url.clone()) {
            pages.push(PageUrl::new(url));
        }
    }

    if pages.len() > max_count {
        return Err(AuditError::TooManyInputs {
            count: pages.len(),
            max: max_count,
        });
    }

    Ok(pages)
}

fn with_scheme(segment: &str) -> String {
    if has_http_scheme(segment) {
        segment.to_string()
    } else {
        // covers bare hosts as well as `www.` prefixes
        format!("{DEFAULT_SCHEME}{segment}")
    }
}

fn has_http_scheme(segment: &str) -> bool {
    let lower = segment
        .get(..DEFAULT_SCHEME.len())
        .unwrap_or(segment)
        .to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
