use log::{debug, info, warn};
use regex::Regex;
use rustc_hash::FxHashSet;

use crate::config::Config;
use crate::core::constants::timeouts;
use crate::core::error::{AuditError, Result};
use crate::core::types::PageUrl;

const LOC_PATTERN: &str = r"(?si)<loc>\s*(.*?)\s*</loc>";
const SITEMAP_INDEX_MARKER: &str = "<sitemapindex";

/// Fetch a sitemap and return its page URLs.
///
/// A `<sitemapindex>` is followed one level deep. URLs matching the
/// configured exclude patterns are dropped, duplicates removed in order and
/// the list capped at `max_pages`. Any fetch or parse problem is reported as
/// `AuditError::Discovery`.
pub async fn discover_sitemap_pages(
    client: &reqwest::Client,
    sitemap_url: &str,
    config: &Config,
) -> Result<Vec<PageUrl>> {
    let excludes = config.compile_sitemap_excludes()?;

    let body = fetch_sitemap(client, sitemap_url).await?;
    let mut locations = parse_locations(&body)?;

    if body.contains(SITEMAP_INDEX_MARKER) {
        info!("{sitemap_url} is a sitemap index with {} children", locations.len());
        let mut pages = Vec::new();
        for child in &locations {
            match fetch_sitemap(client, child).await {
                Ok(child_body) => pages.extend(parse_locations(&child_body)?),
                Err(e) => warn!("Skipping child sitemap {child}: {e}"),
            }
        }
        locations = pages;
    }

    let total = locations.len();
    let mut seen = FxHashSet::default();
    let pages: Vec<PageUrl> = locations
        .into_iter()
        .filter(|loc| !excludes.iter().any(|pattern| pattern.is_match(loc)))
        .filter(|loc| seen.insert(loc.clone()))
        .take(config.max_pages().unwrap_or(usize::MAX))
        .map(PageUrl::new)
        .collect();

    info!("Discovered {} pages from {total} sitemap entries", pages.len());
    Ok(pages)
}

async fn fetch_sitemap(client: &reqwest::Client, url: &str) -> Result<String> {
    debug!("Fetching sitemap {url}");
    let response = client
        .get(url)
        .timeout(std::time::Duration::from_secs(
            timeouts::SITEMAP_TIMEOUT_SECONDS,
        ))
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| AuditError::Discovery(e.to_string()))?;

    response
        .text()
        .await
        .map_err(|e| AuditError::Discovery(e.to_string()))
}

/// Extract `<loc>` values from sitemap XML.
pub fn parse_locations(xml: &str) -> Result<Vec<String>> {
    if !xml.contains("<urlset") && !xml.contains(SITEMAP_INDEX_MARKER) {
        return Err(AuditError::Discovery(
            "document is not a sitemap (no <urlset> or <sitemapindex>)".to_string(),
        ));
    }

    let loc = Regex::new(LOC_PATTERN)?;
    Ok(loc
        .captures_iter(xml)
        .filter_map(|caps| caps.get(1))
        .map(|m| unescape_xml(m.as_str()))
        .filter(|loc| !loc.is_empty())
        .collect())
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
