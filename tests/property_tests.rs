//! Property-based tests for siteaudit using proptest
//!
//! These tests generate random page lists and documents to check the
//! normalizer and extractor across a wide range of inputs.

use proptest::prelude::*;
use scraper::Html;
use siteaudit::AuditError;
use siteaudit::PageUrl;
use siteaudit::discovery::normalize_page_urls;
use siteaudit::extraction::extract_assets;

const MAX: usize = 20;

/// Distinct bare host names such as `abc.com`
fn hosts_strategy(range: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z]{1,10}\\.(com|org|net)", range)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

/// Page entries the way operators type them
fn entry_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}\\.com",
        "www\\.[a-z]{1,8}\\.com",
        "https://[a-z]{1,8}\\.com(/[a-z]{1,5})?",
        "http://[a-z]{1,8}\\.org",
        Just(String::new()),
        Just("   ".to_string()),
    ]
}

proptest! {
    #[test]
    fn test_normalize_keeps_every_distinct_entry_in_order(
        hosts in hosts_strategy(0..=MAX),
        separator in prop_oneof![Just(","), Just(", "), Just("\n"), Just(" ,\n")],
    ) {
        let raw = hosts.join(separator);

        let pages = normalize_page_urls(&raw, MAX).unwrap();

        let expected: Vec<String> = hosts.iter().map(|h| format!("https://{h}")).collect();
        let actual: Vec<String> = pages.iter().map(|p| p.to_string()).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn test_normalize_rejects_more_than_max(hosts in hosts_strategy(MAX + 1..=MAX + 10)) {
        let count = hosts.len();

        let err = normalize_page_urls(&hosts.join(","), MAX).unwrap_err();

        let is_too_many = matches!(err, AuditError::TooManyInputs { count: c, max: MAX } if c == count);
        prop_assert!(is_too_many);
    }

    #[test]
    fn test_normalize_is_idempotent(entries in prop::collection::vec(entry_strategy(), 0..30)) {
        let raw = entries.join(",");

        if let Ok(first) = normalize_page_urls(&raw, MAX) {
            let rejoined: Vec<&str> = first.iter().map(PageUrl::as_str).collect();
            let second = normalize_page_urls(&rejoined.join("\n"), MAX).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn test_extract_assets_only_yields_unique_http_urls(
        hrefs in prop::collection::vec("(#|/|\\.\\./|mailto:|javascript:|https://x\\.com/)?[a-z0-9]{0,6}", 0..12),
    ) {
        let body: String = hrefs
            .iter()
            .map(|href| format!("<a href=\"{href}\">l</a><img src=\"{href}\">"))
            .collect();
        let document = Html::parse_document(&body);

        let assets = extract_assets(&PageUrl::from("https://example.com/dir/page"), &document);

        let mut seen = std::collections::HashSet::new();
        for asset in &assets {
            prop_assert!(asset.url.starts_with("http://") || asset.url.starts_with("https://"));
            prop_assert!(seen.insert(asset.url.clone()), "duplicate {}", asset.url);
        }
    }
}
