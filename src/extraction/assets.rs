use rustc_hash::FxHashSet;
use scraper::{ElementRef, Html};
use url::Url;

use crate::core::constants::assets;
use crate::core::types::{AssetReference, PageUrl};

/// Which HTML constructs contribute candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetSelection {
    /// `<a href>`
    pub links: bool,
    /// `<img src|data-src>`, `<img srcset|data-srcset>`, `<source srcset>`
    pub images: bool,
}

impl AssetSelection {
    pub const ALL: Self = Self {
        links: true,
        images: true,
    };
    pub const LINKS: Self = Self {
        links: true,
        images: false,
    };
    pub const IMAGES: Self = Self {
        links: false,
        images: true,
    };
}

/// Extract every link, image and srcset candidate from a page.
///
/// Candidates are resolved against `page` and deduplicated by absolute URL
/// in document order. Pure fragments and `javascript:`/`mailto:`/`tel:`
/// hrefs are skipped, as is anything that does not resolve to http(s).
pub fn extract_assets(page: &PageUrl, document: &Html) -> Vec<AssetReference> {
    extract_selected(page, document, AssetSelection::ALL)
}

pub fn extract_selected(
    page: &PageUrl,
    document: &Html,
    selection: AssetSelection,
) -> Vec<AssetReference> {
    let Ok(base) = page.parse() else {
        return Vec::new();
    };
    let mut collector = Collector::new(page, base);

    for element in document.root_element().descendants().filter_map(ElementRef::wrap) {
        match element.value().name() {
            "a" if selection.links => {
                if let Some(href) = element.value().attr("href")
                    && is_fetchable_href(href)
                {
                    collector.push(href, None);
                }
            }
            "img" if selection.images => {
                let src = first_non_empty(&element, &["src", assets::LAZY_SRC_ATTR]);
                if let Some(src) = src {
                    collector.push(src, None);
                }
                let srcset = first_non_empty(&element, &["srcset", assets::LAZY_SRCSET_ATTR]);
                for candidate in srcset.map(parse_srcset).unwrap_or_default() {
                    collector.push(candidate, None);
                }
            }
            "source" if selection.images => {
                if let Some(srcset) = element.value().attr("srcset") {
                    for candidate in parse_srcset(srcset) {
                        collector.push(candidate, None);
                    }
                }
            }
            _ => {}
        }
    }

    collector.finish()
}

/// Split a `srcset` value into its URL tokens.
///
/// `"a.jpg 1x, b.jpg 2x"` yields `["a.jpg", "b.jpg"]`.
pub fn parse_srcset(srcset: &str) -> Vec<&str> {
    srcset
        .split(',')
        .filter_map(|part| part.split_whitespace().next())
        .collect()
}

/// False for empty hrefs, in-page fragments and non-fetchable schemes.
pub fn is_fetchable_href(href: &str) -> bool {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return false;
    }
    let lower = href.to_ascii_lowercase();
    !assets::SKIPPED_SCHEMES
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

fn first_non_empty<'a>(element: &ElementRef<'a>, attrs: &[&str]) -> Option<&'a str> {
    attrs
        .iter()
        .filter_map(|attr| element.value().attr(attr))
        .map(str::trim)
        .find(|value| !value.is_empty())
}

/// Resolves candidates against the page and keeps first occurrences.
pub(crate) struct Collector<'p> {
    page: &'p PageUrl,
    base: Url,
    seen: FxHashSet<String>,
    found: Vec<AssetReference>,
}

impl<'p> Collector<'p> {
    pub(crate) fn new(page: &'p PageUrl, base: Url) -> Self {
        Self {
            page,
            base,
            seen: FxHashSet::default(),
            found: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, raw: &str, text: Option<String>) {
        let raw = raw.trim();
        if raw.is_empty() {
            return;
        }
        let Ok(resolved) = self.base.join(raw) else {
            return;
        };
        if !matches!(resolved.scheme(), "http" | "https") {
            return;
        }
        if self.seen.insert(resolved.to_string()) {
            let mut asset = AssetReference::new(self.page.clone(), &resolved);
            asset.text = text;
            self.found.push(asset);
        }
    }

    pub(crate) fn finish(self) -> Vec<AssetReference> {
        self.found
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::core::types::AssetKind;

    fn urls(assets: &[AssetReference]) -> Vec<&str> {
        assets.iter().map(|a| a.url.as_str()).collect()
    }

    fn extract(page: &str, html: &str) -> Vec<AssetReference> {
        let document = Html::parse_document(html);
        extract_assets(&PageUrl::from(page), &document)
    }

    #[test]
    fn test_extract_assets__resolves_links_images_and_srcset() {
        let html = r#"<html><body>
            <a href="/x">x</a>
            <img src="y.png">
            <picture><source srcset="z.jpg 1x, w.jpg 2x"></picture>
        </body></html>"#;

        let assets = extract("https://example.com/dir/page", html);

        assert_eq!(
            urls(&assets),
            vec![
                "https://example.com/x",
                "https://example.com/dir/y.png",
                "https://example.com/dir/z.jpg",
                "https://example.com/dir/w.jpg",
            ]
        );
    }

    #[test]
    fn test_extract_assets__skips_fragments_and_non_fetchable_schemes() {
        let html = r##"<body>
            <a href="#top">top</a>
            <a href="javascript:void(0)">js</a>
            <a href="JavaScript:alert(1)">js</a>
            <a href="mailto:a@b.com">mail</a>
            <a href="tel:+100">call</a>
            <a href="">empty</a>
            <a>no href</a>
            <a href="/kept">kept</a>
        </body>"##;

        let assets = extract("https://example.com/", html);

        assert_eq!(urls(&assets), vec!["https://example.com/kept"]);
    }

    #[test]
    fn test_extract_assets__dedups_within_page() {
        let html = r#"<body>
            <a href="/same">one</a>
            <a href="https://example.com/same">two</a>
            <img src="/same">
        </body>"#;

        let assets = extract("https://example.com/page", html);

        assert_eq!(urls(&assets), vec!["https://example.com/same"]);
    }

    #[test]
    fn test_extract_assets__lazy_load_fallbacks() {
        let html = r#"<body>
            <img data-src="/lazy.webp" data-srcset="/lazy-2x.webp 2x">
            <img src="" data-src="/fallback.gif">
        </body>"#;

        let assets = extract("https://example.com/", html);

        assert_eq!(
            urls(&assets),
            vec![
                "https://example.com/lazy.webp",
                "https://example.com/lazy-2x.webp",
                "https://example.com/fallback.gif",
            ]
        );
    }

    #[test]
    fn test_extract_assets__classifies_after_extraction() {
        let html = r#"<body>
            <a href="/docs/guide.pdf?download=1">guide</a>
            <a href="/logo.svg">logo</a>
            <img src="/photo">
        </body>"#;

        let assets = extract("https://example.com/", html);
        let kinds: Vec<AssetKind> = assets.iter().map(|a| a.kind).collect();

        assert_eq!(kinds, vec![AssetKind::Pdf, AssetKind::Image, AssetKind::Link]);
    }

    #[test]
    fn test_extract_assets__drops_data_uris() {
        let html = r#"<body><img src="data:image/gif;base64,R0lGOD"></body>"#;

        assert!(extract("https://example.com/", html).is_empty());
    }

    #[test]
    fn test_extract_selected__links_only() {
        let html = r#"<body><a href="/a">a</a><img src="/b.png"></body>"#;
        let document = Html::parse_document(html);

        let assets = extract_selected(
            &PageUrl::from("https://example.com/"),
            &document,
            AssetSelection::LINKS,
        );

        assert_eq!(urls(&assets), vec!["https://example.com/a"]);
    }

    #[test]
    fn test_extract_selected__images_only() {
        let html = r#"<body><a href="/a">a</a><img src="/b.png"></body>"#;
        let document = Html::parse_document(html);

        let assets = extract_selected(
            &PageUrl::from("https://example.com/"),
            &document,
            AssetSelection::IMAGES,
        );

        assert_eq!(urls(&assets), vec!["https://example.com/b.png"]);
    }

    #[test]
    fn test_parse_srcset() {
        assert_eq!(
            parse_srcset(" a.jpg 1x,b.jpg   2x , ,c.jpg"),
            vec!["a.jpg", "b.jpg", "c.jpg"]
        );
        assert!(parse_srcset("").is_empty());
    }

    #[test]
    fn test_is_fetchable_href() {
        assert!(is_fetchable_href("/x"));
        assert!(is_fetchable_href("https://example.com"));
        assert!(!is_fetchable_href("#"));
        assert!(!is_fetchable_href("  MAILTO:someone@example.com"));
        assert!(!is_fetchable_href("   "));
    }
}
