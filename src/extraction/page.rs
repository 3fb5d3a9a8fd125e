use scraper::{ElementRef, Html};
use serde::Serialize;

use crate::core::types::{AssetReference, PageUrl};
use crate::extraction::assets::{Collector, is_fetchable_href};

/// Page region whose navigation links are audited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavRegion {
    Header,
    Footer,
}

impl NavRegion {
    fn tag(&self) -> &'static str {
        match self {
            NavRegion::Header => "header",
            NavRegion::Footer => "footer",
        }
    }
}

/// Links inside the first `<header>` or `<footer>` element, with their text.
pub fn extract_nav_links(page: &PageUrl, document: &Html, region: NavRegion) -> Vec<AssetReference> {
    let Ok(base) = page.parse() else {
        return Vec::new();
    };
    let Some(container) = elements(document).find(|el| el.value().name() == region.tag()) else {
        return Vec::new();
    };
    let mut collector = Collector::new(page, base);

    let anchors = container
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "a");
    for anchor in anchors {
        if let Some(href) = anchor.value().attr("href")
            && is_fetchable_href(href)
        {
            collector.push(href, Some(collapse_whitespace(anchor.text())));
        }
    }

    collector.finish()
}

/// Title, description and keywords of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: String,
}

impl PageMetadata {
    /// True when any of the three fields is empty.
    pub fn has_missing_field(&self) -> bool {
        self.title.is_empty() || self.description.is_empty() || self.keywords.is_empty()
    }
}

pub fn extract_metadata(document: &Html) -> PageMetadata {
    let mut metadata = PageMetadata::default();
    let mut title_seen = false;

    for element in elements(document) {
        match element.value().name() {
            "title" if !title_seen => {
                title_seen = true;
                metadata.title = collapse_whitespace(element.text());
            }
            "meta" => {
                let name = element.value().attr("name").unwrap_or("").trim();
                let content = element.value().attr("content").unwrap_or("").trim();
                if name.eq_ignore_ascii_case("description") && metadata.description.is_empty() {
                    metadata.description = content.to_string();
                } else if name.eq_ignore_ascii_case("keywords") && metadata.keywords.is_empty() {
                    metadata.keywords = content.to_string();
                }
            }
            _ => {}
        }
    }

    metadata
}

/// Whitespace-collapsed text of the document, excluding script and style.
pub fn visible_text(document: &Html) -> String {
    let words: Vec<&str> = document
        .root_element()
        .descendants()
        .filter_map(|node| node.value().as_text().map(|text| (node, text)))
        .filter(|(node, _)| {
            !node.ancestors().filter_map(ElementRef::wrap).any(|el| {
                matches!(el.value().name(), "script" | "style" | "noscript" | "template")
            })
        })
        .flat_map(|(_, text)| text.split_whitespace())
        .collect();
    words.join(" ")
}

/// Case-insensitive keyword search over the visible text.
pub fn contains_keyword(document: &Html, keyword: &str) -> bool {
    let keyword = keyword.trim().to_lowercase();
    !keyword.is_empty() && visible_text(document).to_lowercase().contains(&keyword)
}

fn elements(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document.root_element().descendants().filter_map(ElementRef::wrap)
}

fn collapse_whitespace<'a>(text: impl Iterator<Item = &'a str>) -> String {
    text.flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    const PAGE: &str = r##"<html>
        <head>
            <title>  Memory   and Storage </title>
            <meta name="Description" content=" Fast chips ">
            <meta name="keywords" content="">
            <script>var hidden = "needle-in-script";</script>
        </head>
        <body>
            <header>
                <nav><a href="/products">  Products  <span>&amp; more</span></a>
                <a href="#menu">Menu</a></nav>
            </header>
            <main><p>Find the Needle here</p><a href="/body-link">Body</a></main>
            <footer>
                <a href="legal">Legal</a>
                <a href="mailto:hi@example.com">Mail</a>
                <a href="https://other.example/">Partner</a>
            </footer>
        </body>
    </html>"##;

    fn document() -> Html {
        Html::parse_document(PAGE)
    }

    #[test]
    fn test_extract_nav_links__header() {
        let links = extract_nav_links(
            &PageUrl::from("https://example.com/en/"),
            &document(),
            NavRegion::Header,
        );

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://example.com/products");
        assert_eq!(links[0].text.as_deref(), Some("Products & more"));
    }

    #[test]
    fn test_extract_nav_links__footer_resolves_relative() {
        let links = extract_nav_links(
            &PageUrl::from("https://example.com/en/"),
            &document(),
            NavRegion::Footer,
        );
        let urls: Vec<&str> = links.iter().map(|l| l.url.as_str()).collect();

        assert_eq!(
            urls,
            vec!["https://example.com/en/legal", "https://other.example/"]
        );
    }

    #[test]
    fn test_extract_nav_links__no_region_is_empty() {
        let document = Html::parse_document("<body><a href='/x'>x</a></body>");
        let links = extract_nav_links(
            &PageUrl::from("https://example.com/"),
            &document,
            NavRegion::Footer,
        );

        assert!(links.is_empty());
    }

    #[test]
    fn test_extract_nav_links__only_first_region_element() {
        let document = Html::parse_document(
            r#"<body>
                <article><p>Post</p><footer><a href="/author">Author</a></footer></article>
                <footer><a href="/contact">Contact</a></footer>
            </body>"#,
        );

        let links = extract_nav_links(
            &PageUrl::from("https://example.com/"),
            &document,
            NavRegion::Footer,
        );

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://example.com/author");
    }

    #[test]
    fn test_extract_metadata() {
        let metadata = extract_metadata(&document());

        assert_eq!(metadata.title, "Memory and Storage");
        assert_eq!(metadata.description, "Fast chips");
        assert_eq!(metadata.keywords, "");
        assert!(metadata.has_missing_field());
    }

    #[test]
    fn test_extract_metadata__complete_page() {
        let document = Html::parse_document(
            r#"<head><title>T</title><meta name="description" content="D"><meta name="keywords" content="K"></head>"#,
        );
        let metadata = extract_metadata(&document);

        assert!(!metadata.has_missing_field());
    }

    #[test]
    fn test_contains_keyword__case_insensitive_visible_text() {
        let document = document();

        assert!(contains_keyword(&document, "needle"));
        assert!(contains_keyword(&document, "FIND THE"));
        assert!(!contains_keyword(&document, "needle-in-script"));
        assert!(!contains_keyword(&document, "   "));
    }

    #[test]
    fn test_visible_text__collapses_whitespace() {
        let document = Html::parse_document("<body><p>a\n\n  b</p><style>p{}</style><p>c</p></body>");

        assert_eq!(visible_text(&document), "a b c");
    }
}
