use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

/// Report generator selected for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// Links, images and PDFs on the given pages that return 404
    #[value(name = "asset-404")]
    #[serde(rename = "asset-404")]
    Asset404,
    /// Hyperlinks returning >= 400 or unreachable
    BrokenLink,
    /// Images returning >= 400 or unreachable
    Image,
    /// PDF links returning >= 400 or unreachable
    Pdf,
    /// Links in <header> returning >= 400 or unreachable
    Header,
    /// Links in <footer> returning >= 400 or unreachable
    Footer,
    /// Pages with an empty title, description or keywords
    Metadata,
    /// Pages whose visible text contains a keyword
    FindText,
}

impl ReportKind {
    /// Heading shown above the report.
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Asset404 => "Asset 404 (Links/Images/PDF)",
            ReportKind::BrokenLink => "Broken Link",
            ReportKind::Image => "Image Links",
            ReportKind::Pdf => "PDF Links",
            ReportKind::Header => "Header Navigation",
            ReportKind::Footer => "Footer Navigation",
            ReportKind::Metadata => "Metadata",
            ReportKind::FindText => "Find Text in URL",
        }
    }

    /// Column headers, in cell order.
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            ReportKind::Asset404 => &["Input Page", "Asset Type", "Asset URL", "Status Code", "Error"],
            ReportKind::BrokenLink => &["Page URL", "Broken Link", "Status Code", "Error"],
            ReportKind::Image => &["Page URL", "Broken Image URL", "Status Code", "Error"],
            ReportKind::Pdf => &["Page URL", "Broken PDF URL", "Status Code", "Error"],
            ReportKind::Header | ReportKind::Footer => {
                &["Site", "Page URL", "Link Text", "Link URL", "Status Code", "Error"]
            }
            ReportKind::Metadata => &[
                "URL",
                "Title Tag",
                "Meta Description",
                "Meta Keywords",
                "Title Tag Character Count",
                "Meta Description Character Count",
                "Meta Keywords Character Count",
            ],
            ReportKind::FindText => &["URL"],
        }
    }

    fn check_name(&self) -> &'static str {
        match self {
            ReportKind::Asset404 => "Asset 404",
            ReportKind::BrokenLink => "Broken link",
            ReportKind::Image => "Image link",
            ReportKind::Pdf => "PDF link",
            ReportKind::Header => "Header navigation",
            ReportKind::Footer => "Footer navigation",
            ReportKind::Metadata => "Metadata",
            ReportKind::FindText => "Find text",
        }
    }

    fn item_noun(&self) -> &'static str {
        match self {
            ReportKind::Asset404 => "Assets",
            ReportKind::BrokenLink | ReportKind::Header | ReportKind::Footer => "Links",
            ReportKind::Image => "Images",
            ReportKind::Pdf => "PDF links",
            ReportKind::Metadata | ReportKind::FindText => "Pages inspected",
        }
    }

    fn matched_label(&self) -> &'static str {
        match self {
            ReportKind::Asset404 => "404 assets found",
            ReportKind::BrokenLink | ReportKind::Header | ReportKind::Footer => "Broken links found",
            ReportKind::Image => "Broken images found",
            ReportKind::Pdf => "Broken PDF links found",
            ReportKind::Metadata => "Pages with empty metadata",
            ReportKind::FindText => "Pages containing keyword",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => f.write_str(self.title()),
        }
    }
}

/// Row of the `asset-404` report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetRow {
    #[serde(rename = "Input Page")]
    pub input_page: String,
    /// `Link`, `Image`, `PDF`, or `PAGE` for a page that failed to load
    #[serde(rename = "Asset Type")]
    pub asset_type: String,
    #[serde(rename = "Asset URL")]
    pub asset_url: String,
    #[serde(rename = "Status Code")]
    pub status_code: Option<u16>,
    #[serde(rename = "Error")]
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenLinkRow {
    #[serde(rename = "Page URL")]
    pub page_url: String,
    #[serde(rename = "Broken Link")]
    pub link_url: String,
    #[serde(rename = "Status Code")]
    pub status_code: Option<u16>,
    #[serde(rename = "Error")]
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenImageRow {
    #[serde(rename = "Page URL")]
    pub page_url: String,
    #[serde(rename = "Broken Image URL")]
    pub image_url: String,
    #[serde(rename = "Status Code")]
    pub status_code: Option<u16>,
    #[serde(rename = "Error")]
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenPdfRow {
    #[serde(rename = "Page URL")]
    pub page_url: String,
    #[serde(rename = "Broken PDF URL")]
    pub pdf_url: String,
    #[serde(rename = "Status Code")]
    pub status_code: Option<u16>,
    #[serde(rename = "Error")]
    pub error: String,
}

/// Row of the `header` and `footer` reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLinkRow {
    #[serde(rename = "Site")]
    pub site: String,
    #[serde(rename = "Page URL")]
    pub page_url: String,
    #[serde(rename = "Link Text")]
    pub link_text: String,
    #[serde(rename = "Link URL")]
    pub link_url: String,
    #[serde(rename = "Status Code")]
    pub status_code: Option<u16>,
    #[serde(rename = "Error")]
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataRow {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Title Tag")]
    pub title: String,
    #[serde(rename = "Meta Description")]
    pub description: String,
    #[serde(rename = "Meta Keywords")]
    pub keywords: String,
    #[serde(rename = "Title Tag Character Count")]
    pub title_chars: usize,
    #[serde(rename = "Meta Description Character Count")]
    pub description_chars: usize,
    #[serde(rename = "Meta Keywords Character Count")]
    pub keywords_chars: usize,
}

impl MetadataRow {
    pub fn new(url: impl Into<String>, title: String, description: String, keywords: String) -> Self {
        Self {
            url: url.into(),
            title_chars: title.chars().count(),
            description_chars: description.chars().count(),
            keywords_chars: keywords.chars().count(),
            title,
            description,
            keywords,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextMatchRow {
    #[serde(rename = "URL")]
    pub url: String,
}

/// One detail row; the variant fixes the column set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReportRow {
    Asset(AssetRow),
    BrokenLink(BrokenLinkRow),
    BrokenImage(BrokenImageRow),
    BrokenPdf(BrokenPdfRow),
    NavLink(NavLinkRow),
    Metadata(MetadataRow),
    TextMatch(TextMatchRow),
}

fn status_cell(status_code: Option<u16>) -> String {
    status_code.map(|code| code.to_string()).unwrap_or_default()
}

impl ReportRow {
    /// Cell values in the order of `ReportKind::headers`.
    pub fn cells(&self) -> Vec<String> {
        match self {
            ReportRow::Asset(row) => vec![
                row.input_page.clone(),
                row.asset_type.clone(),
                row.asset_url.clone(),
                status_cell(row.status_code),
                row.error.clone(),
            ],
            ReportRow::BrokenLink(row) => vec![
                row.page_url.clone(),
                row.link_url.clone(),
                status_cell(row.status_code),
                row.error.clone(),
            ],
            ReportRow::BrokenImage(row) => vec![
                row.page_url.clone(),
                row.image_url.clone(),
                status_cell(row.status_code),
                row.error.clone(),
            ],
            ReportRow::BrokenPdf(row) => vec![
                row.page_url.clone(),
                row.pdf_url.clone(),
                status_cell(row.status_code),
                row.error.clone(),
            ],
            ReportRow::NavLink(row) => vec![
                row.site.clone(),
                row.page_url.clone(),
                row.link_text.clone(),
                row.link_url.clone(),
                status_cell(row.status_code),
                row.error.clone(),
            ],
            ReportRow::Metadata(row) => vec![
                row.url.clone(),
                row.title.clone(),
                row.description.clone(),
                row.keywords.clone(),
                row.title_chars.to_string(),
                row.description_chars.to_string(),
                row.keywords_chars.to_string(),
            ],
            ReportRow::TextMatch(row) => vec![row.url.clone()],
        }
    }
}

/// Coverage counters and the human-readable sentence built from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    pub pages_checked: usize,
    pub items_checked: usize,
    pub matched_count: usize,
    pub cancelled: bool,
    pub text: String,
}

impl AuditSummary {
    pub fn new(
        kind: ReportKind,
        pages_checked: usize,
        items_checked: usize,
        matched_count: usize,
        cancelled: bool,
    ) -> Self {
        let mut text = format!(
            "{} check completed. Pages checked: {pages_checked}. {} checked: {items_checked}. {}: {matched_count}.",
            kind.check_name(),
            kind.item_noun(),
            kind.matched_label(),
        );
        if cancelled {
            text.push_str(" Run cancelled before completion; results are partial.");
        }

        Self {
            pages_checked,
            items_checked,
            matched_count,
            cancelled,
            text,
        }
    }

    /// Summary for a run that never started crawling.
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            pages_checked: 0,
            items_checked: 0,
            matched_count: 0,
            cancelled: false,
            text: text.into(),
        }
    }
}

impl fmt::Display for AuditSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// The `(summary, rows)` pair handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub kind: ReportKind,
    pub summary: AuditSummary,
    pub rows: Vec<ReportRow>,
}

impl AuditReport {
    /// A report with no rows whose summary explains why nothing ran.
    pub fn without_rows(kind: ReportKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            summary: AuditSummary::message(message),
            rows: Vec::new(),
        }
    }

    pub fn headers(&self) -> &'static [&'static str] {
        self.kind.headers()
    }

    pub fn has_matches(&self) -> bool {
        !self.rows.is_empty()
    }
}
