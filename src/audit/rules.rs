use scraper::Html;

use crate::core::constants::http_status;
use crate::core::error::{AuditError, Result};
use crate::core::types::{AssetKind, AssetReference, PageUrl, VerificationResult};
use crate::extraction::{
    AssetSelection, NavRegion, contains_keyword, extract_metadata, extract_nav_links,
    extract_selected,
};
use crate::reporting::report::{
    AssetRow, BrokenImageRow, BrokenLinkRow, BrokenPdfRow, MetadataRow, NavLinkRow, ReportKind,
    ReportRow, TextMatchRow,
};
use crate::validation::PageFailure;

const PAGE_ASSET_TYPE: &str = "PAGE";
const HOMEPAGE_LINK_TEXT: &str = "(homepage)";

/// A page to audit together with the site label shown in nav reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditTarget {
    pub site: String,
    pub page: PageUrl,
}

impl AuditTarget {
    pub fn new(site: impl Into<String>, page: PageUrl) -> Self {
        Self {
            site: site.into(),
            page,
        }
    }

    /// Target labelled with the page host.
    pub fn from_page(page: PageUrl) -> Self {
        Self {
            site: page.host_label(),
            page,
        }
    }
}

/// What a rule found on a successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageInspection {
    /// References still to be verified over HTTP
    Assets(Vec<AssetReference>),
    /// A local check ran; `Some` when it produced a row
    Checked(Option<ReportRow>),
}

/// Per-kind extraction, filtering and row shaping.
///
/// The orchestrator is the same for every report; this type is the only
/// place where report kinds differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRule {
    kind: ReportKind,
    keyword: Option<String>,
}

impl AuditRule {
    /// Build the rule for `kind`.
    ///
    /// `find-text` needs a non-blank keyword; every other kind ignores it.
    pub fn for_kind(kind: ReportKind, keyword: Option<&str>) -> Result<Self> {
        let keyword = keyword.map(str::trim).filter(|k| !k.is_empty());
        if kind == ReportKind::FindText && keyword.is_none() {
            return Err(AuditError::MissingInput(
                "a keyword is required for the find-text report".to_string(),
            ));
        }

        Ok(Self {
            kind,
            keyword: keyword.map(str::to_string),
        })
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    /// Parse the page body and collect what this report looks at.
    pub fn inspect(&self, page: &PageUrl, body: &str) -> PageInspection {
        let document = Html::parse_document(body);

        match self.kind {
            ReportKind::Asset404 => {
                PageInspection::Assets(extract_selected(page, &document, AssetSelection::ALL))
            }
            ReportKind::BrokenLink => {
                PageInspection::Assets(extract_selected(page, &document, AssetSelection::LINKS))
            }
            ReportKind::Image => {
                PageInspection::Assets(extract_selected(page, &document, AssetSelection::IMAGES))
            }
            ReportKind::Pdf => {
                let mut links = extract_selected(page, &document, AssetSelection::LINKS);
                links.retain(|asset| asset.kind == AssetKind::Pdf);
                PageInspection::Assets(links)
            }
            ReportKind::Header => {
                PageInspection::Assets(extract_nav_links(page, &document, NavRegion::Header))
            }
            ReportKind::Footer => {
                PageInspection::Assets(extract_nav_links(page, &document, NavRegion::Footer))
            }
            ReportKind::Metadata => {
                let metadata = extract_metadata(&document);
                let row = metadata.has_missing_field().then(|| {
                    ReportRow::Metadata(MetadataRow::new(
                        page.as_str(),
                        metadata.title,
                        metadata.description,
                        metadata.keywords,
                    ))
                });
                PageInspection::Checked(row)
            }
            ReportKind::FindText => {
                let found = self
                    .keyword
                    .as_deref()
                    .is_some_and(|keyword| contains_keyword(&document, keyword));
                let row = found.then(|| {
                    ReportRow::TextMatch(TextMatchRow {
                        url: page.to_string(),
                    })
                });
                PageInspection::Checked(row)
            }
        }
    }

    /// Whether a verified reference produces a row.
    pub fn keep(&self, result: &VerificationResult) -> bool {
        match self.kind {
            ReportKind::Asset404 => result.status_code == Some(http_status::NOT_FOUND),
            _ => match result.status_code {
                Some(status) => status >= http_status::BAD_REQUEST,
                None => true,
            },
        }
    }

    /// Row for a reference that `keep` accepted.
    pub fn item_row(
        &self,
        target: &AuditTarget,
        asset: &AssetReference,
        result: &VerificationResult,
    ) -> ReportRow {
        let page_url = asset.source_page.to_string();
        let status_code = result.status_code;
        let error = result.error_text().to_string();

        match self.kind {
            ReportKind::BrokenLink => ReportRow::BrokenLink(BrokenLinkRow {
                page_url,
                link_url: asset.url.clone(),
                status_code,
                error,
            }),
            ReportKind::Image => ReportRow::BrokenImage(BrokenImageRow {
                page_url,
                image_url: asset.url.clone(),
                status_code,
                error,
            }),
            ReportKind::Pdf => ReportRow::BrokenPdf(BrokenPdfRow {
                page_url,
                pdf_url: asset.url.clone(),
                status_code,
                error,
            }),
            ReportKind::Header | ReportKind::Footer => ReportRow::NavLink(NavLinkRow {
                site: target.site.clone(),
                page_url,
                link_text: asset.text.clone().unwrap_or_default(),
                link_url: asset.url.clone(),
                status_code,
                error,
            }),
            // local checks never verify references, so they share the generic shape
            ReportKind::Asset404 | ReportKind::Metadata | ReportKind::FindText => {
                ReportRow::Asset(AssetRow {
                    input_page: page_url,
                    asset_type: asset.kind.label().to_string(),
                    asset_url: asset.url.clone(),
                    status_code,
                    error,
                })
            }
        }
    }

    /// Informational row for a page that could not be fetched, if this
    /// report records one.
    pub fn page_failure_row(&self, target: &AuditTarget, failure: &PageFailure) -> Option<ReportRow> {
        let page_url = target.page.to_string();
        let status_code = failure.status_code;
        let error = failure.error.clone();

        match self.kind {
            ReportKind::Asset404 => Some(ReportRow::Asset(AssetRow {
                input_page: page_url.clone(),
                asset_type: PAGE_ASSET_TYPE.to_string(),
                asset_url: page_url,
                status_code,
                error,
            })),
            ReportKind::BrokenLink => Some(ReportRow::BrokenLink(BrokenLinkRow {
                page_url: page_url.clone(),
                link_url: page_url,
                status_code,
                error,
            })),
            ReportKind::Header | ReportKind::Footer => Some(ReportRow::NavLink(NavLinkRow {
                site: target.site.clone(),
                page_url: page_url.clone(),
                link_text: HOMEPAGE_LINK_TEXT.to_string(),
                link_url: page_url,
                status_code,
                error,
            })),
            ReportKind::Metadata => Some(ReportRow::Metadata(MetadataRow::new(
                page_url,
                String::new(),
                String::new(),
                String::new(),
            ))),
            ReportKind::Image | ReportKind::Pdf | ReportKind::FindText => None,
        }
    }
}
