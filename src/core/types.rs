use serde::Serialize;
use std::fmt;
use url::Url;

use crate::core::constants::assets;
use crate::core::error::Result;

/// An absolute `http`/`https` URL identifying a page to crawl.
///
/// The original text is kept verbatim so that report rows show the page
/// exactly as it was normalized (`https://example.com`, not
/// `https://example.com/`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PageUrl(String);

impl PageUrl {
    /// Wrap an already-normalized URL string.
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse into a `Url` usable as a base for relative resolution.
    pub fn parse(&self) -> Result<Url> {
        Ok(Url::parse(&self.0)?)
    }

    /// Host part of the URL, falling back to the raw text.
    pub fn host_label(&self) -> String {
        self.parse()
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_else(|| self.0.clone())
    }
}

impl fmt::Display for PageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageUrl {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

/// Logical kind of an embedded reference, used to label rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AssetKind {
    Link,
    Image,
    #[serde(rename = "PDF")]
    Pdf,
}

impl AssetKind {
    /// Classify by the URL's path suffix, ignoring query string and fragment.
    ///
    /// The HTML construct that produced the URL does not matter: an anchor
    /// pointing at `report.pdf` is a PDF.
    pub fn classify(url: &Url) -> Self {
        let path = url.path().to_ascii_lowercase();
        if path.ends_with(assets::PDF_EXTENSION) {
            AssetKind::Pdf
        } else if assets::IMAGE_EXTENSIONS
            .iter()
            .any(|ext| path.ends_with(ext))
        {
            AssetKind::Image
        } else {
            AssetKind::Link
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssetKind::Link => "Link",
            AssetKind::Image => "Image",
            AssetKind::Pdf => "PDF",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An asset found on one page, resolved to absolute form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReference {
    pub source_page: PageUrl,
    pub kind: AssetKind,
    pub url: String,
    /// Anchor text, when the reference came from a link
    pub text: Option<String>,
}

impl AssetReference {
    pub fn new(source_page: PageUrl, url: &Url) -> Self {
        Self {
            source_page,
            kind: AssetKind::classify(url),
            url: url.to_string(),
            text: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// HTTP method that produced a verification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckMethod {
    Head,
    Get,
}

impl fmt::Display for CheckMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckMethod::Head => f.write_str("HEAD"),
            CheckMethod::Get => f.write_str("GET"),
        }
    }
}

/// Outcome of verifying one URL.
///
/// `status_code` is present whenever any HTTP response was received,
/// including 4xx/5xx. It is absent only when every attempt failed at the
/// transport level, in which case `error` holds the last failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    pub url: String,
    pub status_code: Option<u16>,
    pub error: Option<String>,
    /// Method whose outcome is reported
    pub method: CheckMethod,
}

impl VerificationResult {
    /// A result carrying an HTTP status.
    pub fn status(url: impl Into<String>, status_code: u16, method: CheckMethod) -> Self {
        Self {
            url: url.into(),
            status_code: Some(status_code),
            error: None,
            method,
        }
    }

    /// A result for a total request failure.
    pub fn failure(url: impl Into<String>, error: impl Into<String>, method: CheckMethod) -> Self {
        Self {
            url: url.into(),
            status_code: None,
            error: Some(error.into()),
            method,
        }
    }

    pub fn is_transport_failure(&self) -> bool {
        self.status_code.is_none()
    }

    /// Error text for report cells; empty when a status was received.
    pub fn error_text(&self) -> &str {
        self.error.as_deref().unwrap_or("")
    }
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.status_code, &self.error) {
            (Some(code), _) => write!(f, "{} {} ({})", code, self.url, self.method),
            (None, Some(err)) => write!(f, "{} - {} ({})", self.url, err, self.method),
            (None, None) => write!(f, "{} ({})", self.url, self.method),
        }
    }
}
