/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes all magic strings, numbers, and other literal values
/// used across the application, making them easier to maintain and modify.
/// Output format constants
pub mod output_formats {
    /// Text output format - summary followed by aligned detail rows
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";
    /// Minimal output format - tab-separated rows without decoration
    pub const MINIMAL: &str = "minimal";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 3] = [TEXT, JSON, MINIMAL];
}

/// HTTP status code constants
pub mod http_status {
    /// HTTP 200 OK - successful response
    pub const OK: u16 = 200;
    /// HTTP 400 Bad Request - first client error code
    pub const BAD_REQUEST: u16 = 400;
    /// HTTP 403 Forbidden - often returned to HEAD by locked-down servers
    pub const FORBIDDEN: u16 = 403;
    /// HTTP 404 Not Found - resource not found
    pub const NOT_FOUND: u16 = 404;
    /// HTTP 405 Method Not Allowed - server rejects the HEAD verb
    pub const METHOD_NOT_ALLOWED: u16 = 405;

    /// Statuses from a HEAD check that trigger a GET retry by default
    pub const DEFAULT_FALLBACK: [u16; 2] = [FORBIDDEN, METHOD_NOT_ALLOWED];
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default per-attempt verification timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 15;
    /// Default page fetch timeout in seconds
    pub const DEFAULT_PAGE_TIMEOUT_SECONDS: u64 = 20;
    /// Timeout used for sitemap downloads in seconds
    pub const SITEMAP_TIMEOUT_SECONDS: u64 = 30;
    /// Largest timeout accepted by configuration validation (24 hours)
    pub const MAX_TIMEOUT_SECONDS: u64 = 86_400;
    /// Idle pooled connections are closed after this many seconds
    pub const POOL_IDLE_SECONDS: u64 = 30;
}

/// Default configuration values
pub mod defaults {
    /// Maximum number of operator-supplied page URLs per run
    pub const MAX_INPUT_URLS: usize = 20;
    /// Maximum number of sitemap pages scanned per run (0 = unlimited)
    pub const MAX_PAGES: usize = 250;
    /// Maximum simultaneous in-flight HTTP requests
    pub const CONCURRENCY: usize = 8;
    /// Upper bound on configured concurrency
    pub const MAX_CONCURRENCY: usize = 100;
    /// Maximum redirects followed per request
    pub const MAX_REDIRECTS: usize = 10;
    /// Browser-like User-Agent; several CDNs reject unknown agents outright
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.1; WOW64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/56.0.2924.76 Safari/537.36";
}

/// Asset classification constants
pub mod assets {
    /// Path suffixes classified as images (compared lowercase)
    pub const IMAGE_EXTENSIONS: [&str; 7] =
        [".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg", ".avif"];
    /// Path suffix classified as a PDF document
    pub const PDF_EXTENSION: &str = ".pdf";
    /// href prefixes that never lead to a fetchable resource
    pub const SKIPPED_SCHEMES: [&str; 3] = ["javascript:", "mailto:", "tel:"];
    /// Lazy-load fallback for `<img src>`
    pub const LAZY_SRC_ATTR: &str = "data-src";
    /// Lazy-load fallback for `<img srcset>`
    pub const LAZY_SRCSET_ATTR: &str = "data-srcset";
}

/// Environment variable names read once at startup
pub mod env_vars {
    pub const HTTPS_PROXY: &str = "HTTPS_PROXY";
    pub const HTTP_PROXY: &str = "HTTP_PROXY";
    pub const DISABLE_PROXY: &str = "DISABLE_PROXY";
    pub const CA_BUNDLE: &str = "SITEAUDIT_CA_BUNDLE";
    pub const SSL_CERT_FILE: &str = "SSL_CERT_FILE";
    pub const MAX_SITEMAP_PAGES: &str = "MAX_SITEMAP_PAGES";
    pub const SITEMAP_URL: &str = "SITEMAP_URL";
    pub const TIMEOUT: &str = "SITEAUDIT_TIMEOUT";
}

/// Config file lookup constants
pub mod config_files {
    /// File name searched in the current directory and its parents
    pub const FILE_NAME: &str = ".siteaudit.toml";
    /// Number of parent directories searched
    pub const PARENT_LEVELS: usize = 3;
}

/// Error message constants
pub mod error_messages {
    /// Prefix for page-level informational rows
    pub const PAGE_FETCH_FAILED: &str = "Failed to fetch page";
    /// Prefix for discovery failures reported as summary text
    pub const SITEMAP_FETCH_FAILED: &str = "Failed to fetch sitemap";
    /// Unknown error fallback
    pub const UNKNOWN_ERROR: &str = "Unknown error";
}
