use crate::config::Config;
use crate::core::types::{PageUrl, VerificationResult};
use log::{debug, error, info, warn};

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    // repeat initialisation (tests) is ignored
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_module_path(false)
        .format_target(false)
        .try_init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    info!(
        "Configuration: concurrency={}, timeout={}s, page_timeout={}s, deadline={:?}",
        config.concurrency(),
        config.timeout_duration().as_secs(),
        config.page_timeout_duration().as_secs(),
        config.deadline
    );
    info!(
        "HTTP: proxy={}, ca_bundle={}, skip_ssl={}, fallback_statuses={:?}",
        config.effective_proxy().unwrap_or("none"),
        config.ca_bundle.as_deref().unwrap_or("system"),
        config.skip_ssl_verification.unwrap_or(false),
        config.fallback_statuses()
    );
}

/// Log page discovery information
pub fn log_discovery(pages: &[PageUrl]) {
    info!("Auditing {} page(s)", pages.len());
    for (i, page) in pages.iter().enumerate() {
        debug!("  {}. {}", i + 1, page);
    }
}

/// Log the outcome of one page
pub fn log_page_result(page: &PageUrl, items: usize, matched: usize) {
    debug!("Page {page}: {items} item(s) checked, {matched} matched");
}

/// Log a page that could not be fetched
pub fn log_page_failure(page: &PageUrl, error: &str) {
    warn!("{page}: {error}");
}

/// Log individual verification results for debugging
pub fn log_verification(result: &VerificationResult) {
    match (result.status_code, result.error.as_deref()) {
        (Some(status), _) if status < 400 => debug!("✓ {} -> {status} ({})", result.url, result.method),
        (Some(status), _) => debug!("✗ {} -> {status} ({})", result.url, result.method),
        (None, Some(err)) => debug!("✗ {} -> {err}", result.url),
        (None, None) => debug!("? {} -> unknown", result.url),
    }
}

/// Log run completion
pub fn log_audit_complete(pages: usize, items: usize, matched: usize, cancelled: bool, duration_ms: u128) {
    if cancelled {
        warn!("Audit cancelled after {pages} page(s), {items} item(s) ({duration_ms}ms)");
    } else if matched == 0 {
        info!("Audit complete: {pages} page(s), {items} item(s), nothing matched ({duration_ms}ms)");
    } else {
        warn!("Audit complete: {pages} page(s), {items} item(s), {matched} row(s) ({duration_ms}ms)");
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}
