// Command-line interface definitions and parsing for siteaudit

use crate::audit::AuditRequest;
use crate::config::CliConfig;
use crate::core::constants::output_formats;
use crate::discovery::PageSource;
use crate::reporting::ReportKind;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Report to generate
    #[arg(value_enum)]
    pub report: ReportKind,

    // Pages
    /// Page URLs to audit (comma or newline separated)
    #[arg(long, value_name = "URLS", help_heading = "Pages")]
    pub urls: Option<String>,

    /// Sitemap (or sitemap index) listing the pages to audit
    #[arg(long, value_name = "URL", help_heading = "Pages", conflicts_with = "urls")]
    pub sitemap: Option<String>,

    /// Keyword searched by the find-text report
    #[arg(long, value_name = "TEXT", help_heading = "Pages")]
    pub keyword: Option<String>,

    /// Maximum sitemap pages to audit (0 = all)
    #[arg(long, value_name = "COUNT", help_heading = "Pages")]
    pub max_pages: Option<usize>,

    // Core Options
    /// Per-request verification timeout in seconds (default: 15)
    #[arg(
        short = 't',
        long,
        value_name = "SECONDS",
        help_heading = "Core Options"
    )]
    pub timeout: Option<u64>,

    /// Page fetch timeout in seconds (default: 20)
    #[arg(long, value_name = "SECONDS", help_heading = "Core Options")]
    pub page_timeout: Option<u64>,

    /// Stop the whole run after this many seconds and report what was checked
    #[arg(long, value_name = "SECONDS", help_heading = "Core Options")]
    pub deadline: Option<u64>,

    /// Maximum simultaneous requests (default: 8)
    #[arg(long, value_name = "COUNT", help_heading = "Core Options")]
    pub concurrency: Option<usize>,

    // Output & Verbosity
    /// Suppress progress output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Output format (default: text)
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    /// Disable progress bars
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Network & Security
    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Network & Security")]
    pub user_agent: Option<String>,

    /// HTTP/HTTPS proxy URL
    #[arg(long, value_name = "URL", help_heading = "Network & Security")]
    pub proxy: Option<String>,

    /// Ignore any configured proxy
    #[arg(long, help_heading = "Network & Security")]
    pub no_proxy: bool,

    /// PEM bundle of extra trusted CA certificates
    #[arg(long, value_name = "PATH", help_heading = "Network & Security")]
    pub ca_bundle: Option<String>,

    /// Skip SSL certificate verification
    #[arg(long, help_heading = "Network & Security")]
    pub insecure: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

/// Convert derive-based CLI arguments directly to CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        timeout: cli.timeout,
        page_timeout: cli.page_timeout,
        deadline: cli.deadline,
        concurrency: cli.concurrency,
        max_pages: cli.max_pages,
        sitemap_url: cli.sitemap.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        output_format: cli.format.clone(),
        no_progress: cli.no_progress,
        user_agent: cli.user_agent.clone(),
        proxy: cli.proxy.clone(),
        no_proxy: cli.no_proxy,
        ca_bundle: cli.ca_bundle.clone(),
        skip_ssl_verification: cli.insecure,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}

/// The audit request described by the command line.
///
/// Without `--urls` or `--sitemap` the page source is left to configuration.
pub fn cli_to_request(cli: &Cli) -> AuditRequest {
    let source = match (&cli.urls, &cli.sitemap) {
        (Some(urls), _) => Some(PageSource::Raw(urls.clone())),
        (None, Some(sitemap)) => Some(PageSource::Sitemap(sitemap.clone())),
        (None, None) => None,
    };

    AuditRequest {
        kind: cli.report,
        source,
        keyword: cli.keyword.clone(),
    }
}
