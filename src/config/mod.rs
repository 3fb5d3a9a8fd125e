//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files, environment variables and CLI arguments. The result is
//! built once at startup and passed explicitly to the HTTP client and the
//! audit orchestrator; nothing reads the environment mid-run.

use log::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{config_files, defaults, env_vars, http_status, output_formats, timeouts};
use crate::core::error::{AuditError, Result};

/// A labelled site whose header/footer navigation is audited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSite {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Per-attempt timeout in seconds for asset verification
    pub timeout: Option<u64>,

    /// Timeout in seconds for fetching a page body
    pub page_timeout: Option<u64>,

    /// Maximum simultaneous in-flight HTTP requests
    pub concurrency: Option<usize>,

    /// Maximum number of operator-supplied page URLs
    pub max_input_urls: Option<usize>,

    /// Maximum number of sitemap pages to scan (0 = all)
    pub max_pages: Option<usize>,

    /// Whole-run deadline in seconds
    pub deadline: Option<u64>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// HTTP/HTTPS proxy URL
    pub proxy: Option<String>,

    /// Ignore any configured proxy
    pub disable_proxy: Option<bool>,

    /// PEM bundle of additional trusted CA certificates
    pub ca_bundle: Option<String>,

    /// Skip SSL certificate verification
    pub skip_ssl_verification: Option<bool>,

    /// HEAD statuses that trigger a GET retry
    pub fallback_statuses: Option<Vec<u16>>,

    /// Sitemap used when no page URLs are supplied
    pub sitemap_url: Option<String>,

    /// Sitemap URL patterns to skip (regex)
    pub sitemap_exclude: Option<Vec<String>>,

    /// Sites audited by the header/footer navigation reports
    pub nav_sites: Option<Vec<NavSite>>,

    /// Output format (text, json, minimal)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Some(timeouts::DEFAULT_TIMEOUT_SECONDS),
            page_timeout: Some(timeouts::DEFAULT_PAGE_TIMEOUT_SECONDS),
            concurrency: Some(defaults::CONCURRENCY),
            max_input_urls: Some(defaults::MAX_INPUT_URLS),
            max_pages: Some(defaults::MAX_PAGES),
            deadline: None,
            user_agent: None,
            proxy: None,
            disable_proxy: Some(false),
            ca_bundle: None,
            skip_ssl_verification: Some(false),
            fallback_statuses: None,
            sitemap_url: None,
            sitemap_exclude: None,
            nav_sites: None,
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AuditError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            AuditError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        for path in Self::standard_locations() {
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    fn standard_locations() -> Vec<PathBuf> {
        (0..=config_files::PARENT_LEVELS)
            .map(|level| PathBuf::from(format!("{}{}", "../".repeat(level), config_files::FILE_NAME)))
            .collect()
    }

    /// Overlay values from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Overlay values from an environment lookup function.
    ///
    /// A proxy set in the config file takes precedence over the proxy
    /// variables. `DISABLE_PROXY=1` always disables proxying.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if self.proxy.is_none() {
            self.proxy = non_empty(env_vars::HTTPS_PROXY).or_else(|| non_empty(env_vars::HTTP_PROXY));
        }

        if non_empty(env_vars::DISABLE_PROXY).as_deref() == Some("1") {
            self.disable_proxy = Some(true);
        }

        if let Some(bundle) = non_empty(env_vars::CA_BUNDLE).or_else(|| non_empty(env_vars::SSL_CERT_FILE)) {
            self.ca_bundle = Some(bundle);
        }

        if let Some(sitemap) = non_empty(env_vars::SITEMAP_URL) {
            self.sitemap_url = Some(sitemap);
        }

        if let Some(raw) = non_empty(env_vars::MAX_SITEMAP_PAGES) {
            match raw.parse::<usize>() {
                Ok(max_pages) => self.max_pages = Some(max_pages),
                Err(_) => warn!("Ignoring {}='{raw}': not a number", env_vars::MAX_SITEMAP_PAGES),
            }
        }

        if let Some(raw) = non_empty(env_vars::TIMEOUT) {
            match raw.parse::<u64>() {
                Ok(timeout) => self.timeout = Some(timeout),
                Err(_) => warn!("Ignoring {}='{raw}': not a number", env_vars::TIMEOUT),
            }
        }
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Timing
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(page_timeout) = cli_config.page_timeout {
            self.page_timeout = Some(page_timeout);
        }
        if let Some(deadline) = cli_config.deadline {
            self.deadline = Some(deadline);
        }

        // Scope
        if let Some(concurrency) = cli_config.concurrency {
            self.concurrency = Some(concurrency);
        }
        if let Some(max_pages) = cli_config.max_pages {
            self.max_pages = Some(max_pages);
        }
        if let Some(ref sitemap_url) = cli_config.sitemap_url {
            self.sitemap_url = Some(sitemap_url.clone());
        }

        // Output & format
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }

        // Network & security
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if let Some(ref proxy) = cli_config.proxy {
            self.proxy = Some(proxy.clone());
        }
        if cli_config.no_proxy {
            self.disable_proxy = Some(true);
        }
        if let Some(ref ca_bundle) = cli_config.ca_bundle {
            self.ca_bundle = Some(ca_bundle.clone());
        }
        if cli_config.skip_ssl_verification {
            self.skip_ssl_verification = Some(true);
        }
    }

    /// Compile sitemap exclude patterns into regex objects
    pub fn compile_sitemap_excludes(&self) -> Result<Vec<Regex>> {
        let mut compiled = Vec::new();
        if let Some(ref patterns) = self.sitemap_exclude {
            for pattern in patterns {
                compiled.push(Regex::new(pattern)?);
            }
        }
        Ok(compiled)
    }

    /// Get verification timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }

    /// Get page fetch timeout as Duration
    pub fn page_timeout_duration(&self) -> Duration {
        Duration::from_secs(
            self.page_timeout
                .unwrap_or(timeouts::DEFAULT_PAGE_TIMEOUT_SECONDS),
        )
    }

    /// Get the whole-run deadline, if any
    pub fn deadline_duration(&self) -> Option<Duration> {
        self.deadline.map(Duration::from_secs)
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency.unwrap_or(defaults::CONCURRENCY)
    }

    pub fn max_input_urls(&self) -> usize {
        self.max_input_urls.unwrap_or(defaults::MAX_INPUT_URLS)
    }

    /// Sitemap page cap; `None` means unlimited
    pub fn max_pages(&self) -> Option<usize> {
        match self.max_pages.unwrap_or(defaults::MAX_PAGES) {
            0 => None,
            n => Some(n),
        }
    }

    pub fn fallback_statuses(&self) -> Vec<u16> {
        self.fallback_statuses
            .clone()
            .unwrap_or_else(|| http_status::DEFAULT_FALLBACK.to_vec())
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(defaults::USER_AGENT)
    }

    /// Proxy to use, honouring `disable_proxy`
    pub fn effective_proxy(&self) -> Option<&str> {
        if self.disable_proxy.unwrap_or(false) {
            None
        } else {
            self.proxy.as_deref()
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("Timeout", self.timeout), ("Page timeout", self.page_timeout)] {
            if let Some(seconds) = value {
                if seconds == 0 {
                    return Err(AuditError::Config(format!(
                        "{name} cannot be 0. Expected a positive integer representing seconds."
                    )));
                }
                if seconds > timeouts::MAX_TIMEOUT_SECONDS {
                    return Err(AuditError::Config(format!(
                        "{name} of {seconds} seconds is extremely large (>24 hours). Consider using a smaller value."
                    )));
                }
            }
        }

        if let Some(concurrency) = self.concurrency {
            if concurrency == 0 {
                return Err(AuditError::Config(
                    "Concurrency cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if concurrency > defaults::MAX_CONCURRENCY {
                return Err(AuditError::Config(format!(
                    "Concurrency of {concurrency} would overwhelm the audited site. Expected at most {}.",
                    defaults::MAX_CONCURRENCY
                )));
            }
        }

        if self.max_input_urls == Some(0) {
            return Err(AuditError::Config(
                "max_input_urls cannot be 0. Expected a positive integer.".to_string(),
            ));
        }

        if let Some(ref codes) = self.fallback_statuses {
            for &code in codes {
                if !(100..=599).contains(&code) {
                    return Err(AuditError::Config(format!(
                        "Fallback status {code} is not a valid HTTP status code. Expected a number between 100-599."
                    )));
                }
            }
        }

        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(AuditError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        if let Some(ref sites) = self.nav_sites
            && let Some(site) = sites.iter().find(|site| site.url.trim().is_empty())
        {
            return Err(AuditError::Config(format!(
                "Navigation site '{}' has an empty url.",
                site.label
            )));
        }

        self.compile_sitemap_excludes()?;

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Timing
    pub timeout: Option<u64>,      // --timeout
    pub page_timeout: Option<u64>, // --page-timeout
    pub deadline: Option<u64>,     // --deadline

    // Scope
    pub concurrency: Option<usize>,  // --concurrency
    pub max_pages: Option<usize>,    // --max-pages
    pub sitemap_url: Option<String>, // --sitemap

    // Output & format
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose
    pub output_format: Option<String>, // --format
    pub no_progress: bool,             // --no-progress

    // Network & security
    pub user_agent: Option<String>,  // --user-agent
    pub proxy: Option<String>,       // --proxy
    pub no_proxy: bool,              // --no-proxy
    pub ca_bundle: Option<String>,   // --ca-bundle
    pub skip_ssl_verification: bool, // --insecure

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.timeout, Some(timeouts::DEFAULT_TIMEOUT_SECONDS));
        assert_eq!(config.concurrency(), defaults::CONCURRENCY);
        assert_eq!(config.max_input_urls(), 20);
        assert_eq!(config.max_pages(), Some(250));
        assert_eq!(config.fallback_statuses(), vec![403, 405]);
        assert_eq!(
            config.output_format,
            Some(output_formats::DEFAULT.to_string())
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(
            b"timeout = 60\nconcurrency = 4\nuser_agent = \"test-agent\"\nfallback_statuses = [403, 405, 429]\n\
              [[nav_sites]]\nlabel = \"EN\"\nurl = \"https://example.com/\"\n",
        )?;

        let config = Config::load_from_file(file.path())?;
        assert_eq!(config.timeout, Some(60));
        assert_eq!(config.concurrency(), 4);
        assert_eq!(config.user_agent(), "test-agent");
        assert_eq!(config.fallback_statuses(), vec![403, 405, 429]);
        assert_eq!(
            config.nav_sites,
            Some(vec![NavSite {
                label: "EN".to_string(),
                url: "https://example.com/".to_string()
            }])
        );

        Ok(())
    }

    #[test]
    fn test_config_load_from_file__invalid_values_rejected() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"concurrency = 0\n")?;

        let err = Config::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Concurrency cannot be 0"));
        Ok(())
    }

    #[test]
    fn test_config_load_from_file__missing_file() {
        let err = Config::load_from_file("does-not-exist.toml").unwrap_err();
        assert!(matches!(err, AuditError::Config(_)));
    }

    #[test]
    fn test_config_merge_with_cli() {
        let mut config = Config::default();
        let cli_config = CliConfig {
            timeout: Some(45),
            concurrency: Some(2),
            no_proxy: true,
            verbose: true,
            ..Default::default()
        };

        config.merge_with_cli(&cli_config);

        assert_eq!(config.timeout, Some(45));
        assert_eq!(config.concurrency(), 2);
        assert_eq!(config.disable_proxy, Some(true));
        assert_eq!(config.verbose, Some(true));
    }

    #[test]
    fn test_apply_env_from__reads_proxy_and_limits() {
        let mut config = Config::default();
        config.apply_env_from(lookup(&[
            ("HTTPS_PROXY", "http://proxy.internal:80"),
            ("MAX_SITEMAP_PAGES", "0"),
            ("SITEMAP_URL", "https://example.com/sitemap.xml"),
            ("SSL_CERT_FILE", "/etc/ssl/bundle.pem"),
        ]));

        assert_eq!(config.effective_proxy(), Some("http://proxy.internal:80"));
        assert_eq!(config.max_pages(), None);
        assert_eq!(
            config.sitemap_url.as_deref(),
            Some("https://example.com/sitemap.xml")
        );
        assert_eq!(config.ca_bundle.as_deref(), Some("/etc/ssl/bundle.pem"));
    }

    #[test]
    fn test_apply_env_from__disable_proxy_wins() {
        let mut config = Config {
            proxy: Some("http://from-file:3128".to_string()),
            ..Default::default()
        };
        config.apply_env_from(lookup(&[
            ("HTTP_PROXY", "http://from-env:80"),
            ("DISABLE_PROXY", "1"),
        ]));

        assert_eq!(config.proxy.as_deref(), Some("http://from-file:3128"));
        assert_eq!(config.effective_proxy(), None);
    }

    #[test]
    fn test_apply_env_from__ignores_garbage_numbers() {
        let mut config = Config::default();
        config.apply_env_from(lookup(&[
            ("MAX_SITEMAP_PAGES", "lots"),
            ("SITEAUDIT_TIMEOUT", "soon"),
        ]));

        assert_eq!(config.max_pages(), Some(defaults::MAX_PAGES));
        assert_eq!(config.timeout, Some(timeouts::DEFAULT_TIMEOUT_SECONDS));
    }

    #[test]
    fn test_validate__rejects_bad_values() {
        let cases = vec![
            Config {
                timeout: Some(0),
                ..Default::default()
            },
            Config {
                concurrency: Some(1000),
                ..Default::default()
            },
            Config {
                fallback_statuses: Some(vec![999]),
                ..Default::default()
            },
            Config {
                output_format: Some("xml".to_string()),
                ..Default::default()
            },
            Config {
                sitemap_exclude: Some(vec!["[unclosed".to_string()]),
                ..Default::default()
            },
            Config {
                nav_sites: Some(vec![NavSite {
                    label: "EN".to_string(),
                    url: " ".to_string(),
                }]),
                ..Default::default()
            },
        ];

        for config in cases {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }

    #[test]
    fn test_compile_sitemap_excludes() -> Result<()> {
        let config = Config {
            sitemap_exclude: Some(vec!["part-detail".to_string()]),
            ..Default::default()
        };

        let patterns = config.compile_sitemap_excludes()?;
        assert_eq!(patterns.len(), 1);
        assert!(patterns[0].is_match("https://example.com/part-detail/123"));
        assert!(!patterns[0].is_match("https://example.com/about"));
        Ok(())
    }
}
