use async_trait::async_trait;
use log::debug;
use reqwest::Method;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

use crate::config::Config;
use crate::core::constants::error_messages;
use crate::core::types::{CheckMethod, VerificationResult};
use crate::reporting::logging;

/// Network operations an audit run needs.
///
/// `StatusVerifier` is the HTTP implementation; the seam exists so the
/// orchestrator does not depend on reqwest directly.
#[async_trait]
pub trait CheckUrls: Send + Sync {
    /// Fetch a page body with a full GET.
    async fn fetch_page(&self, url: &str) -> Result<String, PageFailure>;

    /// Determine the live status of an asset URL.
    async fn verify(&self, url: &str) -> VerificationResult;
}

/// Why a page could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    /// Present when the server answered with an error status
    pub status_code: Option<u16>,
    pub error: String,
}

/// Timeouts and fallback policy for a verifier.
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    /// Per-attempt timeout; the GET fallback gets a fresh one
    pub timeout: Duration,
    pub page_timeout: Duration,
    /// HEAD statuses that trigger a GET retry
    pub fallback_statuses: Vec<u16>,
    /// Maximum simultaneous in-flight requests
    pub concurrency: usize,
}

impl VerifyOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            timeout: config.timeout_duration(),
            page_timeout: config.page_timeout_duration(),
            fallback_statuses: config.fallback_statuses(),
            concurrency: config.concurrency(),
        }
    }
}

/// HEAD-first, GET-fallback status checker over a shared client.
#[derive(Debug, Clone)]
pub struct StatusVerifier {
    client: reqwest::Client,
    options: VerifyOptions,
    permits: Arc<Semaphore>,
}

impl StatusVerifier {
    pub fn new(client: reqwest::Client, options: VerifyOptions) -> Self {
        let permits = Arc::new(Semaphore::new(options.concurrency.max(1)));
        Self {
            client,
            options,
            permits,
        }
    }

    /// One request; `Ok` carries any HTTP status, `Err` a transport failure.
    async fn attempt(&self, method: Method, url: &str) -> Result<u16, String> {
        let _permit = self.permits.acquire().await.ok();
        self.client
            .request(method, url)
            .timeout(self.options.timeout)
            .send()
            .await
            .map(|response| response.status().as_u16())
            .map_err(|err| describe_error(&err))
    }

    async fn get_fallback(&self, url: &str) -> Result<u16, String> {
        self.attempt(Method::GET, url).await
    }
}

#[async_trait]
impl CheckUrls for StatusVerifier {
    async fn fetch_page(&self, url: &str) -> Result<String, PageFailure> {
        let _permit = self.permits.acquire().await.ok();

        let response = self
            .client
            .get(url)
            .timeout(self.options.page_timeout)
            .send()
            .await
            .map_err(|err| PageFailure {
                status_code: None,
                error: format!(
                    "{}: {}",
                    error_messages::PAGE_FETCH_FAILED,
                    describe_error(&err)
                ),
            })?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(PageFailure {
                status_code: Some(status.as_u16()),
                error: format!("{}: HTTP status {status}", error_messages::PAGE_FETCH_FAILED),
            });
        }

        response.text().await.map_err(|err| PageFailure {
            status_code: Some(status.as_u16()),
            error: format!(
                "{}: {}",
                error_messages::PAGE_FETCH_FAILED,
                describe_error(&err)
            ),
        })
    }

    async fn verify(&self, url: &str) -> VerificationResult {
        let result = match self.attempt(Method::HEAD, url).await {
            Ok(status) if self.options.fallback_statuses.contains(&status) => {
                debug!("HEAD {url} -> {status}, retrying with GET");
                match self.get_fallback(url).await {
                    Ok(get_status) => VerificationResult::status(url, get_status, CheckMethod::Get),
                    Err(err) => {
                        debug!("GET {url} failed after HEAD {status}: {err}");
                        VerificationResult::failure(url, err, CheckMethod::Get)
                    }
                }
            }
            Ok(status) => VerificationResult::status(url, status, CheckMethod::Head),
            Err(head_err) => {
                debug!("HEAD {url} failed ({head_err}), retrying with GET");
                match self.get_fallback(url).await {
                    Ok(get_status) => VerificationResult::status(url, get_status, CheckMethod::Get),
                    Err(get_err) => VerificationResult::failure(url, get_err, CheckMethod::Get),
                }
            }
        };

        logging::log_verification(&result);
        result
    }
}

/// Render an error together with its source chain.
pub fn describe_error(err: &(dyn std::error::Error + 'static)) -> String {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !description.contains(&cause_text) {
            description.push_str(": ");
            description.push_str(&cause_text);
        }
        source = cause.source();
    }

    if description.is_empty() {
        error_messages::UNKNOWN_ERROR.to_string()
    } else {
        description
    }
}
