use reqwest::redirect::Policy;
use std::fs;
use std::time::Duration;

use crate::config::Config;
use crate::core::constants::{defaults, timeouts};
use crate::core::error::{AuditError, Result};

/// Build the single HTTP client shared by every worker of a run.
///
/// Proxying is explicit: system proxy variables are never consulted here,
/// only the proxy resolved into `config`.
pub fn build_client(config: &Config) -> Result<reqwest::Client> {
    let mut client_builder = reqwest::Client::builder()
        .timeout(config.timeout_duration())
        .redirect(Policy::limited(defaults::MAX_REDIRECTS))
        .user_agent(config.user_agent())
        .no_proxy();

    // Connection pooling configuration
    client_builder = client_builder
        .pool_max_idle_per_host(config.concurrency())
        .pool_idle_timeout(Duration::from_secs(timeouts::POOL_IDLE_SECONDS));

    if let Some(proxy_url) = config.effective_proxy() {
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| AuditError::Config(format!("Invalid proxy '{proxy_url}': {e}")))?;
        client_builder = client_builder.proxy(proxy);
    }

    if let Some(ref bundle_path) = config.ca_bundle {
        let pem = fs::read(bundle_path).map_err(|e| {
            AuditError::Config(format!("Could not read CA bundle '{bundle_path}': {e}"))
        })?;
        let certificates = reqwest::Certificate::from_pem_bundle(&pem).map_err(|e| {
            AuditError::Config(format!("Invalid CA bundle '{bundle_path}': {e}"))
        })?;
        for certificate in certificates {
            client_builder = client_builder.add_root_certificate(certificate);
        }
    }

    if config.skip_ssl_verification.unwrap_or(false) {
        client_builder = client_builder.danger_accept_invalid_certs(true);
    }

    Ok(client_builder.build()?)
}
