use futures::stream::{self, StreamExt};
use log::info;
use std::time::{Duration, Instant};

use crate::audit::control::AuditControl;
use crate::audit::rules::{AuditRule, AuditTarget, PageInspection};
use crate::config::Config;
use crate::core::constants::error_messages;
use crate::core::error::{AuditError, Result};
use crate::core::types::{AssetReference, VerificationResult};
use crate::discovery::{PageSource, discover_sitemap_pages, normalize_page_urls};
use crate::reporting::logging;
use crate::reporting::report::{AuditReport, AuditSummary, ReportKind, ReportRow};
use crate::ui::progress::ProgressReporter;
use crate::validation::{CheckUrls, StatusVerifier, VerifyOptions, build_client};

/// What a single run audits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRequest {
    pub kind: ReportKind,
    /// Page source; `None` falls back to configured nav sites or sitemap
    pub source: Option<PageSource>,
    /// Keyword for the `find-text` report
    pub keyword: Option<String>,
}

/// Everything one page contributed to the run.
#[derive(Debug)]
struct PageOutcome {
    index: usize,
    items_checked: usize,
    rows: Vec<ReportRow>,
}

/// Drives pages through fetch, inspect, verify and filter.
pub struct Auditor<C> {
    checker: C,
    rule: AuditRule,
    concurrency: usize,
    control: AuditControl,
    deadline: Option<Duration>,
}

impl<C: CheckUrls> Auditor<C> {
    pub fn new(checker: C, rule: AuditRule, concurrency: usize) -> Self {
        Self {
            checker,
            rule,
            concurrency: concurrency.max(1),
            control: AuditControl::new(),
            deadline: None,
        }
    }

    pub fn with_control(mut self, control: AuditControl) -> Self {
        self.control = control;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Audit every target and fold the outcomes into a report.
    ///
    /// Never fails: unreachable pages and assets become rows or are skipped.
    /// When the control is cancelled or the deadline passes, pages still in
    /// flight are dropped and the report covers only collected pages.
    pub async fn run(
        &self,
        targets: &[AuditTarget],
        mut progress: Option<&mut ProgressReporter>,
    ) -> AuditReport {
        let started = Instant::now();
        if let Some(ref mut prog) = progress {
            prog.start_pages(targets.len());
        }

        let mut pending = stream::iter(targets.iter().enumerate())
            .map(|(index, target)| self.audit_page(index, target))
            .buffer_unordered(self.concurrency);

        let stop = self.stop_signal();
        tokio::pin!(stop);

        let mut outcomes: Vec<PageOutcome> = Vec::with_capacity(targets.len());
        let mut cancelled = false;
        loop {
            tokio::select! {
                biased;
                _ = &mut stop => {
                    cancelled = true;
                    break;
                }
                next = pending.next() => match next {
                    Some(outcome) => {
                        outcomes.push(outcome);
                        if let Some(ref prog) = progress {
                            prog.update_pages(outcomes.len());
                        }
                    }
                    None => break,
                },
            }
        }
        drop(pending);

        if let Some(ref prog) = progress {
            prog.finish_pages(outcomes.len(), cancelled);
        }

        let report = self.aggregate(outcomes, cancelled);
        logging::log_audit_complete(
            report.summary.pages_checked,
            report.summary.items_checked,
            report.summary.matched_count,
            cancelled,
            started.elapsed().as_millis(),
        );
        report
    }

    async fn stop_signal(&self) {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = self.control.cancelled() => {}
                    _ = tokio::time::sleep(deadline) => {
                        info!("Deadline of {}s reached", deadline.as_secs());
                    }
                }
            }
            None => self.control.cancelled().await,
        }
    }

    async fn audit_page(&self, index: usize, target: &AuditTarget) -> PageOutcome {
        let body = match self.checker.fetch_page(target.page.as_str()).await {
            Ok(body) => body,
            Err(failure) => {
                logging::log_page_failure(&target.page, &failure.error);
                return PageOutcome {
                    index,
                    items_checked: 0,
                    rows: self.rule.page_failure_row(target, &failure).into_iter().collect(),
                };
            }
        };

        // the parsed document is not Send; it lives only inside `inspect`
        let inspection = self.rule.inspect(&target.page, &body);

        let outcome = match inspection {
            PageInspection::Checked(row) => PageOutcome {
                index,
                items_checked: 1,
                rows: row.into_iter().collect(),
            },
            PageInspection::Assets(assets) => {
                let items_checked = assets.len();
                let mut verified: Vec<(usize, AssetReference, VerificationResult)> =
                    stream::iter(assets.into_iter().enumerate())
                        .map(|(position, asset)| async move {
                            let result = self.checker.verify(&asset.url).await;
                            (position, asset, result)
                        })
                        .buffer_unordered(self.concurrency)
                        .collect()
                        .await;
                verified.sort_by_key(|(position, _, _)| *position);

                let rows = verified
                    .iter()
                    .filter(|(_, _, result)| self.rule.keep(result))
                    .map(|(_, asset, result)| self.rule.item_row(target, asset, result))
                    .collect();

                PageOutcome {
                    index,
                    items_checked,
                    rows,
                }
            }
        };

        logging::log_page_result(&target.page, outcome.items_checked, outcome.rows.len());
        outcome
    }

    fn aggregate(&self, mut outcomes: Vec<PageOutcome>, cancelled: bool) -> AuditReport {
        outcomes.sort_by_key(|outcome| outcome.index);

        let pages_checked = outcomes.len();
        let items_checked = outcomes.iter().map(|o| o.items_checked).sum();
        let rows: Vec<ReportRow> = outcomes.into_iter().flat_map(|o| o.rows).collect();

        let kind = self.rule.kind();
        AuditReport {
            kind,
            summary: AuditSummary::new(kind, pages_checked, items_checked, rows.len(), cancelled),
            rows,
        }
    }
}

/// Resolve the pages of a request into audit targets.
///
/// Raw input is normalized and bounded here, before any network activity.
/// A sitemap failure is returned as `AuditError::Discovery`.
pub async fn resolve_targets(
    request: &AuditRequest,
    config: &Config,
    client: &reqwest::Client,
) -> Result<Vec<AuditTarget>> {
    let source = match (&request.source, &config.nav_sites) {
        (Some(source), _) => source.clone(),
        (None, Some(sites)) if matches!(request.kind, ReportKind::Header | ReportKind::Footer) => {
            return Ok(sites
                .iter()
                .map(|site| AuditTarget::new(site.label.clone(), site.url.as_str().into()))
                .collect());
        }
        (None, _) => match config.sitemap_url {
            Some(ref sitemap_url) => PageSource::Sitemap(sitemap_url.clone()),
            None => {
                return Err(AuditError::MissingInput(
                    "no page URLs or sitemap supplied".to_string(),
                ));
            }
        },
    };

    let pages = match source {
        PageSource::Raw(ref raw) => {
            let pages = normalize_page_urls(raw, config.max_input_urls())?;
            if pages.is_empty() {
                return Err(AuditError::MissingInput(
                    "please enter at least one page URL".to_string(),
                ));
            }
            pages
        }
        PageSource::Sitemap(ref sitemap_url) => {
            discover_sitemap_pages(client, sitemap_url, config).await?
        }
    };

    Ok(pages.into_iter().map(AuditTarget::from_page).collect())
}

/// Run one report end to end with the HTTP verifier.
///
/// Input errors and client configuration errors are returned before any
/// request is made. A failed sitemap yields a report with no rows whose
/// summary carries the reason.
pub async fn run_report(
    request: &AuditRequest,
    config: &Config,
    control: AuditControl,
    progress: Option<&mut ProgressReporter>,
) -> Result<AuditReport> {
    let rule = AuditRule::for_kind(request.kind, request.keyword.as_deref())?;
    let client = build_client(config)?;
    let targets = match resolve_targets(request, config, &client).await {
        Ok(targets) => targets,
        Err(AuditError::Discovery(reason)) => {
            let message = format!("{}: {reason}", error_messages::SITEMAP_FETCH_FAILED);
            logging::log_error(&message, None);
            return Ok(AuditReport::without_rows(request.kind, message));
        }
        Err(err) => return Err(err),
    };

    let pages: Vec<_> = targets.iter().map(|t| t.page.clone()).collect();
    logging::log_discovery(&pages);

    let verifier = StatusVerifier::new(client, VerifyOptions::from_config(config));
    let auditor = Auditor::new(verifier, rule, config.concurrency())
        .with_control(control)
        .with_deadline(config.deadline_duration());

    Ok(auditor.run(&targets, progress).await)
}
