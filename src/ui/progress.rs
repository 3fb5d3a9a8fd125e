use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Progress bar over the pages of an audit run.
pub struct ProgressReporter {
    page_progress: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            page_progress: None,
            enabled,
        }
    }

    /// Reporter that tracks positions without drawing anything.
    pub fn hidden() -> Self {
        Self {
            page_progress: Some(ProgressBar::with_draw_target(
                Some(0),
                ProgressDrawTarget::hidden(),
            )),
            enabled: false,
        }
    }

    pub fn start_pages(&mut self, total_pages: usize) {
        if let Some(ref pb) = self.page_progress {
            pb.set_length(total_pages as u64);
            pb.set_position(0);
            return;
        }
        if !self.enabled {
            return;
        }

        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages audited ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let pb = ProgressBar::with_draw_target(Some(total_pages as u64), ProgressDrawTarget::stderr());
        pb.set_style(style);
        pb.set_message("Auditing pages");
        pb.enable_steady_tick(Duration::from_millis(120));
        self.page_progress = Some(pb);
    }

    pub fn update_pages(&self, current: usize) {
        if let Some(ref pb) = self.page_progress {
            pb.set_position(current as u64);
        }
    }

    pub fn finish_pages(&self, pages_checked: usize, cancelled: bool) {
        if let Some(ref pb) = self.page_progress {
            let message = if cancelled {
                format!("✗ Cancelled after {pages_checked} page(s)")
            } else {
                format!("✓ {pages_checked} page(s) audited")
            };
            pb.finish_with_message(message);
        }
    }

    pub fn finish_and_clear(&self) {
        if self.enabled
            && let Some(ref pb) = self.page_progress
        {
            pb.finish_and_clear();
        }
    }

    /// Pages recorded so far.
    pub fn position(&self) -> u64 {
        self.page_progress
            .as_ref()
            .map(ProgressBar::position)
            .unwrap_or(0)
    }
}
