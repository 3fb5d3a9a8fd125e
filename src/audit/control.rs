//! Run cancellation: a shared stop token the caller keeps a clone of.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct ControlState {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Cancellation handle for one audit run.
///
/// Clones share state. Calling `cancel` on any clone stops the run at its
/// next collection point; rows collected so far are still returned.
#[derive(Debug, Clone, Default)]
pub struct AuditControl {
    state: Arc<ControlState>,
}

impl AuditControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the run to stop. Idempotent.
    pub fn cancel(&self) {
        self.state.cancelled.store(true, Ordering::SeqCst);
        self.state.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once `cancel` has been called.
    pub async fn cancelled(&self) {
        loop {
            // registered before the flag check so a concurrent cancel is not missed
            let notified = self.state.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}
