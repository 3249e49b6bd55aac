//! Debounced route-refresh scheduling.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::trace;

/// Default debounce window before a refresh fires
pub const DEFAULT_REFRESH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefreshState {
    Idle,
    Pending,
}

/// Collapses bursts of schedule calls into one callback invocation.
///
/// The first call arms a timer; further calls inside the window are
/// absorbed without extending the deadline. The callback therefore runs at
/// a fixed delay after the first request of a burst.
pub struct RefreshScheduler {
    state: Mutex<RefreshState>,
    delay: Duration,
    callback: Arc<dyn Fn() + Send + Sync>,
}

impl RefreshScheduler {
    /// Create a scheduler invoking `callback` after `delay`
    pub fn new(delay: Duration, callback: Arc<dyn Fn() + Send + Sync>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(RefreshState::Idle),
            delay,
            callback,
        })
    }

    /// Request a refresh; a no-op while one is already pending
    pub fn schedule(self: &Arc<Self>) {
        {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            if *state == RefreshState::Pending {
                trace!("Refresh already pending");
                return;
            }
            *state = RefreshState::Pending;
        }

        let this = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(this.delay).await;
            // Back to Idle before the callback so a panic inside it cannot
            // wedge the scheduler
            *this.state.lock().unwrap_or_else(|e| e.into_inner()) = RefreshState::Idle;
            (this.callback)();
        });
    }

    /// Whether a refresh is currently armed
    pub fn is_pending(&self) -> bool {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) == RefreshState::Pending
    }
}
