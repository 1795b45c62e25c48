use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::warn;
use tokio::task::JoinHandle;
use tokio::time::interval;

use crate::clipboard::{ClipboardPort, ClipboardWatcher};

/// Default watch-cycle period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Drives the watcher on a fixed period. The first tick fires immediately
/// on start, with no initial delay.
pub struct PollLoop {
    period: Duration,
    running: AtomicBool,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl PollLoop {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            running: AtomicBool::new(false),
            handle: Mutex::new(None),
        }
    }

    /// Start polling. Idempotent: a second start while running is a no-op.
    /// Must be called from within a tokio runtime.
    pub fn start<C: ClipboardPort>(&self, watcher: Arc<ClipboardWatcher<C>>) {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        let period = self.period;
        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            loop {
                ticker.tick().await;
                if let Err(err) = watcher.check_once() {
                    // Clipboards are frequently unreadable for a cycle; the
                    // next tick is the retry.
                    warn!("watch cycle skipped: {}", err);
                }
            }
        });

        *self.handle.lock().unwrap() = Some(handle);
    }

    /// Cancel the timer. Commands already handed to the writer complete on
    /// their own; aborting the tick task cannot tear a write in half.
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(handle) = self.handle.lock().unwrap().take() {
            handle.abort();
        }
    }
}
