//! Debounce timer for bursty input.

use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// A restartable deadline.
///
/// Arming while already armed replaces the deadline, so a burst of events
/// produces a single firing once the burst has quieted for the full delay.
/// Cancelling a pending deadline is the engine's only cancellation point;
/// requests already on the wire are never cancelled.
#[derive(Debug)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    /// Create an unarmed debounce with the given delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Start (or restart) the window.
    pub fn arm(&mut self) {
        self.deadline = Some(Instant::now() + self.delay);
    }

    /// Drop any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Wait until the current deadline passes, then disarm.
    ///
    /// Pends forever when unarmed. Cancel-safe: dropping the future leaves
    /// the deadline in place for the next call.
    pub async fn fired(&mut self) {
        match self.deadline {
            Some(at) => {
                sleep_until(at).await;
                self.deadline = None;
            }
            None => std::future::pending().await,
        }
    }
}
