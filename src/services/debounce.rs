//! Debouncer
//!
//! Cancelable trailing-edge timer: each `schedule` replaces the pending fire,
//! so a burst of calls produces one fire `delay` after the last call.
//! Requires a running tokio runtime.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any pending fire and call `fire(value)` once `delay` has passed
    /// without another `schedule` or `cancel`.
    pub fn schedule<T, F>(&mut self, value: T, fire: F)
    where
        T: Send + 'static,
        F: FnOnce(T) + Send + 'static,
    {
        self.cancel();
        let deadline = Instant::now() + self.delay;
        self.pending = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            fire(value);
        }));
    }

    /// Drop the pending fire. Returns true if one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                waiting
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
