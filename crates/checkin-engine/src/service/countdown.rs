//! One-second countdown task for the result dialog.

use parking_lot::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

const TICK: Duration = Duration::from_secs(1);

/// Holds at most one running countdown task.
#[derive(Default)]
pub struct Countdown {
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any running countdown with a new one of `ticks` seconds.
    ///
    /// `on_tick` runs once per second and returns whether to keep going.
    pub fn start<F>(&self, ticks: u32, on_tick: F)
    where
        F: Fn() -> bool + Send + 'static,
    {
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + TICK, TICK);
            for _ in 0..ticks {
                ticker.tick().await;
                if !on_tick() {
                    break;
                }
            }
        });
        if let Some(previous) = self.handle.lock().replace(task) {
            previous.abort();
        }
    }

    /// Abort the running countdown, if any. Safe to call repeatedly.
    pub fn cancel(&self) {
        if let Some(handle) = self.handle.lock().take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .lock()
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.get_mut().take() {
            handle.abort();
        }
    }
}
