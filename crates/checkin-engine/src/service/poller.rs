//! Baseline poller: refreshes server baselines on an interval until shutdown.

use std::sync::Weak;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::session::ScannerSession;
use crate::ports::CheckinScannerApi;

/// Spawn the poll loop. The first poll fires immediately.
///
/// The task holds only a weak reference, so it never keeps a dropped session
/// alive.
pub fn spawn_baseline_poller(
    session: Weak<ScannerSession>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let Some(session) = session.upgrade() else {
                        break;
                    };
                    session.refresh_baseline().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        debug!("baseline poller stopped");
    })
}
