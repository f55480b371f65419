//! The one-second clock timer behind a live page.

use crate::design::format_now;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A live feed of formatted time text. Closed once its ticker is gone.
pub type ClockSubscription = watch::Receiver<String>;

/// Recomputes the time text on a fixed period and publishes it on a watch
/// channel. Dropping the ticker aborts its task, which closes the channel
/// for every subscriber.
pub struct ClockTicker {
    handle: JoinHandle<()>,
    rx: watch::Receiver<String>,
}

impl ClockTicker {
    /// Must be called from within a tokio runtime.
    pub fn spawn(time_format: String, period: Duration) -> Self {
        let (tx, rx) = watch::channel(format_now(Some(&time_format)));

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; the initial value is already published
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(format_now(Some(&time_format))).is_err() {
                    break;
                }
            }
        });

        Self { handle, rx }
    }

    pub fn subscribe(&self) -> ClockSubscription {
        self.rx.clone()
    }

    /// Latest published time text.
    pub fn current(&self) -> String {
        self.rx.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
