//! Periodic autosave ticks.
//!
//! The timer does not touch the session itself. It posts
//! `UiEvent::AutosaveTick` to the owner's event channel, so the session
//! keeps a single mutator.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::dispatch::UiEvent;

/// Background task emitting autosave ticks at a fixed period.
pub struct AutosaveTimer {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl AutosaveTimer {
    /// Start ticking. The first tick fires one full `period` after start.
    ///
    /// The task ends when cancelled or when the receiver is dropped.
    pub fn spawn(period: Duration, events: mpsc::Sender<UiEvent>) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        if events.send(UiEvent::AutosaveTick).await.is_err() {
                            break;
                        }
                    }
                }
            }
            debug!("Autosave timer stopped");
        });

        debug!(period_secs = period.as_secs(), "Autosave timer started");
        Self { cancel, handle }
    }

    /// Stop the timer and wait for the task to finish.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let (tx, mut rx) = mpsc::channel(4);
        let started = Instant::now();
        let timer = AutosaveTimer::spawn(Duration::from_secs(30), tx);

        let early = tokio::time::timeout(Duration::from_secs(29), rx.recv()).await;
        assert!(early.is_err(), "no tick before the first period");

        assert_eq!(rx.recv().await, Some(UiEvent::AutosaveTick));
        assert!(started.elapsed() >= Duration::from_secs(30));

        assert_eq!(rx.recv().await, Some(UiEvent::AutosaveTick));
        assert!(started.elapsed() >= Duration::from_secs(60));

        timer.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_closes_channel() {
        let (tx, mut rx) = mpsc::channel(4);
        let timer = AutosaveTimer::spawn(Duration::from_secs(30), tx);

        timer.shutdown().await;
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_after_ticks_stops_timer() {
        let (tx, mut rx) = mpsc::channel(4);
        let timer = AutosaveTimer::spawn(Duration::from_secs(5), tx);

        assert_eq!(rx.recv().await, Some(UiEvent::AutosaveTick));
        timer.shutdown().await;
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        let timer = AutosaveTimer::spawn(Duration::from_secs(1), tx);
        drop(rx);

        // Completes only if the task noticed the closed channel.
        tokio::time::timeout(Duration::from_secs(10), timer.handle)
            .await
            .expect("timer task should exit")
            .unwrap();
    }
}
