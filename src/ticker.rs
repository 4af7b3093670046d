use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Repeating clock tick delivered over a channel, so the event loop can drain
/// ticks without blocking. Exactly one task runs per `Ticker`; `restart` is
/// used whenever the tracked due date changes, and dropping the ticker aborts
/// the task.
pub struct Ticker {
    period: Duration,
    handle: JoinHandle<()>,
    rx: UnboundedReceiver<DateTime<Utc>>,
}

impl Ticker {
    pub fn start(period: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; skip it so the channel
            // only carries full periods.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(Utc::now()).is_err() {
                    break;
                }
            }
        });

        Self { period, handle, rx }
    }

    /// Most recent tick, if one arrived since the last call. Never blocks.
    pub fn try_recv(&mut self) -> Option<DateTime<Utc>> {
        self.rx.try_recv().ok()
    }

    pub fn stop(&mut self) {
        self.handle.abort();
    }

    /// Tear down the current tick task and register a fresh one.
    pub fn restart(&mut self) {
        *self = Self::start(self.period);
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ticker_delivers_ticks() {
        let mut ticker = Ticker::start(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(ticker.try_recv().is_some());
    }

    #[tokio::test]
    async fn test_stopped_ticker_goes_quiet() {
        let mut ticker = Ticker::start(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(50)).await;
        ticker.stop();
        // Let the abort land, then flush whatever was already queued.
        tokio::time::sleep(Duration::from_millis(30)).await;
        while ticker.try_recv().is_some() {}

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(ticker.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_restarted_ticker_keeps_ticking() {
        let mut ticker = Ticker::start(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(50)).await;
        ticker.restart();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(ticker.try_recv().is_some());
    }
}
