//! Tokio-backed recurring timer.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::{IntervalScheduler, TickCallback, TimerHandle};

/// Shortest period accepted; `tokio::time::interval` rejects zero.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// [`IntervalScheduler`] that runs each timer as a task on a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Scheduler bound to the runtime of the calling task, if there is one.
    pub fn from_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl IntervalScheduler for TokioScheduler {
    fn schedule(&self, period: Duration, tick: TickCallback) -> Box<dyn TimerHandle> {
        let period = period.max(MIN_PERIOD);
        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        let task = self.runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    changed = cancel_rx.changed() => {
                        if changed.is_err() || *cancel_rx.borrow() {
                            break;
                        }
                    }
                    _ = ticker.tick() => tick(),
                }
            }
            tracing::trace!("interval task stopped");
        });
        Box::new(TokioTimer {
            cancel_tx,
            task: Some(task),
        })
    }
}

struct TokioTimer {
    cancel_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl TimerHandle for TokioTimer {
    fn cancel(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };
        let _ = self.cancel_tx.send(true);
        task.abort();
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period_after_first_period() {
        let scheduler = TokioScheduler::from_current().expect("inside runtime");
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let _timer = scheduler.schedule(
            Duration::from_secs(10),
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0, "no tick before one period");

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_further_ticks() {
        let scheduler = TokioScheduler::from_current().expect("inside runtime");
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let mut timer = scheduler.schedule(
            Duration::from_secs(1),
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        tokio::time::sleep(Duration::from_millis(2500)).await;
        let before = hits.load(Ordering::SeqCst);
        assert_eq!(before, 2);

        timer.cancel();
        timer.cancel();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(hits.load(Ordering::SeqCst), before);
    }

    #[test]
    fn from_current_outside_runtime_is_none() {
        assert!(TokioScheduler::from_current().is_none());
    }
}
