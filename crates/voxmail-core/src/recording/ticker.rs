use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::task::JoinHandle;

const TICK: Duration = Duration::from_secs(1);

/// One-second elapsed-time counter. Dropping it stops the timer.
pub(crate) struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Reset `counter` and start incrementing it once per second.
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn start(counter: Arc<AtomicU64>) -> Self {
        counter.store(0, Ordering::Release);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK);
            // First tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                counter.fetch_add(1, Ordering::AcqRel);
            }
        });

        Self { handle }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
