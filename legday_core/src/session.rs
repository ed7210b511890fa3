//! Shared session state and the wall-clock tick driver.
//!
//! [`SessionStore`] holds the timer state behind a mutex and notifies
//! subscribers after every observable change, keeping the state-holder
//! decoupled from any particular rendering front end. One logical ticker
//! drives both the countdown and the session clock through a single
//! [`SessionStore::tick`] call per second; the spawned driver is cancelled
//! through an explicit guard so no ticking leaks past teardown.

use crate::sink::ElapsedSink;
use crate::timer::{TickOutcome, TimerState};
use crate::types::{Difficulty, Speed};
use crate::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

type Subscriber = Box<dyn Fn(&TimerState) + Send>;

struct Inner {
    timer: TimerState,
    subscribers: Vec<Subscriber>,
    sink: Option<Box<dyn ElapsedSink>>,
}

/// Thread-safe holder of one training session's timer state
///
/// Cloning is cheap and shares the same underlying session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<Inner>>,
}

impl SessionStore {
    pub fn new(speed: Speed, difficulty: Difficulty) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                timer: TimerState::new(speed, difficulty),
                subscribers: Vec::new(),
                sink: None,
            })),
        }
    }

    /// Attach the optional elapsed-seconds sink
    ///
    /// The sink is handed the session clock at most once per tick; failures
    /// are logged and never interrupt the session.
    pub fn with_sink(self, sink: Box<dyn ElapsedSink>) -> Self {
        self.lock().sink = Some(sink);
        self
    }

    /// Register a callback invoked after every observable state change
    pub fn subscribe(&self, subscriber: impl Fn(&TimerState) + Send + 'static) {
        self.lock().subscribers.push(Box::new(subscriber));
    }

    /// Copy of the current timer state
    pub fn snapshot(&self) -> TimerState {
        self.lock().timer.clone()
    }

    pub fn start(&self) -> Result<()> {
        let mut inner = self.lock();
        inner.timer.start()?;
        notify(&inner);
        Ok(())
    }

    pub fn advance_set(&self) -> Result<()> {
        let mut inner = self.lock();
        inner.timer.advance_set()?;
        notify(&inner);
        Ok(())
    }

    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.timer.reset();
        notify(&inner);
    }

    pub fn set_speed(&self, speed: Speed) -> Result<()> {
        let mut inner = self.lock();
        inner.timer.set_speed(speed)?;
        notify(&inner);
        Ok(())
    }

    pub fn set_difficulty(&self, difficulty: Difficulty) -> Result<()> {
        let mut inner = self.lock();
        inner.timer.set_difficulty(difficulty)?;
        notify(&inner);
        Ok(())
    }

    /// Apply one second of wall-clock time
    ///
    /// Entry point for the tick driver. A tick while the timer is stopped is
    /// discarded by the state machine and produces no notification and no
    /// sink write.
    pub fn tick(&self) -> TickOutcome {
        let mut inner = self.lock();
        let outcome = inner.timer.tick();
        if outcome == TickOutcome::Ignored {
            return outcome;
        }

        let elapsed = inner.timer.session_elapsed();
        if let Some(sink) = inner.sink.as_mut() {
            if let Err(e) = sink.record(elapsed) {
                tracing::warn!("Failed to record session seconds: {}", e);
            }
        }

        notify(&inner);
        outcome
    }

    /// Spawn a thread that ticks this session once per `interval`
    ///
    /// Returns the guard that owns the drive; see [`TickerGuard::cancel`].
    pub fn spawn_ticker(&self, interval: Duration) -> TickerGuard {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let store = self.clone();

        let handle = std::thread::spawn(move || {
            // Sleep in short slices so cancellation is observed promptly
            // even with a one-second tick interval.
            let slice = interval.min(Duration::from_millis(25));
            loop {
                let deadline = Instant::now() + interval;
                while Instant::now() < deadline {
                    if flag.load(Ordering::Relaxed) {
                        return;
                    }
                    std::thread::sleep(slice);
                }
                if flag.load(Ordering::Relaxed) {
                    return;
                }
                store.tick();
            }
        });

        tracing::debug!("Ticker spawned at {:?} interval", interval);
        TickerGuard {
            cancelled,
            handle: Some(handle),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panicked subscriber poisons the mutex; the timer state itself is
        // left consistent by every transition, so keep going.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn notify(inner: &Inner) {
    for subscriber in &inner.subscribers {
        subscriber(&inner.timer);
    }
}

/// Handle for a spawned ticker thread
///
/// Cancelling is idempotent and safe to call any number of times; dropping
/// the guard cancels too, so a ticker cannot outlive its owner.
pub struct TickerGuard {
    cancelled: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl TickerGuard {
    /// Stop the ticking thread and wait for it to exit
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("Ticker thread panicked before joining");
            }
            tracing::debug!("Ticker cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl Drop for TickerGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    struct CapturingSink(Arc<Mutex<Vec<u32>>>);

    impl ElapsedSink for CapturingSink {
        fn record(&mut self, session_seconds: u32) -> Result<()> {
            self.0.lock().unwrap().push(session_seconds);
            Ok(())
        }
    }

    struct FailingSink;

    impl ElapsedSink for FailingSink {
        fn record(&mut self, _session_seconds: u32) -> Result<()> {
            Err(crate::Error::Config("sink offline".into()))
        }
    }

    #[test]
    fn test_subscribers_notified_on_start_and_tick() {
        let store = SessionStore::new(Speed::Fast, Difficulty::Easy);
        let seen = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&seen);
        store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.start().unwrap();
        store.tick();
        store.tick();

        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_ignored_tick_does_not_notify() {
        let store = SessionStore::new(Speed::Fast, Difficulty::Easy);
        let seen = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&seen);
        store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(store.tick(), TickOutcome::Ignored);
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_sink_receives_each_tick() {
        let values = Arc::new(Mutex::new(Vec::new()));
        let store = SessionStore::new(Speed::Fast, Difficulty::Easy)
            .with_sink(Box::new(CapturingSink(Arc::clone(&values))));

        store.start().unwrap();
        store.tick();
        store.tick();
        store.tick();

        assert_eq!(*values.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_sink_failure_does_not_stop_session() {
        let store =
            SessionStore::new(Speed::Fast, Difficulty::Easy).with_sink(Box::new(FailingSink));

        store.start().unwrap();
        assert_eq!(store.tick(), TickOutcome::Counting);
        assert_eq!(store.snapshot().session_elapsed(), 1);
    }

    #[test]
    fn test_ticker_drives_countdown() {
        let store = SessionStore::new(Speed::Fast, Difficulty::Easy);
        let mut guard = store.spawn_ticker(Duration::from_millis(5));

        store.start().unwrap();

        // Wait generously for at least one tick to land.
        let deadline = Instant::now() + Duration::from_secs(2);
        while store.snapshot().session_elapsed() == 0 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }

        guard.cancel();
        assert!(store.snapshot().session_elapsed() >= 1);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let store = SessionStore::new(Speed::Slow, Difficulty::Easy);
        let mut guard = store.spawn_ticker(Duration::from_millis(5));

        guard.cancel();
        guard.cancel();
        assert!(guard.is_cancelled());
        // Drop cancels again; must not panic or hang.
        drop(guard);
    }

    #[test]
    fn test_no_ticks_after_cancel() {
        let store = SessionStore::new(Speed::Fast, Difficulty::Easy);
        let mut guard = store.spawn_ticker(Duration::from_millis(5));
        store.start().unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while store.snapshot().session_elapsed() == 0 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        guard.cancel();

        let frozen = store.snapshot().session_elapsed();
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(store.snapshot().session_elapsed(), frozen);
    }
}
