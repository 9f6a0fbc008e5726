//! Timer-driven stream driver.
//!
//! A [`StreamDriver`] owns the sliding window and the sampler. While running
//! it advances logical time by one step per tick: read the newest sample's
//! `time`, sample `time + 1`, push it (evicting the oldest) and publish a
//! [`StreamUpdate`] to subscribers.
//!
//! ```text
//!   Idle ──start()──▶ Running ──tick──▶ Running
//!    ▲                   │
//!    └──stop() / drop────┘
//! ```
//!
//! The buffer, the sampler and the `running` flag share one mutex. A tick
//! checks the flag and mutates inside the same critical section, and
//! `stop()` clears the flag under that lock before aborting the timer task,
//! so nothing touches the window once `stop()` has returned.
//!
//! Every `start()` and `stop()` also bumps a generation counter. A timer task
//! only ticks while the counter still holds the value it was spawned with,
//! so a task from an earlier run that is already past its `await` cannot
//! push into a restarted driver.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::buffer::StreamBuffer;
use crate::config::StreamConfig;
use crate::error::StreamError;
use crate::sampler::{Band, Sample, SignalSampler};

/// Slots in the update channel before slow subscribers start lagging.
const UPDATE_CHANNEL_CAPACITY: usize = 256;

/// Lifecycle state of a [`StreamDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverState {
    /// No timer registered.
    Idle,
    /// Repeating tick active.
    Running,
}

impl std::fmt::Display for DriverState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
        }
    }
}

/// Incremental handoff to the presentation layer: the new sample plus the
/// one it displaced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StreamUpdate {
    pub sample: Sample,
    pub evicted: Option<Sample>,
    /// Ticks performed by the driver so far, this one included.
    pub tick: u64,
}

struct SharedState {
    buffer: StreamBuffer,
    sampler: SignalSampler,
    running: bool,
    generation: u64,
    ticks: u64,
}

fn lock_state(shared: &Mutex<SharedState>) -> MutexGuard<'_, SharedState> {
    // A panic mid-tick cannot leave the window half-updated, so keep going.
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Perform one tick.
///
/// `timer` carries the generation a timer task was spawned with; such a tick
/// is dropped unless the driver is still running that same generation.
/// Manual ticks pass `None`.
fn advance(
    shared: &Mutex<SharedState>,
    updates: &broadcast::Sender<StreamUpdate>,
    timer: Option<u64>,
) -> Option<StreamUpdate> {
    let update = {
        let mut state = lock_state(shared);
        if let Some(generation) = timer
            && (!state.running || state.generation != generation)
        {
            return None;
        }
        let Some(time) = state.buffer.next_time() else {
            if timer.is_some() {
                state.running = false;
            }
            log::warn!("logical time exhausted at t={}", i64::MAX);
            return None;
        };
        let sample = state.sampler.sample(time);
        let evicted = state.buffer.push(sample);
        state.ticks += 1;
        StreamUpdate {
            sample,
            evicted,
            tick: state.ticks,
        }
    };
    log::debug!("tick {} -> t={}", update.tick, update.sample.time);
    // No subscribers is fine; readers can still poll snapshots.
    let _ = updates.send(update);
    Some(update)
}

// ---------------------------------------------------------------------------
// StreamDriver
// ---------------------------------------------------------------------------

/// Owns a [`StreamBuffer`] and advances it on a fixed wall-clock cadence.
///
/// Dropping the driver cancels its timer.
pub struct StreamDriver {
    shared: Arc<Mutex<SharedState>>,
    tick_interval: Duration,
    updates: broadcast::Sender<StreamUpdate>,
    task: Option<JoinHandle<()>>,
}

impl StreamDriver {
    /// Build an idle driver whose window is seeded over
    /// `[start_time, start_time + capacity)`.
    pub fn new(config: StreamConfig) -> Result<Self, StreamError> {
        let sampler = match config.seed {
            Some(seed) => SignalSampler::seeded(seed),
            None => SignalSampler::random(),
        };
        Self::with_sampler(config, sampler)
    }

    /// Like [`new`](Self::new) with an explicit sampler.
    pub fn with_sampler(
        config: StreamConfig,
        mut sampler: SignalSampler,
    ) -> Result<Self, StreamError> {
        config.validate()?;
        let buffer = StreamBuffer::initialize(&mut sampler, config.start_time, config.capacity);
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Ok(Self {
            shared: Arc::new(Mutex::new(SharedState {
                buffer,
                sampler,
                running: false,
                generation: 0,
                ticks: 0,
            })),
            tick_interval: config.tick_interval,
            updates,
            task: None,
        })
    }

    /// Register the repeating tick. The first tick fires one full interval
    /// from now. Starting a running driver does nothing.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&mut self) -> Result<(), StreamError> {
        if self.state() == DriverState::Running {
            return Ok(());
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| StreamError::NoRuntime)?;

        let generation = {
            let mut state = lock_state(&self.shared);
            state.running = true;
            state.generation += 1;
            state.generation
        };

        let shared = Arc::clone(&self.shared);
        let updates = self.updates.clone();
        let period = self.tick_interval;
        let first = Instant::now() + period;

        self.task = Some(runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                interval.tick().await;
                if advance(&shared, &updates, Some(generation)).is_none() {
                    break;
                }
            }
        }));

        log::info!(
            "stream driver started (every {} ms, window {})",
            period.as_millis(),
            self.len()
        );
        Ok(())
    }

    /// Cancel the timer. Once this returns the window no longer changes
    /// until the next [`start`](Self::start).
    pub fn stop(&mut self) {
        let was_running = {
            let mut state = lock_state(&self.shared);
            state.generation += 1;
            std::mem::replace(&mut state.running, false)
        };
        if let Some(task) = self.task.take() {
            task.abort();
        }
        if was_running {
            log::info!("stream driver stopped after {} ticks", self.ticks());
        }
    }

    pub fn state(&self) -> DriverState {
        if self.task.is_some() && lock_state(&self.shared).running {
            DriverState::Running
        } else {
            DriverState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == DriverState::Running
    }

    /// Advance one step immediately, regardless of the timer.
    pub fn tick_now(&self) -> Option<StreamUpdate> {
        advance(&self.shared, &self.updates, None)
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Receive every [`StreamUpdate`] published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<StreamUpdate> {
        self.updates.subscribe()
    }

    /// Read-only view for presentation layers.
    pub fn reader(&self) -> StreamReader {
        StreamReader {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn snapshot(&self) -> Vec<Sample> {
        lock_state(&self.shared).buffer.snapshot()
    }

    pub fn len(&self) -> usize {
        lock_state(&self.shared).buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        lock_state(&self.shared).buffer.is_empty()
    }

    pub fn ticks(&self) -> u64 {
        lock_state(&self.shared).ticks
    }
}

impl Drop for StreamDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for StreamDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamDriver")
            .field("state", &self.state())
            .field("tick_interval", &self.tick_interval)
            .field("ticks", &self.ticks())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// StreamReader
// ---------------------------------------------------------------------------

/// Cloneable, read-only handle on a driver's window.
#[derive(Clone)]
pub struct StreamReader {
    shared: Arc<Mutex<SharedState>>,
}

impl StreamReader {
    /// Owned copy of the window, oldest first.
    pub fn snapshot(&self) -> Vec<Sample> {
        lock_state(&self.shared).buffer.snapshot()
    }

    pub fn latest(&self) -> Option<Sample> {
        lock_state(&self.shared).buffer.latest().copied()
    }

    pub fn series(&self, band: Band) -> Vec<(f64, f64)> {
        lock_state(&self.shared).buffer.series(band)
    }

    pub fn len(&self) -> usize {
        lock_state(&self.shared).buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        lock_state(&self.shared).buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        lock_state(&self.shared).buffer.capacity()
    }

    pub fn ticks(&self) -> u64 {
        lock_state(&self.shared).ticks
    }

    /// Driver state as last set by `start()` / `stop()`.
    pub fn state(&self) -> DriverState {
        if lock_state(&self.shared).running {
            DriverState::Running
        } else {
            DriverState::Idle
        }
    }
}

impl std::fmt::Debug for StreamReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamReader")
            .field("len", &self.len())
            .field("ticks", &self.ticks())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::baseline;

    fn config(t0: i64, capacity: usize) -> StreamConfig {
        StreamConfig::default()
            .with_start_time(t0)
            .with_capacity(capacity)
            .with_seed(Some(11))
    }

    /// Let spawned tasks observe the clock after an `advance`.
    async fn settle() {
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
    }

    async fn advance_ticks(n: u32) {
        for _ in 0..n {
            tokio::time::advance(Duration::from_millis(1000)).await;
            settle().await;
        }
    }

    fn times(samples: &[Sample]) -> Vec<i64> {
        samples.iter().map(|s| s.time).collect()
    }

    // -----------------------------------------------------------------------
    // Construction / manual ticks
    // -----------------------------------------------------------------------

    #[test]
    fn new_driver_is_idle_and_full() {
        let driver = StreamDriver::new(config(300, 100)).unwrap();
        assert_eq!(driver.state(), DriverState::Idle);
        assert_eq!(driver.len(), 100);
        assert_eq!(times(&driver.snapshot()), (300..400).collect::<Vec<_>>());
        assert_eq!(driver.ticks(), 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = StreamDriver::new(config(0, 0)).unwrap_err();
        assert!(matches!(err, StreamError::InvalidConfig(_)));
    }

    #[test]
    fn window_past_time_limit_is_rejected() {
        let err = StreamDriver::new(config(i64::MAX - 2, 5)).unwrap_err();
        assert!(matches!(err, StreamError::InvalidConfig(_)));
    }

    #[test]
    fn tick_now_stops_at_time_limit() {
        let driver = StreamDriver::new(config(i64::MAX - 3, 3)).unwrap();
        let update = driver.tick_now().unwrap();
        assert_eq!(update.sample.time, i64::MAX);

        let frozen = driver.snapshot();
        assert_eq!(driver.tick_now(), None);
        assert_eq!(driver.snapshot(), frozen);
        assert_eq!(driver.ticks(), 1);
    }

    #[test]
    fn start_outside_runtime_fails() {
        let mut driver = StreamDriver::new(config(0, 5)).unwrap();
        assert_eq!(driver.start(), Err(StreamError::NoRuntime));
        assert_eq!(driver.state(), DriverState::Idle);
    }

    #[test]
    fn tick_now_shifts_window_by_one() {
        let driver =
            StreamDriver::with_sampler(config(0, 5), SignalSampler::noiseless()).unwrap();
        let before = driver.snapshot();

        let update = driver.tick_now().unwrap();

        assert_eq!(update.sample, baseline(5));
        assert_eq!(update.evicted, Some(before[0]));
        assert_eq!(update.tick, 1);
        let mut expected = before[1..].to_vec();
        expected.push(baseline(5));
        assert_eq!(driver.snapshot(), expected);
    }

    #[test]
    fn reader_sees_driver_window() {
        let driver = StreamDriver::new(config(10, 3)).unwrap();
        let reader = driver.reader();
        driver.tick_now();
        assert_eq!(reader.len(), 3);
        assert_eq!(reader.capacity(), 3);
        assert_eq!(reader.latest().map(|s| s.time), Some(13));
        assert_eq!(reader.ticks(), 1);
        assert_eq!(reader.series(Band::Alpha).len(), 3);
    }

    // -----------------------------------------------------------------------
    // Timer-driven ticks (paused clock)
    // -----------------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn three_ticks_shift_window_by_three() {
        let mut driver = StreamDriver::new(config(0, 5)).unwrap();
        driver.start().unwrap();
        assert_eq!(driver.state(), DriverState::Running);

        advance_ticks(3).await;

        let window = driver.snapshot();
        assert_eq!(times(&window), vec![3, 4, 5, 6, 7]);
        for s in &window {
            for band in Band::ALL {
                let noise = s.get(band) - band.baseline(s.time);
                assert!(noise > -1e-9 && noise < band.noise_scale() + 1e-9);
            }
        }
        driver.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn no_tick_before_first_interval() {
        let mut driver = StreamDriver::new(config(0, 5)).unwrap();
        driver.start().unwrap();

        tokio::time::advance(Duration::from_millis(999)).await;
        settle().await;

        assert_eq!(driver.ticks(), 0);
        assert_eq!(times(&driver.snapshot()), vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_prevents_further_pushes() {
        let mut driver = StreamDriver::new(config(0, 5)).unwrap();
        driver.start().unwrap();
        advance_ticks(2).await;
        driver.stop();
        assert_eq!(driver.state(), DriverState::Idle);
        let frozen = driver.snapshot();

        advance_ticks(10).await;

        assert_eq!(driver.snapshot(), frozen);
        assert_eq!(driver.ticks(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_timer() {
        let mut driver = StreamDriver::new(config(0, 5)).unwrap();
        let reader = driver.reader();
        driver.start().unwrap();
        advance_ticks(1).await;
        drop(driver);
        let frozen = reader.snapshot();
        assert_eq!(reader.state(), DriverState::Idle);

        advance_ticks(5).await;

        assert_eq!(reader.snapshot(), frozen);
        assert_eq!(reader.ticks(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_continues_logical_time() {
        let mut driver = StreamDriver::new(config(0, 3)).unwrap();
        driver.start().unwrap();
        advance_ticks(2).await;
        driver.stop();
        advance_ticks(4).await;
        driver.start().unwrap();
        advance_ticks(1).await;

        assert_eq!(times(&driver.snapshot()), vec![3, 4, 5]);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_from_previous_run_cannot_tick() {
        let mut driver = StreamDriver::new(config(0, 3)).unwrap();
        driver.start().unwrap();
        let stale = lock_state(&driver.shared).generation;
        driver.stop();
        driver.start().unwrap();
        let current = lock_state(&driver.shared).generation;
        assert_ne!(stale, current);

        let before = driver.snapshot();
        assert_eq!(advance(&driver.shared, &driver.updates, Some(stale)), None);
        assert_eq!(driver.snapshot(), before);
        assert_eq!(driver.ticks(), 0);

        let update = advance(&driver.shared, &driver.updates, Some(current)).unwrap();
        assert_eq!(update.sample.time, 3);
        driver.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn restart_runs_exactly_one_timer() {
        let mut driver = StreamDriver::new(config(0, 3)).unwrap();
        for _ in 0..5 {
            driver.start().unwrap();
            driver.stop();
        }
        driver.start().unwrap();
        advance_ticks(2).await;
        assert_eq!(driver.ticks(), 2);
        assert_eq!(times(&driver.snapshot()), vec![2, 3, 4]);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_goes_idle_at_time_limit() {
        let mut driver = StreamDriver::new(config(i64::MAX - 4, 4)).unwrap();
        driver.start().unwrap();

        advance_ticks(3).await;

        assert_eq!(driver.ticks(), 1);
        assert_eq!(driver.snapshot().last().map(|s| s.time), Some(i64::MAX));
        assert_eq!(driver.state(), DriverState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn start_twice_keeps_single_timer() {
        let mut driver = StreamDriver::new(config(0, 4)).unwrap();
        driver.start().unwrap();
        driver.start().unwrap();
        advance_ticks(2).await;
        assert_eq!(driver.ticks(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_receive_updates_in_order() {
        let mut driver = StreamDriver::new(config(0, 5)).unwrap();
        let mut rx = driver.subscribe();
        driver.start().unwrap();
        advance_ticks(3).await;

        let mut seen = Vec::new();
        while let Ok(update) = rx.try_recv() {
            seen.push((update.sample.time, update.evicted.map(|s| s.time)));
        }
        assert_eq!(seen, vec![(5, Some(0)), (6, Some(1)), (7, Some(2))]);
    }
}
