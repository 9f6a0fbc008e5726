//! Fixed-capacity sliding window of samples.

use std::collections::VecDeque;

use crate::sampler::{Band, Sample, SignalSampler};

/// Default window length used by the dashboard chart.
pub const DEFAULT_CAPACITY: usize = 100;

/// The last `capacity` samples, oldest first.
///
/// Once initialized the window is always full: every [`push`](Self::push)
/// is paired with eviction of exactly one sample from the front.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamBuffer {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl StreamBuffer {
    /// Seed a full window with one sample per time index in
    /// `t0..t0 + capacity`. A capacity of zero is raised to one.
    ///
    /// If the window would run past `i64::MAX`, `t0` is pulled back so the
    /// newest sample lands exactly on `i64::MAX`.
    pub fn initialize(sampler: &mut SignalSampler, t0: i64, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let span = i64::try_from(capacity - 1).unwrap_or(i64::MAX);
        let t0 = t0.min(i64::MAX - span);
        let samples = (0..=span)
            .map(|offset| sampler.sample(t0 + offset))
            .collect();
        Self { samples, capacity }
    }

    /// Append `sample`; if the window overflows, remove and return the
    /// oldest entry.
    ///
    /// Callers supply strictly increasing `time` values. Anything else only
    /// scrambles the chart order.
    pub fn push(&mut self, sample: Sample) -> Option<Sample> {
        self.samples.push_back(sample);
        if self.samples.len() > self.capacity {
            self.samples.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn oldest(&self) -> Option<&Sample> {
        self.samples.front()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// Logical time of the next sample to append. `None` once the newest
    /// sample sits at `i64::MAX`.
    pub fn next_time(&self) -> Option<i64> {
        self.latest().and_then(|s| s.time.checked_add(1))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Owned copy of the window, oldest first.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }

    pub fn times(&self) -> Vec<i64> {
        self.samples.iter().map(|s| s.time).collect()
    }

    /// `(time, value)` points of one band, ready for a line chart.
    pub fn series(&self, band: Band) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .map(|s| (s.time as f64, s.get(band)))
            .collect()
    }
}
