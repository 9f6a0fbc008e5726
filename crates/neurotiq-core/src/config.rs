//! Stream and analysis-client configuration.

use std::time::Duration;

use crate::buffer::DEFAULT_CAPACITY;
use crate::error::StreamError;

/// Default wall-clock interval between driver ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Environment variable overriding the analysis endpoint base URL.
pub const API_URL_ENV: &str = "NEUROTIQ_API_URL";

/// Analysis endpoint used when [`API_URL_ENV`] is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Configuration for a [`StreamDriver`](crate::driver::StreamDriver).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    /// Window length `N`.
    pub capacity: usize,
    /// Logical time of the oldest sample in the initial window.
    pub start_time: i64,
    /// Wall-clock cadence of ticks.
    pub tick_interval: Duration,
    /// Seed for reproducible noise. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            start_time: 0,
            tick_interval: DEFAULT_TICK_INTERVAL,
            seed: None,
        }
    }
}

impl StreamConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_start_time(mut self, start_time: i64) -> Self {
        self.start_time = start_time;
        self
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), StreamError> {
        if self.capacity == 0 {
            return Err(StreamError::InvalidConfig(
                "capacity must be at least 1".to_string(),
            ));
        }
        if self.tick_interval.is_zero() {
            return Err(StreamError::InvalidConfig(
                "tick interval must be greater than zero".to_string(),
            ));
        }
        // The first tick samples start_time + capacity.
        let first_tick = i64::try_from(self.capacity)
            .ok()
            .and_then(|n| self.start_time.checked_add(n));
        if first_tick.is_none() {
            return Err(StreamError::InvalidConfig(format!(
                "start time {} leaves no room for a window of {} samples",
                self.start_time, self.capacity
            )));
        }
        Ok(())
    }
}

/// Where and how to reach the remote analysis endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Base URL; requests go to `{api_url}/analyze`.
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl AnalysisConfig {
    /// Defaults, with the base URL taken from `NEUROTIQ_API_URL` when set.
    pub fn from_env() -> Self {
        let api_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self {
            api_url,
            ..Self::default()
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the analyze route.
    pub fn analyze_url(&self) -> String {
        format!("{}/analyze", self.api_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_defaults() {
        let config = StreamConfig::default();
        assert_eq!(config.capacity, 100);
        assert_eq!(config.start_time, 0);
        assert_eq!(config.tick_interval, Duration::from_millis(1000));
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn stream_builders() {
        let config = StreamConfig::default()
            .with_capacity(5)
            .with_start_time(-4)
            .with_tick_interval(Duration::from_millis(250))
            .with_seed(Some(3));
        assert_eq!(config.capacity, 5);
        assert_eq!(config.start_time, -4);
        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn zero_capacity_rejected() {
        let err = StreamConfig::default().with_capacity(0).validate();
        assert!(matches!(err, Err(StreamError::InvalidConfig(_))));
    }

    #[test]
    fn zero_interval_rejected() {
        let err = StreamConfig::default()
            .with_tick_interval(Duration::ZERO)
            .validate();
        assert!(matches!(err, Err(StreamError::InvalidConfig(_))));
    }

    #[test]
    fn start_time_near_limit_rejected() {
        let err = StreamConfig::default()
            .with_start_time(i64::MAX - 2)
            .with_capacity(5)
            .validate();
        assert!(matches!(err, Err(StreamError::InvalidConfig(_))));

        let edge = StreamConfig::default()
            .with_start_time(i64::MAX - 5)
            .with_capacity(5);
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn analyze_url_joins_cleanly() {
        let config = AnalysisConfig::default().with_api_url("http://example.test:8080/");
        assert_eq!(config.analyze_url(), "http://example.test:8080/analyze");
        assert_eq!(
            AnalysisConfig::default().analyze_url(),
            "http://localhost:5000/analyze"
        );
    }
}
