//! # neurotiq-core
//!
//! **A live four-band brain-wave chart, minus the brain.**
//!
//! `neurotiq-core` drives the NeurotiQ dashboard: a synthetic signal made of
//! four independent oscillators (alpha, beta, theta, delta) plus uniform
//! jitter, sampled once per second into a fixed-size sliding window that a
//! chart renders. It also carries the dashboard's analysis client, the
//! "invite your doctor" workflow, the scripted assistant chat and the static
//! dashboard tables.
//!
//! ## Quick Start
//!
//! ```no_run
//! use neurotiq_core::{StreamConfig, StreamDriver};
//!
//! # async fn demo() -> Result<(), neurotiq_core::StreamError> {
//! let mut driver = StreamDriver::new(StreamConfig::default())?;
//! let reader = driver.reader();
//! driver.start()?;
//!
//! // ... later, from the presentation layer:
//! let window = reader.snapshot();
//! assert_eq!(window.len(), 100);
//!
//! driver.stop();
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! StreamDriver (tick every 1 s) → SignalSampler(t + 1) → StreamBuffer (evict oldest) → readers
//!
//! - [`SignalSampler`]: closed-form waveform plus pluggable [`NoiseSource`].
//! - [`StreamBuffer`]: the window; always exactly `N` samples.
//! - [`StreamDriver`]: owns the window and the timer. `stop()` or drop
//!   cancels the timer, after which the window never changes.
//!
//! The numbers carry no diagnostic meaning.

pub mod analysis;
pub mod buffer;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod driver;
pub mod error;
pub mod invitation;
pub mod sampler;

pub use analysis::{
    AnalysisBackend, AnalysisClient, AnalysisError, AnalysisReport, BrainWaveScores,
    FALLBACK_RECOMMENDATIONS, FALLBACK_REPORT, HttpAnalysisBackend,
};
pub use buffer::{DEFAULT_CAPACITY, StreamBuffer};
pub use catalog::{
    CLASSIFICATION_RESULTS, Classification, Clinic, DAILY_QUESTIONS, Indicator, NEARBY_CLINICS,
    Priority, RECOMMENDATIONS, Recommendation, WELLBEING_INDICATORS, WELLNESS_ACTIVITIES,
    WellnessActivity,
};
pub use chat::{ChatMessage, ChatSession, Sender};
pub use config::{AnalysisConfig, DEFAULT_TICK_INTERVAL, StreamConfig};
pub use driver::{DriverState, StreamDriver, StreamReader, StreamUpdate};
pub use error::StreamError;
pub use invitation::{
    Invitation, InvitationError, InvitationForm, Specialization, submit as submit_invitation,
};
pub use sampler::{
    BANDS, Band, BandSpec, FixedNoise, NoiseSource, RandomNoise, Sample, SignalSampler, Wave,
    baseline,
};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
