//! Synthetic four-band waveform generator.
//!
//! Every band is an independent oscillator evaluated at an integer logical
//! time index, plus a uniform jitter term:
//!
//! | band  | waveform        | amplitude | noise scale |
//! |-------|-----------------|-----------|-------------|
//! | alpha | `sin(t * 0.1)`  | 10        | 5           |
//! | beta  | `cos(t * 0.1)`  | 8         | 4           |
//! | theta | `sin(t * 0.05)` | 6         | 3           |
//! | delta | `cos(t * 0.05)` | 12        | 6           |
//!
//! The bands are named after EEG frequency bands for display purposes only.
//! Nothing here models physiology; the generator exists to drive a chart.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// One of the four synthetic channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Alpha,
    Beta,
    Theta,
    Delta,
}

impl Band {
    /// All bands in sampling order.
    pub const ALL: [Band; 4] = [Band::Alpha, Band::Beta, Band::Theta, Band::Delta];

    /// Coefficients for this band.
    pub fn spec(self) -> &'static BandSpec {
        match self {
            Self::Alpha => &BANDS[0],
            Self::Beta => &BANDS[1],
            Self::Theta => &BANDS[2],
            Self::Delta => &BANDS[3],
        }
    }

    /// Noise-free component at logical time `time`.
    pub fn baseline(self, time: i64) -> f64 {
        self.spec().baseline(time)
    }

    /// Upper bound (exclusive) of the noise term added to the baseline.
    pub fn noise_scale(self) -> f64 {
        self.spec().noise_scale
    }

    /// Cycle to the next band, wrapping after delta.
    pub fn next(self) -> Self {
        match self {
            Self::Alpha => Self::Beta,
            Self::Beta => Self::Theta,
            Self::Theta => Self::Delta,
            Self::Delta => Self::Alpha,
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alpha => write!(f, "alpha"),
            Self::Beta => write!(f, "beta"),
            Self::Theta => write!(f, "theta"),
            Self::Delta => write!(f, "delta"),
        }
    }
}

impl std::str::FromStr for Band {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alpha" => Ok(Self::Alpha),
            "beta" => Ok(Self::Beta),
            "theta" => Ok(Self::Theta),
            "delta" => Ok(Self::Delta),
            other => Err(format!(
                "unknown band '{other}' (expected alpha, beta, theta or delta)"
            )),
        }
    }
}

/// Carrier function of an oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Cosine,
}

/// Closed-form coefficients of one band:
/// `wave(t * rate) * amplitude + noise * noise_scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandSpec {
    pub band: Band,
    pub wave: Wave,
    /// Phase advance per logical time step, in radians.
    pub rate: f64,
    pub amplitude: f64,
    pub noise_scale: f64,
}

impl BandSpec {
    /// Noise-free component at logical time `time`.
    pub fn baseline(&self, time: i64) -> f64 {
        let phase = time as f64 * self.rate;
        let carrier = match self.wave {
            Wave::Sine => phase.sin(),
            Wave::Cosine => phase.cos(),
        };
        carrier * self.amplitude
    }
}

/// Band coefficient table, in sampling order.
pub const BANDS: [BandSpec; 4] = [
    BandSpec {
        band: Band::Alpha,
        wave: Wave::Sine,
        rate: 0.1,
        amplitude: 10.0,
        noise_scale: 5.0,
    },
    BandSpec {
        band: Band::Beta,
        wave: Wave::Cosine,
        rate: 0.1,
        amplitude: 8.0,
        noise_scale: 4.0,
    },
    BandSpec {
        band: Band::Theta,
        wave: Wave::Sine,
        rate: 0.05,
        amplitude: 6.0,
        noise_scale: 3.0,
    },
    BandSpec {
        band: Band::Delta,
        wave: Wave::Cosine,
        rate: 0.05,
        amplitude: 12.0,
        noise_scale: 6.0,
    },
];

/// One point of the signal stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Logical time index (not wall-clock).
    pub time: i64,
    pub alpha: f64,
    pub beta: f64,
    pub theta: f64,
    pub delta: f64,
}

impl Sample {
    /// Amplitude of a single band.
    pub fn get(&self, band: Band) -> f64 {
        match band {
            Band::Alpha => self.alpha,
            Band::Beta => self.beta,
            Band::Theta => self.theta,
            Band::Delta => self.delta,
        }
    }

    fn set(&mut self, band: Band, value: f64) {
        match band {
            Band::Alpha => self.alpha = value,
            Band::Beta => self.beta = value,
            Band::Theta => self.theta = value,
            Band::Delta => self.delta = value,
        }
    }
}

// ---------------------------------------------------------------------------
// Noise
// ---------------------------------------------------------------------------

/// Source of the jitter term. Values must lie in `[0, 1)`.
pub trait NoiseSource: Send {
    /// Next uniformly distributed value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

/// Uniform noise backed by a `StdRng`.
pub struct RandomNoise {
    rng: StdRng,
}

impl RandomNoise {
    /// Seed from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible noise for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NoiseSource for RandomNoise {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Constant noise; `FixedNoise(0.0)` yields the bare baseline.
#[derive(Debug, Clone, Copy)]
pub struct FixedNoise(pub f64);

impl NoiseSource for FixedNoise {
    fn next_unit(&mut self) -> f64 {
        // Keep the contract even for sloppy constants.
        if self.0.is_nan() || self.0 < 0.0 {
            0.0
        } else if self.0 >= 1.0 {
            1.0 - f64::EPSILON
        } else {
            self.0
        }
    }
}

// ---------------------------------------------------------------------------
// SignalSampler
// ---------------------------------------------------------------------------

/// Maps a logical time index to a four-band [`Sample`].
pub struct SignalSampler {
    noise: Box<dyn NoiseSource>,
}

impl SignalSampler {
    pub fn new(noise: Box<dyn NoiseSource>) -> Self {
        Self { noise }
    }

    /// Sampler with OS-seeded noise.
    pub fn random() -> Self {
        Self::new(Box::new(RandomNoise::from_os_rng()))
    }

    /// Sampler whose output is reproducible for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(Box::new(RandomNoise::seeded(seed)))
    }

    /// Sampler with the noise term pinned to zero.
    pub fn noiseless() -> Self {
        Self::new(Box::new(FixedNoise(0.0)))
    }

    /// Evaluate all four bands at `time`. Noise is drawn once per band, in
    /// the order alpha, beta, theta, delta.
    pub fn sample(&mut self, time: i64) -> Sample {
        let mut sample = Sample {
            time,
            alpha: 0.0,
            beta: 0.0,
            theta: 0.0,
            delta: 0.0,
        };
        for spec in &BANDS {
            let value = spec.baseline(time) + self.noise.next_unit() * spec.noise_scale;
            sample.set(spec.band, value);
        }
        sample
    }
}

impl std::fmt::Debug for SignalSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalSampler").finish_non_exhaustive()
    }
}

/// Noise-free component of every band at `time`.
pub fn baseline(time: i64) -> Sample {
    Sample {
        time,
        alpha: Band::Alpha.baseline(time),
        beta: Band::Beta.baseline(time),
        theta: Band::Theta.baseline(time),
        delta: Band::Delta.baseline(time),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed sequence of noise values.
    struct ScriptedNoise(std::vec::IntoIter<f64>);

    impl NoiseSource for ScriptedNoise {
        fn next_unit(&mut self) -> f64 {
            self.0.next().unwrap_or(0.0)
        }
    }

    // -----------------------------------------------------------------------
    // Closed-form baseline
    // -----------------------------------------------------------------------

    #[test]
    fn baseline_matches_closed_form() {
        for t in [-1000i64, -37, -1, 0, 1, 2, 15, 63, 300, 99_999] {
            let b = baseline(t);
            let tf = t as f64;
            assert_eq!(b.time, t);
            assert_eq!(b.alpha, (tf * 0.1).sin() * 10.0);
            assert_eq!(b.beta, (tf * 0.1).cos() * 8.0);
            assert_eq!(b.theta, (tf * 0.05).sin() * 6.0);
            assert_eq!(b.delta, (tf * 0.05).cos() * 12.0);
        }
    }

    #[test]
    fn baseline_at_zero() {
        let b = baseline(0);
        assert_eq!(b.alpha, 0.0);
        assert_eq!(b.beta, 8.0);
        assert_eq!(b.theta, 0.0);
        assert_eq!(b.delta, 12.0);
    }

    #[test]
    fn noiseless_sampler_equals_baseline() {
        let mut sampler = SignalSampler::noiseless();
        for t in -50..50 {
            assert_eq!(sampler.sample(t), baseline(t));
        }
    }

    // -----------------------------------------------------------------------
    // Noise bounds
    // -----------------------------------------------------------------------

    #[test]
    fn noise_stays_within_band_scale() {
        let mut sampler = SignalSampler::random();
        for t in 0..2_000 {
            let s = sampler.sample(t);
            for band in Band::ALL {
                let noise = s.get(band) - band.baseline(t);
                assert!(
                    (-1e-9..band.noise_scale() + 1e-9).contains(&noise),
                    "{band} noise {noise} out of [0, {})",
                    band.noise_scale()
                );
            }
        }
    }

    #[test]
    fn noise_is_drawn_in_band_order() {
        let mut sampler = SignalSampler::new(Box::new(ScriptedNoise(
            vec![0.1, 0.2, 0.3, 0.4].into_iter(),
        )));
        let s = sampler.sample(0);
        let b = baseline(0);
        assert!((s.alpha - b.alpha - 0.5).abs() < 1e-12);
        assert!((s.beta - b.beta - 0.8).abs() < 1e-12);
        assert!((s.theta - b.theta - 0.9).abs() < 1e-12);
        assert!((s.delta - b.delta - 2.4).abs() < 1e-12);
    }

    #[test]
    fn same_seed_reproduces_samples() {
        let mut a = SignalSampler::seeded(42);
        let mut b = SignalSampler::seeded(42);
        for t in 0..100 {
            assert_eq!(a.sample(t), b.sample(t));
        }
    }

    #[test]
    fn repeated_time_shares_deterministic_component() {
        let mut sampler = SignalSampler::seeded(7);
        let first = sampler.sample(123);
        let second = sampler.sample(123);
        for band in Band::ALL {
            let d1 = first.get(band) - band.baseline(123);
            let d2 = second.get(band) - band.baseline(123);
            assert!(d1 >= -1e-9 && d1 < band.noise_scale() + 1e-9);
            assert!(d2 >= -1e-9 && d2 < band.noise_scale() + 1e-9);
        }
    }

    #[test]
    fn fixed_noise_is_clamped() {
        assert_eq!(FixedNoise(-3.0).next_unit(), 0.0);
        assert_eq!(FixedNoise(f64::NAN).next_unit(), 0.0);
        assert!(FixedNoise(1.0).next_unit() < 1.0);
        assert_eq!(FixedNoise(0.25).next_unit(), 0.25);
    }

    // -----------------------------------------------------------------------
    // Band helpers
    // -----------------------------------------------------------------------

    #[test]
    fn band_table_is_in_sampling_order() {
        for (spec, band) in BANDS.iter().zip(Band::ALL) {
            assert_eq!(spec.band, band);
            assert_eq!(band.spec().band, band);
        }
    }

    #[test]
    fn band_parse_and_display() {
        for band in Band::ALL {
            assert_eq!(band.to_string().parse::<Band>().unwrap(), band);
        }
        assert_eq!(" ALPHA ".parse::<Band>().unwrap(), Band::Alpha);
        assert!("gamma".parse::<Band>().is_err());
    }

    #[test]
    fn band_next_cycles() {
        let mut band = Band::Alpha;
        for _ in 0..4 {
            band = band.next();
        }
        assert_eq!(band, Band::Alpha);
    }

    #[test]
    fn sample_serializes_with_plain_field_names() {
        let json = serde_json::to_value(baseline(0)).unwrap();
        assert_eq!(json["time"], 0);
        assert_eq!(json["beta"], 8.0);
        assert!(json.get("delta").is_some());
    }
}
