//! Client for the remote brain-wave analysis endpoint.
//!
//! `POST {api_url}/analyze` with a [`BrainWaveScores`] JSON body returns an
//! [`AnalysisReport`]. The client degrades to a fixed report whenever the
//! backend fails: transport errors, non-2xx statuses and undecodable bodies
//! are logged and replaced by [`AnalysisReport::fallback`], so callers never
//! see an error.

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;

/// Report returned when the analysis backend is unreachable or misbehaves.
pub const FALLBACK_REPORT: &str = "Based on the analysis, there are signs of mild anxiety with some attention-related challenges. The data suggests implementing regular mindfulness practices and organizational strategies would be beneficial.";

/// Recommendations paired with [`FALLBACK_REPORT`].
pub const FALLBACK_RECOMMENDATIONS: [&str; 5] = [
    "Practice deep breathing exercises for 5 minutes daily",
    "Maintain a consistent sleep schedule",
    "Break tasks into smaller, manageable chunks",
    "Take regular breaks during focused work",
    "Consider speaking with a mental health professional",
];

/// Condition scores submitted for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BrainWaveScores {
    pub depression: f64,
    pub anxiety: f64,
    pub schizophrenia: f64,
    pub adhd: f64,
}

/// Narrative report plus actionable recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub report: String,
    pub recommendations: Vec<String>,
}

impl AnalysisReport {
    /// The canned report served when analysis fails.
    pub fn fallback() -> Self {
        Self {
            report: FALLBACK_REPORT.to_string(),
            recommendations: FALLBACK_RECOMMENDATIONS
                .iter()
                .map(|r| r.to_string())
                .collect(),
        }
    }
}

/// Why a backend call failed. Only ever logged by [`AnalysisClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Connection, DNS, TLS or timeout failure.
    Transport(String),
    /// Server answered with a non-success status.
    Status(u16),
    /// Body was not a valid report.
    InvalidResponse(String),
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
            Self::Status(code) => write!(f, "analysis server returned status {code}"),
            Self::InvalidResponse(msg) => write!(f, "invalid analysis response: {msg}"),
        }
    }
}

impl std::error::Error for AnalysisError {}

/// Something that can turn scores into a report.
pub trait AnalysisBackend: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    fn analyze(&self, scores: &BrainWaveScores) -> Result<AnalysisReport, AnalysisError>;
}

// ---------------------------------------------------------------------------
// HTTP backend
// ---------------------------------------------------------------------------

/// Blocking JSON-over-HTTP backend.
pub struct HttpAnalysisBackend {
    url: String,
    agent: ureq::Agent,
}

impl HttpAnalysisBackend {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            url: config.analyze_url(),
            agent: ureq::AgentBuilder::new().timeout(config.timeout).build(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for HttpAnalysisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAnalysisBackend")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl AnalysisBackend for HttpAnalysisBackend {
    fn name(&self) -> &'static str {
        "http"
    }

    fn analyze(&self, scores: &BrainWaveScores) -> Result<AnalysisReport, AnalysisError> {
        let response = self
            .agent
            .post(&self.url)
            .send_json(scores)
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => AnalysisError::Status(code),
                ureq::Error::Transport(t) => AnalysisError::Transport(t.to_string()),
            })?;

        response
            .into_json::<AnalysisReport>()
            .map_err(|e| AnalysisError::InvalidResponse(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// AnalysisClient
// ---------------------------------------------------------------------------

/// Analysis entry point with degrade-to-fallback semantics.
pub struct AnalysisClient {
    backend: Box<dyn AnalysisBackend>,
}

impl AnalysisClient {
    pub fn new(backend: Box<dyn AnalysisBackend>) -> Self {
        Self { backend }
    }

    /// HTTP client for the given endpoint configuration.
    pub fn http(config: &AnalysisConfig) -> Self {
        Self::new(Box::new(HttpAnalysisBackend::new(config)))
    }

    /// HTTP client configured from `NEUROTIQ_API_URL`.
    pub fn from_env() -> Self {
        Self::http(&AnalysisConfig::from_env())
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Analyze `scores`. Never fails: any backend error is logged and the
    /// fixed fallback report is returned in its place.
    pub fn analyze(&self, scores: &BrainWaveScores) -> AnalysisReport {
        match self.backend.analyze(scores) {
            Ok(report) => report,
            Err(e) => {
                log::error!("Error analyzing data ({}): {e}", self.backend.name());
                AnalysisReport::fallback()
            }
        }
    }
}

impl std::fmt::Debug for AnalysisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisClient")
            .field("backend", &self.backend.name())
            .finish()
    }
}
