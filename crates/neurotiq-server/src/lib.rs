//! HTTP presentation layer for the NeurotiQ stream.
//!
//! Serves the live sliding window, the analysis client, doctor invitations
//! and the static dashboard tables as JSON. The server owns one
//! [`StreamDriver`]; handlers only ever read its window.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use neurotiq_core::catalog::{
    CLASSIFICATION_RESULTS, Classification, Clinic, DAILY_QUESTIONS, Indicator, NEARBY_CLINICS,
    RECOMMENDATIONS, Recommendation, WELLBEING_INDICATORS, WELLNESS_ACTIVITIES, WellnessActivity,
    daily_question, next_question,
};
use neurotiq_core::{
    AnalysisClient, AnalysisConfig, AnalysisReport, Band, BrainWaveScores, DriverState,
    Invitation, InvitationForm, Sample, StreamConfig, StreamDriver, StreamReader,
    submit_invitation,
};

/// Shared server state.
struct AppState {
    stream: StreamReader,
    analysis: AnalysisClient,
}

#[derive(Deserialize)]
struct StreamParams {
    /// Restrict the response to one band's `(time, value)` series.
    band: Option<String>,
}

#[derive(Serialize)]
struct StreamResponse {
    state: DriverState,
    capacity: usize,
    length: usize,
    ticks: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    samples: Option<Vec<Sample>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    band: Option<Band>,
    #[serde(skip_serializing_if = "Option::is_none")]
    points: Option<Vec<(f64, f64)>>,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    state: DriverState,
    window: usize,
    ticks: u64,
}

#[derive(Serialize)]
struct InvitationResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    invitation: Option<Invitation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Deserialize)]
struct DashboardParams {
    /// Which daily question to show; wraps around.
    question: Option<usize>,
}

#[derive(Serialize)]
struct DailyQuestion {
    index: usize,
    text: &'static str,
    next: usize,
}

#[derive(Serialize)]
struct DashboardResponse {
    classifications: &'static [Classification],
    clinics: &'static [Clinic],
    activities: &'static [WellnessActivity],
    indicators: &'static [Indicator],
    recommendations: &'static [Recommendation],
    question: DailyQuestion,
}

trait JsonWithStatus<T> {
    fn with_status(self, status: StatusCode) -> (StatusCode, Json<T>);
}

impl<T> JsonWithStatus<T> for Json<T> {
    fn with_status(self, status: StatusCode) -> (StatusCode, Json<T>) {
        (status, self)
    }
}

async fn handle_stream(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StreamParams>,
) -> (StatusCode, Json<StreamResponse>) {
    let reader = &state.stream;
    let mut response = StreamResponse {
        state: reader.state(),
        capacity: reader.capacity(),
        length: reader.len(),
        ticks: reader.ticks(),
        samples: None,
        band: None,
        points: None,
        success: true,
        error: None,
    };

    match params.band.as_deref().map(str::parse::<Band>) {
        None => response.samples = Some(reader.snapshot()),
        Some(Ok(band)) => {
            response.band = Some(band);
            response.points = Some(reader.series(band));
        }
        Some(Err(e)) => {
            response.success = false;
            response.error = Some(e);
            return Json(response).with_status(StatusCode::BAD_REQUEST);
        }
    }
    (StatusCode::OK, Json(response))
}

async fn handle_latest(State(state): State<Arc<AppState>>) -> Json<Option<Sample>> {
    Json(state.stream.latest())
}

async fn handle_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let reader = &state.stream;
    let window = reader.len();
    Json(HealthResponse {
        status: if window == reader.capacity() {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        state: reader.state(),
        window,
        ticks: reader.ticks(),
    })
}

async fn handle_analyze(
    State(state): State<Arc<AppState>>,
    Json(scores): Json<BrainWaveScores>,
) -> Json<AnalysisReport> {
    // The analysis client blocks on network I/O.
    let report = tokio::task::spawn_blocking(move || state.analysis.analyze(&scores))
        .await
        .unwrap_or_else(|e| {
            log::error!("analysis task failed: {e}");
            AnalysisReport::fallback()
        });
    Json(report)
}

async fn handle_invitation(
    Json(form): Json<InvitationForm>,
) -> (StatusCode, Json<InvitationResponse>) {
    match submit_invitation(&form) {
        Ok(invitation) => (
            StatusCode::OK,
            Json(InvitationResponse {
                success: true,
                invitation: Some(invitation),
                error: None,
            }),
        ),
        Err(e) => Json(InvitationResponse {
            success: false,
            invitation: None,
            error: Some(e.to_string()),
        })
        .with_status(StatusCode::BAD_REQUEST),
    }
}

async fn handle_dashboard(Query(params): Query<DashboardParams>) -> Json<DashboardResponse> {
    let index = params.question.unwrap_or(0) % DAILY_QUESTIONS.len();
    Json(DashboardResponse {
        classifications: &CLASSIFICATION_RESULTS,
        clinics: &NEARBY_CLINICS,
        activities: &WELLNESS_ACTIVITIES,
        indicators: &WELLBEING_INDICATORS,
        recommendations: &RECOMMENDATIONS,
        question: DailyQuestion {
            index,
            text: daily_question(index),
            next: next_question(index),
        },
    })
}

async fn handle_index(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let bands: Vec<String> = Band::ALL.iter().map(|b| b.to_string()).collect();

    Json(serde_json::json!({
        "name": "NeurotiQ Server",
        "version": neurotiq_core::VERSION,
        "window": state.stream.capacity(),
        "analysis_backend": state.analysis.backend_name(),
        "endpoints": {
            "/": "This API index",
            "/health": "Health check",
            "/api/v1/stream": {
                "method": "GET",
                "description": "Current sliding window, oldest sample first",
                "params": {
                    "band": format!("Return one band's (time, value) series. Available: {}", bands.join(", ")),
                }
            },
            "/api/v1/stream/latest": "Newest sample in the window",
            "/api/v1/analyze": {
                "method": "POST",
                "description": "Analyze condition scores (falls back to a fixed report when the analysis backend is unavailable)",
                "body": "{ depression, anxiety, schizophrenia, adhd }",
            },
            "/api/v1/invitations": {
                "method": "POST",
                "description": "Invite a doctor to view your data",
                "body": "{ doctorName, doctorEmail, specialization?, hospitalName?, additionalNotes? }",
            },
            "/api/v1/dashboard": {
                "method": "GET",
                "description": "Classification scores, nearby clinics, wellness activities, indicators and recommendations",
                "params": {
                    "question": "Index of the daily question to show (wraps)",
                }
            },
        },
        "examples": {
            "window": "/api/v1/stream",
            "single_band": "/api/v1/stream?band=alpha",
        }
    }))
}

/// Build the axum router over a running (or idle) stream.
pub fn build_router(stream: StreamReader, analysis: AnalysisClient) -> Router {
    let state = Arc::new(AppState { stream, analysis });

    Router::new()
        .route("/", get(handle_index))
        .route("/health", get(handle_health))
        .route("/api/v1/stream", get(handle_stream))
        .route("/api/v1/stream/latest", get(handle_latest))
        .route("/api/v1/analyze", post(handle_analyze))
        .route("/api/v1/invitations", post(handle_invitation))
        .route("/api/v1/dashboard", get(handle_dashboard))
        .with_state(state)
}

/// Run the HTTP server until it fails. The stream driver lives for as long
/// as the server does.
pub async fn run_server(
    config: StreamConfig,
    analysis: AnalysisConfig,
    host: &str,
    port: u16,
) -> std::io::Result<()> {
    let mut driver = StreamDriver::new(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    driver.start().map_err(std::io::Error::other)?;

    let app = build_router(driver.reader(), AnalysisClient::http(&analysis));
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("serving on http://{}", listener.local_addr()?);

    let result = axum::serve(listener, app).await;
    driver.stop();
    result
}
