use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::AppError;

use super::engine::{
    RecordState, ScoreFusionEngine, StrengthCallback, StrengthReport, StrengthRequest,
};

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StrengthPayload {
    pub(crate) password: String,
    #[serde(default)]
    pub(crate) password_hash: Option<String>,
    #[serde(default)]
    pub(crate) username: String,
    #[serde(default)]
    pub(crate) core_info: Vec<String>,
    #[serde(default)]
    pub(crate) all_info: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct NeuralScorePayload {
    pub(crate) password: String,
    pub(crate) score: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct NeuralLookupPayload {
    pub(crate) password: String,
}

/// JSON view of a report with the embedded problem and feedback documents expanded.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct StrengthView {
    pub(crate) password_hash: String,
    pub(crate) score: f64,
    pub(crate) compliant: bool,
    pub(crate) state: RecordState,
    pub(crate) problems: Value,
    pub(crate) feedback: Value,
}

impl StrengthView {
    fn new(report: StrengthReport, state: RecordState) -> Self {
        Self {
            problems: serde_json::from_str(&report.problems).unwrap_or(Value::Null),
            feedback: serde_json::from_str(&report.feedback).unwrap_or(Value::Null),
            password_hash: report.password_hash,
            score: report.score,
            compliant: report.compliant,
            state,
        }
    }
}

/// Hex-encoded SHA-256 of the password, used when the caller supplies no hash.
pub fn default_password_hash(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

/// Router builder exposing the strength and guess-number endpoints.
pub fn strength_router(engine: Arc<ScoreFusionEngine>) -> Router {
    Router::new()
        .route("/api/v1/strength", post(strength_handler))
        .route("/api/v1/strength/:password_hash", get(latest_handler))
        .route("/api/v1/neural-score", post(neural_score_handler))
        .route("/api/v1/neural-score/lookup", post(neural_lookup_handler))
        .with_state(engine)
}

pub(crate) async fn strength_handler(
    State(engine): State<Arc<ScoreFusionEngine>>,
    axum::Json(payload): axum::Json<StrengthPayload>,
) -> Result<Response, AppError> {
    let max_length = engine.max_length();
    if payload.password.chars().count() > max_length {
        return Err(AppError::InvalidInput(format!(
            "password exceeds {max_length} characters"
        )));
    }

    let password_hash = payload
        .password_hash
        .filter(|hash| !hash.trim().is_empty())
        .unwrap_or_else(|| default_password_hash(&payload.password));

    let callback: StrengthCallback = Arc::new(|report: StrengthReport| {
        debug!(
            password_hash = %report.password_hash,
            score = report.score,
            "strength report delivered"
        );
    });
    engine.get_strength_and_feedback(
        callback,
        StrengthRequest {
            password: payload.password,
            password_hash: password_hash.clone(),
            username: payload.username,
            core_info: payload.core_info,
            all_info: payload.all_info,
        },
    );

    let response = match engine.latest(&password_hash) {
        Some(report) => {
            let view = StrengthView::new(report, engine.record_state(&password_hash));
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        None => {
            let payload = json!({
                "error": "score record was evicted before it could be read",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    };
    Ok(response)
}

pub(crate) async fn latest_handler(
    State(engine): State<Arc<ScoreFusionEngine>>,
    Path(password_hash): Path<String>,
) -> Response {
    match engine.latest(&password_hash) {
        Some(report) => {
            let view = StrengthView::new(report, engine.record_state(&password_hash));
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        None => {
            let payload = json!({
                "password_hash": password_hash,
                "state": RecordState::NoScore,
                "error": "no score recorded for this hash",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn neural_score_handler(
    State(engine): State<Arc<ScoreFusionEngine>>,
    axum::Json(payload): axum::Json<NeuralScorePayload>,
) -> Response {
    engine.report_neural_score(&payload.password, payload.score);
    let neural = engine.query_neural_score(&payload.password);
    (
        StatusCode::ACCEPTED,
        axum::Json(json!({ "status": "accepted", "neural": neural })),
    )
        .into_response()
}

pub(crate) async fn neural_lookup_handler(
    State(engine): State<Arc<ScoreFusionEngine>>,
    axum::Json(payload): axum::Json<NeuralLookupPayload>,
) -> Response {
    let neural = engine.query_neural_score(&payload.password);
    (StatusCode::OK, axum::Json(neural)).into_response()
}
