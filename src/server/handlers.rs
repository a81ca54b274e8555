//! `/health` and `/predict`.

use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::features::FeatureVector;
use crate::packets::RawPacket;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    model_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_sha256: Option<String>,
    version: &'static str,
    timestamp: i64,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let model = state.engine.model_info();
    Json(HealthResponse {
        status: "healthy",
        model_loaded: model.loaded,
        model_sha256: model.sha256,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: u8,
    pub is_attack: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<PredictDetails>,
}

#[derive(Debug, Serialize)]
pub struct PredictDetails {
    pub probability: f64,
    pub threshold: f64,
    pub features: FeatureVector,
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Vec<RawPacket>>, JsonRejection>,
) -> ApiResult<Json<PredictResponse>> {
    let Json(records) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let flow_id = Uuid::new_v4();
    let span = tracing::info_span!("predict", %flow_id, packets = records.len());
    let engine = state.engine.clone();
    let worker_span = span.clone();
    let analysis = tokio::task::spawn_blocking(move || {
        let _guard = worker_span.enter();
        engine.analyze(&records)
    })
    .instrument(span)
    .await
    .map_err(|e| ApiError::Internal(format!("scoring task: {e}")))?;

    let analysis = match analysis {
        Ok(a) => a,
        Err(e) => {
            tracing::warn!(%flow_id, error = %e, "flow rejected");
            return Err(e.into());
        }
    };

    let verdict = analysis.verdict;
    tracing::info!(
        %flow_id,
        probability = verdict.probability,
        prediction = verdict.decision.prediction,
        "flow scored"
    );

    let details = state.debug_details.then(|| PredictDetails {
        probability: verdict.probability,
        threshold: verdict.threshold,
        features: analysis.features.vector,
    });

    Ok(Json(PredictResponse {
        prediction: verdict.decision.prediction,
        is_attack: verdict.decision.is_attack,
        details,
    }))
}
