use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::cache::AnalysisCache;
use super::orchestrator::IntelligenceService;
use super::payload::AnalyzeRequest;

/// Router builder exposing the analysis endpoints.
pub fn intelligence_router<C>(service: Arc<IntelligenceService<C>>) -> Router
where
    C: AnalysisCache + 'static,
{
    Router::new()
        .route("/api/v1/intelligence/analyze", post(analyze_handler::<C>))
        .route(
            "/api/v1/intelligence/:request_id",
            get(cached_handler::<C>),
        )
        .with_state(service)
}

pub(crate) async fn analyze_handler<C>(
    State(service): State<Arc<IntelligenceService<C>>>,
    Json(request): Json<AnalyzeRequest>,
) -> Response
where
    C: AnalysisCache + 'static,
{
    let snapshot = request.into_snapshot();
    let analysis = service.get_or_analyze(&snapshot);
    (StatusCode::OK, Json(analysis)).into_response()
}

pub(crate) async fn cached_handler<C>(
    State(service): State<Arc<IntelligenceService<C>>>,
    Path(request_id): Path<String>,
) -> Response
where
    C: AnalysisCache + 'static,
{
    match service.cached(&request_id) {
        Some(analysis) => (StatusCode::OK, Json(analysis)).into_response(),
        None => {
            let payload = json!({
                "request_id": request_id,
                "error": "no cached analysis for this request",
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}
