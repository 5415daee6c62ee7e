use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::{ValuationEngine, ValuationRequest};
use crate::import::BatchImporter;

/// CSV payload for the batch endpoint.
#[derive(Debug, Deserialize)]
pub struct BatchValuationRequest {
    pub csv: String,
}

/// Router builder exposing the valuation endpoints.
pub fn valuation_router(engine: Arc<ValuationEngine>) -> Router {
    Router::new()
        .route("/api/v1/valuations", post(valuate_handler))
        .route("/api/v1/valuations/batch", post(batch_handler))
        .with_state(engine)
}

pub(crate) async fn valuate_handler(
    State(engine): State<Arc<ValuationEngine>>,
    Json(request): Json<ValuationRequest>,
) -> Response {
    match engine.valuate(&request) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn batch_handler(
    State(engine): State<Arc<ValuationEngine>>,
    Json(request): Json<BatchValuationRequest>,
) -> Response {
    let reader = Cursor::new(request.csv.into_bytes());
    match BatchImporter::valuate_reader(&engine, reader) {
        Ok(batch) => (StatusCode::OK, Json(batch)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}
