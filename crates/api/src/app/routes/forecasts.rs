use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};

use segcast_forecast::{AggregateOutcome, ForecastEngine};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_forecast))
        .route("/export", post(export_forecast))
}

/// Run every segment for the submitted period and return the report.
pub async fn create_forecast(
    Extension(engine): Extension<Arc<ForecastEngine>>,
    payload: Result<Json<dto::ForecastRequestBody>, JsonRejection>,
) -> Response {
    match run_forecast(engine, payload).await {
        Ok(outcome) => (StatusCode::OK, Json(dto::ForecastResponse::from(outcome))).into_response(),
        Err(resp) => resp,
    }
}

/// Same as `create_forecast`, but respond with the exported CSV as a download.
pub async fn export_forecast(
    Extension(engine): Extension<Arc<ForecastEngine>>,
    payload: Result<Json<dto::ForecastRequestBody>, JsonRejection>,
) -> Response {
    let outcome = match run_forecast(engine.clone(), payload).await {
        Ok(o) => o,
        Err(resp) => return resp,
    };

    let artifact = match engine.export(&outcome.report) {
        Ok(a) => a,
        Err(e) => return errors::forecast_error_to_response(e),
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", artifact.file_name),
            ),
        ],
        artifact.bytes,
    )
        .into_response()
}

/// Decode and validate the body, then run the engine off the async workers.
async fn run_forecast(
    engine: Arc<ForecastEngine>,
    payload: Result<Json<dto::ForecastRequestBody>, JsonRejection>,
) -> Result<AggregateOutcome, Response> {
    let Json(body) = payload.map_err(|rejection| {
        errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            rejection.body_text(),
        )
    })?;
    let request = body
        .into_request()
        .map_err(errors::domain_error_to_response)?;

    tokio::task::spawn_blocking(move || engine.forecast(&request))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "forecast task did not complete");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "forecast task did not complete",
            )
        })?
        .map_err(errors::domain_error_to_response)
}
