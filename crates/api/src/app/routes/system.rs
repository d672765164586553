use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use segcast_forecast::ForecastEngine;

use crate::app::dto;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn version() -> Json<dto::VersionResponse> {
    Json(dto::VersionResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Configured hierarchy, in display order, with model availability.
pub async fn segments(Extension(engine): Extension<Arc<ForecastEngine>>) -> impl IntoResponse {
    let registry = engine.registry();
    let hierarchy = engine.hierarchy();

    let segments = hierarchy
        .entries()
        .iter()
        .map(|entry| dto::SegmentResponse {
            id: entry.id.clone(),
            kind: entry.kind,
            label: entry.label(),
            model_loaded: registry.contains(&entry.id),
        })
        .collect();

    let unreferenced_models = registry
        .segment_ids()
        .into_iter()
        .filter(|id| !hierarchy.contains(id))
        .collect();

    Json(dto::SegmentsResponse {
        segments,
        unreferenced_models,
    })
}
