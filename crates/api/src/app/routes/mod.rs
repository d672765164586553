use axum::{Router, routing::get};

pub mod forecasts;
pub mod system;

/// Router for all engine-backed endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/segments", get(system::segments))
        .nest("/forecasts", forecasts::router())
}
