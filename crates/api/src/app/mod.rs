//! HTTP API application wiring (Axum router + engine construction).
//!
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs and mapping to/from engine types
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use segcast_core::DomainResult;
use segcast_forecast::{DirectoryModelSource, ForecastEngine, HierarchySpec};

use crate::config::ServiceConfig;

pub mod dto;
pub mod errors;
pub mod routes;

/// Load the hierarchy and models named by `config`.
///
/// Fails (configuration error) when the hierarchy file is unusable or no
/// model could be loaded from the models directory.
pub fn build_engine(config: &ServiceConfig) -> DomainResult<ForecastEngine> {
    let hierarchy = match &config.hierarchy_file {
        Some(path) => HierarchySpec::from_file(path)?,
        None => HierarchySpec::builtin(),
    };

    let source = DirectoryModelSource::new(&config.models_dir);
    let (engine, warnings) = ForecastEngine::load(&source, hierarchy)?;
    if !warnings.is_empty() {
        tracing::warn!(skipped = warnings.len(), "some model artifacts were not loaded");
    }

    Ok(engine.with_mode(config.execution_mode))
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(engine: Arc<ForecastEngine>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .route("/version", get(routes::system::version))
        .merge(routes::router())
        .layer(Extension(engine))
}
