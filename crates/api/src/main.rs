use std::sync::Arc;

use anyhow::Context;

use segcast_api::{app, config::ServiceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    segcast_observability::init();

    let config = ServiceConfig::from_env().context("invalid service configuration")?;

    let engine = match app::build_engine(&config) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!(error = %e, models_dir = %config.models_dir.display(), "forecast engine cannot start");
            return Err(e).context("failed to initialize forecast engine");
        }
    };

    let app = app::build_app(Arc::new(engine));

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
