use axum::http::HeaderValue;
use axum::ServiceExt;
use clap::Parser;
use std::sync::Arc;
use tower::Layer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::TraceLayer;

mod blog;
mod config;
mod error;
mod routes;
mod state;
mod telemetry;
#[cfg(test)]
mod testing;
mod views;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("failed to install tracing subscriber: {0}")]
    Telemetry(#[from] tracing_subscriber::util::TryInitError),
    #[error("failed to open post store: {0}")]
    Store(#[from] state::StoreError),
    #[error("invalid CORS origin {0:?}")]
    CorsOrigin(String),
    #[error("server i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = config::Config::parse();
    telemetry::init(config.log_format)?;

    let posts = state::files::FileStore::open(&config.store_path).await?;
    tracing::info!(store_path = ?config.store_path, "opened post store");
    let state = Arc::new(state::State::new(Arc::new(posts)));

    let mut router = routes::app(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    if let Some(origin) = &config.cors_origin {
        let origin = HeaderValue::from_str(origin)
            .map_err(|_| StartupError::CorsOrigin(origin.clone()))?;
        router = router.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::exact(origin))
                .allow_headers(tower_http::cors::Any),
        );
    }

    let app = NormalizePathLayer::trim_trailing_slash().layer(router);

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    tracing::info!(addr = %config.listen, "listening");

    axum::serve(
        listener,
        ServiceExt::<axum::extract::Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
