//! HTTP server for examscored

use crate::config::{ArtifactsConfig, Config};
use crate::middleware::body_size_limit;
use crate::pages::landing_page;
use crate::routes;
use anyhow::{Context, Result};
use axum::{
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Response},
    Router,
};
use examscore_common::{ModelArtifact, Predictor, ScalerArtifact};
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Application state shared across handlers
pub struct AppState {
    pub predictor: Predictor,
}

impl AppState {
    pub fn new(predictor: Predictor) -> Self {
        Self { predictor }
    }

    /// Load both artifacts; either one failing aborts startup
    pub fn from_artifacts(artifacts: &ArtifactsConfig) -> Result<Self> {
        let scaler = ScalerArtifact::load(&artifacts.scaler_path).context("Failed to load scaler")?;
        let model = ModelArtifact::load(&artifacts.model_path).context("Failed to load model")?;
        Ok(Self::new(Predictor::from_artifacts(scaler, model)))
    }
}

/// Build the full router with middleware
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    let app_routes = Router::new()
        .merge(routes::page_routes())
        .merge(routes::predict_routes());
    serve_routes(app_routes, state, max_body_bytes)
}

/// Attach state, the 404 fallback and the middleware stack to a route set
pub fn serve_routes(
    app_routes: Router<Arc<AppState>>,
    state: AppState,
    max_body_bytes: usize,
) -> Router {
    app_routes
        .fallback(routes::not_found)
        .with_state(Arc::new(state))
        // Header check rejects early; the layer also caps bodies sent without a length.
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(middleware::from_fn_with_state(max_body_bytes, body_size_limit))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}

/// Render a panicking handler as the 500 page
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    error!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(landing_page(Some("An internal server error occurred."))),
    )
        .into_response()
}

/// Run the HTTP server
pub async fn run(config: Config) -> Result<()> {
    let addr: SocketAddr = config.bind_addr()?;
    let state = AppState::from_artifacts(&config.artifacts)?;
    let app = router(state, config.server.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("  Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Shutting down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
