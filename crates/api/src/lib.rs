//! Housing Price Prediction API Server
//!
//! Serves the loaded regression model behind `POST /predict`.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use inference_engine::InferenceEngine;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

mod error;
mod routes;
mod settings;

pub use error::{ApiError, ErrorResponse};
pub use routes::health::{HealthResponse, ModelStatus};
pub use routes::predict::PredictionResponse;
pub use settings::{AppConfig, ModelConfig, ServerConfig, DEFAULT_CONFIG_FILE, DEFAULT_MODEL_PATH};

/// Application state shared across handlers.
///
/// Immutable after startup, so handlers share it through an `Arc` without
/// locking.
pub struct AppState {
    /// Loaded model
    pub engine: InferenceEngine,
    /// Prometheus handle when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(engine: InferenceEngine) -> Self {
        Self {
            engine,
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Expose metrics through `GET /metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Create the application router.
///
/// Request bodies are unbounded: a batch envelope may carry any number of
/// records even though only the first is used.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/predict", post(routes::predict::predict))
        .layer(DefaultBodyLimit::disable())
        .route("/health", get(routes::health::health))
        .route("/metrics", get(routes::prometheus::render))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Install the global Prometheus recorder
pub fn install_metrics_recorder() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Metrics disabled: {}", e);
            None
        }
    }
}

/// Serve on an already bound listener
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    let app = create_router(state);
    axum::serve(listener, app).await
}

/// Run the server
pub async fn run_server(addr: &str, state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting API server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    serve(listener, state).await?;

    Ok(())
}
