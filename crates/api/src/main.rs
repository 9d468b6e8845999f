//! Housing Price Predictor - Main Entry Point

use api::{init_logging, install_metrics_recorder, run_server, AppConfig, AppState};
use inference_engine::InferenceEngine;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    info!("=== Housing Price Predictor v{} ===", env!("CARGO_PKG_VERSION"));

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // No model, no server: a missing artifact is a deployment error
    let engine = match InferenceEngine::load(&config.model.path) {
        Ok(engine) => engine,
        Err(e) => {
            error!("{}. Ensure the model artifact was generated before starting the server.", e);
            return ExitCode::FAILURE;
        }
    };

    let mut state = AppState::new(engine);
    if let Some(handle) = install_metrics_recorder() {
        state = state.with_metrics(handle);
    }

    if let Err(e) = run_server(&config.server.addr(), Arc::new(state)).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
