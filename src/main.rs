//! Student Performance Prediction API - Main Entry Point
//!
//! Loads the scaler and model artifacts, then serves predictions over HTTP.
//! Any failure while loading aborts before the listener is bound.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use student_performance_api::{
    config::{AppConfig, LogFormat, LoggingConfig, DEFAULT_CONFIG_PATH},
    feature_extractor::FeatureExtractor,
    models::inference::InferenceEngine,
    server::{self, AppState},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = AppConfig::load_or_default(&config_path)?;

    init_logging(&config.logging);

    info!("Starting Student Performance Prediction API");
    if config_path.exists() {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        warn!(path = %config_path.display(), "Config file not found, using defaults");
    }
    info!(
        scaler = %config.artifacts.scaler_path,
        model = %config.artifacts.model_path,
        "Artifact locations"
    );
    let extractor = FeatureExtractor::new();
    info!(
        count = extractor.feature_count(),
        features = ?extractor.feature_names(),
        "Feature order"
    );

    // Fail fast: nothing is served unless both artifacts load
    let engine = Arc::new(InferenceEngine::new(&config)?);

    let addr = config.listen_addr()?;
    server::serve(addr, AppState::new(engine)).await?;

    info!("Server shut down");
    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(format!(
            "student_performance_api={level},tower_http={level}",
            level = logging.level
        )),
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
