//! HTTP surface: routes, shared state and CORS policy

use crate::error::ApiError;
use crate::extract::JsonPayload;
use crate::feature_extractor::FeatureExtractor;
use crate::models::inference::InferenceEngine;
use crate::types::request::PredictionRequest;
use crate::types::response::{PredictionResponse, WelcomeMessage};
use anyhow::{Context, Result};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// State shared by every request handler
#[derive(Clone)]
pub struct AppState {
    engine: Arc<InferenceEngine>,
    extractor: FeatureExtractor,
}

impl AppState {
    pub fn new(engine: Arc<InferenceEngine>) -> Self {
        Self {
            engine,
            extractor: FeatureExtractor::new(),
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(read_root))
        .route("/predict", post(predict))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// Any origin, method and header, with credentials.
///
/// Credentialed CORS cannot answer with `*`, so the request's own origin,
/// method and headers are echoed back instead.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Bind `addr` and serve until Ctrl-C
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(addr = %addr, "Listening for prediction requests");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn read_root() -> Json<WelcomeMessage> {
    Json(WelcomeMessage::default())
}

async fn predict(
    State(state): State<AppState>,
    JsonPayload(request): JsonPayload<PredictionRequest>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let features = state.extractor.extract(&request);
    let prediction = state
        .engine
        .predict(&features)
        .map_err(ApiError::Inference)?;

    debug!(request = ?request, prediction = prediction, "Prediction served");

    Ok(Json(PredictionResponse { prediction }))
}
