//! Student Performance Prediction API Library
//!
//! Serves a pre-trained regression model over HTTP: five integer student
//! features are scaled with a fitted scaler and scored by a fitted model,
//! both loaded once at startup.

pub mod config;
pub mod error;
pub mod extract;
pub mod feature_extractor;
pub mod models;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use error::ApiError;
pub use feature_extractor::FeatureExtractor;
pub use models::inference::InferenceEngine;
pub use server::{router, AppState};
pub use types::{PredictionRequest, PredictionResponse};
