//! Response payloads returned by the HTTP API

use serde::Serialize;

/// Fixed greeting served on the root path
pub const WELCOME_MESSAGE: &str = "Welcome to the Student Performance Prediction API";

/// Body of a successful prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResponse {
    /// Predicted performance score
    pub prediction: f64,
}

/// Body of the root endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WelcomeMessage {
    pub message: String,
}

impl Default for WelcomeMessage {
    fn default() -> Self {
        Self {
            message: WELCOME_MESSAGE.to_string(),
        }
    }
}

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}
