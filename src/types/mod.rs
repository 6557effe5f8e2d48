//! Type definitions for the prediction API

pub mod request;
pub mod response;

pub use request::PredictionRequest;
pub use response::{ErrorBody, PredictionResponse, WelcomeMessage, WELCOME_MESSAGE};
