//! Fitted artifacts and the inference engine built on them

pub mod inference;
pub mod loader;
pub mod regressor;
pub mod scaler;

pub use inference::InferenceEngine;
pub use loader::ArtifactLoader;
pub use regressor::Regressor;
pub use scaler::FittedScaler;
