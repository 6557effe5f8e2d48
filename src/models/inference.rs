//! Inference engine: fitted scaler followed by fitted regressor

use crate::config::AppConfig;
use crate::feature_extractor::FEATURE_COUNT;
use crate::models::loader::ArtifactLoader;
use crate::models::regressor::Regressor;
use crate::models::scaler::FittedScaler;
use anyhow::{bail, ensure, Result};
use tracing::{debug, info};

/// Frozen preprocessing and model, shared read-only by every request
#[derive(Debug)]
pub struct InferenceEngine {
    scaler: FittedScaler,
    regressor: Regressor,
}

impl InferenceEngine {
    /// Load both artifacts named in the configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let loader = ArtifactLoader::with_threads(config.artifacts.onnx_threads);
        let scaler = loader.load_scaler(&config.artifacts.scaler_path)?;
        let regressor = loader.load_regressor(&config.artifacts.model_path)?;

        let engine = Self::from_parts(scaler, regressor)?;

        info!(
            scaler = engine.scaler_name(),
            model = engine.model_name(),
            features = engine.feature_count(),
            "Inference engine initialized"
        );

        Ok(engine)
    }

    /// Assemble an engine from already loaded artifacts
    ///
    /// Fails unless both artifacts agree with the five-feature contract.
    pub fn from_parts(scaler: FittedScaler, regressor: Regressor) -> Result<Self> {
        ensure!(
            scaler.n_features() == FEATURE_COUNT,
            "scaler was fitted on {} features, expected {}",
            scaler.n_features(),
            FEATURE_COUNT
        );
        if let Some(n) = regressor.n_features() {
            ensure!(
                n == FEATURE_COUNT,
                "model was fitted on {} features, expected {}",
                n,
                FEATURE_COUNT
            );
        }

        Ok(Self { scaler, regressor })
    }

    /// Number of features a row must carry
    pub fn feature_count(&self) -> usize {
        self.scaler.n_features()
    }

    /// Kind of the loaded scaler
    pub fn scaler_name(&self) -> &'static str {
        self.scaler.name()
    }

    /// Kind of the loaded model
    pub fn model_name(&self) -> &'static str {
        self.regressor.name()
    }

    /// Scale one feature row and predict its score
    pub fn predict(&self, features: &[f64]) -> Result<f64> {
        let scaled = self.scaler.transform(features)?;
        let prediction = self.regressor.predict(&scaled)?;

        if !prediction.is_finite() {
            bail!("model produced a non-finite prediction: {}", prediction);
        }

        debug!(
            features = ?features,
            scaled = ?scaled,
            prediction = prediction,
            "Inference complete"
        );

        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::regressor::LinearRegression;
    use crate::models::scaler::{MinMaxScaler, StandardScaler};

    fn engine() -> InferenceEngine {
        InferenceEngine::from_parts(
            FittedScaler::StandardScaler(StandardScaler {
                mean: vec![5.0, 70.0, 0.5, 6.5, 4.5],
                scale: vec![2.5, 17.0, 0.5, 1.5, 3.0],
            }),
            Regressor::Linear(LinearRegression {
                coef: vec![7.0, 17.0, 0.5, 1.0, 0.5],
                intercept: 55.0,
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_predict_scales_then_regresses() {
        // Scaled row: [0, 1, 1, 1, 0.5]
        let prediction = engine().predict(&[5.0, 87.0, 1.0, 8.0, 6.0]).unwrap();
        assert_eq!(prediction, 55.0 + 17.0 + 0.5 + 1.0 + 0.25);
    }

    #[test]
    fn test_predict_is_deterministic() {
        let engine = engine();
        let row = [5.0, 70.0, 1.0, 7.0, 3.0];
        let first = engine.predict(&row).unwrap();

        for _ in 0..50 {
            assert_eq!(engine.predict(&row).unwrap().to_bits(), first.to_bits());
        }
    }

    #[test]
    fn test_bundled_artifacts_load() {
        let engine = InferenceEngine::new(&AppConfig::default()).unwrap();
        assert_eq!(engine.scaler_name(), "standard_scaler");
        assert_eq!(engine.model_name(), "linear_regression");

        let prediction = engine.predict(&[5.0, 70.0, 1.0, 7.0, 3.0]).unwrap();
        assert!(prediction > 40.0 && prediction < 70.0, "got {}", prediction);
    }

    #[test]
    fn test_onnx_model_is_accepted_without_declared_width() {
        let config = AppConfig {
            artifacts: crate::config::ArtifactsConfig {
                model_path: concat!(
                    env!("CARGO_MANIFEST_DIR"),
                    "/tests/fixtures/linear_regression.onnx"
                )
                .to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let engine = InferenceEngine::new(&config).unwrap();
        assert_eq!(engine.model_name(), "onnx");
        assert_eq!(engine.feature_count(), 5);

        let first = engine.predict(&[5.0, 70.0, 1.0, 7.0, 3.0]).unwrap();
        assert!(first.is_finite());
        for _ in 0..10 {
            let again = engine.predict(&[5.0, 70.0, 1.0, 7.0, 3.0]).unwrap();
            assert_eq!(again.to_bits(), first.to_bits());
        }
    }

    #[test]
    fn test_predict_rejects_wrong_width() {
        assert!(engine().predict(&[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_non_finite_prediction_is_an_error() {
        let engine = InferenceEngine::from_parts(
            FittedScaler::MinMaxScaler(MinMaxScaler {
                min: vec![0.0; 5],
                scale: vec![1.0; 5],
            }),
            Regressor::Linear(LinearRegression {
                coef: vec![f64::MAX; 5],
                intercept: 0.0,
            }),
        )
        .unwrap();

        let err = engine.predict(&[10.0; 5]).unwrap_err();
        assert!(err.to_string().contains("non-finite"));
    }

    #[test]
    fn test_from_parts_rejects_mismatched_scaler() {
        let err = InferenceEngine::from_parts(
            FittedScaler::StandardScaler(StandardScaler {
                mean: vec![0.0; 4],
                scale: vec![1.0; 4],
            }),
            Regressor::Linear(LinearRegression {
                coef: vec![1.0; 5],
                intercept: 0.0,
            }),
        )
        .unwrap_err();
        assert!(err.to_string().contains("scaler was fitted on 4 features"));
    }

    #[test]
    fn test_from_parts_rejects_mismatched_model() {
        let err = InferenceEngine::from_parts(
            FittedScaler::StandardScaler(StandardScaler {
                mean: vec![0.0; 5],
                scale: vec![1.0; 5],
            }),
            Regressor::Linear(LinearRegression {
                coef: vec![1.0; 6],
                intercept: 0.0,
            }),
        )
        .unwrap_err();
        assert!(err.to_string().contains("model was fitted on 6 features"));
    }
}
