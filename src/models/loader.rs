//! Artifact loader for the fitted scaler and regressor

use crate::models::regressor::{LinearRegression, OnnxRegressor, Regressor};
use crate::models::scaler::FittedScaler;
use anyhow::{bail, Context, Result};
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::fs;
use std::path::Path;
use tracing::info;

/// Loader for scaler and model artifacts
pub struct ArtifactLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ArtifactLoader {
    /// Create a new artifact loader with specified number of ONNX threads
    pub fn with_threads(onnx_threads: usize) -> Self {
        Self {
            onnx_threads: onnx_threads.max(1),
        }
    }

    /// Load a fitted scaler from a JSON artifact
    pub fn load_scaler<P: AsRef<Path>>(&self, path: P) -> Result<FittedScaler> {
        let path = path.as_ref();

        info!(path = %path.display(), "Loading scaler artifact");

        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scaler from {}", path.display()))?;
        let scaler = FittedScaler::from_json(&json)
            .with_context(|| format!("Invalid scaler artifact {}", path.display()))?;

        info!(
            kind = scaler.name(),
            features = scaler.n_features(),
            "Scaler loaded successfully"
        );

        Ok(scaler)
    }

    /// Load a fitted regressor, choosing the format from the file extension
    ///
    /// `.json` holds a native linear model, `.onnx` an exported ONNX graph.
    pub fn load_regressor<P: AsRef<Path>>(&self, path: P) -> Result<Regressor> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => self.load_linear(path).map(Regressor::Linear),
            Some("onnx") => self.load_onnx(path).map(Regressor::Onnx),
            _ => bail!(
                "Unsupported model artifact {}: expected a .json or .onnx file",
                path.display()
            ),
        }
    }

    fn load_linear(&self, path: &Path) -> Result<LinearRegression> {
        info!(path = %path.display(), "Loading linear model artifact");

        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read model from {}", path.display()))?;
        let model = LinearRegression::from_json(&json)
            .with_context(|| format!("Invalid model artifact {}", path.display()))?;

        info!(features = model.coef.len(), "Linear model loaded successfully");

        Ok(model)
    }

    fn load_onnx(&self, path: &Path) -> Result<OnnxRegressor> {
        info!(path = %path.display(), threads = self.onnx_threads, "Loading ONNX model");

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(self.onnx_threads)?
            .commit_from_file(path)
            .with_context(|| format!("Failed to load model from {}", path.display()))?;

        let model = OnnxRegressor::new(session)
            .with_context(|| format!("Invalid ONNX model {}", path.display()))?;

        info!(
            input = %model.input_name(),
            output = %model.output_name(),
            "ONNX model loaded successfully"
        );

        Ok(model)
    }
}
