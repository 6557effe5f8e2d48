//! Fitted regressors: native linear models and ONNX Runtime sessions

use anyhow::{anyhow, bail, ensure, Context, Result};
use ort::session::Session;
use ort::value::Tensor;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::debug;

/// Ordinary least squares model: `intercept + coef · x`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    /// Per-feature coefficients
    pub coef: Vec<f64>,
    /// Bias term
    pub intercept: f64,
}

impl LinearRegression {
    /// Parse and validate a linear model from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        let ModelArtifact::LinearRegression(model) =
            serde_json::from_str::<ModelArtifact>(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Check that the fitted parameters are usable
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.coef.is_empty(), "linear model has no coefficients");
        if let Some(idx) = self.coef.iter().position(|c| !c.is_finite()) {
            bail!("coef[{}] is not a finite number", idx);
        }
        ensure!(self.intercept.is_finite(), "intercept is not a finite number");
        Ok(())
    }

    fn predict(&self, row: &[f64]) -> f64 {
        self.intercept
            + row
                .iter()
                .zip(&self.coef)
                .map(|(x, c)| x * c)
                .sum::<f64>()
    }
}

/// Native model artifact, tagged by `kind` in its JSON form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    LinearRegression(LinearRegression),
}

/// Regressor exported to ONNX and executed with ONNX Runtime
pub struct OnnxRegressor {
    /// ONNX Runtime session; `run` needs exclusive access
    session: Mutex<Session>,
    /// Input name for the model
    input_name: String,
    /// Output name holding the prediction
    output_name: String,
}

impl OnnxRegressor {
    /// Wrap a committed session, resolving its input and output names
    pub fn new(session: Session) -> Result<Self> {
        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .ok_or_else(|| anyhow!("ONNX model declares no inputs"))?;

        // sklearn-onnx regressors name their output "variable"
        let output_name = session
            .outputs
            .iter()
            .find(|o| o.name == "variable")
            .or_else(|| session.outputs.first())
            .map(|o| o.name.clone())
            .ok_or_else(|| anyhow!("ONNX model declares no outputs"))?;

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
        })
    }

    /// Input name the feature row is bound to
    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    /// Output name the prediction is read from
    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    fn predict(&self, row: &[f64]) -> Result<f64> {
        // Prepare input tensor - shape [1, num_features]
        let shape = vec![1_i64, row.len() as i64];
        let data: Vec<f32> = row.iter().map(|&x| x as f32).collect();
        let input_tensor =
            Tensor::from_array((shape, data)).context("Failed to create input tensor")?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| anyhow!("Lock error: {}", e))?;

        let outputs = session.run(ort::inputs![self.input_name.as_str() => input_tensor])?;

        let output = outputs
            .get(self.output_name.as_str())
            .ok_or_else(|| anyhow!("ONNX output {} missing", self.output_name))?;
        let (_shape, data) = output
            .try_extract_tensor::<f32>()
            .context("ONNX output is not a float tensor")?;

        // One row in, one value out
        let value = data
            .first()
            .copied()
            .ok_or_else(|| anyhow!("ONNX output {} is empty", self.output_name))?;

        debug!(output = %self.output_name, value = value, "Extracted ONNX prediction");
        Ok(value as f64)
    }
}

/// A loaded regression model
pub enum Regressor {
    Linear(LinearRegression),
    Onnx(OnnxRegressor),
}

impl Regressor {
    /// Short human-readable name of the model kind
    pub fn name(&self) -> &'static str {
        match self {
            Regressor::Linear(_) => "linear_regression",
            Regressor::Onnx(_) => "onnx",
        }
    }

    /// Number of features the model was fitted on, when the artifact records it
    pub fn n_features(&self) -> Option<usize> {
        match self {
            Regressor::Linear(m) => Some(m.coef.len()),
            Regressor::Onnx(_) => None,
        }
    }

    /// Predict a single value for one scaled feature row
    pub fn predict(&self, row: &[f64]) -> Result<f64> {
        if let Some(expected) = self.n_features() {
            if row.len() != expected {
                bail!("model expects {} features, got {}", expected, row.len());
            }
        }

        match self {
            Regressor::Linear(m) => Ok(m.predict(row)),
            Regressor::Onnx(m) => m.predict(row),
        }
    }
}

impl std::fmt::Debug for Regressor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Regressor::Linear(m) => f.debug_tuple("Linear").field(m).finish(),
            Regressor::Onnx(m) => f
                .debug_struct("Onnx")
                .field("input_name", &m.input_name)
                .field("output_name", &m.output_name)
                .finish(),
        }
    }
}
