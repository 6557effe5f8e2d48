//! Fitted feature scalers

use anyhow::{bail, ensure, Result};
use serde::{Deserialize, Serialize};

/// Standardization fitted at training time: `(x - mean) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-feature mean
    pub mean: Vec<f64>,
    /// Per-feature standard deviation
    pub scale: Vec<f64>,
}

impl StandardScaler {
    fn validate(&self) -> Result<()> {
        ensure!(
            self.mean.len() == self.scale.len(),
            "standard scaler has {} means but {} scales",
            self.mean.len(),
            self.scale.len()
        );
        ensure_finite("mean", &self.mean)?;
        ensure_finite("scale", &self.scale)
    }

    fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(&x, (&mean, &scale))| {
                // A constant column was fitted with zero variance
                let scale = if scale == 0.0 { 1.0 } else { scale };
                (x - mean) / scale
            })
            .collect()
    }
}

/// Range scaling fitted at training time: `x * scale + min`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    /// Per-feature offset applied after scaling
    pub min: Vec<f64>,
    /// Per-feature multiplier
    pub scale: Vec<f64>,
}

impl MinMaxScaler {
    fn validate(&self) -> Result<()> {
        ensure!(
            self.min.len() == self.scale.len(),
            "min-max scaler has {} offsets but {} scales",
            self.min.len(),
            self.scale.len()
        );
        ensure_finite("min", &self.min)?;
        ensure_finite("scale", &self.scale)
    }

    fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.min.iter().zip(&self.scale))
            .map(|(&x, (&min, &scale))| x * scale + min)
            .collect()
    }
}

/// A scaler artifact, tagged by `kind` in its JSON form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FittedScaler {
    StandardScaler(StandardScaler),
    MinMaxScaler(MinMaxScaler),
}

impl FittedScaler {
    /// Parse and validate a scaler from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        let scaler: FittedScaler = serde_json::from_str(json)?;
        scaler.validate()?;
        Ok(scaler)
    }

    /// Check internal consistency of the fitted parameters
    pub fn validate(&self) -> Result<()> {
        match self {
            FittedScaler::StandardScaler(s) => s.validate()?,
            FittedScaler::MinMaxScaler(s) => s.validate()?,
        }
        ensure!(self.n_features() > 0, "scaler has no features");
        Ok(())
    }

    /// Short human-readable name of the scaler kind
    pub fn name(&self) -> &'static str {
        match self {
            FittedScaler::StandardScaler(_) => "standard_scaler",
            FittedScaler::MinMaxScaler(_) => "min_max_scaler",
        }
    }

    /// Number of features the scaler was fitted on
    pub fn n_features(&self) -> usize {
        match self {
            FittedScaler::StandardScaler(s) => s.scale.len(),
            FittedScaler::MinMaxScaler(s) => s.scale.len(),
        }
    }

    /// Scale a single feature row
    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.n_features() {
            bail!(
                "scaler expects {} features, got {}",
                self.n_features(),
                row.len()
            );
        }

        Ok(match self {
            FittedScaler::StandardScaler(s) => s.transform(row),
            FittedScaler::MinMaxScaler(s) => s.transform(row),
        })
    }
}

fn ensure_finite(field: &str, values: &[f64]) -> Result<()> {
    if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
        bail!("{}[{}] is not a finite number", field, idx);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> FittedScaler {
        FittedScaler::StandardScaler(StandardScaler {
            mean: vec![5.0, 70.0, 0.5, 6.5, 4.5],
            scale: vec![2.5, 17.0, 0.5, 1.7, 2.9],
        })
    }

    #[test]
    fn test_standard_transform() {
        let scaled = standard().transform(&[5.0, 87.0, 1.0, 6.5, 4.5]).unwrap();
        assert_eq!(scaled, vec![0.0, 1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_zero_scale_is_treated_as_one() {
        let scaler = FittedScaler::StandardScaler(StandardScaler {
            mean: vec![3.0],
            scale: vec![0.0],
        });
        assert_eq!(scaler.transform(&[5.0]).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_min_max_transform() {
        let scaler = FittedScaler::MinMaxScaler(MinMaxScaler {
            min: vec![-0.1, 0.0],
            scale: vec![0.1, 0.5],
        });
        let scaled = scaler.transform(&[1.0, 4.0]).unwrap();
        assert!((scaled[0] - 0.0).abs() < 1e-12);
        assert_eq!(scaled[1], 2.0);
    }

    #[test]
    fn test_wrong_width_is_rejected() {
        assert!(standard().transform(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_from_json() {
        let scaler = FittedScaler::from_json(
            r#"{"kind": "standard_scaler", "mean": [1.0, 2.0], "scale": [1.0, 2.0]}"#,
        )
        .unwrap();

        assert_eq!(scaler.name(), "standard_scaler");
        assert_eq!(scaler.n_features(), 2);
    }

    #[test]
    fn test_from_json_rejects_inconsistent_lengths() {
        let err = FittedScaler::from_json(
            r#"{"kind": "min_max_scaler", "min": [0.0, 0.0], "scale": [1.0]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("min-max scaler"));
    }

    #[test]
    fn test_from_json_rejects_unknown_kind() {
        assert!(FittedScaler::from_json(r#"{"kind": "robust_scaler"}"#).is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let scaler = FittedScaler::StandardScaler(StandardScaler {
            mean: vec![0.0, f64::NAN],
            scale: vec![1.0, 1.0],
        });
        let err = scaler.validate().unwrap_err();
        assert!(err.to_string().contains("mean[1]"));
    }
}
