use crate::utils::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fitted per-feature scaler, exported from the training notebook as JSON.
///
/// Both kinds follow scikit-learn: `standard` is `(x - mean) / scale`,
/// `min_max` is `x * scale + min`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureScaler {
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

impl FeatureScaler {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ForecastError::model(format!("cannot read scaler {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let scaler: FeatureScaler = serde_json::from_str(content)?;
        scaler.check()?;
        Ok(scaler)
    }

    fn parts(&self) -> (&[f64], &[f64]) {
        match self {
            FeatureScaler::Standard { mean, scale } => (mean, scale),
            FeatureScaler::MinMax { min, scale } => (min, scale),
        }
    }

    fn check(&self) -> Result<()> {
        let (offset, scale) = self.parts();
        if offset.is_empty() || offset.len() != scale.len() {
            return Err(ForecastError::model(format!(
                "scaler parameters have mismatched lengths ({} vs {})",
                offset.len(),
                scale.len()
            )));
        }
        if let Some(i) = scale.iter().position(|s| *s == 0.0 || !s.is_finite()) {
            return Err(ForecastError::model(format!(
                "scaler scale[{}] must be finite and non-zero",
                i
            )));
        }
        Ok(())
    }

    pub fn n_features(&self) -> usize {
        self.parts().0.len()
    }

    fn expect_len(&self, values: &[f64]) -> Result<()> {
        if values.len() != self.n_features() {
            return Err(ForecastError::model(format!(
                "scaler expects {} features, got {}",
                self.n_features(),
                values.len()
            )));
        }
        Ok(())
    }

    pub fn transform(&self, values: &[f64]) -> Result<Vec<f64>> {
        self.expect_len(values)?;
        let scaled = match self {
            FeatureScaler::Standard { mean, scale } => values
                .iter()
                .zip(mean.iter().zip(scale))
                .map(|(x, (m, s))| (x - m) / s)
                .collect(),
            FeatureScaler::MinMax { min, scale } => values
                .iter()
                .zip(min.iter().zip(scale))
                .map(|(x, (m, s))| x * s + m)
                .collect(),
        };
        Ok(scaled)
    }

    pub fn inverse_transform(&self, values: &[f64]) -> Result<Vec<f64>> {
        self.expect_len(values)?;
        let restored = match self {
            FeatureScaler::Standard { mean, scale } => values
                .iter()
                .zip(mean.iter().zip(scale))
                .map(|(t, (m, s))| t * s + m)
                .collect(),
            FeatureScaler::MinMax { min, scale } => values
                .iter()
                .zip(min.iter().zip(scale))
                .map(|(t, (m, s))| (t - m) / s)
                .collect(),
        };
        Ok(restored)
    }
}
