use crate::utils::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Tanh,
    Sigmoid,
    Elu,
}

impl Activation {
    fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Linear => x,
            Activation::Relu => x.max(0.0),
            Activation::Tanh => x.tanh(),
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Elu => {
                if x > 0.0 {
                    x
                } else {
                    x.exp_m1()
                }
            }
        }
    }
}

/// Fully connected layer. `weights` uses the Keras kernel layout `[inputs][units]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
    #[serde(default)]
    pub activation: Activation,
}

impl DenseLayer {
    pub fn inputs(&self) -> usize {
        self.weights.len()
    }

    pub fn units(&self) -> usize {
        self.bias.len()
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut output = self.bias.clone();
        for (x, row) in input.iter().zip(&self.weights) {
            for (out, w) in output.iter_mut().zip(row) {
                *out += x * w;
            }
        }
        output
            .into_iter()
            .map(|z| self.activation.apply(z))
            .collect()
    }
}

/// Feed-forward network exported layer by layer from the trained Keras model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseNetwork {
    pub layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ForecastError::model(format!("cannot read model {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let network: DenseNetwork = serde_json::from_str(content)?;
        network.check_shapes()?;
        Ok(network)
    }

    fn check_shapes(&self) -> Result<()> {
        let first = self
            .layers
            .first()
            .ok_or_else(|| ForecastError::model("model has no layers"))?;
        let mut expected_inputs = first.inputs();

        for (index, layer) in self.layers.iter().enumerate() {
            if layer.inputs() == 0 || layer.units() == 0 {
                return Err(ForecastError::model(format!("layer {} is empty", index)));
            }
            if layer.inputs() != expected_inputs {
                return Err(ForecastError::model(format!(
                    "layer {} takes {} inputs but the previous layer has {} units",
                    index,
                    layer.inputs(),
                    expected_inputs
                )));
            }
            if let Some(row) = layer.weights.iter().position(|r| r.len() != layer.units()) {
                return Err(ForecastError::model(format!(
                    "layer {} weight row {} has {} columns, bias has {}",
                    index,
                    row,
                    layer.weights[row].len(),
                    layer.units()
                )));
            }
            expected_inputs = layer.units();
        }
        Ok(())
    }

    pub fn input_dim(&self) -> usize {
        self.layers.first().map(DenseLayer::inputs).unwrap_or(0)
    }

    pub fn output_dim(&self) -> usize {
        self.layers.last().map(DenseLayer::units).unwrap_or(0)
    }

    pub fn forward(&self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.input_dim() {
            return Err(ForecastError::model(format!(
                "model expects {} inputs, got {}",
                self.input_dim(),
                input.len()
            )));
        }

        let output = self
            .layers
            .iter()
            .fold(input.to_vec(), |activations, layer| layer.forward(&activations));

        if output.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::model("forward pass produced a non-finite value"));
        }
        Ok(output)
    }
}
