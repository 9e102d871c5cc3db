use crate::config::ModelConfig;
use crate::domain::model::{ModelInput, WeatherPrediction};
use crate::domain::ports::Regressor;
use crate::inference::network::DenseNetwork;
use crate::inference::scaler::FeatureScaler;
use crate::utils::error::{ForecastError, Result};

const N_FEATURES: usize = ModelInput::FEATURES.len();
const N_TARGETS: usize = WeatherPrediction::TARGETS.len();

/// Scales the features, runs the network and restores the target units.
#[derive(Debug, Clone)]
pub struct WeatherPredictor {
    network: DenseNetwork,
    scaler_x: FeatureScaler,
    scaler_y: FeatureScaler,
}

impl WeatherPredictor {
    pub fn new(
        network: DenseNetwork,
        scaler_x: FeatureScaler,
        scaler_y: FeatureScaler,
    ) -> Result<Self> {
        let shapes = [
            ("input scaler", scaler_x.n_features(), N_FEATURES),
            ("model input", network.input_dim(), N_FEATURES),
            ("model output", network.output_dim(), N_TARGETS),
            ("output scaler", scaler_y.n_features(), N_TARGETS),
        ];
        for (what, actual, expected) in shapes {
            if actual != expected {
                return Err(ForecastError::model(format!(
                    "{} has {} columns, expected {}",
                    what, actual, expected
                )));
            }
        }

        Ok(Self {
            network,
            scaler_x,
            scaler_y,
        })
    }

    pub fn load(config: &ModelConfig) -> Result<Self> {
        tracing::debug!("Loading model from: {}", config.model_path);
        let network = DenseNetwork::from_file(&config.model_path)?;
        let scaler_x = FeatureScaler::from_file(&config.scaler_x_path)?;
        let scaler_y = FeatureScaler::from_file(&config.scaler_y_path)?;
        tracing::info!(
            "🧠 Model loaded: {} layers, {} -> {}",
            network.layers.len(),
            network.input_dim(),
            network.output_dim()
        );
        Self::new(network, scaler_x, scaler_y)
    }
}

impl Regressor for WeatherPredictor {
    fn predict(&self, input: &ModelInput) -> Result<WeatherPrediction> {
        let scaled = self.scaler_x.transform(&input.to_vector())?;
        let raw = self.network.forward(&scaled)?;
        let restored = self.scaler_y.inverse_transform(&raw)?;

        let output: [f64; N_TARGETS] = restored.try_into().map_err(|v: Vec<f64>| {
            ForecastError::model(format!("expected {} outputs, got {}", N_TARGETS, v.len()))
        })?;
        Ok(WeatherPrediction::from_output(output))
    }
}
