pub mod network;
pub mod predictor;
pub mod scaler;

pub use network::DenseNetwork;
pub use predictor::WeatherPredictor;
pub use scaler::FeatureScaler;
