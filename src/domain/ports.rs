use crate::domain::model::{ForecastReport, LatestReading, ModelInput, WeatherPrediction};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Hierarchical JSON document store addressed by `/`-separated paths.
pub trait DocumentStore: Send + Sync {
    /// The child of `path` with the greatest key, if the collection has any.
    fn latest_child(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Option<(String, serde_json::Value)>>> + Send;

    /// Replaces whatever is stored at `path`.
    fn set(
        &self,
        path: &str,
        document: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// A fitted model mapping the station features to the weather targets.
pub trait Regressor: Send + Sync {
    fn predict(&self, input: &ModelInput) -> Result<WeatherPrediction>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Option<LatestReading>>;
    async fn transform(&self, latest: LatestReading) -> Result<ForecastReport>;
    async fn load(&self, report: &ForecastReport) -> Result<String>;
}
