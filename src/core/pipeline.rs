use crate::config::{StationConfig, StationSection};
use crate::core::{DocumentStore, Pipeline, Regressor};
use crate::domain::model::{
    ForecastDocument, ForecastReport, IrrigationAdvice, LatestReading, PredictedWeather,
    SensorReading,
};
use crate::domain::rules::{self, RecommendationLadder};
use crate::domain::schedule::ForecastSchedule;
use crate::utils::error::{ForecastError, Result};
use chrono::{DateTime, Timelike, Utc};

pub type Clock = fn() -> DateTime<Utc>;

/// One station: latest reading in, forecast document out.
pub struct ForecastPipeline<S: DocumentStore, R: Regressor> {
    store: S,
    regressor: R,
    station: StationSection,
    schedule: ForecastSchedule,
    ladder: RecommendationLadder,
    clock: Clock,
}

impl<S: DocumentStore, R: Regressor> ForecastPipeline<S, R> {
    pub fn new(store: S, regressor: R, config: &StationConfig) -> Result<Self> {
        Ok(Self {
            store,
            regressor,
            station: config.station.clone(),
            schedule: config.forecast_schedule()?,
            ladder: config.recommendation_ladder()?,
            clock: Utc::now,
        })
    }

    /// Replaces the wall clock, for reproducible slot keys and day/night rules.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn target_path(&self, now: DateTime<Utc>) -> String {
        format!(
            "{}/{}",
            self.station.result_path.trim_matches('/'),
            self.schedule.next_slot_key(now)
        )
    }
}

#[async_trait::async_trait]
impl<S: DocumentStore, R: Regressor> Pipeline for ForecastPipeline<S, R> {
    async fn extract(&self) -> Result<Option<LatestReading>> {
        let source_path = self.station.source_path.trim_matches('/');
        tracing::info!("📡 Fetching latest reading from: /{}", source_path);

        let Some((key, value)) = self.store.latest_child(source_path).await? else {
            tracing::warn!("No sensor data found under /{}", source_path);
            return Ok(None);
        };

        let reading: SensorReading =
            serde_json::from_value(value).map_err(|e| ForecastError::DataError {
                message: format!("reading '{}' is malformed: {}", key, e),
            })?;

        tracing::info!("✅ Data taken from path: '/{}' (key: {})", source_path, key);
        Ok(Some(LatestReading { key, reading }))
    }

    async fn transform(&self, latest: LatestReading) -> Result<ForecastReport> {
        let now = (self.clock)();
        let local_hour = self.schedule.local_time(now).hour();
        let reading = &latest.reading;

        let light_intensity = reading.light.avg;
        let input = rules::model_input(reading);
        tracing::info!(
            "Light intensity: {}, converted to SS value: {}",
            light_intensity,
            input.ss
        );
        tracing::debug!("Model input: {:?}", input);

        let prediction = self.regressor.predict(&input)?;
        tracing::debug!("Model output: {:?}", prediction);

        let score = rules::irrigation_score(&prediction, input.rr);
        let recommendation = self.ladder.recommend(score).to_string();
        let classification =
            rules::classify_weather(&prediction, input.rr, light_intensity, local_hour);
        let direction = rules::compass_direction(prediction.ddd_x as f64);

        let document = ForecastDocument {
            classification: classification.label().to_string(),
            prediction: PredictedWeather {
                temperature_c: rules::round2(prediction.tavg),
                humidity_percent: rules::round2(prediction.rh_avg),
                wind_kmh: rules::round2(prediction.wind_kmh()),
                wind_direction_deg: prediction.ddd_x,
                wind_direction_text: direction.to_string(),
            },
            irrigation: IrrigationAdvice {
                recommendation,
                score_detail: rules::score_detail(score),
            },
        };

        tracing::info!(
            "🔧 Forecast for {}: {} / {} (score {})",
            self.station.name,
            document.classification,
            document.irrigation.recommendation,
            score
        );

        Ok(ForecastReport {
            source_key: latest.key,
            light_intensity,
            input,
            prediction,
            score,
            document,
            target_path: self.target_path(now),
        })
    }

    async fn load(&self, report: &ForecastReport) -> Result<String> {
        tracing::info!("💾 Saving forecast to: /{}", report.target_path);
        let document = serde_json::to_value(&report.document)?;
        self.store.set(&report.target_path, &document).await?;
        Ok(format!("/{}", report.target_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ModelInput, WeatherPrediction};
    use chrono::TimeZone;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MockStore {
        latest: Option<(String, serde_json::Value)>,
        written: Arc<Mutex<HashMap<String, serde_json::Value>>>,
    }

    impl DocumentStore for MockStore {
        async fn latest_child(&self, _path: &str) -> Result<Option<(String, serde_json::Value)>> {
            Ok(self.latest.clone())
        }

        async fn set(&self, path: &str, document: &serde_json::Value) -> Result<()> {
            self.written
                .lock()
                .unwrap()
                .insert(path.to_string(), document.clone());
            Ok(())
        }
    }

    struct FixedRegressor(WeatherPrediction);

    impl Regressor for FixedRegressor {
        fn predict(&self, _input: &ModelInput) -> Result<WeatherPrediction> {
            Ok(self.0)
        }
    }

    fn config() -> StationConfig {
        StationConfig::from_toml_str(
            r#"
[station]
name = "AWS 02"
source_path = "aws_02"
result_path = "/Hasil_Prediksi_Rekomendasi_Penyiraman_AWS_02/"

[database]
url = "https://example.firebaseio.com"

[model]
model_path = "model.json"
scaler_x_path = "scaler_x.json"
scaler_y_path = "scaler_y.json"
"#,
        )
        .unwrap()
    }

    // 13:20 in Jakarta
    fn afternoon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 6, 20, 0).unwrap()
    }

    // 19:05 in Jakarta
    fn evening() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 5, 0).unwrap()
    }

    fn reading() -> serde_json::Value {
        serde_json::json!({
            "suhu": {"min": 24.1, "max": 33.4, "avg": 28.0},
            "angin": {"gust_kmh": 18.5},
            "hujan": {"total_harian_mm": 0.0},
            "cahaya": {"avg": 45000.0}
        })
    }

    fn prediction() -> WeatherPrediction {
        WeatherPrediction {
            tavg: 29.456,
            rh_avg: 65.004,
            ff_avg_knot: 6.0,
            ddd_x: 95,
        }
    }

    #[tokio::test]
    async fn test_extract_without_data() {
        let pipeline =
            ForecastPipeline::new(MockStore::default(), FixedRegressor(prediction()), &config())
                .unwrap();
        assert!(pipeline.extract().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_extract_rejects_malformed_reading() {
        let store = MockStore {
            latest: Some(("-Nz1".to_string(), serde_json::json!({"suhu": {"min": "hot"}}))),
            ..Default::default()
        };
        let pipeline =
            ForecastPipeline::new(store, FixedRegressor(prediction()), &config()).unwrap();

        assert!(matches!(
            pipeline.extract().await,
            Err(ForecastError::DataError { .. })
        ));
    }

    #[tokio::test]
    async fn test_transform_builds_document() {
        let store = MockStore {
            latest: Some(("-Nz1".to_string(), reading())),
            ..Default::default()
        };
        let pipeline = ForecastPipeline::new(store, FixedRegressor(prediction()), &config())
            .unwrap()
            .with_clock(afternoon);

        let latest = pipeline.extract().await.unwrap().unwrap();
        assert_eq!(latest.key, "-Nz1");
        let report = pipeline.transform(latest).await.unwrap();

        assert_eq!(report.input.ss, 8.0);
        assert!((report.input.ff_x - 9.99).abs() < 1e-9);
        // 29.5 C -> 2, 65 % -> 2, 11.1 km/h -> 2, no rain
        assert_eq!(report.score, 6);
        assert_eq!(report.document.irrigation.recommendation, "Optimal");
        assert_eq!(report.document.irrigation.score_detail, "Total Skor: 6");
        assert_eq!(report.document.classification, "Cerah");
        assert_eq!(report.document.prediction.temperature_c, 29.46);
        assert_eq!(report.document.prediction.humidity_percent, 65.0);
        assert_eq!(report.document.prediction.wind_kmh, 11.11);
        assert_eq!(report.document.prediction.wind_direction_text, "Timur");
        assert_eq!(
            report.target_path,
            "Hasil_Prediksi_Rekomendasi_Penyiraman_AWS_02/2026-10-17_15-00-00"
        );
    }

    #[tokio::test]
    async fn test_evening_classification_and_load() {
        let store = MockStore {
            latest: Some(("-Nz1".to_string(), reading())),
            ..Default::default()
        };
        let written = store.written.clone();
        let pipeline = ForecastPipeline::new(store, FixedRegressor(prediction()), &config())
            .unwrap()
            .with_clock(evening);

        let latest = pipeline.extract().await.unwrap().unwrap();
        let report = pipeline.transform(latest).await.unwrap();
        assert_eq!(report.document.classification, "Cerah (Malam)");

        let path = pipeline.load(&report).await.unwrap();
        assert_eq!(path, "/Hasil_Prediksi_Rekomendasi_Penyiraman_AWS_02/2026-10-17_21-00-00");

        let written = written.lock().unwrap();
        let document = &written["Hasil_Prediksi_Rekomendasi_Penyiraman_AWS_02/2026-10-17_21-00-00"];
        assert_eq!(document["Klasifikasi_Cuaca"], "Cerah (Malam)");
        assert_eq!(document["Prediksi_Cuaca"]["DDD_X_Derajat"], 95);
    }
}
