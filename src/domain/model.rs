use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Accepts JSON numbers, numeric strings and `null` (read as `0.0`).
/// A `null` counts as a missing value instead of failing the reading.
fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => Ok(n.as_f64().unwrap_or(0.0)),
        serde_json::Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("not a number: {:?}", s))),
        serde_json::Value::Null => Ok(0.0),
        other => Err(D::Error::custom(format!("expected a number, got {}", other))),
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TemperatureGroup {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub min: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub max: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WindGroup {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub gust_kmh: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RainGroup {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_harian_mm: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LightGroup {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg: f64,
}

/// One raw record as pushed by the station logger.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SensorReading {
    #[serde(default, rename = "suhu")]
    pub temperature: TemperatureGroup,
    #[serde(default, rename = "angin")]
    pub wind: WindGroup,
    #[serde(default, rename = "hujan")]
    pub rain: RainGroup,
    #[serde(default, rename = "cahaya")]
    pub light: LightGroup,
}

/// The newest reading together with the key it was stored under.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestReading {
    pub key: String,
    pub reading: SensorReading,
}

/// Model input features, in the column order the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelInput {
    #[serde(rename = "TN")]
    pub tn: f64,
    #[serde(rename = "TX")]
    pub tx: f64,
    #[serde(rename = "RR")]
    pub rr: f64,
    #[serde(rename = "SS")]
    pub ss: f64,
    #[serde(rename = "FF_X")]
    pub ff_x: f64,
}

impl ModelInput {
    pub const FEATURES: [&'static str; 5] = ["TN", "TX", "RR", "SS", "FF_X"];

    pub fn to_vector(&self) -> [f64; 5] {
        [self.tn, self.tx, self.rr, self.ss, self.ff_x]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherPrediction {
    #[serde(rename = "TAVG")]
    pub tavg: f64,
    #[serde(rename = "RH_AVG")]
    pub rh_avg: f64,
    #[serde(rename = "FF_AVG_KNOT")]
    pub ff_avg_knot: f64,
    #[serde(rename = "DDD_X")]
    pub ddd_x: i64,
}

impl WeatherPrediction {
    pub const TARGETS: [&'static str; 4] = ["TAVG", "RH_AVG", "FF_AVG_KNOT", "DDD_X"];

    /// Maps a de-scaled output row; the direction is truncated toward zero.
    pub fn from_output(output: [f64; 4]) -> Self {
        Self {
            tavg: output[0],
            rh_avg: output[1],
            ff_avg_knot: output[2],
            ddd_x: output[3].trunc() as i64,
        }
    }

    pub fn wind_kmh(&self) -> f64 {
        crate::domain::rules::knots_to_kmh(self.ff_avg_knot)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedWeather {
    #[serde(rename = "Suhu_AVG_C")]
    pub temperature_c: f64,
    #[serde(rename = "RH_AVG_Persen")]
    pub humidity_percent: f64,
    #[serde(rename = "FF_AVG_kmh")]
    pub wind_kmh: f64,
    #[serde(rename = "DDD_X_Derajat")]
    pub wind_direction_deg: i64,
    #[serde(rename = "Arah_Angin_Teks")]
    pub wind_direction_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationAdvice {
    #[serde(rename = "Rekomendasi")]
    pub recommendation: String,
    #[serde(rename = "Detail_Skor")]
    pub score_detail: String,
}

/// Document written back to the store for one forecast slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDocument {
    #[serde(rename = "Klasifikasi_Cuaca")]
    pub classification: String,
    #[serde(rename = "Prediksi_Cuaca")]
    pub prediction: PredictedWeather,
    #[serde(rename = "Rekomendasi_Penyiraman")]
    pub irrigation: IrrigationAdvice,
}

/// Everything produced by one run, ready to print and store.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastReport {
    pub source_key: String,
    pub light_intensity: f64,
    pub input: ModelInput,
    pub prediction: WeatherPrediction,
    pub score: i32,
    pub document: ForecastDocument,
    pub target_path: String,
}
