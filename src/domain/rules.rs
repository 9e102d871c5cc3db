//! Threshold tables for the irrigation score, the weather label and the
//! derived inputs. Everything here is pure and keyed on literal thresholds.

use crate::domain::model::{ModelInput, SensorReading, WeatherPrediction};
use serde::{Deserialize, Serialize};

pub const KNOT_TO_KMH: f64 = 1.852;
pub const KMH_TO_KNOT: f64 = 0.54;

pub fn knots_to_kmh(knots: f64) -> f64 {
    knots * KNOT_TO_KMH
}

/// Sunshine-duration proxy (hours) from average light intensity (lux).
pub fn sunshine_from_light(lux: f64) -> f64 {
    if lux > 20000.0 {
        8.0
    } else if lux > 5000.0 {
        5.0
    } else if lux > 1000.0 {
        2.0
    } else {
        0.5
    }
}

pub fn model_input(reading: &SensorReading) -> ModelInput {
    ModelInput {
        tn: reading.temperature.min,
        tx: reading.temperature.max,
        rr: reading.rain.total_harian_mm,
        ss: sunshine_from_light(reading.light.avg),
        ff_x: reading.wind.gust_kmh * KMH_TO_KNOT,
    }
}

pub fn irrigation_score(prediction: &WeatherPrediction, rainfall_mm: f64) -> i32 {
    let mut score = 0;

    let temperature = prediction.tavg;
    score += if temperature >= 32.0 {
        3
    } else if temperature >= 28.0 {
        2
    } else if temperature >= 24.0 {
        1
    } else {
        0
    };

    let humidity = prediction.rh_avg;
    score += if humidity < 60.0 {
        3
    } else if humidity < 70.0 {
        2
    } else if humidity <= 85.0 {
        1
    } else {
        0
    };

    let wind_kmh = prediction.wind_kmh();
    score += if wind_kmh > 20.0 {
        3
    } else if wind_kmh >= 10.0 {
        2
    } else {
        1
    };

    if rainfall_mm > 5.0 {
        score -= 10;
    } else if rainfall_mm >= 1.0 {
        score -= 5;
    }

    score
}

pub fn score_detail(score: i32) -> String {
    format!("Total Skor: {}", score)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationLevel {
    /// The level applies when the score is strictly greater than this.
    pub above: i32,
    pub label: String,
}

/// Score-to-label ladder, checked from the highest threshold down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationLadder {
    levels: Vec<RecommendationLevel>,
    fallback: String,
}

impl RecommendationLadder {
    pub fn new(mut levels: Vec<RecommendationLevel>, fallback: impl Into<String>) -> Self {
        levels.sort_by(|a, b| b.above.cmp(&a.above));
        Self {
            levels,
            fallback: fallback.into(),
        }
    }

    pub fn recommend(&self, score: i32) -> &str {
        self.levels
            .iter()
            .find(|level| score > level.above)
            .map(|level| level.label.as_str())
            .unwrap_or(self.fallback.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationProfile {
    /// Growing conditions for the Sacha Inchi plots.
    #[default]
    SachaInchi,
    /// Plain watering need.
    Irrigation,
    /// Levels come from the station configuration.
    Custom,
}

impl RecommendationProfile {
    /// Built-in ladder, `None` for `Custom`.
    pub fn ladder(self) -> Option<RecommendationLadder> {
        let level = |above, label: &str| RecommendationLevel {
            above,
            label: label.to_string(),
        };
        match self {
            RecommendationProfile::SachaInchi => Some(RecommendationLadder::new(
                vec![level(4, "Optimal"), level(2, "Sedang")],
                "Tidak Menguntungkan",
            )),
            RecommendationProfile::Irrigation => Some(RecommendationLadder::new(
                vec![level(4, "Perlu Penyiraman"), level(2, "Penyiraman Ringan")],
                "Tidak Perlu Penyiraman",
            )),
            RecommendationProfile::Custom => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherClass {
    HeavyRain,
    ModerateRain,
    LightRain,
    Windy,
    Hot,
    Cool,
    CloudyNight,
    ClearNight,
    Clear,
    PartlyCloudy,
    Cloudy,
}

impl WeatherClass {
    pub fn label(self) -> &'static str {
        match self {
            WeatherClass::HeavyRain => "Hujan Lebat",
            WeatherClass::ModerateRain => "Hujan Sedang",
            WeatherClass::LightRain => "Hujan Ringan",
            WeatherClass::Windy => "Berangin",
            WeatherClass::Hot => "Panas",
            WeatherClass::Cool => "Sejuk",
            WeatherClass::CloudyNight => "Berawan (Malam)",
            WeatherClass::ClearNight => "Cerah (Malam)",
            WeatherClass::Clear => "Cerah",
            WeatherClass::PartlyCloudy => "Cerah Berawan",
            WeatherClass::Cloudy => "Berawan",
        }
    }
}

impl std::fmt::Display for WeatherClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Night runs from 18:00 to 05:59 local time.
pub fn is_night(local_hour: u32) -> bool {
    local_hour >= 18 || local_hour < 6
}

/// Priority order: measured rain, predicted wind, temperature extremes,
/// then humidity at night or light intensity by day.
pub fn classify_weather(
    prediction: &WeatherPrediction,
    rainfall_mm: f64,
    light_lux: f64,
    local_hour: u32,
) -> WeatherClass {
    if rainfall_mm > 10.0 {
        return WeatherClass::HeavyRain;
    } else if rainfall_mm > 2.5 {
        return WeatherClass::ModerateRain;
    } else if rainfall_mm > 0.1 {
        return WeatherClass::LightRain;
    }

    let wind_ms = prediction.wind_kmh() / 3.6;
    if wind_ms > 10.0 {
        return WeatherClass::Windy;
    }

    if prediction.tavg > 34.0 {
        return WeatherClass::Hot;
    } else if prediction.tavg < 22.0 {
        return WeatherClass::Cool;
    }

    if is_night(local_hour) {
        return if prediction.rh_avg > 85.0 {
            WeatherClass::CloudyNight
        } else {
            WeatherClass::ClearNight
        };
    }

    if light_lux > 40000.0 {
        WeatherClass::Clear
    } else if light_lux > 10000.0 {
        WeatherClass::PartlyCloudy
    } else {
        WeatherClass::Cloudy
    }
}

/// Eight-point compass label for a direction in degrees.
pub fn compass_direction(degrees: f64) -> &'static str {
    match degrees {
        d if (337.5..=360.0).contains(&d) || (0.0..22.5).contains(&d) => "Utara",
        d if (22.5..67.5).contains(&d) => "Timur Laut",
        d if (67.5..112.5).contains(&d) => "Timur",
        d if (112.5..157.5).contains(&d) => "Tenggara",
        d if (157.5..202.5).contains(&d) => "Selatan",
        d if (202.5..247.5).contains(&d) => "Barat Daya",
        d if (247.5..292.5).contains(&d) => "Barat",
        d if (292.5..337.5).contains(&d) => "Barat Laut",
        _ => "Tidak Terdefinisi",
    }
}

/// Two-decimal rounding of the exact binary value, ties to even.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
