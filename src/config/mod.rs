#[cfg(feature = "cli")]
pub mod cli;

use crate::domain::rules::{RecommendationLadder, RecommendationLevel, RecommendationProfile};
use crate::domain::schedule::{ForecastSchedule, DEFAULT_SLOT_HOURS};
use crate::utils::error::{ForecastError, Result};
use crate::utils::validation::{self, Validate};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    pub station: StationSection,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub model: ModelConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub recommendation: RecommendationConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationSection {
    pub name: String,
    /// Collection the station logger pushes raw readings into.
    pub source_path: String,
    /// Collection receiving one forecast document per slot.
    pub result_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    /// Database secret or ID token, sent as the `auth` query parameter.
    pub auth: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            auth: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model_path: String,
    pub scaler_x_path: String,
    pub scaler_y_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
    #[serde(default = "default_slot_hours")]
    pub slot_hours: Vec<u32>,
}

fn default_utc_offset_hours() -> i32 {
    7
}

fn default_slot_hours() -> Vec<u32> {
    DEFAULT_SLOT_HOURS.to_vec()
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: default_utc_offset_hours(),
            slot_hours: default_slot_hours(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationConfig {
    #[serde(default)]
    pub profile: RecommendationProfile,
    #[serde(default)]
    pub levels: Vec<RecommendationLevel>,
    pub fallback: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    #[default]
    Firebase,
    File,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Root directory for the `file` backend.
    pub root: Option<String>,
}

impl StationConfig {
    /// Loads a station file; relative artifact paths resolve against its directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ForecastError::IoError)?;
        let mut config = Self::from_toml_str(&content)?;
        config.resolve_relative_paths(path.as_ref().parent());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ForecastError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value, leaving unset variables as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| {
            ForecastError::ConfigError {
                message: format!("invalid substitution pattern: {}", e),
            }
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Artifact paths and the file store root are relative to the config file.
    fn resolve_relative_paths(&mut self, base: Option<&Path>) {
        let Some(base) = base.filter(|b| !b.as_os_str().is_empty()) else {
            return;
        };
        let resolve = |p: &mut String| {
            if Path::new(p.as_str()).is_relative() {
                *p = base.join(p.as_str()).to_string_lossy().into_owned();
            }
        };
        resolve(&mut self.model.model_path);
        resolve(&mut self.model.scaler_x_path);
        resolve(&mut self.model.scaler_y_path);
        if let Some(root) = self.store.root.as_mut() {
            resolve(root);
        }
    }

    pub fn utc_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.schedule.utc_offset_hours * 3600).ok_or_else(|| {
            ForecastError::InvalidConfigValueError {
                field: "schedule.utc_offset_hours".to_string(),
                value: self.schedule.utc_offset_hours.to_string(),
                reason: "offset out of range".to_string(),
            }
        })
    }

    pub fn forecast_schedule(&self) -> Result<ForecastSchedule> {
        Ok(ForecastSchedule::new(
            self.utc_offset()?,
            self.schedule.slot_hours.clone(),
        ))
    }

    /// Ladder for the configured profile; explicit levels override the built-in ones.
    pub fn recommendation_ladder(&self) -> Result<RecommendationLadder> {
        let rec = &self.recommendation;
        if !rec.levels.is_empty() || rec.profile == RecommendationProfile::Custom {
            let fallback = rec
                .fallback
                .clone()
                .ok_or_else(|| ForecastError::MissingConfigError {
                    field: "recommendation.fallback".to_string(),
                })?;
            return Ok(RecommendationLadder::new(rec.levels.clone(), fallback));
        }
        rec.profile
            .ladder()
            .ok_or_else(|| ForecastError::MissingConfigError {
                field: "recommendation.levels".to_string(),
            })
    }

    pub fn file_store_root(&self) -> Option<PathBuf> {
        self.store.root.as_ref().map(PathBuf::from)
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("station.name", &self.station.name)?;
        validation::validate_store_path("station.source_path", &self.station.source_path)?;
        validation::validate_store_path("station.result_path", &self.station.result_path)?;

        if self.store.backend == StoreBackend::Firebase {
            validation::validate_url("database.url", &self.database.url)?;
            if let Some(auth) = &self.database.auth {
                if auth.starts_with("${") {
                    return Err(ForecastError::InvalidConfigValueError {
                        field: "database.auth".to_string(),
                        value: auth.clone(),
                        reason: "environment variable is not set".to_string(),
                    });
                }
            }
        } else {
            let root = self
                .store
                .root
                .as_deref()
                .ok_or_else(|| ForecastError::MissingConfigError {
                    field: "store.root".to_string(),
                })?;
            validation::validate_path("store.root", root)?;
        }
        validation::validate_positive_number(
            "database.timeout_seconds",
            self.database.timeout_seconds,
            1,
        )?;

        validation::validate_path("model.model_path", &self.model.model_path)?;
        validation::validate_path("model.scaler_x_path", &self.model.scaler_x_path)?;
        validation::validate_path("model.scaler_y_path", &self.model.scaler_y_path)?;

        validation::validate_range(
            "schedule.utc_offset_hours",
            self.schedule.utc_offset_hours,
            -12,
            14,
        )?;
        if self.schedule.slot_hours.is_empty() {
            return Err(ForecastError::MissingConfigError {
                field: "schedule.slot_hours".to_string(),
            });
        }
        for hour in &self.schedule.slot_hours {
            validation::validate_range("schedule.slot_hours", *hour, 0, 23)?;
        }

        self.recommendation_ladder()?;
        Ok(())
    }
}

impl Validate for StationConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[station]
name = "AWS 02"
source_path = "aws_02"
result_path = "Hasil_Prediksi_Rekomendasi_Penyiraman_AWS_02"

[database]
url = "https://example-default-rtdb.asia-southeast1.firebasedatabase.app"

[model]
model_path = "/models/weather.json"
scaler_x_path = "/models/scaler_x.json"
scaler_y_path = "/models/scaler_y.json"
"#;

    #[test]
    fn test_parse_basic_config_with_defaults() {
        let config = StationConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.station.source_path, "aws_02");
        assert_eq!(config.database.timeout_seconds, 30);
        assert!(config.database.auth.is_none());
        assert_eq!(config.schedule.utc_offset_hours, 7);
        assert_eq!(config.schedule.slot_hours, DEFAULT_SLOT_HOURS.to_vec());
        assert_eq!(config.recommendation.profile, RecommendationProfile::SachaInchi);
        assert_eq!(config.store.backend, StoreBackend::Firebase);
        assert!(config.validate().is_ok());
        assert_eq!(config.recommendation_ladder().unwrap().recommend(2), "Tidak Menguntungkan");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("STATION_FORECAST_TEST_AUTH", "secret-token");
        let content = BASIC.replace(
            "[model]",
            "auth = \"${STATION_FORECAST_TEST_AUTH}\"\n\n[model]",
        );

        let config = StationConfig::from_toml_str(&content).unwrap();
        assert_eq!(config.database.auth.as_deref(), Some("secret-token"));

        std::env::remove_var("STATION_FORECAST_TEST_AUTH");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let content = BASIC.replace(
            "[model]",
            "auth = \"${STATION_FORECAST_UNSET_VARIABLE}\"\n\n[model]",
        );

        let config = StationConfig::from_toml_str(&content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_custom_recommendation_levels() {
        let content = format!(
            r#"{}
[recommendation]
profile = "custom"
fallback = "Tidak Perlu Penyiraman"

[[recommendation.levels]]
above = 5
label = "Siram Sekarang"

[[recommendation.levels]]
above = 1
label = "Siram Ringan"
"#,
            BASIC
        );

        let config = StationConfig::from_toml_str(&content).unwrap();
        let ladder = config.recommendation_ladder().unwrap();
        assert_eq!(ladder.recommend(6), "Siram Sekarang");
        assert_eq!(ladder.recommend(2), "Siram Ringan");
        assert_eq!(ladder.recommend(1), "Tidak Perlu Penyiraman");
    }

    #[test]
    fn test_custom_profile_requires_fallback() {
        let content = format!("{}\n[recommendation]\nprofile = \"custom\"\n", BASIC);
        let config = StationConfig::from_toml_str(&content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ForecastError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_values() {
        let bad_url = BASIC.replace("https://example-default-rtdb.asia-southeast1.firebasedatabase.app", "not a url");
        assert!(StationConfig::from_toml_str(&bad_url).unwrap().validate().is_err());

        let bad_slot = format!("{}\n[schedule]\nslot_hours = [0, 24]\n", BASIC);
        assert!(StationConfig::from_toml_str(&bad_slot).unwrap().validate().is_err());

        let file_without_root = format!("{}\n[store]\nbackend = \"file\"\n", BASIC);
        assert!(StationConfig::from_toml_str(&file_without_root)
            .unwrap()
            .validate()
            .is_err());
    }

    #[test]
    fn test_config_from_file_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aws_02.toml");
        let content = BASIC.replace("/models/weather.json", "models/weather.json");
        std::fs::write(&path, content).unwrap();

        let config = StationConfig::from_file(&path).unwrap();
        assert_eq!(
            PathBuf::from(&config.model.model_path),
            dir.path().join("models/weather.json")
        );
        assert_eq!(config.model.scaler_x_path, "/models/scaler_x.json");
    }

    #[test]
    fn test_missing_section_is_parse_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[station]\nname = \"x\"\n").unwrap();

        let result = StationConfig::from_file(temp_file.path());
        assert!(matches!(result, Err(ForecastError::ConfigError { .. })));
    }
}
