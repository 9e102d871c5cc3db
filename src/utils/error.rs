use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Model error: {message}")]
    ModelError { message: String },

    #[error("Document store error ({status}): {message}")]
    StoreError { status: u16, message: String },

    #[error("Sensor data error: {message}")]
    DataError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Model,
    Data,
    System,
}

impl ForecastError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ForecastError::ConfigError { .. }
            | ForecastError::MissingConfigError { .. }
            | ForecastError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ForecastError::ApiError(_) | ForecastError::StoreError { .. } => ErrorCategory::Network,
            ForecastError::ModelError { .. } => ErrorCategory::Model,
            ForecastError::SerializationError(_) | ForecastError::DataError { .. } => {
                ErrorCategory::Data
            }
            ForecastError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the station TOML file and referenced environment variables",
            ErrorCategory::Network => "Check the database URL, auth token and network connectivity",
            ErrorCategory::Model => "Re-export the model and scaler artifacts and verify their shapes",
            ErrorCategory::Data => "Inspect the latest sensor record in the document store",
            ErrorCategory::System => "Check file paths and permissions",
        }
    }

    pub(crate) fn model(message: impl Into<String>) -> Self {
        ForecastError::ModelError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ForecastError>;
