pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod inference;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{FileStore, FirebaseStore, StationStore};
pub use config::StationConfig;
pub use core::{
    engine::{ForecastEngine, RunOutcome},
    pipeline::ForecastPipeline,
};
pub use inference::WeatherPredictor;
pub use utils::error::{ForecastError, Result};
