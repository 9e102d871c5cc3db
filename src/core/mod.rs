pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{ForecastReport, LatestReading};
pub use crate::domain::ports::{DocumentStore, Pipeline, Regressor};
pub use crate::utils::error::Result;
