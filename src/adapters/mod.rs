// Adapters layer: concrete document stores behind the `DocumentStore` port.

pub mod file_store;
pub mod firebase;

pub use file_store::FileStore;
pub use firebase::FirebaseStore;

use crate::config::{StationConfig, StoreBackend};
use crate::domain::ports::DocumentStore;
use crate::utils::error::{ForecastError, Result};

/// Backend chosen by the station configuration.
#[derive(Debug, Clone)]
pub enum StationStore {
    Firebase(FirebaseStore),
    File(FileStore),
}

impl StationStore {
    pub fn from_config(config: &StationConfig) -> Result<Self> {
        match config.store.backend {
            StoreBackend::Firebase => Ok(StationStore::Firebase(FirebaseStore::new(&config.database)?)),
            StoreBackend::File => {
                let root = config
                    .file_store_root()
                    .ok_or_else(|| ForecastError::MissingConfigError {
                        field: "store.root".to_string(),
                    })?;
                Ok(StationStore::File(FileStore::new(root)))
            }
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            StationStore::Firebase(_) => "firebase",
            StationStore::File(_) => "file",
        }
    }
}

impl DocumentStore for StationStore {
    async fn latest_child(&self, path: &str) -> Result<Option<(String, serde_json::Value)>> {
        match self {
            StationStore::Firebase(store) => store.latest_child(path).await,
            StationStore::File(store) => store.latest_child(path).await,
        }
    }

    async fn set(&self, path: &str, document: &serde_json::Value) -> Result<()> {
        match self {
            StationStore::Firebase(store) => store.set(path, document).await,
            StationStore::File(store) => store.set(path, document).await,
        }
    }
}
