use crate::domain::ports::DocumentStore;
use crate::utils::error::{ForecastError, Result};
use std::path::{Path, PathBuf};

/// Local mirror of the database: the document at `a/b` lives in `{root}/a/b.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn document_path(&self, path: &str) -> PathBuf {
        let mut full_path = self.root.clone();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            full_path.push(segment);
        }
        full_path.set_extension("json");
        full_path
    }

    fn read_document(path: &Path) -> Result<Option<serde_json::Value>> {
        match std::fs::read(path) {
            Ok(data) => Ok(Some(serde_json::from_slice(&data)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl DocumentStore for FileStore {
    async fn latest_child(&self, path: &str) -> Result<Option<(String, serde_json::Value)>> {
        let file = self.document_path(path);
        tracing::debug!("Reading collection file: {}", file.display());

        match Self::read_document(&file)? {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::Object(children)) => {
                Ok(children.into_iter().max_by(|(a, _), (b, _)| a.cmp(b)))
            }
            Some(other) => Err(ForecastError::DataError {
                message: format!("expected an object in {}, got {}", file.display(), other),
            }),
        }
    }

    async fn set(&self, path: &str, document: &serde_json::Value) -> Result<()> {
        let file = self.document_path(path);

        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&file, serde_json::to_vec_pretty(document)?)?;
        tracing::debug!("Wrote document file: {}", file.display());
        Ok(())
    }
}
