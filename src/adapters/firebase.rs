use crate::config::DatabaseConfig;
use crate::domain::ports::DocumentStore;
use crate::utils::error::{ForecastError, Result};
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;

/// Realtime Database over its REST interface.
#[derive(Debug, Clone)]
pub struct FirebaseStore {
    base_url: String,
    auth: Option<String>,
    client: Client,
}

impl FirebaseStore {
    pub fn new(config: &DatabaseConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            auth: config.auth.clone(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}.json", self.base_url, path.trim_matches('/'))
    }

    fn with_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Some(token) => request.query(&[("auth", token)]),
            None => request,
        }
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        // Error bodies look like {"error": "Permission denied"}
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or(body);
        Err(ForecastError::StoreError {
            status: status.as_u16(),
            message,
        })
    }
}

impl DocumentStore for FirebaseStore {
    async fn latest_child(&self, path: &str) -> Result<Option<(String, serde_json::Value)>> {
        let url = self.endpoint(path);
        tracing::debug!("Querying latest child of: {}", url);

        let request = self
            .client
            .get(&url)
            .query(&[("orderBy", "\"$key\""), ("limitToLast", "1")]);
        let response = Self::check_status(self.with_auth(request).send().await?).await?;
        tracing::debug!("Database response status: {}", response.status());

        match response.json::<serde_json::Value>().await? {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::Object(children) => Ok(children
                .into_iter()
                .max_by(|(a, _), (b, _)| a.cmp(b))),
            other => Err(ForecastError::DataError {
                message: format!("expected an object under '{}', got {}", path, other),
            }),
        }
    }

    async fn set(&self, path: &str, document: &serde_json::Value) -> Result<()> {
        let url = self.endpoint(path);
        tracing::debug!("Writing document to: {}", url);

        let request = self.client.put(&url).json(document);
        Self::check_status(self.with_auth(request).send().await?).await?;
        Ok(())
    }
}
