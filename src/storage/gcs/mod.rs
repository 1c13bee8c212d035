//! Google Cloud Storage adapter (JSON API media upload)

use crate::error::{AppError, Result};
use crate::storage::ObjectStore;
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};

pub const DEFAULT_BASE_URL: &str = "https://storage.googleapis.com";

const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

/// Refresh this long before the metadata server says the token expires
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// GCS bucket writer
pub struct GcsStore {
    client: Client,
    base_url: String,
    bucket: String,
    static_token: Option<String>,
    metadata_url: String,
    cached_token: Mutex<Option<CachedToken>>,
}

impl GcsStore {
    pub fn new(client: Client, base_url: &str, bucket: &str, static_token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            static_token,
            metadata_url: METADATA_TOKEN_URL.to_string(),
            cached_token: Mutex::new(None),
        }
    }

    /// Point token lookups at a different metadata endpoint
    pub fn with_metadata_url(mut self, url: &str) -> Self {
        self.metadata_url = url.to_string();
        self
    }

    /// Bearer token: static token if configured, otherwise the instance
    /// service account token from the metadata server.
    async fn access_token(&self) -> Result<String> {
        if let Some(token) = &self.static_token {
            return Ok(token.clone());
        }

        let cached = self.cached_token.lock().clone();
        if let Some(cached) = cached {
            if cached.expires_at > Instant::now() {
                return Ok(cached.value);
            }
        }

        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
            #[serde(default)]
            expires_in: u64,
        }

        let response = self
            .client
            .get(&self.metadata_url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Storage(format!(
                "Metadata server token request returned {}",
                status
            )));
        }

        let token: TokenResponse = response.json().await?;
        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);

        *self.cached_token.lock() = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });

        Ok(token.access_token)
    }
}

#[async_trait]
impl ObjectStore for GcsStore {
    fn id(&self) -> &'static str {
        "gcs"
    }

    fn container(&self) -> &str {
        &self.bucket
    }

    async fn create_object(&self, name: &str, body: Vec<u8>, content_type: &str) -> Result<()> {
        let token = self.access_token().await?;

        let url = format!(
            "{}/upload/storage/v1/b/{}/o?uploadType=media&name={}",
            self.base_url,
            urlencoding::encode(&self.bucket),
            urlencoding::encode(name)
        );

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .header("Content-Type", content_type)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::Storage(format!(
                "Upload of {} to bucket {} returned {}: {}",
                name, self.bucket, status, detail
            )));
        }

        tracing::info!("Uploaded {} to gs://{}", name, self.bucket);
        Ok(())
    }
}
