//! Application state management

use crate::ai::gemini::GeminiClient;
use crate::ai::GenerativeModel;
use crate::config::{Config, StorageBackend};
use crate::error::{AppError, Result};
use crate::market_data::finnhub::FinnhubClient;
use crate::services::{BriefService, MarketDataVerifier, PublishService};
use crate::storage::gcs::GcsStore;
use crate::storage::local::LocalStore;
use crate::storage::ObjectStore;
use reqwest::Client;
use std::sync::Arc;
use tracing::{info, warn};

/// Services shared by every trigger invocation
pub struct AppState {
    pub briefs: BriefService,
    pub publisher: PublishService,
}

impl AppState {
    /// Build the concrete adapters named by `config`
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        let model: Option<Arc<dyn GenerativeModel>> = match &config.ai.api_key {
            Some(api_key) => Some(Arc::new(GeminiClient::new(
                client.clone(),
                &config.ai.base_url,
                &config.ai.model,
                api_key,
            ))),
            None => {
                warn!("GOOGLE_API_KEY is not set; brief runs will fail until it is");
                None
            }
        };

        let market_data = FinnhubClient::new(
            client.clone(),
            &config.market_data.base_url,
            &config.market_data.api_key,
        );
        let verifier = MarketDataVerifier::new(
            Arc::new(market_data),
            config.market_data.verify_concurrency,
        );

        let store: Arc<dyn ObjectStore> = match config.storage.backend {
            StorageBackend::Gcs => Arc::new(GcsStore::new(
                client,
                &config.storage.gcs_base_url,
                &config.storage.bucket,
                config.storage.gcs_access_token.clone(),
            )),
            StorageBackend::Local => Arc::new(LocalStore::new(config.storage.local_dir.clone())),
        };

        info!(
            "Using model {}, {} store at {}",
            config.ai.model,
            store.id(),
            store.container()
        );

        let briefs = BriefService::new(
            model,
            verifier,
            config.ai.synthesis_temperature,
            config.timezone,
        );
        let publisher = PublishService::new(store, config.timezone);

        Ok(Self::from_services(briefs, publisher))
    }

    pub fn from_services(briefs: BriefService, publisher: PublishService) -> Self {
        Self { briefs, publisher }
    }
}
