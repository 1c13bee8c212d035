//! Test doubles shared by the unit tests

use crate::ai::{GenerationRequest, GenerationResponse, GenerativeModel};
use crate::error::{AppError, Result};
use crate::market_data::types::{CompanyProfile, QuoteSnapshot};
use crate::market_data::MarketDataProvider;
use crate::storage::ObjectStore;
use async_trait::async_trait;
use axum::Router;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Serve `router` on an ephemeral local port and return its base url
pub async fn spawn_mock_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

// ============================================================================
// Generative model
// ============================================================================

/// Model that answers from a script, in order, and records every request
#[derive(Clone, Default)]
pub struct StubModel {
    script: Arc<Mutex<VecDeque<std::result::Result<GenerationResponse, String>>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl StubModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.script.lock().push_back(Ok(GenerationResponse {
            text: text.to_string(),
            grounding: None,
        }));
        self
    }

    pub fn reply_with_grounding(self, text: &str, grounding: Value) -> Self {
        self.script.lock().push_back(Ok(GenerationResponse {
            text: text.to_string(),
            grounding: Some(grounding),
        }));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.script.lock().push_back(Err(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl GenerativeModel for StubModel {
    fn model_name(&self) -> &str {
        "stub-model"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        self.requests.lock().push(request);

        match self.script.lock().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(AppError::Generation(message)),
            None => Err(AppError::Generation("script exhausted".to_string())),
        }
    }
}

// ============================================================================
// Market data
// ============================================================================

/// In-memory market data. Unknown symbols get empty quote and profile.
#[derive(Clone, Default)]
pub struct StubMarketData {
    quotes: HashMap<String, Option<QuoteSnapshot>>,
    profiles: HashMap<String, Option<CompanyProfile>>,
}

impl StubMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ticker(mut self, symbol: &str, name: &str, cap_millions: f64, change_percent: f64) -> Self {
        self.quotes.insert(
            symbol.to_string(),
            Some(QuoteSnapshot {
                current_price: Some(100.0),
                change_percent: Some(change_percent),
            }),
        );
        self.profiles.insert(
            symbol.to_string(),
            Some(CompanyProfile {
                name: Some(name.to_string()),
                market_cap_millions: Some(cap_millions),
            }),
        );
        self
    }

    /// Quote known, profile empty
    pub fn with_quote_only(mut self, symbol: &str, price: f64, change_percent: f64) -> Self {
        self.quotes.insert(
            symbol.to_string(),
            Some(QuoteSnapshot {
                current_price: Some(price),
                change_percent: Some(change_percent),
            }),
        );
        self
    }

    pub fn failing_quote(mut self, symbol: &str) -> Self {
        self.quotes.insert(symbol.to_string(), None);
        self
    }

    pub fn failing_profile(mut self, symbol: &str) -> Self {
        self.profiles.insert(symbol.to_string(), None);
        self
    }
}

#[async_trait]
impl MarketDataProvider for StubMarketData {
    fn id(&self) -> &'static str {
        "stub"
    }

    async fn get_quote(&self, symbol: &str) -> Result<QuoteSnapshot> {
        match self.quotes.get(symbol) {
            Some(Some(quote)) => Ok(quote.clone()),
            Some(None) => Err(AppError::MarketData(format!("quote for {} returned 500", symbol))),
            None => Ok(QuoteSnapshot::default()),
        }
    }

    async fn get_profile(&self, symbol: &str) -> Result<CompanyProfile> {
        match self.profiles.get(symbol) {
            Some(Some(profile)) => Ok(profile.clone()),
            Some(None) => Err(AppError::MarketData(format!("profile for {} returned 500", symbol))),
            None => Ok(CompanyProfile::default()),
        }
    }
}

// ============================================================================
// Object stores
// ============================================================================

/// Store that keeps every object in memory
#[derive(Clone)]
pub struct RecordingStore {
    bucket: String,
    objects: Arc<Mutex<Vec<(String, Vec<u8>, String)>>>,
}

impl RecordingStore {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            objects: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// `(name, body, content_type)` in write order
    pub fn objects(&self) -> Vec<(String, Vec<u8>, String)> {
        self.objects.lock().clone()
    }
}

#[async_trait]
impl ObjectStore for RecordingStore {
    fn id(&self) -> &'static str {
        "memory"
    }

    fn container(&self) -> &str {
        &self.bucket
    }

    async fn create_object(&self, name: &str, body: Vec<u8>, content_type: &str) -> Result<()> {
        self.objects
            .lock()
            .push((name.to_string(), body, content_type.to_string()));
        Ok(())
    }
}

/// Store that rejects every write
pub struct FailingStore;

#[async_trait]
impl ObjectStore for FailingStore {
    fn id(&self) -> &'static str {
        "failing"
    }

    fn container(&self) -> &str {
        "locked-bucket"
    }

    async fn create_object(&self, _name: &str, _body: Vec<u8>, _content_type: &str) -> Result<()> {
        Err(AppError::Storage("403 Forbidden: permission denied".to_string()))
    }
}
