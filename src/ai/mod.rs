//! Generative text service module

pub mod gemini;

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// One text-generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Let the model ground its answer in web search results
    pub web_search: bool,
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            web_search: false,
            temperature: None,
        }
    }

    pub fn with_web_search(mut self) -> Self {
        self.web_search = true;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Generated text plus the raw grounding metadata, if the service sent any
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationResponse {
    pub text: String,
    pub grounding: Option<Value>,
}

/// Generative model trait that all text services must implement
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Model identifier (e.g., "gemini-3-flash-preview")
    fn model_name(&self) -> &str;

    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse>;
}
