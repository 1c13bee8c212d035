//! Brief Service
//!
//! Runs the three brief steps in order:
//!
//! 1. Discovery: the model names candidate tickers for the target date.
//! 2. Verification: candidates are checked against market data.
//! 3. Synthesis: the model writes the report, with verified movers as
//!    mandatory context.
//!
//! A failure in discovery or synthesis fails the whole brief. Verification
//! never fails; it only narrows the mover list.

use crate::ai::{GenerationRequest, GenerativeModel};
use crate::dates::TradingDayResult;
use crate::error::{AppError, Result};
use crate::services::prompts;
use crate::services::sources::{extract_sources, SourceEntry};
use crate::services::verification_service::MarketDataVerifier;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Generation timestamp layout
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BriefStatus {
    Success,
    Error,
}

/// Outcome of one brief run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefResult {
    pub status: BriefStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub sources: Vec<SourceEntry>,
    pub timestamp: String,
    pub display_date: String,
    pub target_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BriefResult {
    pub fn success(
        dates: TradingDayResult,
        content: String,
        sources: Vec<SourceEntry>,
        timestamp: String,
    ) -> Self {
        Self {
            status: BriefStatus::Success,
            content: Some(content),
            sources,
            timestamp,
            display_date: dates.display_date,
            target_date: dates.target_date,
            error: None,
        }
    }

    pub fn failure(dates: TradingDayResult, err: &AppError, timestamp: String) -> Self {
        Self {
            status: BriefStatus::Error,
            content: None,
            sources: Vec::new(),
            timestamp,
            display_date: dates.display_date,
            target_date: dates.target_date,
            error: Some(err.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == BriefStatus::Success
    }
}

/// Strip markdown code fences and decode a JSON array of ticker strings
pub fn parse_ticker_list(raw: &str) -> Result<Vec<String>> {
    let cleaned = raw.replace("```json", "").replace("```", "");

    serde_json::from_str::<Vec<String>>(cleaned.trim()).map_err(|e| {
        AppError::MalformedOutput(format!("Could not parse ticker candidates: {}", e))
    })
}

/// Brief orchestration
pub struct BriefService {
    /// `None` when no AI credential is configured
    model: Option<Arc<dyn GenerativeModel>>,
    verifier: MarketDataVerifier,
    synthesis_temperature: f32,
    timezone: Tz,
}

impl BriefService {
    pub fn new(
        model: Option<Arc<dyn GenerativeModel>>,
        verifier: MarketDataVerifier,
        synthesis_temperature: f32,
        timezone: Tz,
    ) -> Self {
        Self {
            model,
            verifier,
            synthesis_temperature,
            timezone,
        }
    }

    /// Current time in the reporting timezone
    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.timezone)
    }

    /// Generate today's brief
    pub async fn generate(&self) -> BriefResult {
        self.generate_at(self.now()).await
    }

    /// Generate the brief for the calendar day of `reference`, stamped with
    /// `reference` as the generation time.
    ///
    /// Never returns an error: any failure becomes an `error` result that
    /// carries the message and no content.
    pub async fn generate_at(&self, reference: DateTime<Tz>) -> BriefResult {
        let dates = TradingDayResult::for_date(reference.date_naive());
        let timestamp = reference.format(TIMESTAMP_FORMAT).to_string();

        match self.run(&dates).await {
            Ok((content, sources)) => {
                info!(
                    "Brief for {} generated ({} chars, {} sources)",
                    dates.target_date,
                    content.len(),
                    sources.len()
                );
                BriefResult::success(dates, content, sources, timestamp)
            }
            Err(e) => {
                error!("Error generating brief: {}", e);
                BriefResult::failure(dates, &e, timestamp)
            }
        }
    }

    async fn run(&self, dates: &TradingDayResult) -> Result<(String, Vec<SourceEntry>)> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| AppError::Config("GOOGLE_API_KEY environment variable not set".to_string()))?;

        debug!("Generating with {}", model.model_name());

        info!("Step 1: Searching for market mover candidates...");
        let tickers = self.discover(model.as_ref(), &dates.target_date).await?;
        info!("Discovered {} candidates: {}", tickers.len(), tickers.join(", "));

        info!("Step 2: Verifying market cap & price change...");
        let movers = self.verifier.verify_batch(&tickers).await;

        info!("Step 3: Synthesizing report...");
        let context = prompts::mandatory_context(&movers);
        let prompt = prompts::synthesis_prompt(&dates.display_date, &dates.target_date, context.as_deref());

        let request = GenerationRequest::new(prompt)
            .with_web_search()
            .with_temperature(self.synthesis_temperature);
        let response = model.generate(request).await?;

        let sources = extract_sources(response.grounding.as_ref());
        Ok((response.text, sources))
    }

    /// Step 1: ask for candidate tickers and decode them
    async fn discover(&self, model: &dyn GenerativeModel, target_date: &str) -> Result<Vec<String>> {
        let request = GenerationRequest::new(prompts::discovery_prompt(target_date)).with_web_search();
        let response = model.generate(request).await?;

        parse_ticker_list(&response.text)
    }
}
