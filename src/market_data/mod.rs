//! Market data providers module

pub mod finnhub;
pub mod types;

use crate::error::Result;
use async_trait::async_trait;
use types::*;

/// Market data provider trait. One quote and one profile lookup per symbol.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Provider ID (e.g., "finnhub")
    fn id(&self) -> &'static str;

    /// Current price and same-day percent change
    async fn get_quote(&self, symbol: &str) -> Result<QuoteSnapshot>;

    /// Display name and market capitalization in millions
    async fn get_profile(&self, symbol: &str) -> Result<CompanyProfile>;
}
