//! Verification Service
//!
//! Checks discovery candidates against the market data provider and keeps
//! the ones that satisfy the Mega-Cap Momentum rule. Every ticker fails soft:
//! a lookup error or missing field only drops that ticker.

use crate::market_data::types::{CompanyProfile, QuoteSnapshot, TickerQuote};
use crate::market_data::MarketDataProvider;
use futures_util::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{info, warn};

/// Market data verifier for discovery candidates
pub struct MarketDataVerifier {
    provider: Arc<dyn MarketDataProvider>,
    concurrency: usize,
}

impl MarketDataVerifier {
    /// `concurrency` bounds how many tickers are looked up at once; results
    /// keep input order regardless.
    pub fn new(provider: Arc<dyn MarketDataProvider>, concurrency: usize) -> Self {
        Self {
            provider,
            concurrency: concurrency.max(1),
        }
    }

    /// Fetch quote and profile for one ticker.
    ///
    /// Returns `None` when either lookup fails or when the current price,
    /// percent change or market cap is missing or zero. A genuine 0% move or
    /// $0 cap is indistinguishable from "no data" here.
    pub async fn fetch_metrics(&self, ticker: &str) -> Option<TickerQuote> {
        lookup_metrics(Arc::clone(&self.provider), ticker.to_string()).await
    }

    /// Mega-Cap Momentum rule
    pub fn is_mega_cap_mover(quote: &TickerQuote) -> bool {
        quote.is_mega_cap_mover()
    }

    /// Verified movers among `tickers`, in input order. Duplicates are kept.
    pub async fn verify_batch(&self, tickers: &[String]) -> Vec<TickerQuote> {
        // Lookups own their inputs; a borrowing stream here makes the handler future non-Send
        let lookups: Vec<_> = tickers
            .iter()
            .map(|ticker| lookup_metrics(Arc::clone(&self.provider), ticker.clone()))
            .collect();

        let results: Vec<Option<TickerQuote>> = stream::iter(lookups)
            .buffered(self.concurrency)
            .collect()
            .await;
        let verified: Vec<TickerQuote> = results.into_iter().flatten().collect();

        let verified_count = verified.len();
        let movers: Vec<TickerQuote> = verified
            .into_iter()
            .filter(Self::is_mega_cap_mover)
            .collect();

        info!(
            "Verified {} of {} candidates, {} mega-cap movers",
            verified_count,
            tickers.len(),
            movers.len()
        );

        movers
    }
}

async fn lookup_metrics(provider: Arc<dyn MarketDataProvider>, ticker: String) -> Option<TickerQuote> {
    let lookups = tokio::try_join!(provider.get_quote(&ticker), provider.get_profile(&ticker));

    match lookups {
        Ok((quote, profile)) => metrics_from(&ticker, quote, profile),
        Err(e) => {
            warn!("Error fetching {} data for {}: {}", provider.id(), ticker, e);
            None
        }
    }
}

/// Zero counts as absent, like any other missing value
fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

fn metrics_from(ticker: &str, quote: QuoteSnapshot, profile: CompanyProfile) -> Option<TickerQuote> {
    non_zero(quote.current_price)?;
    let price_change_percent = non_zero(quote.change_percent)?;
    let market_cap_millions = non_zero(profile.market_cap_millions)?;

    Some(TickerQuote {
        ticker: ticker.to_string(),
        name: profile.name.unwrap_or_else(|| ticker.to_string()),
        market_cap_millions,
        price_change_percent,
    })
}
