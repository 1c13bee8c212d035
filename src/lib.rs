//! Market Brief - daily pre-market news report
//!
//! Finds the previous trading session's market movers with a search-grounded
//! model, verifies the large ones against market data, has the model write a
//! regional report and stores it as JSON. One HTTP request runs one cycle.

pub mod ai;
pub mod cli;
pub mod config;
pub mod dates;
pub mod error;
pub mod http;
pub mod market_data;
pub mod services;
pub mod state;
pub mod storage;

#[cfg(test)]
mod testing;

use config::Config;
use error::Result;
use http::BriefResponse;
use state::AppState;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging from `RUST_LOG`
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "market_brief=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the HTTP trigger until shutdown
pub async fn serve(config: Config) -> Result<()> {
    tracing::info!("Starting Market Brief...");

    let state = Arc::new(AppState::new(&config)?);
    http::serve(config.bind_addr, state).await
}

/// Run a single brief cycle and return the trigger response
pub async fn run_once(config: &Config) -> Result<BriefResponse> {
    let state = AppState::new(config)?;
    let (_, response) = http::handlers::run_trigger(&state).await;
    Ok(response)
}
