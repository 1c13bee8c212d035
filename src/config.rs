//! Service configuration
//!
//! Built once at startup from environment variables (and `.env` if present),
//! then shared read-only by the services.

use crate::ai::gemini;
use crate::error::{AppError, Result};
use crate::market_data::finnhub;
use crate::storage::gcs;
use chrono_tz::Tz;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BUCKET: &str = "your-market-brief-bucket";
pub const DEFAULT_SYNTHESIS_TEMPERATURE: f32 = 0.05;
pub const DEFAULT_VERIFY_CONCURRENCY: usize = 4;

/// Where published briefs are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Gcs,
    Local,
}

impl FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gcs" => Ok(StorageBackend::Gcs),
            "local" => Ok(StorageBackend::Local),
            other => Err(AppError::Config(format!(
                "invalid STORAGE_BACKEND '{}'; expected one of: gcs, local",
                other
            ))),
        }
    }
}

/// Generative model settings
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Checked on every run, not at startup
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub synthesis_temperature: f32,
}

/// Market data settings
#[derive(Debug, Clone)]
pub struct MarketDataConfig {
    pub api_key: String,
    pub base_url: String,
    pub verify_concurrency: usize,
}

/// Object storage settings
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub bucket: String,
    pub gcs_base_url: String,
    pub gcs_access_token: Option<String>,
    pub local_dir: PathBuf,
}

/// Complete service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub timezone: Tz,
    pub http_timeout: Duration,
    pub ai: AiConfig,
    pub market_data: MarketDataConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = parse_var(&var, "PORT", 8080)?;
        let bind_addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid HOST/PORT {}:{}: {}", host, port, e)))?;

        let timezone = match var("BRIEF_TIMEZONE") {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|e| AppError::Config(format!("Invalid BRIEF_TIMEZONE '{}': {}", name, e)))?,
            None => Tz::UTC,
        };

        let http_timeout = Duration::from_secs(parse_var(&var, "HTTP_TIMEOUT_SECS", 30u64)?);

        let ai = AiConfig {
            api_key: var("GOOGLE_API_KEY"),
            model: var("GEMINI_MODEL").unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string()),
            base_url: base_url(&var, "GEMINI_BASE_URL", gemini::DEFAULT_BASE_URL)?,
            synthesis_temperature: parse_var(
                &var,
                "SYNTHESIS_TEMPERATURE",
                DEFAULT_SYNTHESIS_TEMPERATURE,
            )?,
        };

        let market_data = MarketDataConfig {
            api_key: var("FINNHUB_API_KEY").unwrap_or_default(),
            base_url: base_url(&var, "FINNHUB_BASE_URL", finnhub::DEFAULT_BASE_URL)?,
            verify_concurrency: parse_var(&var, "VERIFY_CONCURRENCY", DEFAULT_VERIFY_CONCURRENCY)?
                .max(1),
        };

        let storage = StorageConfig {
            backend: match var("STORAGE_BACKEND") {
                Some(s) => s.parse()?,
                None => StorageBackend::Gcs,
            },
            bucket: var("BRIEF_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            gcs_base_url: base_url(&var, "GCS_BASE_URL", gcs::DEFAULT_BASE_URL)?,
            gcs_access_token: var("GCS_ACCESS_TOKEN"),
            local_dir: PathBuf::from(var("LOCAL_STORAGE_DIR").unwrap_or_else(|| "./briefs".to_string())),
        };

        if market_data.api_key.is_empty() {
            tracing::warn!("FINNHUB_API_KEY is not set; every ticker will fail verification");
        }

        Ok(Self {
            bind_addr,
            timezone,
            http_timeout,
            ai,
            market_data,
            storage,
        })
    }
}

fn parse_var<T, V>(var: &V, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    V: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid {} '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}

fn base_url<V>(var: &V, key: &str, default: &str) -> Result<String>
where
    V: Fn(&str) -> Option<String>,
{
    let raw = var(key).unwrap_or_else(|| default.to_string());
    Url::parse(&raw).map_err(|e| AppError::Config(format!("Invalid {} '{}': {}", key, raw, e)))?;
    Ok(raw)
}
