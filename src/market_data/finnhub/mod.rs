//! Finnhub market data adapter

use crate::error::{AppError, Result};
use crate::market_data::types::*;
use crate::market_data::MarketDataProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://finnhub.io/api/v1";

/// Sent as a header so the token never appears in request urls or errors
const TOKEN_HEADER: &str = "X-Finnhub-Token";

/// Finnhub REST implementation
pub struct FinnhubClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FinnhubClient {
    pub fn new(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, symbol: &str) -> Result<T> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, path))
            .query(&[("symbol", symbol)])
            .header(TOKEN_HEADER, self.api_key.as_str())
            .header("accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::MarketData(format!(
                "Finnhub {} for {} returned {}",
                path, symbol, status
            )));
        }

        Ok(response.json().await?)
    }
}

/// `/quote` payload; Finnhub sends `null` or `0` for unknown symbols
#[derive(Debug, Deserialize)]
struct FinnhubQuote {
    #[serde(default)]
    c: Option<f64>,
    #[serde(default)]
    dp: Option<f64>,
}

/// `/stock/profile2` payload; empty object for unknown symbols
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinnhubProfile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    market_capitalization: Option<f64>,
}

#[async_trait]
impl MarketDataProvider for FinnhubClient {
    fn id(&self) -> &'static str {
        "finnhub"
    }

    async fn get_quote(&self, symbol: &str) -> Result<QuoteSnapshot> {
        let quote: FinnhubQuote = self.get_json("quote", symbol).await?;

        Ok(QuoteSnapshot {
            current_price: quote.c,
            change_percent: quote.dp,
        })
    }

    async fn get_profile(&self, symbol: &str) -> Result<CompanyProfile> {
        let profile: FinnhubProfile = self.get_json("stock/profile2", symbol).await?;

        Ok(CompanyProfile {
            name: profile.name.filter(|n| !n.is_empty()),
            market_cap_millions: profile.market_capitalization,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::spawn_mock_server;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn quote_route(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> (StatusCode, Json<Value>) {
        let token = headers.get("x-finnhub-token").and_then(|v| v.to_str().ok());
        if token != Some("test-token") || params.contains_key("token") {
            return (StatusCode::UNAUTHORIZED, Json(json!({"error": "Invalid API key"})));
        }
        match params.get("symbol").map(String::as_str) {
            Some("AAPL") => (
                StatusCode::OK,
                Json(json!({"c": 227.5, "d": 6.1, "dp": 2.76, "h": 228.0, "l": 221.0})),
            ),
            _ => (StatusCode::OK, Json(json!({"c": 0, "d": null, "dp": null}))),
        }
    }

    async fn profile_route(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        match params.get("symbol").map(String::as_str) {
            Some("AAPL") => Json(json!({"name": "Apple Inc", "marketCapitalization": 3_400_000.5})),
            _ => Json(json!({})),
        }
    }

    async fn client() -> FinnhubClient {
        let router = Router::new()
            .route("/quote", get(quote_route))
            .route("/stock/profile2", get(profile_route));
        let base = spawn_mock_server(router).await;
        FinnhubClient::new(Client::new(), &base, "test-token")
    }

    #[tokio::test]
    async fn test_quote_and_profile_are_mapped() {
        let finnhub = client().await;

        let quote = finnhub.get_quote("AAPL").await.unwrap();
        assert_eq!(quote.current_price, Some(227.5));
        assert_eq!(quote.change_percent, Some(2.76));

        let profile = finnhub.get_profile("AAPL").await.unwrap();
        assert_eq!(profile.name.as_deref(), Some("Apple Inc"));
        assert_eq!(profile.market_cap_millions, Some(3_400_000.5));
    }

    #[tokio::test]
    async fn test_unknown_symbol_yields_empty_fields() {
        let finnhub = client().await;

        let quote = finnhub.get_quote("NOPE").await.unwrap();
        assert_eq!(quote.current_price, Some(0.0));
        assert_eq!(quote.change_percent, None);

        let profile = finnhub.get_profile("NOPE").await.unwrap();
        assert_eq!(profile, CompanyProfile::default());
    }

    #[tokio::test]
    async fn test_error_status_is_market_data_error() {
        let router = Router::new().route("/quote", get(quote_route));
        let base = spawn_mock_server(router).await;
        let finnhub = FinnhubClient::new(Client::new(), &base, "wrong");

        let err = finnhub.get_quote("AAPL").await.unwrap_err();
        assert!(matches!(err, AppError::MarketData(_)));
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_transport_error_does_not_leak_token() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let token = "SECRET-TOKEN-123";
        let finnhub = FinnhubClient::new(Client::new(), &format!("http://{}", addr), token);

        let err = finnhub.get_quote("AAPL").await.unwrap_err();
        assert!(matches!(err, AppError::Http(_)));
        assert!(!err.to_string().contains(token), "{}", err);
    }
}
