//! Google Gemini adapter (`generateContent` REST endpoint)

use crate::ai::{GenerationRequest, GenerationResponse, GenerativeModel};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Gemini implementation
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(client: Client, base_url: &str, model: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: Empty,
}

#[derive(Debug, Serialize)]
struct Empty {}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
    #[serde(default)]
    grounding_metadata: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

fn build_body(request: &GenerationRequest) -> GenerateContentBody<'_> {
    let tools = if request.web_search {
        vec![Tool {
            google_search: Empty {},
        }]
    } else {
        Vec::new()
    };

    GenerateContentBody {
        contents: vec![Content {
            role: "user",
            parts: vec![Part {
                text: &request.prompt,
            }],
        }],
        tools,
        generation_config: request
            .temperature
            .map(|temperature| GenerationConfig { temperature }),
    }
}

fn into_response(body: GenerateContentResponse) -> Result<GenerationResponse> {
    let candidate = body
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Generation("Model returned no candidates".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AppError::Generation(format!(
            "Model returned no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(GenerationResponse {
        text,
        grounding: candidate.grounding_metadata,
    })
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&build_body(&request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiErrorBody>(&raw) {
                Ok(body) => match body.error.status {
                    Some(code) => format!("{} ({})", body.error.message, code),
                    None => body.error.message,
                },
                Err(_) => raw,
            };
            return Err(AppError::Generation(format!("{}: {}", status, message)));
        }

        into_response(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::spawn_mock_server;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    #[test]
    fn test_body_includes_search_and_temperature() {
        let request = GenerationRequest::new("hello")
            .with_web_search()
            .with_temperature(0.05);
        let body = serde_json::to_value(build_body(&request)).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["tools"][0]["google_search"], json!({}));
        assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_plain_body_omits_optional_sections() {
        let body = serde_json::to_value(build_body(&GenerationRequest::new("hi"))).unwrap();
        assert!(body.get("tools").is_none());
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_parts_are_concatenated() {
        let body: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "## North"}, {"text": " America"}]},
                "finishReason": "STOP",
                "groundingMetadata": {"groundingChunks": []}
            }]
        }))
        .unwrap();

        let response = into_response(body).unwrap();
        assert_eq!(response.text, "## North America");
        assert_eq!(response.grounding, Some(json!({"groundingChunks": []})));
    }

    #[test]
    fn test_blocked_candidate_is_generation_error() {
        let body: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();

        let err = into_response(body).unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
        assert!(err.to_string().contains("SAFETY"));
    }

    async fn generate_route(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some("key-123") {
            return (
                StatusCode::FORBIDDEN,
                Json(json!({"error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}})),
            );
        }
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default();
        (
            StatusCode::OK,
            Json(json!({
                "candidates": [{
                    "content": {"parts": [{"text": format!("echo: {}", prompt)}]},
                    "finishReason": "STOP"
                }]
            })),
        )
    }

    #[tokio::test]
    async fn test_generate_round_trip_against_mock() {
        let router = Router::new().route("/v1beta/models/*method", post(generate_route));
        let base = spawn_mock_server(router).await;

        let gemini = GeminiClient::new(Client::new(), &base, "test-model", "key-123");
        let response = gemini.generate(GenerationRequest::new("ping")).await.unwrap();
        assert_eq!(response.text, "echo: ping");
        assert_eq!(response.grounding, None);

        let denied = GeminiClient::new(Client::new(), &base, "test-model", "bad-key");
        let err = denied.generate(GenerationRequest::new("ping")).await.unwrap_err();
        assert!(err.to_string().contains("API key not valid (PERMISSION_DENIED)"));
    }
}
